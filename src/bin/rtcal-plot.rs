use macroquad::prelude::*;
use rtcal::database::MaterialDatabase;
use rtcal::helpers::{draw_sweep, PlotFrame};
use rtcal::interface::Interface;
use rtcal::settings;
use rtcal::sweep::Sweep;

#[macroquad::main("rtcal")]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = match settings::load_config() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{:#}", err);
            return;
        }
    };
    let interface = match MaterialDatabase::from_file(&settings.materials_path()).and_then(|db| {
        Ok(Interface::new(
            db.get(&settings.incident)?,
            db.get(&settings.transmission)?,
        ))
    }) {
        Ok(interface) => interface,
        Err(err) => {
            eprintln!("{:#}", err);
            return;
        }
    };

    let mut result = match Sweep::new(
        interface,
        settings.start,
        settings.end,
        settings.step,
        settings.singular_threshold,
    ) {
        Ok(sweep) => sweep.quiet().run(),
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };
    result.print();

    loop {
        clear_background(BLACK);

        draw_sweep(&result, &PlotFrame::from_screen());
        draw_text(
            &format!(
                "{} -> {}   [R] reverse",
                result.interface.incident.name, result.interface.transmission.name
            ),
            10.0,
            20.0,
            20.0,
            WHITE,
        );

        // swap incident and transmission media
        if is_key_pressed(KeyCode::R) {
            // same range as the first sweep, so this cannot fail
            if let Ok(sweep) = Sweep::new(
                result.interface.reversed(),
                settings.start,
                settings.end,
                settings.step,
                settings.singular_threshold,
            ) {
                result = sweep.quiet().run();
                result.print();
            }
        }

        next_frame().await;
    }
}
