use anyhow::Result;
use rtcal::database::MaterialDatabase;
use rtcal::interface::Interface;
use rtcal::output;
use rtcal::settings::{self, Settings};
use rtcal::sweep::Sweep;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let settings = settings::load_config()?;
    println!("{}", settings);

    let db = MaterialDatabase::from_file(&settings.materials_path())?;
    let interface = Interface::new(db.get(&settings.incident)?, db.get(&settings.transmission)?);

    match settings.angle {
        Some(angle) => report(&interface, angle, &settings)?,
        None => {
            let result = Sweep::new(
                interface,
                settings.start,
                settings.end,
                settings.step,
                settings.singular_threshold,
            )?
            .run();
            result.print();

            let dir = settings.output_path();
            output::write_sweep(&result, &dir)?;
            output::write_settings(&settings, &dir)?;
        }
    }

    let table = match &settings.reference {
        Some(reference) => db
            .rank_by_distance(reference)?
            .into_iter()
            .map(|(material, distance)| (material, Some(distance)))
            .collect::<Vec<_>>(),
        None => db.materials.iter().cloned().map(|m| (m, None)).collect(),
    };
    output::write_materials(&table, &settings.output_path())?;

    Ok(())
}

fn report(interface: &Interface, angle: f64, settings: &Settings) -> Result<()> {
    let critical = interface.critical_angles();
    let (refr_p, refr_s) = interface.refraction_angles(angle);
    let (r, t) = interface.vertical_incidence_coefficients();
    let set = interface.solve(angle, settings.singular_threshold)?;
    let (gated_l, gated_s) =
        interface.transmitted_intensity_with(angle, settings.singular_threshold)?;

    let show = |angle: Option<f64>| match angle {
        Some(angle) => format!("{:.4} deg", angle),
        None => "none".to_string(),
    };

    println!(
        "Interface: {} -> {}",
        interface.incident.name, interface.transmission.name
    );
    println!("Critical angles:");
    println!("  First (P):        {}", show(critical.p));
    println!("  Second (S):       {}", show(critical.s));
    println!("Refraction angles:");
    println!("  Longitudinal:     {}", show(refr_p));
    println!("  Shear:            {}", show(refr_s));
    println!("Vertical incidence:");
    println!("  R:                {:.6}", r);
    println!("  T:                {:.6}", t);
    print!("{}", set);
    println!("Gated transmission:");
    println!("  Longitudinal:     {:.6}", gated_l);
    println!("  Shear:            {:.6}", gated_s);
    Ok(())
}
