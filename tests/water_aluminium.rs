use approx::assert_abs_diff_eq;
use rtcal::{
    critical::Regime,
    database::MaterialDatabase,
    interface::Interface,
    settings,
    sweep::Sweep,
};

fn interface_from_config() -> Interface {
    let settings = settings::load_default_config().unwrap();
    let db = MaterialDatabase::from_file(&settings.materials_path()).unwrap();
    Interface::new(
        db.get(&settings.incident).unwrap(),
        db.get(&settings.transmission).unwrap(),
    )
}

#[test]
fn default_interface_is_water_aluminium() {
    let interface = interface_from_config();
    assert!(interface.incident.is_fluid());
    assert_eq!(interface.transmission.vs.re, 3040.0);

    let critical = interface.critical_angles();
    assert_abs_diff_eq!(critical.p.unwrap(), 13.3283, epsilon = 1e-3);
    assert_abs_diff_eq!(critical.s.unwrap(), 29.1332, epsilon = 1e-3);
}

#[test]
fn reference_energies() {
    let interface = interface_from_config();
    // angle, R_P, T_P, T_S
    let reference = [
        (0.0, 0.710093, 0.289907, 0.0),
        (5.0, 0.710589, 0.272227, 0.017184),
        (13.0, 0.828144, 0.138723, 0.033133),
        (20.0, 0.577095, 0.0, 0.422905),
        (28.0, 0.632379, 0.0, 0.367619),
    ];
    for (angle, rp, tp, ts) in reference {
        let e = interface.intensity_coefficients(angle).unwrap().energies;
        assert_abs_diff_eq!(e.reflected_p, rp, epsilon = 1e-5);
        assert_abs_diff_eq!(e.transmitted_p, tp, epsilon = 1e-5);
        assert_abs_diff_eq!(e.transmitted_s, ts, epsilon = 1e-5);
    }
}

#[test]
fn full_sweep() {
    let settings = settings::load_default_config().unwrap();
    let result = Sweep::new(
        interface_from_config(),
        settings.start,
        settings.end,
        settings.step,
        settings.singular_threshold,
    )
    .unwrap()
    .quiet()
    .run();

    assert_eq!(result.points.first().unwrap().angle, settings.start);
    assert_abs_diff_eq!(result.points.last().unwrap().angle, settings.end, epsilon = 1e-9);
    assert_eq!(result.params.failed, 0);
    assert!(result.params.worst_conservation_error.unwrap() < 1e-6);

    for point in &result.points {
        if point.regime.transmits_nothing() {
            assert_eq!(point.gated, (0.0, 0.0));
        }
        if point.regime == Regime::ModeConverted {
            assert_eq!(point.gated.0, 0.0);
        }
    }
}

#[test]
fn reversed_interface_conserves_energy() {
    let interface = interface_from_config().reversed();
    assert_eq!(interface.critical_angles().p, None);
    for angle in [0.0, 15.0, 45.0, 75.0] {
        let e = interface.intensity_coefficients(angle).unwrap().energies;
        assert_abs_diff_eq!(e.total(), 1.0, epsilon = 1e-6);
    }
}

#[test]
fn ranking_excludes_reference() {
    let settings = settings::load_default_config().unwrap();
    let db = MaterialDatabase::from_file(&settings.materials_path()).unwrap();
    let ranked = db.rank_by_distance("Aluminium").unwrap();
    assert_eq!(ranked.len(), db.len() - 1);
    assert!(ranked.iter().all(|(m, _)| m.name != "Aluminium"));
}
