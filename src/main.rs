use std::error::Error;
use std::{env, fs};

use beamx::{fixed, pinned, term, BeamConfig, BeamModel, CrossSection, ProfileKind};

fn main() -> Result<(), Box<dyn Error>> {
    // Either analyse a beam described by a JSON configuration file, or fall
    // back to the built-in demonstration case: a stepped shaft on four
    // supports carrying a point force and a point moment at the same
    // station.
    let config = match env::args().nth(1) {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => shaft_config()?,
    };

    let model = BeamModel::new(config)?;
    println!("{}", beamx::render_summary(&model));

    // Sample the deflected shape so the report can be sanity-checked
    // without a plotting front end.
    let stations: Vec<f64> = (0..=10)
        .map(|step| model.length() * f64::from(step) / 10.0)
        .collect();
    let deflections = model.evaluate_many(ProfileKind::Deflection, &stations);
    println!("Deflected shape:");
    for (x, y) in stations.iter().zip(&deflections) {
        println!("  y({x:.5}) = {y:+.6e}");
    }

    Ok(())
}

/// Shaft supported at both bearings and the clamped end, loaded by the gear
/// mesh force and moment between the bearings and the free end.
fn shaft_config() -> Result<BeamConfig, Box<dyn Error>> {
    let segments = [0.02375, 0.0314, 0.028];
    let length: f64 = segments.iter().sum();
    let gear_station = segments[0] + segments[1];

    let section = CrossSection::Circle { diameter: 0.03 };
    Ok(BeamConfig {
        length,
        elastic_modulus: 71.7e9,
        second_moment_of_area: section.second_moment_of_area()?,
        supports: vec![
            pinned(length),
            pinned(segments[0]),
            fixed(0.0),
            pinned(segments[1]),
        ],
        loads: vec![
            term(3_396.24, gear_station, -1),
            term(274.0, gear_station, -2),
        ],
    })
}
