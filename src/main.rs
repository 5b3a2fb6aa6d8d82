use std::collections::BTreeMap;
use std::path::Path;
use std::process::ExitCode;

use lmpdata::read_data_file;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(data_path) = args.next() else {
        eprintln!("usage: lmpdata <data file> [input scripts...]");
        return ExitCode::FAILURE;
    };
    let input_paths: Vec<String> = args.collect();
    let input_paths: Vec<&Path> = input_paths.iter().map(Path::new).collect();

    let (frame, connectivity, summary) = match read_data_file(Path::new(&data_path), &input_paths) {
        Ok(read) => read,
        Err(e) => {
            eprintln!("could not read {data_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{data_path}: {summary}");
    for species in frame.species() {
        match species.mass {
            Some(mass) => println!("  species '{}': mass {mass}", species.handle),
            None => println!("  species '{}': no mass", species.handle),
        }
    }
    let (lo, hi) = (frame.bounds.lo, frame.bounds.hi);
    println!(
        "  box: [{}, {}] x [{}, {}] x [{}, {}], volume {}",
        lo.x,
        hi.x,
        lo.y,
        hi.y,
        lo.z,
        hi.z,
        frame.bounds.volume()
    );

    let masses: Option<f64> = (0..frame.size())
        .map(|i| frame.species_of(i).and_then(|species| species.mass))
        .sum();
    match masses {
        Some(total) => println!("  total mass: {total}"),
        None => println!("  total mass: unknown, some atoms have no mass"),
    }

    let mut bond_types = BTreeMap::new();
    for (_, bond_type) in connectivity.bonds() {
        *bond_types.entry(bond_type).or_insert(0) += 1;
    }
    for (bond_type, count) in bond_types {
        println!("  bond type {bond_type}: {count} bonds");
    }
    ExitCode::SUCCESS
}
