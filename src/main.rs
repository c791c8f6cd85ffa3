#[macro_use]
extern crate clap;

use {
    anyhow::{bail, Result},
    byteorder::{ByteOrder, LittleEndian},
    charney_eliassen::{
        grid::Grid,
        parameters::Parameters,
        planet::LatitudeContext,
        spectral::{ModelParameters, Solver},
    },
    log::{error, info},
    rayon::prelude::*,
    simplelog::{Config as LogConfig, LevelFilter, TermLogger, TerminalMode},
    std::{f64::consts::PI, fs::File, io::prelude::*},
};

#[quit::main]
fn main() {
    let matches = clap_app!(charney_eliassen =>
        (version: crate_version!())
        (@arg PARAMETERS: -p --parameters +takes_value +required "Path to file containing model parameters.")
        (@subcommand solve =>
            (about: "Computes the steady stream-function response to the configured topography.")
        )
        (@subcommand sweep =>
            (about: "Reruns the solve over a range of zonal winds to map out the resonant response.")
        )
    )
    .get_matches();

    TermLogger::init(
        LevelFilter::Debug,
        LogConfig::default(),
        TerminalMode::Mixed,
    )
    .expect("Failed to initialize logger");

    let params = {
        // Should never panic as clap should return an error if the argument was not supplied
        let path = matches
            .value_of("PARAMETERS")
            .expect("Path to parameters file not supplied");

        let file = File::open(path).unwrap_or_else(|e| {
            error!("Failed to open {}: \"{}\"", path, e);
            quit::with_code(1);
        });

        let params = serde_yaml::from_reader::<_, Parameters>(file).unwrap_or_else(|e| {
            error!("Failed to parse parameters from {}: \"{}\"", path, e);
            quit::with_code(1);
        });

        info!(
            "Successfully loaded model parameters from \"{}\": \n{:#?}",
            path, params
        );

        params
    };

    run_subcommand(matches.subcommand_name(), params).unwrap_or_else(|e| {
        error!("Error: \"{}\"", e);
        quit::with_code(1);
    });
}

fn write_field(path: &str, data: &[f64]) -> Result<()> {
    let mut bytes = Vec::with_capacity(8 * data.len());
    let mut buf = [0u8; 8];
    for x in data {
        LittleEndian::write_f64(&mut buf, *x);
        bytes.extend_from_slice(&buf);
    }
    File::create(path)?.write_all(&bytes)?;
    Ok(())
}

fn run_subcommand(subcmd: Option<&str>, params: Parameters) -> Result<()> {
    let subcmd = match subcmd {
        Some(s) => s,
        None => bail!("No subcommand selected"),
    };

    info!("Starting {}", subcmd);

    let latitude = LatitudeContext::new(&params.planet, params.physical.latitude)?;
    let grid = Grid::new(&latitude, params.numerical.grid_resolution)?;
    let topography = params
        .topography
        .generate(&grid, &params.planet, params.physical.latitude)?;

    match subcmd {
        "solve" => {
            let model = ModelParameters::new(
                &params.planet,
                &latitude,
                &grid,
                params.physical.zonal_wind,
                params.physical.meridional_wavenumber,
                params.physical.damping_timescale,
            )?;

            let resonant_sq =
                model.stationary_wavenumber_sq - params.physical.meridional_wavenumber.powi(2);
            if resonant_sq > 0.0 {
                info!(
                    "resonant zonal mode near s = {:.2} waves around the circle",
                    resonant_sq.sqrt() * grid.length / (2.0 * PI)
                );
            }

            let solver = Solver::new(model);
            let psi = solver.solve(&topography)?;
            let height = solver.height_perturbation(&psi);

            let max = height.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let min = height.iter().cloned().fold(f64::INFINITY, f64::min);
            info!("height perturbation range: {:.1} m to {:.1} m", min, max);

            write_field("longitude.r8", &grid.longitudes().to_vec())?;
            write_field("topography.r8", &topography.to_vec())?;
            write_field("psi.r8", &psi.to_vec())?;
            write_field("height.r8", &height.to_vec())?;
        }
        "sweep" => {
            let sweep = &params.sweep;
            if sweep.steps < 2 {
                bail!("sweep requires at least two steps");
            }

            let step = (sweep.wind_stop - sweep.wind_start) / (sweep.steps - 1) as f64;
            let winds = (0..sweep.steps)
                .map(|i| sweep.wind_start + step * i as f64)
                .collect::<Vec<f64>>();

            // independent runs, no shared state beyond result collection
            let rows = winds
                .par_iter()
                .map(|&u| -> Result<Vec<f64>> {
                    let model = ModelParameters::new(
                        &params.planet,
                        &latitude,
                        &grid,
                        u,
                        params.physical.meridional_wavenumber,
                        params.physical.damping_timescale,
                    )?;
                    let solver = Solver::new(model);
                    let psi = solver.solve(&topography)?;
                    Ok(solver.height_perturbation(&psi).to_vec())
                })
                .collect::<Result<Vec<Vec<f64>>>>()?;

            write_field("winds.r8", &winds)?;
            write_field("sweep.r8", &rows.concat())?;

            info!(
                "wrote {} rows of {} points each",
                rows.len(),
                grid.num_points
            );
        }
        _ => {
            // Should be unreachable due to clap catching this error
            bail!("Unrecognized subcommand");
        }
    }

    info!("Finished {}", subcmd);

    Ok(())
}
