use std::env;
use std::process;
use std::time::Instant;

use image_convolve::cli::{run, usage, Invocation, EXIT_FAILURE};
use image_convolve::filters::convolve::ConvolveOptions;
use image_convolve::FilterError;
use log::{debug, error, info};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let started = Instant::now();
    info!("Starting");

    let invocation = match Invocation::from_args(env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(_) => {
            print!("{}", usage());
            process::exit(EXIT_FAILURE);
        }
    };

    match run(&invocation, ConvolveOptions::default()) {
        Ok(()) => info!("Took {:.3} seconds", started.elapsed().as_secs_f64()),
        Err(err @ FilterError::Load { .. }) => {
            println!("Error loading file {}.", invocation.input.display());
            debug!("{err}");
            process::exit(EXIT_FAILURE);
        }
        Err(err @ FilterError::WorkerSpawn(_)) => {
            error!("{err}");
            process::abort();
        }
        Err(err) => {
            error!("{err}");
            process::exit(EXIT_FAILURE);
        }
    }
}
