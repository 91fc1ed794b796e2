use std::{env, process};

mod cleaning;
mod config;
mod conversion;
mod error;
mod pipeline;
mod records;
mod writer;

use config::CleanerConfig;

fn main() {
    tracing_subscriber::fmt::init();

    let config = config_from_args(env::args().collect());

    if let Err(err) = pipeline::run(&config) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn config_from_args(args: Vec<String>) -> CleanerConfig {
    let mut config = CleanerConfig::default();
    match args.as_slice() {
        [_] | [] => {}
        [_, input] => config.input_file = input.into(),
        [_, input, output] => {
            config.input_file = input.into();
            config.output_file = output.into();
        }
        [program, ..] => {
            eprintln!("Usage: {program} [input_file.csv [output_file.json]]");
            process::exit(1);
        }
    }
    config
}
