use std::process::ExitCode;

use particlebg::ParticleConfig;

const USAGE: &str = "usage: particlebg [--print-config] [CONFIG.json]";

fn main() -> ExitCode {
    env_logger::init();

    let mut path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--print-config" {
            return print_config();
        } else if arg == "-h" || arg == "--help" {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        } else if path.is_none() {
            path = Some(arg);
        } else {
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    }

    let config = match path {
        Some(path) => match ParticleConfig::load(&path) {
            Ok(config) => {
                log::info!("loaded configuration from {}", path);
                config
            }
            Err(e) => {
                eprintln!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => ParticleConfig::interactive(),
    };

    log::info!("starting with {} particles", config.particle_count);
    match particlebg::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_config() -> ExitCode {
    match ParticleConfig::interactive().to_json_string() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
