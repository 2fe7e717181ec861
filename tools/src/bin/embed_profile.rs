use std::process::ExitCode;

use log::error;

use tools::commands::embed_profile::{command, Config};

fn main() -> ExitCode {
    env_logger::init();
    match command(Config::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
