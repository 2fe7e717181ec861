use std::io;
use std::process::ExitCode;

use log::error;

use tools::commands::inspect_tiff::{command, Config};

fn main() -> ExitCode {
    env_logger::init();
    let cfg = Config::parse();
    let stdout = io::stdout();
    match command(cfg, &mut stdout.lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
