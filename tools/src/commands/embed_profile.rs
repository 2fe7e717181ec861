use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use tiffmeta::embed::{chunks, encode, render_script, CHUNK_WIDTH};
use tiffmeta::error::Result;
use tiffmeta::icc::IccHeader;

pub const INPUT: &str = "CoatedFOGRA39.icc";
pub const OUTPUT: &str = "coated_fogra39_profile.js";
/// Global identifier assigned on `window`
pub const NAME: &str = "COATED_FOGRA39_BASE64";

/// Paths are relative to the working directory. The binary always runs with
/// the default and takes no arguments.
#[derive(Debug)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: PathBuf::from(INPUT),
            output: PathBuf::from(OUTPUT),
            name: NAME.to_string(),
        }
    }
}

pub fn command(cfg: Config) -> Result<()> {
    let data = fs::read(&cfg.input)?;
    match IccHeader::parse(&data) {
        Ok(header) => info!("{:?}: {}", cfg.input.display(), header),
        Err(e) => warn!("{:?} does not look like an ICC profile: {}", cfg.input.display(), e),
    }
    let encoded = encode(&data);
    let pieces = chunks(&encoded, CHUNK_WIDTH);
    fs::write(&cfg.output, render_script(&cfg.name, &pieces))?;
    info!(
        "wrote {} bytes as {} chunks to {:?}",
        data.len(),
        pieces.len(),
        cfg.output.display()
    );
    Ok(())
}
