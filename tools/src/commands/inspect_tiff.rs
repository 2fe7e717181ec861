use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use tiffmeta::error::Result;
use tiffmeta::report;
use tiffmeta::ImageFile;

pub const USAGE: &str = "Usage: inspect_tiff [--summary] <file1> [file2 ...]";

pub const SUMMARY_FLAG: &str = "--summary";

#[derive(Debug, Parser)]
#[command(
    name = "inspect_tiff",
    about = "Dump TIFF tags as text or JSON",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// `--summary` anywhere turns on summary mode, every other token is a path
    #[arg(
        value_name = "ARG",
        num_args = 1..,
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    tokens: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct Config {
    /// Print one JSON object per file instead of the tag listing
    pub summary: bool,
    pub files: Vec<PathBuf>,
}

impl Config {
    pub fn parse() -> Self {
        Args::parse_from(escaped(std::env::args_os())).into()
    }

    pub fn try_parse_from<I, T>(itr: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Args::try_parse_from(escaped(itr)).map(Config::from)
    }
}

/// Put `--` after the binary name so a user `--` is a path like any other token.
fn escaped<I, T>(itr: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut argv = itr.into_iter().map(Into::into);
    let mut escaped: Vec<OsString> = argv.next().into_iter().collect();
    escaped.push(OsString::from("--"));
    escaped.extend(argv);
    escaped
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let (flags, files): (Vec<PathBuf>, Vec<PathBuf>) = args
            .tokens
            .into_iter()
            .partition(|token| token.as_os_str() == SUMMARY_FLAG);
        Config {
            summary: !flags.is_empty(),
            files,
        }
    }
}

/// Returns the process exit status. Text mode reports unreadable files and
/// moves on; summary mode lets the first open error end the run.
pub fn command<W: Write>(cfg: Config, out: &mut W) -> Result<u8> {
    if cfg.files.is_empty() {
        writeln!(out, "{}", USAGE)?;
        return Ok(1);
    }
    for path in cfg.files {
        info!("inspect {:?} summary:{}", path.display(), cfg.summary);
        if cfg.summary {
            // TODO: missing files are not guarded here unlike text mode, decide whether summary mode should skip them too
            let mut image = ImageFile::open(&path)?;
            let value = report::summary(&mut image)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            continue;
        }
        if !path.exists() {
            writeln!(out, "File not found: {}", path.display())?;
            continue;
        }
        match ImageFile::open(&path) {
            Ok(mut image) => report::write_text(&mut image, out)?,
            Err(e) => {
                warn!("skip {:?}: {}", path.display(), e);
                writeln!(out, "Cannot open {}: {}", path.display(), e)?;
            }
        }
    }
    Ok(0)
}
