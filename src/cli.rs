//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use dcharvest::config::{FosConfig, LidConfig};
use dcharvest::error::Error;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "dcharvest",
    about = "Harvested Dublin Core records extraction and classification."
)]
/// Holds every command that is callable by the `dcharvest` command.
pub enum Dcharvest {
    #[structopt(about = "Extract deduplicated per-year records from a raw dump")]
    Extract(Extract),
    #[structopt(about = "Predict language and field of study of year files, in place")]
    Classify(Classify),
    #[structopt(about = "Print language and field of study distributions of year files")]
    Report(Report),
}

#[derive(Debug, StructOpt)]
/// Extract command and parameters.
///
/// ```sh
/// dcharvest-extract 0.1.0
/// Extract deduplicated per-year records from a raw dump
///
/// USAGE:
///     dcharvest extract <src> <dst>
///
/// ARGS:
///     <src>    raw dump (plain or .gz)
///     <dst>    destination folder of year files
/// ```
pub struct Extract {
    #[structopt(parse(from_os_str), help = "raw dump (plain or .gz)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination folder of year files")]
    pub dst: PathBuf,
}

#[derive(Debug, StructOpt)]
/// Classify command and parameters.
pub struct Classify {
    #[structopt(
        parse(from_os_str),
        required = true,
        help = "year files, or folders containing them"
    )]
    pub src: Vec<PathBuf>,
    #[structopt(
        parse(from_os_str),
        long = "lid-path",
        help = "Path to lid.176.bin",
        default_value = "lid.176.bin"
    )]
    pub lid_path: PathBuf,
    #[structopt(
        long = "lid-k",
        help = "number of language predictions kept",
        default_value = "1"
    )]
    pub lid_k: i32,
    #[structopt(
        long = "lid-threshold",
        help = "minimum language prediction confidence",
        default_value = "0.0"
    )]
    pub lid_threshold: f32,
    #[structopt(
        parse(from_os_str),
        long = "fos-model",
        help = "supervised fastText field of study model"
    )]
    pub fos_model: Option<PathBuf>,
    #[structopt(
        long = "fos-k",
        help = "number of field of study predictions kept (with --fos-model)",
        default_value = "5"
    )]
    pub fos_k: i32,
    #[structopt(
        long = "fos-command",
        help = "field of study predictor command, speaking JSON lines on stdin/stdout",
        conflicts_with = "fos-model"
    )]
    pub fos_command: Option<String>,
    #[structopt(
        short = "w",
        long = "workers",
        help = "number of workers",
        default_value = "15"
    )]
    pub workers: usize,
}

impl Classify {
    pub fn lid_config(&self) -> LidConfig {
        LidConfig {
            path: self.lid_path.clone(),
            k: self.lid_k,
            threshold: self.lid_threshold,
        }
    }

    pub fn fos_config(&self) -> Result<FosConfig, Error> {
        match (&self.fos_model, &self.fos_command) {
            (Some(path), None) => Ok(FosConfig::FastText {
                path: path.clone(),
                k: self.fos_k,
            }),
            (None, Some(command)) => FosConfig::from_command_line(command),
            _ => Err(Error::Config(
                "exactly one of --fos-model or --fos-command is required".to_string(),
            )),
        }
    }
}

#[derive(Debug, StructOpt)]
/// Report command and parameters.
pub struct Report {
    #[structopt(
        parse(from_os_str),
        required = true,
        help = "year files, or folders containing them"
    )]
    pub src: Vec<PathBuf>,
}
