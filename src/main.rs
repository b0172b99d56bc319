//! # dcharvest
//!
//! Turns a dump of harvested Dublin Core records into per-year collections of articles,
//! then tags each article with its language and, for English ones, its field of study.
//!
//! ## Getting started
//!
//! ```sh
//! dcharvest 0.1.0
//! Harvested Dublin Core records extraction and classification.
//!
//! USAGE:
//!     dcharvest <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     classify    Predict language and field of study of year files, in place
//!     extract     Extract deduplicated per-year records from a raw dump
//!     help        Prints this message or the help of the given subcommand(s)
//!     report      Print language and field of study distributions of year files
//! ```
//!
//! Logging is configured through `RUST_LOG`.
use structopt::StructOpt;

use dcharvest::config::ModelInit;
use dcharvest::error::Error;
use dcharvest::io::yearfile;
use dcharvest::pipelines::{Classification, Extraction, Pipeline};
use dcharvest::report::Distribution;

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Dcharvest::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Dcharvest::Extract(e) => {
            let stats = Extraction::new(e.src, e.dst).run()?;
            print!("{}", stats);
        }

        cli::Dcharvest::Classify(c) => {
            let init = ModelInit::new(c.lid_config(), c.fos_config()?);
            let p = Classification::new(c.src, c.workers, init)?;
            p.run_with(|distribution| println!("{}", distribution))?;
        }

        cli::Dcharvest::Report(r) => {
            for file in yearfile::list_year_files(&r.src)? {
                let year = yearfile::year_of(&file).unwrap_or("unknown").to_string();
                let collection = yearfile::load(&file)?;
                println!("{}", Distribution::new(&year, &collection));
            }
        }
    };
    Ok(())
}
