//! Model configuration and worker startup.
use std::path::PathBuf;

use log::debug;

use crate::error::Error;
use crate::identifiers::{CommandFos, FastText, FastTextBuilder, FastTextFos, FosPredict};
use crate::pipelines::classification::{WorkerContext, WorkerInit};

/// Language identification model parameters.
#[derive(Debug, Clone)]
pub struct LidConfig {
    pub path: PathBuf,
    pub k: i32,
    pub threshold: f32,
}

impl Default for LidConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lid.176.bin"),
            k: 1,
            threshold: 0.0,
        }
    }
}

impl LidConfig {
    fn load(&self) -> Result<FastText, Error> {
        FastTextBuilder::default()
            .path(&self.path)
            .k(self.k)
            .threshold(self.threshold)
            .build()
    }
}

/// Field of study predictor to use.
#[derive(Debug, Clone)]
pub enum FosConfig {
    /// Supervised fastText model, keeping the top `k` labels.
    FastText { path: PathBuf, k: i32 },
    /// External process, see [CommandFos].
    Command { program: String, args: Vec<String> },
}

impl FosConfig {
    /// Splits a command line on whitespace.
    pub fn from_command_line(command: &str) -> Result<Self, Error> {
        let mut parts = command.split_whitespace().map(String::from);
        let program = parts
            .next()
            .ok_or_else(|| Error::Config("empty fos command".to_string()))?;
        Ok(FosConfig::Command {
            program,
            args: parts.collect(),
        })
    }

    fn load(&self) -> Result<Box<dyn FosPredict>, Error> {
        match self {
            FosConfig::FastText { path, k } => {
                let model = FastTextBuilder::default()
                    .path(path)
                    .k(*k)
                    .threshold(0.0)
                    .build()?;
                Ok(Box::new(FastTextFos::new(model)))
            }
            FosConfig::Command { program, args } => Ok(Box::new(CommandFos::spawn(program, args)?)),
        }
    }
}

/// Loads a language identifier and a field of study predictor for each worker.
#[derive(Debug, Clone)]
pub struct ModelInit {
    lid: LidConfig,
    fos: FosConfig,
}

impl ModelInit {
    pub fn new(lid: LidConfig, fos: FosConfig) -> Self {
        Self { lid, fos }
    }
}

impl WorkerInit for ModelInit {
    type Lid = FastText;
    type Fos = Box<dyn FosPredict>;

    fn init(&self) -> Result<WorkerContext<FastText, Box<dyn FosPredict>>, Error> {
        debug!("loading models: {:?} / {:?}", self.lid, self.fos);
        Ok(WorkerContext::new(self.lid.load()?, self.fos.load()?))
    }
}
