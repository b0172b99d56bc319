//! Field of study prediction through an external process.
//!
//! The process is spawned once and kept alive. It receives one JSON array of [FosInput] per line
//! on its stdin, and must answer each with one [FosOutput] JSON object per line on its stdout.
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::error::Error;

use super::identification::{FosInput, FosOutput, FosPredict};

/// Time given to the predictor to exit once its stdin is closed, before it is killed.
const EXIT_TIMEOUT: Duration = Duration::from_secs(5);
const EXIT_POLL: Duration = Duration::from_millis(50);

pub struct CommandFos {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    line: String,
}

impl CommandFos {
    /// Spawns `program` with `args`.
    pub fn spawn(program: &str, args: &[String]) -> Result<Self, Error> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Predictor(format!("could not spawn {program}: {e}")))?;

        debug!("spawned fos predictor {} (pid {})", program, child.id());

        let stdin = child.stdin.take();
        let stdout = child
            .stdout
            .take()
            .map(BufReader::new)
            .ok_or_else(|| Error::Predictor("no stdout on predictor".to_string()))?;

        Ok(Self {
            child,
            stdin,
            stdout,
            line: String::new(),
        })
    }
}

impl FosPredict for CommandFos {
    fn predict(&mut self, inputs: &[FosInput]) -> Result<FosOutput, Error> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| Error::Predictor("predictor stdin is closed".to_string()))?;

        let mut request = serde_json::to_vec(inputs)?;
        request.push(b'\n');
        stdin.write_all(&request)?;
        stdin.flush()?;

        self.line.clear();
        if self.stdout.read_line(&mut self.line)? == 0 {
            return Err(Error::Predictor("predictor closed its output".to_string()));
        }

        Ok(serde_json::from_str(self.line.trim_end())?)
    }
}

impl CommandFos {
    /// Closes stdin and waits for the process to exit, killing it after `timeout`.
    fn shutdown(&mut self, timeout: Duration) {
        drop(self.stdin.take());

        let start = Instant::now();
        loop {
            match self.child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) if start.elapsed() < timeout => std::thread::sleep(EXIT_POLL),
                Ok(None) => break,
                Err(e) => {
                    warn!("could not wait for fos predictor: {}", e);
                    break;
                }
            }
        }

        warn!("fos predictor {} still running, killing it", self.child.id());
        if let Err(e) = self.child.kill() {
            warn!("could not kill fos predictor: {}", e);
        }
        if let Err(e) = self.child.wait() {
            warn!("could not wait for fos predictor: {}", e);
        }
    }
}

impl Drop for CommandFos {
    fn drop(&mut self) {
        self.shutdown(EXIT_TIMEOUT);
    }
}
