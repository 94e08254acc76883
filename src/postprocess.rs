//! Optional JavaScript post-processing (minify, prettify).
//!
//! Post-processors are plain `js -> js` transforms. A failing processor never
//! costs the user their output: the pipeline logs the failure and carries on
//! with the text it had before that step.

use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{CliError, Result};

/// A `js -> js` transform.
pub trait PostProcessor: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Transforms `js`.
    fn process(&self, js: &str) -> Result<String>;
}

/// Pipes JavaScript through an external program, stdin to stdout.
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    name: String,
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    /// Builds a processor from a command line; `None` if it is empty.
    pub fn new(name: impl Into<String>, command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            name: name.into(),
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn failure(&self, message: impl Into<String>) -> CliError {
        CliError::PostProcess {
            name: self.name.clone(),
            message: message.into(),
        }
    }
}

impl PostProcessor for ExternalCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, js: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(format!("could not start '{}': {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.failure("stdin was not captured"))?;

        // Feed stdin from another thread so a chatty child cannot fill its
        // stdout pipe while we are still writing.
        let output = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(js.as_bytes()));
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        let output = match output {
            (Ok(Ok(())), Ok(output)) => output,
            (Ok(Err(e)), _) => return Err(self.failure(format!("writing input: {e}"))),
            (Err(_), _) => return Err(self.failure("input writer panicked")),
            (_, Err(e)) => return Err(self.failure(e.to_string())),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failure(format!("{}: {}", output.status, stderr.trim())));
        }

        String::from_utf8(output.stdout).map_err(|_| self.failure("output was not UTF-8"))
    }
}

/// Ordered post-processing steps.
#[derive(Default)]
pub struct Pipeline {
    processors: Vec<Box<dyn PostProcessor>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the minify/prettify pipeline selected on the command line.
    /// Minification runs first.
    pub fn from_flags(config: &Config, minify: bool, mangle: bool, prettify: bool) -> Self {
        let mut pipeline = Pipeline::new();

        if minify {
            let mut command = config.minify_command.clone();
            if mangle {
                command.extend(config.mangle_args.iter().cloned());
            }
            match ExternalCommand::new("minify", &command) {
                Some(step) => pipeline.push(step),
                None => warn!("minify_command is empty; skipping minification"),
            }
        }
        if prettify {
            match ExternalCommand::new("prettify", &config.prettify_command) {
                Some(step) => pipeline.push(step),
                None => warn!("prettify_command is empty; skipping formatting"),
            }
        }
        pipeline
    }

    /// Appends a step.
    pub fn push(&mut self, processor: impl PostProcessor + 'static) {
        self.processors.push(Box::new(processor));
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Runs every step in order, returning the last good text.
    pub fn run(&self, js: String) -> String {
        let mut current = js;
        for processor in &self.processors {
            match processor.process(&current) {
                Ok(processed) => {
                    debug!(processor = processor.name(), "post-processed output");
                    current = processed;
                }
                Err(error) => {
                    warn!(processor = processor.name(), %error, "post-processing failed; keeping unprocessed output");
                }
            }
        }
        current
    }
}
