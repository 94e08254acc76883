//! Compiles files on disk: read, compile, post-process, write.

use owo_colors::OwoColorize;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::cli::BuildArgs;
use crate::config::Config;
use crate::discover::discover;
use crate::error::{CliError, Result};
use crate::postprocess::Pipeline;

/// Comment prepended to every output file unless disabled.
pub const BANNER: &str = "/* Compiled by Cleanscript */\n\n";

/// Where compiled JavaScript goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Beside the source, same stem, output extension
    File,
    /// Printed to standard output
    Stdout,
}

/// Outcome of compiling a set of files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Files compiled and written
    pub compiled: usize,
    /// Files that failed; nothing was written for them
    pub failed: usize,
}

impl BuildSummary {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Compiles source files with one configuration.
pub struct Driver {
    config: Config,
    pipeline: Pipeline,
    output: Output,
}

impl Driver {
    pub fn new(config: Config, pipeline: Pipeline, output: Output) -> Self {
        Self {
            config,
            pipeline,
            output,
        }
    }

    /// Builds a driver from the config file layers plus `args`.
    pub fn from_args(mut config: Config, args: &BuildArgs) -> Self {
        config.apply_args(args);
        let pipeline = Pipeline::from_flags(&config, args.minify, args.mangle, args.prettify);
        let output = if args.stdout { Output::Stdout } else { Output::File };
        Self::new(config, pipeline, output)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compiles `target`: the file itself, or every source file in the
    /// directory.
    pub fn build(&self, target: &Path) -> Result<BuildSummary> {
        let files = self.sources(target)?;
        Ok(self.build_files(&files))
    }

    /// Resolves `target` to the list of source files it names.
    pub fn sources(&self, target: &Path) -> Result<Vec<PathBuf>> {
        if target.is_file() {
            return Ok(vec![target.to_path_buf()]);
        }
        if !target.is_dir() {
            return Err(CliError::TargetNotFound(target.to_path_buf()));
        }
        if self.output == Output::Stdout {
            return Err(CliError::StdoutNeedsFile(target.to_path_buf()));
        }
        discover(
            target,
            &self.config.source_extension,
            self.config.recursive,
        )
    }

    /// Compiles `files` in parallel, reporting each failure as it happens.
    pub fn build_files(&self, files: &[PathBuf]) -> BuildSummary {
        let failed = files
            .par_iter()
            .map(|file| match self.compile_file(file) {
                Ok(()) => 0,
                Err(err) => {
                    report(&err);
                    1
                }
            })
            .sum::<usize>();

        let summary = BuildSummary {
            compiled: files.len() - failed,
            failed,
        };
        info!(compiled = summary.compiled, failed = summary.failed, "build finished");
        summary
    }

    /// Compiles one file. Nothing is written if compilation fails.
    #[instrument(skip(self), fields(file = %path.display()))]
    pub fn compile_file(&self, path: &Path) -> Result<()> {
        let source = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let js = self.compile_source(&source).map_err(|source| CliError::Compile {
            path: path.to_path_buf(),
            source,
        })?;

        match self.output {
            Output::Stdout => print!("{js}"),
            Output::File => {
                let out = output_path(path, &self.config.output_extension);
                fs::write(&out, js).map_err(|e| CliError::io(&out, e))?;
                debug!(output = %out.display(), "wrote JavaScript");
            }
        }
        Ok(())
    }

    /// Compiles source text and applies post-processing and the banner.
    pub fn compile_source(&self, source: &str) -> cleanscript_compiler::Result<String> {
        let js = cleanscript_compiler::compile(source)?;
        let js = self.pipeline.run(js);
        Ok(if self.config.banner {
            format!("{BANNER}{js}")
        } else {
            js
        })
    }
}

/// `dir/name.csc` becomes `dir/name.<extension>`.
pub fn output_path(source: &Path, extension: &str) -> PathBuf {
    source.with_extension(extension)
}

/// Prints a failure, one line per diagnostic for compile errors.
pub fn report(err: &CliError) {
    let mut text = String::new();
    match err {
        CliError::Compile { path, source } => {
            for diagnostic in source.diagnostics() {
                text.push_str(&format!(
                    "{}: {}: {}\n",
                    "error".red().bold(),
                    path.display().cyan(),
                    diagnostic
                ));
            }
        }
        other => text.push_str(&format!("{}: {}\n", "error".red().bold(), other)),
    }
    eprint!("{text}");
}
