//! Configuration management for cleanscript.
//!
//! Values are layered: built-in defaults, then `cleanscript.toml` (or the
//! file named by `--config`), then `CLEANSCRIPT_*` environment variables,
//! then command line flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::cli::BuildArgs;
use crate::error::{CliError, Result};

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "cleanscript.toml";

const ENV_PREFIX: &str = "CLEANSCRIPT_";

/// Configuration for cleanscript.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extension of source files, without the dot
    pub source_extension: String,

    /// Extension given to compiled files, without the dot
    pub output_extension: String,

    /// Prepend the "Compiled by Cleanscript" comment
    pub banner: bool,

    /// Descend into subdirectories of a directory target
    pub recursive: bool,

    /// Command the compiled JavaScript is piped through for `--minify`
    pub minify_command: Vec<String>,

    /// Arguments appended to the minify command for `--mangle`
    pub mangle_args: Vec<String>,

    /// Command the compiled JavaScript is piped through for `--prettify`
    pub prettify_command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_extension: "csc".to_string(),
            output_extension: "js".to_string(),
            banner: true,
            recursive: false,
            minify_command: words("terser --compress"),
            mangle_args: words("--mangle --toplevel"),
            prettify_command: words("prettier --parser babel"),
        }
    }
}

impl Config {
    /// Load configuration from the config file and the environment.
    ///
    /// An explicitly named file must exist; the default `cleanscript.toml`
    /// is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        match explicit {
            Some(path) => config.merge_from_file(path)?,
            None => {
                let path = PathBuf::from(CONFIG_FILE);
                if path.exists() {
                    config.merge_from_file(&path)?;
                }
            }
        }

        config.merge_env(std::env::vars());
        Ok(config)
    }

    /// Merge configuration from a TOML file. Keys missing from the file
    /// keep their defaults.
    fn merge_from_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        *self = toml::from_str(&content).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration file");
        Ok(())
    }

    /// Apply `CLEANSCRIPT_*` variables from `vars`.
    pub fn merge_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(config_key) = key.strip_prefix(ENV_PREFIX) {
                self.set(&config_key.to_lowercase(), &value);
            }
        }
    }

    /// Set a configuration value.
    pub fn set(&mut self, key: &str, value: &str) {
        match key {
            "source_extension" => self.source_extension = extension(value),
            "output_extension" => self.output_extension = extension(value),
            "banner" => self.banner = truthy(value),
            "recursive" => self.recursive = truthy(value),
            "minify_command" => self.minify_command = words(value),
            "mangle_args" => self.mangle_args = words(value),
            "prettify_command" => self.prettify_command = words(value),
            // CLEANSCRIPT_CONFIG names the file itself; clap reads it.
            "config" => {}
            _ => warn!(key, "ignoring unknown configuration key"),
        }
    }

    /// Apply command line flags. Flags only ever switch features on, except
    /// `--no-banner`.
    pub fn apply_args(&mut self, args: &BuildArgs) {
        self.recursive |= args.recursive;
        if args.no_banner {
            self.banner = false;
        }
    }
}

fn words(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn extension(value: &str) -> String {
    value.trim().trim_start_matches('.').to_string()
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source_extension, "csc");
        assert_eq!(config.output_extension, "js");
        assert!(config.banner);
        assert!(!config.recursive);
        assert_eq!(config.minify_command[0], "terser");
        assert_eq!(config.prettify_command, vec!["prettier", "--parser", "babel"]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "output_extension = \"mjs\"\nrecursive = true\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.output_extension, "mjs");
        assert!(config.recursive);
        assert_eq!(config.source_extension, "csc");
        assert!(config.banner);
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "banner = \"sometimes\"\n").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(CliError::Config { .. })));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(Config::load(Some(&path)), Err(CliError::Io { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.merge_env(vec![
            ("CLEANSCRIPT_OUTPUT_EXTENSION".to_string(), ".cjs".to_string()),
            ("CLEANSCRIPT_BANNER".to_string(), "false".to_string()),
            ("CLEANSCRIPT_MINIFY_COMMAND".to_string(), "esbuild --minify".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ]);
        assert_eq!(config.output_extension, "cjs");
        assert!(!config.banner);
        assert_eq!(config.minify_command, vec!["esbuild", "--minify"]);
    }

    #[test]
    fn test_args_override() {
        let mut config = Config::default();
        let args = BuildArgs {
            recursive: true,
            no_banner: true,
            ..BuildArgs::default()
        };
        config.apply_args(&args);
        assert!(config.recursive);
        assert!(!config.banner);
    }

    #[test]
    fn test_truthy() {
        assert!(truthy("TRUE"));
        assert!(truthy("1"));
        assert!(!truthy("no"));
        assert!(!truthy(""));
    }
}
