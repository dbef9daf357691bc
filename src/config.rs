// Tue Jan 20 2026 - Alex

use crate::output::{LayoutWriter, OutputFormat};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use thiserror::Error;

pub const PLUGIN_NAME: &str = "struct_layout";

const PLUGIN_ARG_PREFIX: &str = "-fplugin-arg-";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing parameter: -fplugin-arg-struct_layout-output=<output>")]
    MissingOutput,
    #[error("missing parameter: -fplugin-arg-struct_layout-struct=<struct>")]
    MissingStruct,
    #[error("malformed plugin argument '{0}', expected key=value")]
    MalformedArgument(String),
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
    #[error("cannot open output {}", path.display())]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Raw startup options, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginArgs {
    pub output: Option<PathBuf>,
    pub target_struct: Option<String>,
    pub format: Option<OutputFormat>,
}

impl PluginArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `key=value` pairs, either bare or in the full
    /// `-fplugin-arg-struct_layout-key=value` spelling. Arguments addressed to other plugins
    /// and unknown keys are ignored; a repeated key keeps its last value.
    pub fn parse<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Self::new();
        for arg in args {
            let arg = arg.as_ref();
            let Some(pair) = strip_plugin_prefix(arg) else {
                log::debug!("ignoring argument for another plugin: {}", arg);
                continue;
            };
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedArgument(arg.to_string()))?;
            parsed.set(key, value)?;
        }
        Ok(parsed)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "output" => self.output = Some(PathBuf::from(value)),
            "struct" => self.target_struct = Some(value.to_string()),
            "format" => {
                let format = value.parse::<OutputFormat>().map_err(|reason| ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason,
                })?;
                self.format = Some(format);
            }
            other => log::debug!("ignoring unknown plugin argument '{}'", other),
        }
        Ok(())
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_struct(mut self, name: String) -> Self {
        self.target_struct = Some(name);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.as_ref().map_or(true, |p| p.as_os_str().is_empty()) {
            return Err(ConfigError::MissingOutput);
        }
        if self.target_struct.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingStruct);
        }
        Ok(())
    }

    pub fn into_config(self) -> Result<Config, ConfigError> {
        self.validate()?;
        match (self.output, self.target_struct) {
            (Some(output), Some(target_struct)) => Ok(Config {
                output,
                target_struct,
                format: self.format.unwrap_or_default(),
            }),
            (None, _) => Err(ConfigError::MissingOutput),
            (_, None) => Err(ConfigError::MissingStruct),
        }
    }
}

fn strip_plugin_prefix(arg: &str) -> Option<&str> {
    match arg.strip_prefix(PLUGIN_ARG_PREFIX) {
        Some(rest) => rest.strip_prefix(PLUGIN_NAME).and_then(|r| r.strip_prefix('-')),
        None => Some(arg),
    }
}

/// Validated run configuration. Fixed for the lifetime of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub output: PathBuf,
    pub target_struct: String,
    pub format: OutputFormat,
}

impl Config {
    pub fn new(output: PathBuf, target_struct: String) -> Self {
        Self {
            output,
            target_struct,
            format: OutputFormat::default(),
        }
    }

    /// Opens the destination, truncating anything already there.
    pub fn open_output(&self) -> Result<LayoutWriter<BufWriter<File>>, ConfigError> {
        LayoutWriter::create(&self.output).map_err(|source| ConfigError::OpenOutput {
            path: self.output.clone(),
            source,
        })
    }
}
