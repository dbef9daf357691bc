// Tue Jan 20 2026 - Alex

use super::args::{Args, Command, DumpArgs, ReadArgs};
use crate::config::{Config, PluginArgs};
use crate::host::TypeTable;
use crate::output::parse_layouts;
use crate::structure::{LayoutDumper, LayoutError};
use crate::ui::errors::ErrorDisplay;
use crate::utils::LoggingUtils;
use anyhow::Context;
use colored::Colorize;
use std::fs;

pub const TOOL_NAME: &str = "structlayout";

pub struct CommandHandler {
    display: ErrorDisplay,
}

impl CommandHandler {
    pub fn new(color: bool) -> Self {
        let display = ErrorDisplay::new().with_prefix(TOOL_NAME);
        Self {
            display: if color { display } else { display.without_colors() },
        }
    }

    pub fn display(&self) -> &ErrorDisplay {
        &self.display
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args);

        match args.command {
            Command::Dump(dump_args) => self.handle_dump(dump_args),
            Command::Read(read_args) => self.handle_read(read_args),
        }
    }

    fn setup_logging(&self, args: &Args) {
        if args.env_log {
            LoggingUtils::init_from_env();
        } else {
            LoggingUtils::init_logger(LoggingUtils::level_from_verbosity(args.verbose));
        }
    }

    /// Builds the run configuration. Explicit flags win over plugin arguments.
    pub fn resolve_config(args: &DumpArgs) -> anyhow::Result<Config> {
        let mut plugin_args = PluginArgs::parse(&args.plugin_args)?;
        if let Some(output) = &args.output {
            plugin_args = plugin_args.with_output(output.clone());
        }
        if let Some(name) = &args.target_struct {
            plugin_args = plugin_args.with_struct(name.clone());
        }
        if let Some(format) = args.format {
            plugin_args = plugin_args.with_format(format);
        }
        Ok(plugin_args.into_config()?)
    }

    fn handle_dump(&self, args: DumpArgs) -> anyhow::Result<()> {
        let config = Self::resolve_config(&args)?;
        log::info!("target struct '{}' -> {}", config.target_struct, config.output.display());

        let table = TypeTable::load(&args.types)
            .with_context(|| format!("cannot load type table {}", args.types.display()))?;
        log::info!("loaded {} types from {}", table.len(), args.types.display());

        let writer = config.open_output()?;
        let mut dumper = LayoutDumper::new(config.target_struct.clone(), writer).with_format(config.format);

        match table.replay(&mut dumper) {
            Ok(0) => {
                let message = format!("struct '{}' was not found", config.target_struct);
                eprintln!("{}", self.display.format_warning(&message));
            }
            Ok(count) => log::info!("dumped {} record(s) to {}", count, config.output.display()),
            Err(error) if error.is_invariant_violation() => self.abort(&error),
            Err(error) => {
                return Err(error).with_context(|| format!("cannot write {}", config.output.display()));
            }
        }

        Ok(())
    }

    /// A record that cannot be described faithfully must not be replaced by a plausible one.
    fn abort(&self, error: &LayoutError) -> ! {
        log::error!("{}", error);
        self.display.print(error);
        std::process::abort()
    }

    fn handle_read(&self, args: ReadArgs) -> anyhow::Result<()> {
        let text = fs::read_to_string(&args.input)
            .with_context(|| format!("cannot read {}", args.input.display()))?;
        let layouts = parse_layouts(&text).with_context(|| format!("cannot parse {}", args.input.display()))?;

        for layout in &layouts {
            println!("{} ({} fields)", layout.name().cyan().bold(), layout.len());
            for field in layout.fields() {
                let count = field
                    .class()
                    .element_count()
                    .map(|c| format!(" x{}", c))
                    .unwrap_or_default();
                println!(
                    "  {:<24} {:>8} {:>8}  {:<8} {}{}",
                    field.name(),
                    field.offset(),
                    field.size(),
                    field.class().label().yellow(),
                    field.type_name(),
                    count
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use std::path::PathBuf;

    fn dump_args(plugin_args: &[&str]) -> DumpArgs {
        DumpArgs {
            types: PathBuf::from("types.json"),
            output: None,
            target_struct: None,
            plugin_args: plugin_args.iter().map(|s| s.to_string()).collect(),
            format: None,
        }
    }

    #[test]
    fn test_flags_override_plugin_args() {
        let mut args = dump_args(&["output=a.py", "struct=a", "format=json"]);
        args.target_struct = Some("b".to_string());
        args.format = Some(OutputFormat::Text);

        let config = CommandHandler::resolve_config(&args).unwrap();
        assert_eq!(config.output, PathBuf::from("a.py"));
        assert_eq!(config.target_struct, "b");
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_missing_struct_reported() {
        let args = dump_args(&["output=a.py"]);
        let err = CommandHandler::resolve_config(&args).unwrap_err();
        assert!(err.to_string().contains("struct_layout-struct"));
    }
}
