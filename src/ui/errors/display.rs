// Tue Jan 20 2026 - Alex

use colored::Colorize;
use std::error::Error;

const MAX_CAUSES: usize = 10;

pub struct ErrorDisplay {
    prefix: String,
    show_cause_chain: bool,
    color_enabled: bool,
}

impl ErrorDisplay {
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            show_cause_chain: true,
            color_enabled: true,
        }
    }

    /// Tag printed before every message, e.g. the tool name.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn without_colors(mut self) -> Self {
        self.color_enabled = false;
        self
    }

    pub fn without_causes(mut self) -> Self {
        self.show_cause_chain = false;
        self
    }

    fn lead(&self) -> String {
        if self.prefix.is_empty() {
            String::new()
        } else {
            format!("{}: ", self.prefix)
        }
    }

    pub fn format<E: Error + ?Sized>(&self, error: &E) -> String {
        let mut output = String::new();

        let header = if self.color_enabled {
            "error:".red().bold().to_string()
        } else {
            "error:".to_string()
        };

        output.push_str(&format!("{}{} {}\n", self.lead(), header, error));

        if self.show_cause_chain {
            let mut source = error.source();
            let mut depth = 1;

            while let Some(cause) = source {
                let arrow = if self.color_enabled {
                    "→".yellow().to_string()
                } else {
                    "->".to_string()
                };

                output.push_str(&format!("  {} caused by: {}\n", arrow, cause));
                source = cause.source();
                depth += 1;

                if depth > MAX_CAUSES {
                    output.push_str("  ... (cause chain truncated)\n");
                    break;
                }
            }
        }

        output
    }

    pub fn print<E: Error + ?Sized>(&self, error: &E) {
        eprint!("{}", self.format(error));
    }

    pub fn format_warning(&self, message: &str) -> String {
        if self.color_enabled {
            format!("{}{} {}", self.lead(), "warning:".yellow().bold(), message)
        } else {
            format!("{}warning: {}", self.lead(), message)
        }
    }
}

impl Default for ErrorDisplay {
    fn default() -> Self {
        Self::new()
    }
}
