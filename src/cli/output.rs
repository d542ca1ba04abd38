//! Output formatting for CLI commands

use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                // Callers print their own text; this is the fallback
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Prints a text table; every column but the last is padded to its width
    pub fn table(&self, columns: &[(&str, usize)], rows: &[Vec<String>]) {
        let header: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        println!("{}", table_line(columns, &header));

        let total: usize = columns
            .iter()
            .map(|(name, width)| (*width).max(name.len()) + 1)
            .sum();
        println!("{}", "-".repeat(total));

        for row in rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            println!("{}", table_line(columns, &cells));
        }
    }

    /// Prints a labelled value, skipping empty ones
    pub fn field(&self, label: &str, value: &str) {
        if !value.is_empty() {
            println!("{}: {}", label, value);
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}

fn table_line(columns: &[(&str, usize)], cells: &[&str]) -> String {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        let width = columns.get(i).map_or(0, |(_, width)| *width);
        if i == last {
            line.push_str(cell);
        } else {
            line.push_str(&format!("{:<width$} ", cell, width = width));
        }
    }
    line
}
