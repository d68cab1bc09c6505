use clap::ValueEnum;
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use movieflix_models::Theme;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

/// Everything user-facing goes through here so `--output json` and
/// `--quiet` behave the same in every command.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
    theme: Theme,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self {
            format,
            quiet,
            theme: Theme::default(),
        }
    }

    /// Pick accent colors that read well on the user's background
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_json(&self) -> bool {
        self.format != OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", "✓".green(), msg.as_ref()),
            _ => self.print_json(&json!({"type": "success", "message": msg.as_ref()})),
        }
    }

    /// Shown even in quiet mode
    pub fn error(&self, msg: impl AsRef<str>) {
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            _ => self.print_json(&json!({"type": "error", "message": msg.as_ref()})),
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            _ => self.print_json(&json!({"type": "info", "message": msg.as_ref()})),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", "⚠".yellow(), msg.as_ref()),
            _ => self.print_json(&json!({"type": "warning", "message": msg.as_ref()})),
        }
    }

    /// Section title in human mode; ignored for JSON
    pub fn heading(&self, title: impl AsRef<str>) {
        if self.quiet || self.is_json() {
            return;
        }
        match self.theme {
            Theme::Dark => println!("\n{}", title.as_ref().bright_cyan().bold()),
            Theme::Light => println!("\n{}", title.as_ref().blue().bold()),
        }
    }

    /// Secondary text (dates, taglines)
    pub fn muted(&self, text: impl AsRef<str>) -> String {
        match self.theme {
            Theme::Dark => text.as_ref().bright_black().to_string(),
            Theme::Light => text.as_ref().dimmed().to_string(),
        }
    }

    /// Print a table in human mode, or `data` in JSON mode
    pub fn table_or_json<T: Serialize>(&self, table: Table, data: &T) {
        if self.quiet {
            return;
        }
        if self.is_json() {
            self.json(data);
        } else {
            println!("{}", table);
        }
    }

    /// Human mode only
    pub fn print_table(&self, table: &Table) {
        if !self.quiet && !self.is_json() {
            println!("{}", table);
        }
    }

    pub fn json<T: Serialize>(&self, data: &T) {
        match serde_json::to_value(data) {
            Ok(value) => self.print_json(&value),
            Err(e) => self.error(format!("Failed to serialize output: {}", e)),
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default())
            }
            _ => println!("{}", serde_json::to_string(data).unwrap_or_default()),
        }
    }

    /// Empty table with the house style and bold header cells
    pub fn table(&self, headers: &[&str]) -> Table {
        let accent = match self.theme {
            Theme::Dark => Color::Cyan,
            Theme::Light => Color::DarkBlue,
        };
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                headers
                    .iter()
                    .map(|h| Cell::new(h).fg(accent).add_attribute(Attribute::Bold)),
            );
        table
    }
}
