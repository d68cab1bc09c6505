use super::context::App;
use crate::output::Output;
use crate::ThemeCommands;
use color_eyre::Result;
use serde_json::json;

pub fn run_theme(app: &mut App, cmd: ThemeCommands, output: &mut Output) -> Result<()> {
    match cmd {
        ThemeCommands::Show => {
            let theme = app.store.theme();
            let explicit = theme.explicit();
            let resolved = theme.get();
            if output.is_json() {
                output.json(&json!({
                    "theme": resolved,
                    "source": if explicit.is_some() { "saved" } else { "system" },
                }));
            } else if explicit.is_some() {
                output.info(format!("Theme: {} (saved preference)", resolved));
            } else {
                output.info(format!("Theme: {} (following system)", resolved));
            }
            Ok(())
        }
        ThemeCommands::Set { theme } => {
            if app.store.theme().set(theme) {
                output.set_theme(theme);
                output.success(format!("Theme set to {}", theme));
            } else {
                output.error("Could not save theme preference");
            }
            Ok(())
        }
        ThemeCommands::Toggle => {
            match app.store.theme().toggle() {
                Some(theme) => {
                    output.set_theme(theme);
                    output.success(format!("Switched to {} theme", theme));
                }
                None => output.error("Could not save theme preference"),
            }
            Ok(())
        }
        ThemeCommands::Reset => {
            if app.store.theme().reset() {
                let theme = app.store.theme().get();
                output.set_theme(theme);
                output.success(format!("Theme now follows the system ({})", theme));
            } else {
                output.info("No saved theme; already following the system");
            }
            Ok(())
        }
    }
}
