use super::context::App;
use super::prompts;
use super::spinner::is_interactive;
use crate::output::Output;
use color_eyre::Result;
use movieflix_config::PathManager;
use std::fs;

pub fn run_clear(
    all: bool,
    store: bool,
    credentials: bool,
    yes: bool,
    ephemeral: bool,
    output: &Output,
) -> Result<()> {
    let clear_store = all || store;
    let clear_credentials = all || credentials;

    if !clear_store && !clear_credentials {
        output.warn("No clear option specified. Use --store, --credentials, or --all");
        output.info("\nExample: movieflix clear --store");
        return Ok(());
    }

    if !yes && is_interactive() && !output.is_json() {
        let what = match (clear_store, clear_credentials) {
            (true, true) => "your watchlist, ratings, progress, theme and API keys",
            (true, false) => "your watchlist, ratings, progress and theme",
            _ => "your stored API keys",
        };
        if !prompts::prompt_yes_no(&format!("This will delete {}. Continue?", what), false)? {
            output.info("Nothing cleared");
            return Ok(());
        }
    }

    if clear_store {
        let mut app = App::load(ephemeral)?;
        if app.store.clear() {
            output.success("Cleared watchlist, ratings, continue watching and theme");
        } else {
            output.warn("Some preferences could not be removed; see the log for details");
        }
    }

    if clear_credentials {
        clear_credentials_file(&PathManager::default(), output)?;
    }

    Ok(())
}

fn clear_credentials_file(path_manager: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = path_manager.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            color_eyre::eyre::eyre!(
                "Failed to remove credentials file at {}: {}",
                credentials_file.display(),
                e
            )
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }

    Ok(())
}
