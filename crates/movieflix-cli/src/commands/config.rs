use super::context::{load_config, load_credentials};
use super::prompts;
use super::spinner::is_interactive;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use movieflix_config::{Config, PathManager};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    match cmd {
        ConfigCommands::Show { full } => show_config(&path_manager, full, output),
        ConfigCommands::Tmdb { api_key, language } => {
            configure_tmdb(&path_manager, api_key, language, output)
        }
        ConfigCommands::Youtube {
            api_key,
            enable,
            disable,
        } => configure_youtube(&path_manager, api_key, enable, disable, output),
        ConfigCommands::Storage { key_prefix, dir } => {
            configure_storage(&path_manager, key_prefix, dir, output)
        }
    }
}

fn show_config(path_manager: &PathManager, full: bool, output: &Output) -> Result<()> {
    let config = load_config(path_manager)?;
    let credentials = load_credentials(path_manager)?;
    let tmdb_key = credentials.tmdb_api_key();
    let youtube_key = credentials.youtube_api_key();
    let store_dir = config
        .storage
        .dir
        .clone()
        .unwrap_or_else(|| path_manager.store_dir());

    let display_key = |key: &Option<String>| match key {
        Some(k) if full => k.clone(),
        Some(k) => mask_string(k),
        None => "<not set>".to_string(),
    };

    if output.is_json() {
        output.json(&json!({
            "config_file": path_manager.config_file(),
            "credentials_file": path_manager.credentials_file(),
            "store_dir": store_dir,
            "log_file": path_manager.log_file(),
            "tmdb": {
                "base_url": config.tmdb.base_url,
                "image_base_url": config.tmdb.image_base_url,
                "language": config.tmdb.language,
                "api_key": display_key(&tmdb_key),
            },
            "youtube": {
                "enabled": config.youtube.enabled,
                "base_url": config.youtube.base_url,
                "api_key": display_key(&youtube_key),
            },
            "storage": config.storage,
            "http": config.http,
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    output.heading("Configuration");

    let mut files = output.table(&["File", "Location"]);
    for (name, path) in [
        ("Config", path_manager.config_file()),
        ("Credentials", path_manager.credentials_file()),
        ("Preference store", store_dir),
        ("Log file", path_manager.log_file()),
    ] {
        files.add_row(vec![name.to_string(), path.display().to_string()]);
    }
    output.print_table(&files);

    let check = |on: bool| {
        if on {
            "✓".green().to_string()
        } else {
            "✗".red().to_string()
        }
    };

    let mut tmdb = output.table(&["TMDB", ""]);
    tmdb.add_row(vec![Cell::new("API Key"), Cell::new(display_key(&tmdb_key))]);
    tmdb.add_row(vec![Cell::new("Base URL"), Cell::new(&config.tmdb.base_url)]);
    tmdb.add_row(vec![
        Cell::new("Image URL"),
        Cell::new(&config.tmdb.image_base_url),
    ]);
    tmdb.add_row(vec![
        Cell::new("Language"),
        Cell::new(config.tmdb.language.as_deref().unwrap_or("<default>")),
    ]);
    output.print_table(&tmdb);

    let mut youtube = output.table(&["YouTube", ""]);
    youtube.add_row(vec![Cell::new("Enabled"), Cell::new(check(config.youtube.enabled))]);
    youtube.add_row(vec![Cell::new("API Key"), Cell::new(display_key(&youtube_key))]);
    youtube.add_row(vec![Cell::new("Base URL"), Cell::new(&config.youtube.base_url)]);
    output.print_table(&youtube);

    let mut storage = output.table(&["Storage & Network", ""]);
    storage.add_row(vec![Cell::new("Key prefix"), Cell::new(&config.storage.key_prefix)]);
    storage.add_row(vec![
        Cell::new("Request timeout"),
        Cell::new(format!("{}s", config.http.timeout_secs)),
    ]);
    storage.add_row(vec![
        Cell::new("Retry backoff"),
        Cell::new(format!("{}ms", config.http.retry_backoff_ms)),
    ]);
    output.print_table(&storage);

    Ok(())
}

fn configure_tmdb(
    path_manager: &PathManager,
    api_key: Option<String>,
    language: Option<String>,
    output: &Output,
) -> Result<()> {
    let api_key = match api_key {
        Some(key) => key,
        None if is_interactive() => {
            output.info("Get a TMDB API key at https://www.themoviedb.org/settings/api");
            prompts::prompt_secret("TMDB API key")?
        }
        None if language.is_some() => String::new(),
        None => return Err(eyre!("No API key given. Pass --api-key when not running interactively")),
    };

    if !api_key.trim().is_empty() {
        let mut credentials = load_credentials(path_manager)?;
        credentials.set_tmdb_api_key(api_key.trim().to_string());
        credentials
            .save()
            .map_err(|e| eyre!("Failed to save credentials: {}", e))?;
        output.success(format!(
            "TMDB API key saved to {}",
            path_manager.credentials_file().display()
        ));
    }

    if let Some(language) = language {
        update_config(path_manager, |config| {
            config.tmdb.language = Some(language.clone()).filter(|l| !l.trim().is_empty());
        })?;
        output.success("TMDB language updated");
    }
    Ok(())
}

fn configure_youtube(
    path_manager: &PathManager,
    api_key: Option<String>,
    enable: bool,
    disable: bool,
    output: &Output,
) -> Result<()> {
    if enable || disable {
        update_config(path_manager, |config| config.youtube.enabled = enable)?;
        output.success(if enable {
            "YouTube trailer search enabled"
        } else {
            "YouTube trailer search disabled"
        });
        if api_key.is_none() {
            return Ok(());
        }
    }

    let api_key = match api_key {
        Some(key) => key,
        None if is_interactive() => {
            output.info("YouTube search is only used when TMDB has no trailer for a movie.");
            prompts::prompt_secret("YouTube Data API key")?
        }
        None => return Err(eyre!("No API key given. Pass --api-key when not running interactively")),
    };

    let mut credentials = load_credentials(path_manager)?;
    credentials.set_youtube_api_key(api_key.trim().to_string());
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;
    output.success(format!(
        "YouTube API key saved to {}",
        path_manager.credentials_file().display()
    ));
    Ok(())
}

fn configure_storage(
    path_manager: &PathManager,
    key_prefix: Option<String>,
    dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let (key_prefix, dir) = if key_prefix.is_none() && dir.is_none() && is_interactive() {
        let current = load_config(path_manager)?;
        let prefix = prompts::prompt_string("Storage key prefix", Some(&current.storage.key_prefix))?;
        let default_dir = current
            .storage
            .dir
            .unwrap_or_else(|| path_manager.store_dir())
            .display()
            .to_string();
        let dir = prompts::prompt_string("Store directory", Some(&default_dir))?;
        (Some(prefix), Some(PathBuf::from(dir)))
    } else {
        (key_prefix, dir)
    };

    if key_prefix.is_none() && dir.is_none() {
        output.warn("Nothing to change. Use --key-prefix or --dir");
        return Ok(());
    }

    update_config(path_manager, |config| {
        if let Some(prefix) = &key_prefix {
            config.storage.key_prefix = prefix.trim().to_string();
        }
        if let Some(dir) = &dir {
            config.storage.dir = if *dir == path_manager.store_dir() {
                None
            } else {
                Some(dir.clone())
            };
        }
    })?;
    output.success("Storage settings updated");
    output.warn("Existing preferences stay where they were; move them yourself if needed");
    Ok(())
}

/// Load, modify, validate and save `config.toml`
fn update_config(path_manager: &PathManager, change: impl FnOnce(&mut Config)) -> Result<()> {
    let config_file = path_manager.config_file();
    let mut config = load_config(path_manager)?;
    change(&mut config);
    config
        .validate()
        .map_err(|e| eyre!("Refusing to save invalid config: {}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("abcd"), "****");
        assert_eq!(mask_string("0123456789abcdef"), "01***ef");
        assert_eq!(mask_string(""), "");
    }
}
