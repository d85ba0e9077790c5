use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color, Table};
use epicscreen_config::{Config, PathManager, TMDB_API_KEY_ENV};
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Init { force } => init_config(force, output),
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Using defaults. Run 'epicscreen config init' to create one.");
    }

    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let api_key = config.resolved_api_key();
    let api_key_display = match &api_key {
        Some(key) if full => key.clone(),
        Some(key) => mask_string(key),
        None => "not set".to_string(),
    };
    let api_key_source = if std::env::var(TMDB_API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        "environment"
    } else if api_key.is_some() {
        "config file"
    } else {
        "-"
    };

    output.json(&json!({
        "config_file": config_file.display().to_string(),
        "storage_dir": path_manager.storage_dir().display().to_string(),
        "tmdb": {
            "api_key": api_key_display,
            "api_key_source": api_key_source,
            "base_url": config.tmdb.base_url,
            "image_base_url": config.tmdb.image_base_url,
            "language": config.tmdb.language,
        },
        "storage": {
            "backend": format!("{:?}", config.storage.backend).to_lowercase(),
            "key": config.storage.key,
            "quota_bytes": config.storage.quota_bytes,
        }
    }));

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Configuration").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(config_file.display().to_string()),
    ]);
    table.add_row(vec![Cell::new("TMDB API Key"), Cell::new(format!("{} ({})", api_key_display, api_key_source))]);
    table.add_row(vec![Cell::new("TMDB Base URL"), Cell::new(&config.tmdb.base_url)]);
    table.add_row(vec![Cell::new("Image Base URL"), Cell::new(&config.tmdb.image_base_url)]);
    table.add_row(vec![Cell::new("Language"), Cell::new(&config.tmdb.language)]);
    table.add_row(vec![
        Cell::new("Storage Backend"),
        Cell::new(format!("{:?}", config.storage.backend).to_lowercase()),
    ]);
    table.add_row(vec![Cell::new("Storage Key"), Cell::new(&config.storage.key)]);
    table.add_row(vec![
        Cell::new("Storage Directory"),
        Cell::new(path_manager.storage_dir().display().to_string()),
    ]);
    if let Some(quota) = config.storage.quota_bytes {
        table.add_row(vec![Cell::new("Storage Quota"), Cell::new(format!("{} bytes", quota))]);
    }
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    output.block(table.to_string());

    if let Err(e) = config.validate() {
        output.warn(format!("Configuration is invalid: {}", e));
    }
    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if config_file.exists() && !force {
        output.warn(format!("Configuration already exists at {}", config_file.display()));
        output.info("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    output.info(format!(
        "Set tmdb.api_key there or export {} before browsing the catalog.",
        TMDB_API_KEY_ENV
    ));
    Ok(())
}

/// Show the first and last four characters only
fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}
