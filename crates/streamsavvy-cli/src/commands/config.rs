use crate::context::AppContext;
use crate::output::Output;
use crate::ConfigCommands;
use catalog_config::{is_usable_api_key, Config};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use serde_json::json;

pub fn run_config(ctx: &AppContext, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(ctx, output),
        ConfigCommands::Init { api_key } => init_config(ctx, api_key, output),
    }
}

/// Keep the first and last four characters of a key
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

fn show_config(ctx: &AppContext, output: &Output) -> Result<()> {
    let config = &ctx.config;
    let api_key = config.tmdb.effective_api_key();
    let key_display = match api_key.as_deref() {
        Some(key) if is_usable_api_key(Some(key)) => mask_secret(key),
        _ => "(not set)".to_string(),
    };

    if !output.is_human() {
        output.json(&json!({
            "config_file": ctx.config_file.display().to_string(),
            "records_dir": ctx.paths.records_dir().display().to_string(),
            "tmdb": {
                "api_key": key_display,
                "base_url": config.tmdb.base_url,
                "image_base_url": config.tmdb.image_base_url,
                "language": config.tmdb.language,
                "timeout_seconds": config.tmdb.timeout_seconds,
            },
            "mock_server": { "base_url": config.mock_server.base_url },
            "home": {
                "spotlight_languages": config.home.spotlight_languages,
                "spotlight_min_votes": config.home.spotlight_min_votes,
                "max_new_notifications": config.home.max_new_notifications,
                "seen_ids_capacity": config.home.seen_ids_capacity,
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    let key_cell = if config.is_tmdb_configured() {
        Cell::new(&key_display).fg(Color::Green)
    } else {
        Cell::new(&key_display).fg(Color::Red)
    };
    table.add_row(vec![Cell::new("Config file"), Cell::new(ctx.config_file.display())]);
    table.add_row(vec![Cell::new("Records"), Cell::new(ctx.paths.records_dir().display())]);
    table.add_row(vec![Cell::new("TMDB API key"), key_cell]);
    table.add_row(vec![Cell::new("TMDB base URL"), Cell::new(&config.tmdb.base_url)]);
    table.add_row(vec![Cell::new("Language"), Cell::new(&config.tmdb.language)]);
    table.add_row(vec![Cell::new("Timeout (s)"), Cell::new(config.tmdb.timeout_seconds)]);
    table.add_row(vec![Cell::new("Mock server"), Cell::new(&config.mock_server.base_url)]);
    table.add_row(vec![
        Cell::new("Spotlight languages"),
        Cell::new(config.home.spotlight_languages.join(", ")),
    ]);
    println!("{}", table);
    Ok(())
}

fn init_config(ctx: &AppContext, api_key: Option<String>, output: &Output) -> Result<()> {
    let path = &ctx.config_file;
    let mut config = if path.exists() {
        if api_key.is_none() {
            output.info(format!("Configuration already exists at {}", path.display()));
            return Ok(());
        }
        ctx.config.clone()
    } else {
        Config::default()
    };

    if let Some(key) = api_key {
        if !is_usable_api_key(Some(&key)) {
            return Err(eyre!("That API key looks like a placeholder"));
        }
        config.tmdb.api_key = Some(key.trim().to_string());
    }

    config
        .save_to_file(path)
        .map_err(|e| eyre!("Failed to save config to {}: {}", path.display(), e))?;
    output.success(format!("Configuration written to {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcd1234efgh5678"), "abcd…5678");
        assert_eq!(mask_secret("short"), "*****");
    }
}
