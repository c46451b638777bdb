use color_eyre::Result;
use comfy_table::{Cell, Table};
use movie_shelf_config::{Config, PathManager};
use serde_json::json;

use crate::commands::prompts;
use crate::output::{Output, OutputFormat};

pub fn run_show(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let path = path_manager.config_file();
    let config = super::load_config()?;

    let api_key = if full {
        config.catalog.api_key.clone()
    } else {
        mask_key(&config.catalog.api_key)
    };

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "config_file": path,
            "endpoint": config.catalog.endpoint,
            "api_key": api_key,
        }));
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Catalog Configuration").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
        Cell::new(""),
    ]);
    table.add_row(vec!["Config file".to_string(), path.display().to_string()]);
    table.add_row(vec!["Endpoint".to_string(), config.catalog.endpoint.clone()]);
    table.add_row(vec!["API key".to_string(), api_key]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.println(table.to_string());

    Ok(())
}

pub fn run_init(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(super::into_report)?;
    let path = path_manager.config_file();

    output.info("An OMDb API key is required; get one at https://www.omdbapi.com/apikey.aspx");
    let api_key = prompts::prompt_string("Catalog API key", None)?;
    let endpoint = prompts::prompt_string("Catalog endpoint", Some("https://www.omdbapi.com/"))?;

    let config = Config::new(api_key, Some(endpoint));
    config.validate().map_err(super::into_report)?;
    config.save_to_file(&path).map_err(super::into_report)?;

    output.success(format!("Configuration written to {}", path.display()));
    Ok(())
}

fn mask_key(key: &str) -> String {
    if key.chars().count() <= 2 {
        return "****".to_string();
    }
    let prefix: String = key.chars().take(2).collect();
    format!("{}****", prefix)
}
