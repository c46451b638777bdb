use color_eyre::Result;
use comfy_table::{Cell, Table};

use crate::output::{Output, OutputFormat};

pub fn run_list(output: &Output) -> Result<()> {
    let session = super::open_session()?;
    let entries = session.watched_entries();

    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        output.info("Your watched shelf is empty.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Critic").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Yours").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Runtime").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Added").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for entry in entries {
        table.add_row(vec![
            entry.imdb_id.clone(),
            entry.title.clone(),
            entry.year.clone(),
            format!("{:.1}", entry.critic_rating),
            format!("{:.1}", entry.user_rating),
            format!("{} min", entry.runtime_minutes),
            entry.added_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.println(table.to_string());

    Ok(())
}

pub fn run_stats(output: &Output) -> Result<()> {
    let session = super::open_session()?;
    let stats = session.stats();

    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(stats)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Movies you watched").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
        Cell::new(""),
    ]);
    table.add_row(vec!["Count".to_string(), stats.count.to_string()]);
    table.add_row(vec![
        "Average critic rating".to_string(),
        format!("{:.2}", stats.avg_critic_rating),
    ]);
    table.add_row(vec![
        "Average your rating".to_string(),
        format!("{:.2}", stats.avg_user_rating),
    ]);
    table.add_row(vec![
        "Average runtime".to_string(),
        format!("{:.2} min", stats.avg_runtime),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.println(table.to_string());

    Ok(())
}

pub fn run_remove(imdb_id: &str, output: &Output) -> Result<()> {
    let mut session = super::open_session()?;

    if session.remove_watched(imdb_id) {
        output.success(format!("Removed {} from the shelf", imdb_id));
    } else {
        output.warn(format!("No entry with id {} on the shelf", imdb_id));
    }

    Ok(())
}
