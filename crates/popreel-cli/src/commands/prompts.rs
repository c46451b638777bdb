use color_eyre::Result;
use dialoguer::Input;

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a rating between 1 and `max`, fractional values allowed
pub fn prompt_rating(prompt: &str, max: f32) -> Result<f32> {
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

        match input.trim().parse::<f32>() {
            Ok(value) if value >= 1.0 && value <= max => return Ok(value),
            _ => {
                eprintln!("Invalid rating. Enter a number between 1 and {}.", max);
                continue;
            }
        }
    }
}
