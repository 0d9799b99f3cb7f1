use color_eyre::Result;
use dialoguer::{Confirm, Input, Password, Select};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact_text().map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read password: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Pick one item from a list, returns its index
pub fn prompt_select(prompt: &str, items: &[String], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}
