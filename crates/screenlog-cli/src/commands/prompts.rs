use color_eyre::Result;
use dialoguer::{Confirm, Input, Select};

/// Input side of the interactive layer. Commands only talk to this trait, so
/// they can be driven by scripted answers in tests.
pub trait Prompter {
    /// Index of the chosen entry in `choices`.
    fn select(&mut self, prompt: &str, choices: &[String]) -> Result<usize>;
    fn text(&mut self, prompt: &str) -> Result<String>;
    fn number(&mut self, prompt: &str) -> Result<i64>;
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Terminal prompts backed by dialoguer.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, choices: &[String]) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(choices)
            .default(0)
            .max_length(12)
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
    }

    fn text(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
    }

    fn number(&mut self, prompt: &str) -> Result<i64> {
        loop {
            let input_str = self.text(prompt)?;
            match input_str.trim().parse::<i64>() {
                Ok(num) => return Ok(num),
                Err(_) => eprintln!("Invalid input. Please enter a valid number."),
            }
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
    }
}

/// Prompt until a non-negative number that fits in a u32 is entered.
pub fn prompt_count(prompter: &mut dyn Prompter, prompt: &str) -> Result<u32> {
    loop {
        let value = prompter.number(prompt)?;
        match u32::try_from(value) {
            Ok(count) => return Ok(count),
            Err(_) => eprintln!("Please enter a number between 0 and {}.", u32::MAX),
        }
    }
}
