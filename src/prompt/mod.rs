//! Interactive input

pub mod editor;
mod line;

/// Source of user answers
pub trait Prompt {
    /// Asks `message` with `initial` as the editable default answer
    fn ask(&mut self, message: &str, initial: &str) -> anyhow::Result<String>;
}

/// The controlling terminal
pub struct Terminal;

impl Prompt for Terminal {
    fn ask(&mut self, message: &str, initial: &str) -> anyhow::Result<String> {
        Ok(line::read_prefilled(message, initial)?)
    }
}

/// Yes/no question; anything that is not a recognised answer picks `default`
pub fn confirm(prompt: &mut dyn Prompt, message: &str, default: bool) -> anyhow::Result<bool> {
    let answer = prompt.ask(message, "")?;
    Ok(parse_yes_no(&answer).unwrap_or(default))
}

/// Accepts Latin and Cyrillic keyboard layouts
fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "д" | "да" => Some(true),
        "n" | "no" | "н" | "нет" => Some(false),
        _ => None,
    }
}

/// Numeric question prefilled with `current`; unparsable answers keep it
pub fn ask_number(prompt: &mut dyn Prompt, message: &str, current: u32) -> anyhow::Result<u32> {
    let initial = if current == 0 {
        String::new()
    } else {
        current.to_string()
    };
    let answer = prompt.ask(message, &initial)?;

    Ok(answer.trim().parse().unwrap_or(current))
}
