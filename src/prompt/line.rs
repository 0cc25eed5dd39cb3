//! Single-line input with an editable initial value

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue, style,
    terminal::{self, ClearType},
};
use tui_input::{Input, backend::crossterm::EventHandler};

/// Restores cooked mode however the prompt is left
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads one line with `initial` already in the edit buffer.
///
/// Enter submits, Esc puts `initial` back, Ctrl-C fails with
/// [`io::ErrorKind::Interrupted`]. Without a terminal on stdin a plain line is
/// read instead and an empty answer keeps `initial`.
pub fn read_prefilled(prompt: &str, initial: &str) -> io::Result<String> {
    if !io::stdin().is_terminal() {
        return read_plain(prompt, initial);
    }

    let mut stdout = io::stdout();
    let mut input = Input::new(initial.to_string());
    let _raw = RawModeGuard::enter()?;

    loop {
        render(&mut stdout, prompt, &input)?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter => {
                queue!(stdout, style::Print("\r\n"))?;
                stdout.flush()?;
                return Ok(input.value().to_string());
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                queue!(stdout, style::Print("\r\n"))?;
                stdout.flush()?;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "input interrupted"));
            }
            KeyCode::Esc => {
                input = Input::new(initial.to_string());
            }
            _ => {
                input.handle_event(&Event::Key(key));
            }
        }
    }
}

fn render(stdout: &mut io::Stdout, prompt: &str, input: &Input) -> io::Result<()> {
    let prompt_width = prompt.chars().count();
    let (columns, _) = terminal::size()?;
    let width = (columns as usize).saturating_sub(prompt_width + 1).max(1);
    let scroll = input.visual_scroll(width);
    let visible = input.value().chars().skip(scroll).take(width).collect::<String>();
    let cursor_column = prompt_width + input.visual_cursor().saturating_sub(scroll);

    queue!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        style::Print(prompt),
        style::Print(visible),
        cursor::MoveToColumn(cursor_column as u16),
    )?;
    stdout.flush()
}

fn read_plain(prompt: &str, initial: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    if initial.is_empty() {
        write!(stdout, "{prompt}")?;
    } else {
        write!(stdout, "{prompt}[{initial}] ")?;
    }
    stdout.flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }

    Ok(answer_or_initial(&line, initial))
}

fn answer_or_initial(line: &str, initial: &str) -> String {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        initial.to_string()
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::answer_or_initial;

    #[test]
    fn empty_answer_keeps_initial() {
        assert_eq!(answer_or_initial("\n", "nano"), "nano");
        assert_eq!(answer_or_initial("", "nano"), "nano");
    }

    #[test]
    fn answer_replaces_initial() {
        assert_eq!(answer_or_initial("vim\r\n", "nano"), "vim");
        assert_eq!(answer_or_initial("  spaced  \n", ""), "  spaced  ");
    }
}
