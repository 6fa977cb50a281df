//! Yes/no question.

use crate::error::{Result, TermError};
use crate::input::NamedKey;
use crate::terminal::{Backend, Terminal};

/// Ask a yes/no question on one line.
///
/// `y`/`n` (either case) answer directly and Enter takes `default`. Esc or
/// Ctrl+C returns `None`. The answer is echoed before moving to the next line.
///
/// # Errors
/// `NotInRawMode` when the terminal is cooked, or any read/write failure.
pub fn confirm<B: Backend>(
    term: &mut Terminal<B>,
    question: &str,
    default: bool,
) -> Result<Option<bool>> {
    if !term.is_raw() {
        return Err(TermError::NotInRawMode);
    }

    let hint = if default { "[Y/n]" } else { "[y/N]" };
    term.write_str(&format!("{question} {hint} "))?;
    term.flush()?;

    let answer = loop {
        let key = term.next_key()?;
        if key.is_cancel() {
            break None;
        }
        if key.is(NamedKey::Enter) {
            break Some(default);
        }
        match key.as_char().map(|c| c.to_ascii_lowercase()) {
            Some('y') => break Some(true),
            Some('n') => break Some(false),
            _ => {}
        }
    };

    let echo = match answer {
        Some(true) => "yes",
        Some(false) => "no",
        None => "",
    };
    term.write_str(echo)?;
    term.write_str("\r\n")?;
    term.flush()?;
    Ok(answer)
}
