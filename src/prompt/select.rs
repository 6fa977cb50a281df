//! Single- and multi-select lists.
//!
//! Both prompts print the question once, then the option list, and redraw
//! the list in place after every key by moving the cursor back up over it.
//! Each option occupies exactly one line (long labels are truncated to the
//! terminal width) so the move-up distance is always the option count.

use super::theme::PromptTheme;
use crate::error::{Result, TermError};
use crate::input::{KeyEvent, NamedKey};
use crate::render::{ansi, display_width, truncate_to_width};
use crate::terminal::{Backend, Terminal};

/// What a key does to a list prompt.
enum Step {
    Continue,
    Done,
    Cancel,
}

/// Cursor position plus, for multi-select, which options are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectionState {
    cursor: usize,
    selected: Option<Vec<bool>>,
}

impl SelectionState {
    fn single(len: usize, default: usize) -> Self {
        Self {
            cursor: default.min(len.saturating_sub(1)),
            selected: None,
        }
    }

    fn multi(len: usize, defaults: &[usize]) -> Self {
        let mut selected = vec![false; len];
        for &i in defaults {
            if let Some(slot) = selected.get_mut(i) {
                *slot = true;
            }
        }
        Self {
            cursor: 0,
            selected: Some(selected),
        }
    }

    fn len(&self, options: usize) -> usize {
        self.selected.as_ref().map_or(options, Vec::len)
    }

    fn apply(&mut self, key: KeyEvent, len: usize) -> Step {
        match key {
            KeyEvent::Named(NamedKey::Up) => {
                self.cursor = (self.cursor + len - 1) % len;
                Step::Continue
            }
            KeyEvent::Named(NamedKey::Down) => {
                self.cursor = (self.cursor + 1) % len;
                Step::Continue
            }
            KeyEvent::Named(NamedKey::Enter) => Step::Done,
            key if key.is_cancel() => Step::Cancel,
            key if key.is_char(' ') => {
                if let Some(flag) = self
                    .selected
                    .as_mut()
                    .and_then(|s| s.get_mut(self.cursor))
                {
                    *flag = !*flag;
                }
                Step::Continue
            }
            _ => Step::Continue,
        }
    }

    fn chosen(&self) -> Vec<usize> {
        self.selected
            .iter()
            .flatten()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Ask the user to pick one option.
///
/// Returns the chosen index, or `None` if the user pressed Esc or Ctrl+C.
/// An empty option list returns `None` without reading any input.
///
/// # Errors
/// `NotInRawMode` when the terminal is cooked, or any read/write failure.
pub fn select<B: Backend, S: AsRef<str>>(
    term: &mut Terminal<B>,
    theme: &PromptTheme,
    prompt: &str,
    options: &[S],
    default: usize,
) -> Result<Option<usize>> {
    if !term.is_raw() {
        return Err(TermError::NotInRawMode);
    }
    if options.is_empty() {
        return Ok(None);
    }
    let state = SelectionState::single(options.len(), default);
    Ok(run(term, theme, prompt, options, state)?.map(|state| state.cursor))
}

/// Like [`select`] but returns the chosen option's text.
pub fn select_value<B: Backend, S: AsRef<str>>(
    term: &mut Terminal<B>,
    theme: &PromptTheme,
    prompt: &str,
    options: &[S],
    default: usize,
) -> Result<Option<String>> {
    let index = select(term, theme, prompt, options, default)?;
    Ok(index.map(|i| options[i].as_ref().to_string()))
}

/// Ask the user to pick any number of options.
///
/// Space toggles the option under the cursor. Enter returns the chosen
/// indices in option order, possibly none; Esc or Ctrl+C returns `None`.
/// `defaults` are preselected; out-of-range entries are ignored.
///
/// # Errors
/// `NotInRawMode` when the terminal is cooked, or any read/write failure.
pub fn multi_select<B: Backend, S: AsRef<str>>(
    term: &mut Terminal<B>,
    theme: &PromptTheme,
    prompt: &str,
    options: &[S],
    defaults: &[usize],
) -> Result<Option<Vec<usize>>> {
    if !term.is_raw() {
        return Err(TermError::NotInRawMode);
    }
    if options.is_empty() {
        return Ok(Some(Vec::new()));
    }
    let state = SelectionState::multi(options.len(), defaults);
    Ok(run(term, theme, prompt, options, state)?.map(|state| state.chosen()))
}

/// Run the list with the cursor hidden, showing it again however it ends.
fn run<B: Backend, S: AsRef<str>>(
    term: &mut Terminal<B>,
    theme: &PromptTheme,
    prompt: &str,
    options: &[S],
    state: SelectionState,
) -> Result<Option<SelectionState>> {
    term.hide_cursor()?;
    let outcome = interact(term, theme, prompt, options, state);
    let shown = term.show_cursor();
    let outcome = outcome?;
    shown?;
    Ok(outcome)
}

fn interact<B: Backend, S: AsRef<str>>(
    term: &mut Terminal<B>,
    theme: &PromptTheme,
    prompt: &str,
    options: &[S],
    mut state: SelectionState,
) -> Result<Option<SelectionState>> {
    term.write_str(prompt)?;
    term.write_str("\r\n")?;
    let len = state.len(options.len());
    loop {
        draw(term, theme, options, &state)?;
        let key = term.next_key()?;
        match state.apply(key, len) {
            Step::Done => return Ok(Some(state)),
            Step::Cancel => return Ok(None),
            Step::Continue => term.move_up(len as u16)?,
        }
    }
}

fn draw<B: Backend, S: AsRef<str>>(
    term: &mut Terminal<B>,
    theme: &PromptTheme,
    options: &[S],
    state: &SelectionState,
) -> Result<()> {
    let cols = term.size().cols as usize;
    let gap = theme.pointer_gap();
    let mut frame = String::new();
    for (i, option) in options.iter().enumerate() {
        let current = i == state.cursor;
        let mut prefix = if current {
            theme.pointer.clone()
        } else {
            gap.clone()
        };
        prefix.push(' ');
        if let Some(selected) = &state.selected {
            prefix.push_str(if selected[i] {
                &theme.checked
            } else {
                &theme.unchecked
            });
            prefix.push(' ');
        }

        let room = cols.saturating_sub(display_width(&prefix) + 1);
        let line = format!("{prefix}{}", truncate_to_width(option.as_ref(), room));
        frame.push_str(ansi::CLEAR_LINE);
        if current {
            frame.push_str(&term.style(&line, &theme.highlight));
        } else {
            frame.push_str(&line);
        }
        frame.push_str("\r\n");
    }
    term.write_str(&frame)?;
    term.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;
    use crate::render::strip_ansi;
    use crate::terminal::ScriptedBackend;

    const UP: &[u8] = b"\x1b[A";
    const DOWN: &[u8] = b"\x1b[B";
    const ENTER: &[u8] = b"\r";
    const SPACE: &[u8] = b" ";
    const ESC: &[u8] = b"\x1b";
    const CTRL_C: &[u8] = b"\x03";

    fn raw(keys: &[&[u8]]) -> Terminal<ScriptedBackend> {
        let backend = ScriptedBackend::tty().with_input(keys);
        let mut term = Terminal::with_env(backend, MapEnv::new().with("NO_COLOR", "1"));
        term.enter().unwrap();
        term
    }

    fn abc() -> [&'static str; 3] {
        ["A", "B", "C"]
    }

    #[test]
    fn down_down_enter_picks_third() {
        let mut term = raw(&[DOWN, DOWN, ENTER]);
        let theme = PromptTheme::default();
        let picked = select_value(&mut term, &theme, "Pick", &abc(), 0).unwrap();
        assert_eq!(picked.as_deref(), Some("C"));
    }

    #[test]
    fn up_wraps_to_last() {
        let mut term = raw(&[UP, ENTER]);
        let picked = select(&mut term, &PromptTheme::default(), "Pick", &abc(), 0).unwrap();
        assert_eq!(picked, Some(2));
    }

    #[test]
    fn down_wraps_to_first() {
        let mut term = raw(&[DOWN, ENTER]);
        let picked = select(&mut term, &PromptTheme::default(), "Pick", &abc(), 2).unwrap();
        assert_eq!(picked, Some(0));
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut term = raw(&[b"x", b"\t", DOWN, b"q", ENTER]);
        let picked = select(&mut term, &PromptTheme::default(), "Pick", &abc(), 0).unwrap();
        assert_eq!(picked, Some(1));
    }

    #[test]
    fn esc_and_ctrl_c_cancel() {
        let mut term = raw(&[DOWN, ESC]);
        assert_eq!(
            select(&mut term, &PromptTheme::default(), "Pick", &abc(), 0).unwrap(),
            None
        );
        let mut term = raw(&[CTRL_C]);
        assert_eq!(
            multi_select(&mut term, &PromptTheme::default(), "Pick", &abc(), &[]).unwrap(),
            None
        );
    }

    #[test]
    fn empty_options_return_immediately() {
        let mut term = raw(&[ENTER]);
        let none: [&str; 0] = [];
        let theme = PromptTheme::default();
        assert_eq!(select(&mut term, &theme, "Pick", &none, 0).unwrap(), None);
        assert_eq!(
            multi_select(&mut term, &theme, "Pick", &none, &[]).unwrap(),
            Some(vec![])
        );
        assert_eq!(term.backend().pending_input(), 1);
        assert!(term.backend().output().is_empty());
    }

    #[test]
    fn prompts_require_raw_mode() {
        let mut term = Terminal::new(ScriptedBackend::tty().with_input(&[ENTER]));
        let theme = PromptTheme::default();
        assert!(matches!(
            select(&mut term, &theme, "Pick", &abc(), 0),
            Err(TermError::NotInRawMode)
        ));
        assert!(matches!(
            multi_select(&mut term, &theme, "Pick", &abc(), &[]),
            Err(TermError::NotInRawMode)
        ));
    }

    #[test]
    fn multi_select_returns_in_option_order() {
        let mut term = raw(&[SPACE, DOWN, DOWN, SPACE, ENTER]);
        let picked =
            multi_select(&mut term, &PromptTheme::default(), "Pick", &abc(), &[]).unwrap();
        assert_eq!(picked, Some(vec![0, 2]));
    }

    #[test]
    fn multi_select_toggles_and_keeps_defaults() {
        let mut term = raw(&[SPACE, SPACE, DOWN, SPACE, ENTER]);
        let picked =
            multi_select(&mut term, &PromptTheme::default(), "Pick", &abc(), &[2, 0, 9]).unwrap();
        assert_eq!(picked, Some(vec![0, 1, 2]));
    }

    #[test]
    fn multi_select_can_confirm_nothing() {
        let mut term = raw(&[ENTER]);
        let picked =
            multi_select(&mut term, &PromptTheme::default(), "Pick", &abc(), &[]).unwrap();
        assert_eq!(picked, Some(vec![]));
    }

    #[test]
    fn redraw_moves_up_by_option_count() {
        let mut term = raw(&[DOWN, DOWN, ENTER]);
        select(&mut term, &PromptTheme::ascii(), "Pick", &abc(), 0).unwrap();
        let out = term.backend().output_text();

        assert_eq!(out.matches("Pick").count(), 1);
        assert_eq!(out.matches("\x1b[3A").count(), 2);
        assert_eq!(out.matches(ansi::CLEAR_LINE).count(), 9);
        assert!(!out.contains(ansi::CLEAR_SCREEN));
        assert!(out.starts_with("\x1b[?25lPick\r\n"));
        assert!(out.ends_with("\x1b[?25h"));

        let last_frame = out.rsplit("\x1b[3A").next().unwrap();
        assert_eq!(
            strip_ansi(last_frame).replace('\r', ""),
            "  A\n  B\n> C\n"
        );
    }

    #[test]
    fn multi_select_draws_markers() {
        let mut term = raw(&[SPACE, ENTER]);
        multi_select(&mut term, &PromptTheme::ascii(), "Pick", &abc(), &[]).unwrap();
        let out = term.backend().output_text();
        let last_frame = out.rsplit("\x1b[3A").next().unwrap();
        assert_eq!(
            strip_ansi(last_frame).replace('\r', ""),
            "> [x] A\n  [ ] B\n  [ ] C\n"
        );
    }

    #[test]
    fn cursor_is_shown_after_failed_read() {
        let mut term = raw(&[DOWN]);
        let result = select(&mut term, &PromptTheme::default(), "Pick", &abc(), 0);
        assert!(result.is_err());
        assert!(term.backend().output_text().ends_with("\x1b[?25h"));
    }

    #[test]
    fn long_labels_are_truncated_to_one_line() {
        let backend = ScriptedBackend::tty()
            .with_input(&[ENTER])
            .with_size(crate::terminal::Size::new(10, 5));
        let mut term = Terminal::with_env(backend, MapEnv::new().with("NO_COLOR", "1"));
        term.enter().unwrap();
        let options = ["abcdefghijklmnop"];
        select(&mut term, &PromptTheme::ascii(), "Pick", &options, 0).unwrap();
        let out = strip_ansi(&term.backend().output_text()).into_owned();
        assert!(out.contains("> abcdefg\r\n"));
    }
}
