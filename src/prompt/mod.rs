//! Interactive prompts.
//!
//! Every prompt borrows a raw-mode [`Terminal`](crate::Terminal), reads
//! keys until it has an answer, and returns `None` when the user cancels
//! with Esc or Ctrl+C.

mod confirm;
mod select;
mod theme;

pub use confirm::confirm;
pub use select::{multi_select, select, select_value};
pub use theme::PromptTheme;
