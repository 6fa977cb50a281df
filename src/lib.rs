//! ttykit - raw-mode terminal toolkit
//!
//! Building blocks for interactive command-line programs:
//!
//! - [`Terminal`]: raw-mode entry and guaranteed restore, cursor and
//!   screen control, size and resize tracking
//! - [`input`]: decoding raw bytes into [`KeyEvent`]s with timeouts
//! - [`render`]: display width, colors, styling and tables
//! - [`prompt`]: select, multi-select and confirm prompts
//! - [`widgets`]: progress bar and spinner
//! - [`command`]: declarative argument parsing with generated help
//!
//! ```no_run
//! use ttykit::prompt::{self, PromptTheme};
//! use ttykit::Terminal;
//!
//! let mut term = Terminal::stdio();
//! term.enter()?;
//! let choice = prompt::select(&mut term, &PromptTheme::default(), "Pick one", &["a", "b"], 0)?;
//! term.exit();
//! println!("{choice:?}");
//! # Ok::<(), ttykit::TermError>(())
//! ```

pub mod capability;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod input;
pub mod prompt;
pub mod render;
pub mod terminal;
pub mod widgets;

pub use capability::ColorCapability;
pub use config::Config;
pub use error::{Result, TermError};
pub use input::{KeyEvent, NamedKey};
pub use render::{style, StyleSpec};
pub use terminal::{Backend, Size, Terminal};
