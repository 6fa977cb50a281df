//! Progress indicators that redraw a single line in place.

mod clock;
mod loader;
mod progress;

pub use clock::{format_duration, Clock, ManualClock, SystemClock};
pub use loader::{Loader, FRAMES, FRAME_INTERVAL};
pub use progress::ProgressBar;
