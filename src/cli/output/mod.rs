//! Terminal progress output

pub mod progress;

pub use progress::{create_spinner, create_spinner_with_message, ProgressBarExt};
