//! Command-line interface
//!
//! Argument parsing, command dispatch, and terminal rendering.

pub mod commands;
pub mod display;
pub mod output;
pub mod types;

pub use display::{output, CommandOutput};
pub use types::{Cli, Commands};

/// Report a command failure and exit with status 1.
///
/// In JSON mode the error is printed to stdout as `{"error": ...}` so
/// callers parsing stdout always receive JSON.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    tracing::debug!(error = ?err, "command failed");
    if json_mode {
        println!("{}", error_json(err));
    } else {
        eprintln!("{}", display::action_failure(&format!("{err:#}")));
    }
    std::process::exit(1)
}

/// JSON body printed for a failed command.
pub fn error_json(err: &anyhow::Error) -> serde_json::Value {
    let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
    serde_json::json!({
        "error": err.to_string(),
        "causes": causes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_json_includes_chain() {
        let err = Err::<(), _>(std::io::Error::other("disk full"))
            .context("Failed to write script to login.js")
            .unwrap_err();
        let json = error_json(&err);
        assert_eq!(json["error"], "Failed to write script to login.js");
        assert_eq!(json["causes"][0], "disk full");
    }
}
