//! Shared helpers for command handlers.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use astrodash_core::Rover;

use crate::error::CliError;

/// Parse a rover name from the command line.
pub fn parse_rover(name: &str) -> Result<Rover, CliError> {
    name.trim().parse().map_err(|_| CliError::UnknownRover {
        name: name.to_owned(),
    })
}

/// Spinner on stderr while a request is in flight. Hidden in quiet mode
/// and when stderr is not a terminal.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Date, or `-` when unknown.
pub fn date_cell(date: Option<chrono::NaiveDate>) -> String {
    date.map_or_else(|| "-".into(), |d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rover_names_are_case_insensitive() {
        assert_eq!(parse_rover(" Curiosity ").unwrap(), Rover::Curiosity);
        assert!(matches!(
            parse_rover("sojourner"),
            Err(CliError::UnknownRover { .. })
        ));
    }
}
