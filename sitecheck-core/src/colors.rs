//! Terminal colors for the human-readable check result.
//!
//! The summary line keeps its plain wording; only the values are tinted:
//! the resolved address in sky, the validated phone number in green, and
//! error messages in red. Catppuccin Frappe names, mapped to ANSI bright
//! colors so any terminal can show them.

use colored::{ColoredString, Colorize};

/// Result-line tints used by [`HumanFormatter`](crate::output::HumanFormatter).
pub trait CatppuccinExt {
    /// Error messages.
    fn ctp_red(&self) -> ColoredString;
    /// The validated phone number.
    fn ctp_green(&self) -> ColoredString;
    /// The resolved IP address.
    fn sky(&self) -> ColoredString;
}

impl<S: AsRef<str>> CatppuccinExt for S {
    fn ctp_red(&self) -> ColoredString {
        self.as_ref().bright_red()
    }

    fn ctp_green(&self) -> ColoredString {
        self.as_ref().bright_green()
    }

    fn sky(&self) -> ColoredString {
        self.as_ref().bright_cyan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::Color;

    #[test]
    fn test_result_tints() {
        assert_eq!("93.158.134.3".sky().fgcolor(), Some(Color::BrightCyan));
        assert_eq!("+7(912)345-67-89".ctp_green().fgcolor(), Some(Color::BrightGreen));
        assert_eq!(
            "Phone number not found on the site".to_string().ctp_red().fgcolor(),
            Some(Color::BrightRed)
        );
    }
}
