//! Interactive install confirmation on the terminal

use std::io::{self, BufRead, Write};

use crate::services::InstallConsent;

/// Asks a y/N question on stdin; anything but yes declines
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConsent;

impl InstallConsent for TerminalConsent {
    fn confirm_install(&self, package: &str, index_url: &str) -> bool {
        println!("📦 The {} core needs to be installed.", package);
        println!("   This adds {} to arduino-cli's board manager URLs.", index_url);
        print!("Proceed? [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                log::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }
}
