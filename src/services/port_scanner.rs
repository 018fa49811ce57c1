//! Board discovery via the toolchain's `board list`

use crate::models::{FlashPhase, Port, PortList};
use crate::services::progress::ProgressSink;
use crate::services::toolchain::Toolchain;

/// Lists candidate device ports
#[derive(Debug, Clone)]
pub struct PortScanner {
    toolchain: Toolchain,
}

impl PortScanner {
    pub fn new(toolchain: Toolchain) -> Self {
        Self { toolchain }
    }

    /// Query connected boards.
    ///
    /// Never fails: any invocation problem degrades to the placeholder list so
    /// the user can retry with a refresh.
    pub async fn scan(&self, sink: &dyn ProgressSink) -> PortList {
        sink.emit(FlashPhase::Discovery, "🔍 Scanning for available ports...");

        let ports = match self.toolchain.board_list().await {
            Ok(output) if output.success() => parse_board_list(&output.output),
            Ok(output) => {
                log::warn!(
                    "board list exited with {:?}: {}",
                    output.exit_code,
                    output.output.trim()
                );
                Vec::new()
            }
            Err(e) => {
                log::warn!("Port scan failed: {}", e);
                Vec::new()
            }
        };

        let list = PortList::from_ports(ports);
        if list.is_empty_scan() {
            sink.emit(FlashPhase::Discovery, "⚠️ No boards found");
        } else {
            let names: Vec<&str> = list.iter().map(Port::as_str).collect();
            sink.emit(
                FlashPhase::Discovery,
                &format!("📡 Found {} port(s): {}", list.len(), names.join(", ")),
            );
        }
        list
    }
}

/// Extract port identifiers from `board list` output.
///
/// The first whitespace-delimited token of each line is a port, except for the
/// header (`Port ...`) and the `No boards found.` message.
pub fn parse_board_list(output: &str) -> Vec<Port> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|token| {
            let token = token.to_lowercase();
            token != "port" && token != "no"
        })
        .map(Port::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_header_and_no_boards_line() {
        let output = "Port  Protocol Type Board Name FQBN Core\n\
                      COM3  serial  Board (Raspberry Pi Pico)\n\
                      No boards found.\n";
        assert_eq!(parse_board_list(output), vec![Port::from("COM3")]);
    }

    #[test]
    fn test_parse_header_is_case_insensitive() {
        let output = "PORT PROTOCOL\n/dev/ttyACM0 serial Serial Port (USB) Raspberry Pi Pico rp2040:rp2040:rpipico rp2040:rp2040\n";
        assert_eq!(parse_board_list(output), vec![Port::from("/dev/ttyACM0")]);
    }

    #[test]
    fn test_parse_ignores_blank_lines() {
        let output = "\n   \nCOM3 serial\n\nCOM7 serial\n";
        assert_eq!(
            parse_board_list(output),
            vec![Port::from("COM3"), Port::from("COM7")]
        );
    }

    #[test]
    fn test_parse_only_no_boards() {
        assert!(parse_board_list("No boards found.\n").is_empty());
        assert!(parse_board_list("").is_empty());
    }
}
