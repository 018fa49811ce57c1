//! Board target and port models

use serde::Serialize;
use std::fmt;

use crate::config::{BOARD_TARGET, NO_BOARDS_PLACEHOLDER};

/// Fully-qualified board profile (`vendor:architecture:board`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardTarget(&'static str);

impl BoardTarget {
    pub const fn new(fqbn: &'static str) -> Self {
        Self(fqbn)
    }

    pub fn fqbn(&self) -> &'static str {
        self.0
    }

    /// Board-support package identifier: the `vendor:architecture` prefix
    pub fn package(&self) -> String {
        self.0.split(':').take(2).collect::<Vec<_>>().join(":")
    }
}

impl Default for BoardTarget {
    fn default() -> Self {
        Self(BOARD_TARGET)
    }
}

impl fmt::Display for BoardTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Opaque platform-specific device identifier (`COM3`, `/dev/ttyACM0`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Port(String);

impl Port {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The "no boards found" sentinel
    pub fn placeholder() -> Self {
        Self(NO_BOARDS_PLACEHOLDER.to_string())
    }

    /// True for the sentinel or a blank name; such a port must never be flashed
    pub fn is_placeholder(&self) -> bool {
        let name = self.0.trim();
        name.is_empty() || name == NO_BOARDS_PLACEHOLDER
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Port {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Result of a port scan: never empty, holds the placeholder when nothing was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PortList(Vec<Port>);

impl PortList {
    pub fn from_ports(ports: Vec<Port>) -> Self {
        if ports.is_empty() {
            Self(vec![Port::placeholder()])
        } else {
            Self(ports)
        }
    }

    pub fn ports(&self) -> &[Port] {
        &self.0
    }

    /// Default selection: the first entry
    pub fn first(&self) -> &Port {
        &self.0[0]
    }

    /// True when the scan found no usable port
    pub fn is_empty_scan(&self) -> bool {
        self.0.len() == 1 && self.0[0].is_placeholder()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Port> {
        self.0.iter()
    }
}

impl Default for PortList {
    fn default() -> Self {
        Self::from_ports(Vec::new())
    }
}
