//! Process-wide constants for the RP2040 password keyboard target

/// Fully-qualified board profile passed to `compile`/`upload`
pub const BOARD_TARGET: &str = "rp2040:rp2040:rpipico";

/// Third-party board manager index providing the RP2040 core
pub const PACKAGE_INDEX_URL: &str =
    "https://github.com/earlephilhower/arduino-pico/releases/download/global/package_rp2040_index.json";

/// Placeholder names substituted into the firmware template
pub const USERNAME_PLACEHOLDER: &str = "USERNAME";
pub const PASSWORD_PLACEHOLDER: &str = "PASSWORD";

/// Source extension the toolchain expects for a sketch
pub const SKETCH_EXTENSION: &str = "ino";

/// Default firmware template file name
pub const TEMPLATE_FILE_NAME: &str = "main.ino";

/// Prefix of every build workspace directory
pub const WORKSPACE_PREFIX: &str = "rp2040_build_";

/// Shown in place of a port when discovery finds nothing
pub const NO_BOARDS_PLACEHOLDER: &str = "No boards found";

/// Toolchain binary name without platform suffix
pub const TOOLCHAIN_NAME: &str = "arduino-cli";
