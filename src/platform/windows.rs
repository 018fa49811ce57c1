//! Windows process flags

use tokio::process::Command;

/// `CREATE_NO_WINDOW` from the Win32 process creation flags
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Keep console-subsystem children from flashing a window
pub fn hide_console(cmd: &mut Command) {
    cmd.creation_flags(CREATE_NO_WINDOW);
}
