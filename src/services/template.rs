//! Firmware template loading and placeholder substitution

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::{PASSWORD_PLACEHOLDER, TEMPLATE_FILE_NAME, USERNAME_PLACEHOLDER};
use crate::errors::{FlasherError, Result};
use crate::models::Credentials;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Placeholder name (without delimiters) to replacement value
pub type Substitutions = HashMap<String, String>;

/// Wrap a placeholder name in its delimiters: `NAME` -> `{{NAME}}`
pub fn placeholder(name: &str) -> String {
    format!("{}{}{}", OPEN, name, CLOSE)
}

/// Substitution map for the username/password template
pub fn credential_substitutions(credentials: &Credentials) -> Substitutions {
    let mut map = Substitutions::new();
    map.insert(
        USERNAME_PLACEHOLDER.to_string(),
        credentials.username.clone(),
    );
    map.insert(
        PASSWORD_PLACEHOLDER.to_string(),
        credentials.password.clone(),
    );
    map
}

/// Replace every `{{NAME}}` whose name is in `substitutions`.
///
/// Single pass: inserted values are never rescanned, unknown placeholders stay
/// verbatim, and values are inserted literally without escaping.
pub fn render(template: &str, substitutions: &Substitutions) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        rendered.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let name_and_tail = &candidate[OPEN.len()..];

        let replacement = name_and_tail
            .find(CLOSE)
            .and_then(|end| {
                substitutions
                    .get(&name_and_tail[..end])
                    .map(|value| (value, OPEN.len() + end + CLOSE.len()))
            });

        match replacement {
            Some((value, consumed)) => {
                rendered.push_str(value);
                rest = &candidate[consumed..];
            }
            None => {
                // Not a known placeholder: keep one brace and look again from the next char
                rendered.push('{');
                rest = &candidate[1..];
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

/// Read a template from disk
pub fn load_template(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(FlasherError::TemplateNotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path)
        .map_err(|e| FlasherError::io(format!("reading template {}", path.display()), e))
}

/// Locate the firmware template.
///
/// Order: explicit override, `main.ino` next to the executable, `firmware/main.ino`
/// under the working directory.
pub fn resolve_template_path(override_path: Option<&Path>) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }

    if let Some(dir) = crate::platform::executable_dir() {
        let bundled = dir.join(TEMPLATE_FILE_NAME);
        if bundled.is_file() {
            return bundled;
        }
    }

    PathBuf::from("firmware").join(TEMPLATE_FILE_NAME)
}
