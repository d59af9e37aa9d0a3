//! `.lang` language resources: one `key=value` pair per line

use crate::core::errors::{ModTranslatorError, Result};
use crate::core::models::TextMapping;

/// Decode a `.lang` file
///
/// Lines are trimmed; blank lines and `#` comments are skipped. Each other
/// line splits on its first `=`, so values may contain `=` themselves.
pub fn decode(content: &str) -> Result<TextMapping> {
    let content = content.trim_start_matches('\u{feff}');
    let mut mapping = TextMapping::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| ModTranslatorError::MalformedLineError {
                line_number: idx + 1,
                line: line.to_string(),
            })?;
        mapping.insert(key, value);
    }

    Ok(mapping)
}

/// Encode a mapping as `key=value` lines in mapping order
pub fn encode(mapping: &TextMapping) -> String {
    let mut text = String::new();
    for (key, value) in mapping.iter() {
        text.push_str(key);
        text.push('=');
        text.push_str(value);
        text.push('\n');
    }
    text
}
