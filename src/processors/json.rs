//! `.json` language resources: a flat object of string keys to string values

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::core::errors::{ModTranslatorError, Result};
use crate::core::models::TextMapping;

/// Decode a JSON language file, keeping key order
pub fn decode(content: &str) -> Result<TextMapping> {
    let content = content.trim_start_matches('\u{feff}');
    let value: Value = serde_json::from_str(content)?;

    let Value::Object(object) = value else {
        return Err(ModTranslatorError::InvalidFormat {
            message: "top level of a JSON language file must be an object".to_string(),
        });
    };

    let mut mapping = TextMapping::new();
    for (key, value) in object {
        match value {
            Value::String(text) => {
                mapping.insert(key, text);
            }
            other => {
                return Err(ModTranslatorError::InvalidFormat {
                    message: format!("value of '{}' is not a string: {}", key, other),
                });
            }
        }
    }

    Ok(mapping)
}

/// Encode a mapping as a pretty-printed JSON object with four-space indentation
pub fn encode(mapping: &TextMapping) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    mapping.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(|e| ModTranslatorError::InvalidFormat {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;

    #[test]
    fn test_decode_keeps_file_order() {
        let content = r#"{
    "tile.block.name": "Block",
    "item.apple.name": "Apple",
    "gui.done": ""
}"#;
        let mapping = decode(content).unwrap();

        let keys: Vec<&str> = mapping.keys().collect();
        assert_eq!(keys, vec!["tile.block.name", "item.apple.name", "gui.done"]);
        assert_eq!(mapping.get("gui.done"), Some(""));
    }

    #[test]
    fn test_decode_handles_what_line_parsing_cannot() {
        // escaped quotes, several pairs on one line, byte-order mark
        let content = "\u{feff}{\"a\": \"say \\\"hi\\\"\", \"b\": \"x\\ny\"}";
        let mapping = decode(content).unwrap();

        assert_eq!(mapping.get("a"), Some("say \"hi\""));
        assert_eq!(mapping.get("b"), Some("x\ny"));
    }

    #[test]
    fn test_decode_rejects_non_string_values() {
        let err = decode(r#"{"a": {"nested": "x"}}"#).unwrap_err();
        assert!(matches!(err, ModTranslatorError::InvalidFormat { .. }));

        let err = decode(r#"["a", "b"]"#).unwrap_err();
        assert!(matches!(err, ModTranslatorError::InvalidFormat { .. }));

        assert!(matches!(
            decode("{\"a\": \"b\",}"),
            Err(ModTranslatorError::JsonError(_))
        ));
    }

    #[test]
    fn test_encode_is_equivalent_json() {
        let content = r#"{"key.greeting":"Hello","key.quote":"\"Ñandú\" \\ end"}"#;
        let mapping = decode(content).unwrap();
        let encoded = encode(&mapping).unwrap();

        let before: Value = serde_json::from_str(content).unwrap();
        let after: Value = serde_json::from_str(&encoded).unwrap();
        assert_json_eq!(before, after);
    }

    #[test]
    fn test_encode_layout() {
        let mapping: TextMapping = vec![("b", "Año"), ("a", "Uno")].into_iter().collect();
        let encoded = encode(&mapping).unwrap();

        assert_eq!(encoded, "{\n    \"b\": \"Año\",\n    \"a\": \"Uno\"\n}");
    }
}
