//! Rendering of decrypted credentials.
//!
//! Output is built in a `Zeroizing` buffer since it holds every plaintext.

use serde::ser::{SerializeMap, Serializer};
use zeroize::Zeroizing;

use crate::core::store::PlaintextItem;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `NAME="value"` lines
    Dotenv,
    /// `export NAME='value'` lines
    Bash,
    /// One JSON object, keys in store order
    Json,
}

/// Render decrypted credentials in the requested format.
pub fn render(items: &[PlaintextItem], format: ExportFormat) -> Zeroizing<String> {
    match format {
        ExportFormat::Dotenv => render_lines(items, |name, value| {
            format!("{}=\"{}\"\n", name.to_uppercase(), escape_dotenv(value))
        }),
        ExportFormat::Bash => render_lines(items, |name, value| {
            format!("export {}='{}'\n", name.to_uppercase(), escape_bash(value))
        }),
        ExportFormat::Json => render_json(items),
    }
}

fn render_lines(
    items: &[PlaintextItem],
    line: impl Fn(&str, &str) -> String,
) -> Zeroizing<String> {
    let mut out = Zeroizing::new(String::new());
    for item in items {
        let rendered = Zeroizing::new(line(item.name.as_str(), item.plaintext.as_str()));
        out.push_str(&rendered);
    }
    out
}

fn escape_dotenv(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_bash(value: &str) -> String {
    value.replace('\'', "'\\''")
}

/// Serializes as a map in slice order.
struct OrderedItems<'a>(&'a [PlaintextItem]);

impl serde::Serialize for OrderedItems<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for item in self.0 {
            map.serialize_entry(&item.name, item.plaintext.as_str())?;
        }
        map.end()
    }
}

fn render_json(items: &[PlaintextItem]) -> Zeroizing<String> {
    // Serializing strings into a String cannot fail.
    let mut out =
        Zeroizing::new(serde_json::to_string_pretty(&OrderedItems(items)).unwrap_or_default());
    out.push('\n');
    out
}
