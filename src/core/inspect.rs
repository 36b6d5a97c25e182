//! Rendering of structured values and binary buffers

use super::config::InspectorConfig;
use super::paint::{visible_width, Paint};
use colored::Color;
use serde_json::Value;

const KEY: Paint = Paint::new().fg(Color::Cyan);
const STRING: Paint = Paint::new().fg(Color::Green);
const NUMBER: Paint = Paint::new().fg(Color::Magenta);
const BOOL: Paint = Paint::new().fg(Color::Blue).bold();
const NULL: Paint = Paint::new().fg(Color::BrightBlack).bold();
const ELIDED: Paint = Paint::new().fg(Color::BrightBlack);

/// Colorized renderer for structured values
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    options: InspectorConfig,
}

impl Inspector {
    pub fn new(options: InspectorConfig) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &InspectorConfig {
        &self.options
    }

    /// Render `value`, on one line when it fits `inline_width`
    pub fn render(&self, value: &Value) -> String {
        self.render_at(value, 0)
    }

    /// Render pre-formatted `Debug` output
    pub fn render_debug(&self, text: &str) -> String {
        text.lines()
            .map(|line| KEY.apply(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_at(&self, value: &Value, depth: usize) -> String {
        match value {
            Value::Null => NULL.apply("null"),
            Value::Bool(b) => BOOL.apply(&b.to_string()),
            Value::Number(n) => NUMBER.apply(&n.to_string()),
            Value::String(s) => STRING.apply(&self.quote(s)),
            Value::Array(items) if items.is_empty() => "[]".to_string(),
            Value::Object(map) if map.is_empty() => "{}".to_string(),
            Value::Array(_) if depth >= self.options.max_depth => ELIDED.apply("[Array]"),
            Value::Object(_) if depth >= self.options.max_depth => ELIDED.apply("[Object]"),
            Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| self.render_at(item, depth + 1))
                    .collect();
                self.layout("[", "]", parts, depth)
            }
            Value::Object(map) => {
                let parts: Vec<String> = map
                    .iter()
                    .map(|(key, item)| {
                        format!("{}: {}", KEY.apply(&key_text(key)), self.render_at(item, depth + 1))
                    })
                    .collect();
                self.layout("{", "}", parts, depth)
            }
        }
    }

    fn layout(&self, open: &str, close: &str, parts: Vec<String>, depth: usize) -> String {
        let inline = format!("{} {} {}", open, parts.join(", "), close);
        let multiline = parts.iter().any(|part| part.contains('\n'));
        if !multiline && visible_width(&inline) + depth * 4 <= self.options.inline_width {
            return inline;
        }

        let indent = "    ".repeat(depth + 1);
        let body: Vec<String> = parts
            .iter()
            .map(|part| format!("{}{}", indent, part))
            .collect();
        format!("{}\n{}\n{}{}", open, body.join(",\n"), "    ".repeat(depth), close)
    }

    fn quote(&self, s: &str) -> String {
        match self.options.max_string_length {
            Some(max) if s.chars().count() > max => {
                let cut: String = s.chars().take(max).collect();
                format!("'{}…'", cut)
            }
            _ => format!("'{}'", s),
        }
    }
}

fn key_text(key: &str) -> String {
    let identifier = !key.is_empty()
        && !key.starts_with(|c: char| c.is_ascii_digit())
        && key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if identifier {
        key.to_string()
    } else {
        format!("'{}'", key)
    }
}

/// Hex dump with offsets, 4-byte groups and a printable-character gutter
pub fn hex_dump(bytes: &[u8]) -> String {
    const ROW: usize = 16;
    const GROUP: usize = 4;

    let mut lines = vec![format!("Buffer ({} bytes)", bytes.len())];
    for (row, chunk) in bytes.chunks(ROW).enumerate() {
        let groups: Vec<String> = chunk.chunks(GROUP).map(hex::encode).collect();
        let hex_column = format!("{:<width$}", groups.join(" "), width = ROW * 2 + ROW / GROUP - 1);
        let gutter: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        lines.push(format!(
            "{}  {}  |{}|",
            ELIDED.apply(&format!("{:08x}", row * ROW)),
            hex_column,
            gutter
        ));
    }
    lines.join("\n")
}
