//! Text forms of JSON scalars shared by the renderers.

use serde_json::{Number, Value};
use unicode_width::UnicodeWidthStr;

/// Placeholder printed for `null` and for cells a row does not define.
pub(crate) const NIL: &str = "<nil>";

/// Formats a number in its shortest natural form.
///
/// Floats print in plain decimal notation without a trailing `.0`, so
/// `1500.0` prints as `1500` and `1e21` prints all of its digits.
pub(crate) fn format_number(number: &Number) -> String {
    if let Some(integer) = number.as_i64() {
        return integer.to_string();
    }
    if let Some(unsigned) = number.as_u64() {
        return unsigned.to_string();
    }
    number
        .as_f64()
        .map_or_else(|| number.to_string(), |float| float.to_string())
}

/// Formats a table cell. Nested values fall back to compact JSON.
pub(crate) fn display_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::from(NIL),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => format_number(number),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => nested.to_string(),
    }
}

/// Printable width of `text` in terminal columns.
pub(crate) fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Appends `text` left-justified to `width` columns followed by the gutter.
pub(crate) fn push_field(line: &mut String, text: &str, width: usize) {
    line.push_str(text);
    let padding = width.saturating_sub(display_width(text));
    line.extend(std::iter::repeat_n(' ', padding));
    line.push_str("  ");
}
