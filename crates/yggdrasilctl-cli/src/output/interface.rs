//! TUN/TAP interface summaries.

use std::fmt::{self, Write as _};

use serde_json::{Map, Value};

use super::scalar::format_number;

/// Renders `{interface: {mtu, tap_mode}}` payloads.
///
/// Attributes that are missing or of the wrong type are left out.
pub(crate) fn render_interfaces(response: &Value) -> Option<String> {
    let interfaces = response.as_object()?;
    let mut output = String::new();
    write_interfaces(&mut output, interfaces).ok()?;
    Some(output)
}

fn write_interfaces(output: &mut String, interfaces: &Map<String, Value>) -> fmt::Result {
    let mut names: Vec<&String> = interfaces.keys().collect();
    names.sort_unstable();

    for name in names {
        writeln!(output, "Interface name: {name}")?;
        let Some(attributes) = interfaces.get(name).and_then(Value::as_object) else {
            continue;
        };
        if let Some(Value::Number(mtu)) = attributes.get("mtu") {
            writeln!(output, "Interface MTU: {}", format_number(mtu))?;
        }
        if let Some(tap_mode) = attributes.get("tap_mode").and_then(Value::as_bool) {
            writeln!(output, "TAP mode: {tap_mode}")?;
        }
    }
    Ok(())
}
