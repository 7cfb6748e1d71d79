//! Forgiving parser for inline `style` attribute values.
//!
//! Structural editors carry a `style="opacity:0.5;color:red"` attribute on
//! their container directives. Invalid fragments are skipped; this never
//! fails, matching the forgiving-parser policy used everywhere else.

use std::collections::BTreeMap;

/// Parse a `prop:value;prop:value` string into a property map.
///
/// Whitespace around properties and values is trimmed; fragments without a
/// colon, or with an empty property name, are ignored.
pub fn parse_style_string(style: &str) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();

    for fragment in style.split(';') {
        let Some((prop, value)) = fragment.split_once(':') else {
            continue;
        };
        let prop = prop.trim();
        let value = value.trim();
        if prop.is_empty() || value.is_empty() {
            continue;
        }
        properties.insert(prop.to_string(), value.to_string());
    }

    properties
}
