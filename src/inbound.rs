//! Decoding of values the backend pushes through the bridge.
//!
//! The bridge hands us whatever the backend serialized, so every decoder here
//! is total: unexpected shapes become labeled fallbacks instead of errors.

use serde_json::Value;

use crate::markup::NarrativeCategory;
use crate::vitals::PlayerStatus;

/// `window` property the wasm client installs its updaters on.
pub const HANDLER_NAMESPACE: &str = "adventureClient";

/// Names the backend calls the updaters by. Eel only learns names it finds as
/// literal `eel.expose(name)` calls in served files, so `web/eel_bridge.js`
/// declares each of these and forwards to `HANDLER_NAMESPACE`.
pub mod handlers {
    pub const NARRATIVE: &str = "update_narrative";
    pub const STATUS: &str = "update_player_stats";
    pub const INVENTORY: &str = "update_inventory";
    pub const SKILLS: &str = "update_skills";

    #[cfg(test)]
    pub const ALL: [&str; 4] = [NARRATIVE, STATUS, INVENTORY, SKILLS];
}

/// Shown in place of a text field that was not a string.
pub const TEXT_FALLBACK: &str = "?";

/// One inventory or skill entry as received.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry {
    Name(String),
    /// Anything that was not a string.
    Malformed,
}

/// An absent or non-array value is an empty list.
pub fn decode_list(value: &Value) -> Vec<ListEntry> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => ListEntry::Name(s.clone()),
                _ => ListEntry::Malformed,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Numbers pass through; numeric strings are parsed; anything else is 0.
/// `"NaN"` and `"inf"` parse as `f64` but are not amounts, so they are 0 too.
pub fn decode_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Strings pass through, numbers and booleans are stringified, anything else
/// is `TEXT_FALLBACK`.
pub fn decode_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => TEXT_FALLBACK.to_string(),
    }
}

/// Narrative text may arrive without a category (`null`/absent → normal).
pub fn decode_narrative(text: &Value, category: &Value) -> (String, NarrativeCategory) {
    let category = match category {
        Value::String(s) => NarrativeCategory::parse(s),
        _ => NarrativeCategory::Normal,
    };
    (decode_text(text), category)
}

/// Positional status arguments: `name, hp, max_hp, mp, max_mp, location`.
///
/// Older backends omit the name and send `hp, max_hp, mp, max_mp, location`;
/// a numeric first argument selects that layout and the name falls back.
pub fn decode_status(args: &[Value]) -> PlayerStatus {
    let arg = |i: usize| args.get(i).unwrap_or(&Value::Null);
    if arg(0).is_number() {
        return PlayerStatus {
            name: TEXT_FALLBACK.to_string(),
            hp: decode_number(arg(0)),
            max_hp: decode_number(arg(1)),
            mp: decode_number(arg(2)),
            max_mp: decode_number(arg(3)),
            location: decode_text(arg(4)),
        };
    }
    PlayerStatus {
        name: decode_text(arg(0)),
        hp: decode_number(arg(1)),
        max_hp: decode_number(arg(2)),
        mp: decode_number(arg(3)),
        max_mp: decode_number(arg(4)),
        location: decode_text(arg(5)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const EEL_LOADER: &str = include_str!("../web/eel_bridge.js");

    #[test]
    fn loader_declares_every_handler_for_eel() {
        for name in handlers::ALL {
            assert!(
                EEL_LOADER.contains(&format!("function {name}(")),
                "web/eel_bridge.js has no function {name}"
            );
            assert!(
                EEL_LOADER.contains(&format!("eel.expose({name});")),
                "web/eel_bridge.js never calls eel.expose({name})"
            );
            assert!(
                EEL_LOADER.contains(&format!("forwardToClient(\"{name}\", args)")),
                "web/eel_bridge.js does not forward {name}"
            );
        }
        assert!(EEL_LOADER.contains(&format!("window.{HANDLER_NAMESPACE}")));
    }

    #[test]
    fn list_of_strings() {
        let list = decode_list(&json!(["Key", "Torch"]));
        assert_eq!(
            list,
            vec![ListEntry::Name("Key".into()), ListEntry::Name("Torch".into())]
        );
    }

    #[test]
    fn non_string_entries_are_malformed() {
        let list = decode_list(&json!(["Heal", 3, null, {"name": "x"}]));
        assert_eq!(list.len(), 4);
        assert_eq!(list[0], ListEntry::Name("Heal".into()));
        assert!(list[1..].iter().all(|e| *e == ListEntry::Malformed));
    }

    #[test]
    fn absent_list_is_empty() {
        assert!(decode_list(&Value::Null).is_empty());
        assert!(decode_list(&json!("Key")).is_empty());
        assert!(decode_list(&json!({})).is_empty());
    }

    #[test]
    fn numbers_with_fallback() {
        assert_eq!(decode_number(&json!(12)), 12.0);
        assert_eq!(decode_number(&json!(2.5)), 2.5);
        assert_eq!(decode_number(&json!(" 40 ")), 40.0);
        assert_eq!(decode_number(&json!("lots")), 0.0);
        assert_eq!(decode_number(&Value::Null), 0.0);
    }

    #[test]
    fn non_finite_strings_are_zero() {
        for s in ["NaN", "nan", "inf", "-inf", "infinity", "-Infinity"] {
            assert_eq!(decode_number(&json!(s)), 0.0, "{s}");
        }
    }

    #[test]
    fn status_with_nan_hp_is_critical_and_empty() {
        let args = [json!("Hero"), json!("NaN"), json!(100), json!(5), json!(20), json!("Well")];
        let s = decode_status(&args);
        assert_eq!(s.hp, 0.0);
        assert_eq!(s.hp_fill(), 0.0);
        assert_eq!(s.hp_tier(), crate::vitals::SeverityTier::Critical);

        let args = [json!("Hero"), json!("inf"), json!(100), json!(5), json!(20), json!("Well")];
        assert_eq!(decode_status(&args).hp, 0.0);
    }

    #[test]
    fn text_with_fallback() {
        assert_eq!(decode_text(&json!("Village")), "Village");
        assert_eq!(decode_text(&json!(7)), "7");
        assert_eq!(decode_text(&Value::Null), TEXT_FALLBACK);
        assert_eq!(decode_text(&json!(["x"])), TEXT_FALLBACK);
    }

    #[test]
    fn narrative_category_defaults_to_normal() {
        let (text, cat) = decode_narrative(&json!("hello"), &Value::Null);
        assert_eq!(text, "hello");
        assert_eq!(cat, NarrativeCategory::Normal);

        let (_, cat) = decode_narrative(&json!("hello"), &json!("important"));
        assert_eq!(cat, NarrativeCategory::Important);
    }

    #[test]
    fn status_from_positional_args() {
        let args = [json!("Hero"), json!(30), json!(100), json!(5), json!(20), json!("Old Well")];
        let s = decode_status(&args);
        assert_eq!(s.name, "Hero");
        assert_eq!(s.hp, 30.0);
        assert_eq!(s.max_hp, 100.0);
        assert_eq!(s.mp, 5.0);
        assert_eq!(s.max_mp, 20.0);
        assert_eq!(s.location, "Old Well");
    }

    #[test]
    fn nameless_status_layout() {
        let args = [json!(30), json!(100), json!(5), json!(20), json!("Old Well")];
        let s = decode_status(&args);
        assert_eq!(s.name, TEXT_FALLBACK);
        assert_eq!(s.hp, 30.0);
        assert_eq!(s.max_mp, 20.0);
        assert_eq!(s.location, "Old Well");
    }

    #[test]
    fn short_status_args_fall_back() {
        let s = decode_status(&[json!("Hero"), json!(10)]);
        assert_eq!(s.hp, 10.0);
        assert_eq!(s.max_hp, 0.0);
        assert_eq!(s.location, TEXT_FALLBACK);
    }
}
