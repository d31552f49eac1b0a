//! Click selection emitted by the map and pie views.

use serde::{Deserialize, Serialize};

/// What the user clicked. Lives for a single routing step and is never stored.
///
/// Serialized as `{"kind": "district", "value": "cd1"}` so the chart scripts
/// can send it back over the event channel unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Selection {
    /// Nothing clicked yet.
    #[default]
    None,
    /// A map polygon, identified by its district id.
    District(String),
    /// A pie slice, identified by its sentiment label text.
    Sentiment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_matches_chart_scripts() {
        let json = serde_json::to_string(&Selection::District("cd1".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"district","value":"cd1"}"#);

        let parsed: Selection =
            serde_json::from_str(r#"{"kind":"sentiment","value":"positive"}"#).unwrap();
        assert_eq!(parsed, Selection::Sentiment("positive".to_string()));

        let none: Selection = serde_json::from_str(r#"{"kind":"none"}"#).unwrap();
        assert_eq!(none, Selection::None);
    }
}
