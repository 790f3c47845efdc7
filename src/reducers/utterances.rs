//! Utterance Reducer
//!
//! `UTTERANCES_*` ワークシートをインテントごとのサンプル発話一覧に変換します。
//! 先頭行の `intent` を含む列が見出し（インテント名）で、残りの行が発話です。

use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::schema::SchemaFragment;
use crate::text::camel_case;
use crate::types::RowRecord;

/// 発話中の `{Room Name}` のようなスロットのプレースホルダー
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([\s\S]+?)\}").expect("placeholder pattern is valid"));

/// `UTTERANCES_*` ワークシートを変換する
pub(super) fn utterances(rows: &[RowRecord]) -> SchemaFragment {
    let Some((header_row, samples)) = rows.split_first() else {
        return SchemaFragment::new().with("utterances", Value::Object(Map::new()));
    };

    // 1. 見出し列（列キー → インテント名）を取り出す
    let headers: Vec<(&str, &str)> = header_row
        .iter()
        .filter(|(key, _)| key.contains("intent"))
        .map(|(key, value)| (key, value.trim()))
        .filter(|(_, value)| !value.is_empty())
        .collect();

    // 2. 見出しごとに正規化した発話を集める（初出順で重複排除）
    let mut collected: IndexMap<&str, IndexSet<String>> = headers
        .iter()
        .map(|(_, name)| (*name, IndexSet::new()))
        .collect();

    for row in samples {
        for (column, name) in &headers {
            let utterance = normalize_utterance(row.get(column));
            if !utterance.is_empty() {
                if let Some(values) = collected.get_mut(name) {
                    values.insert(utterance);
                }
            }
        }
    }

    let utterances: Map<String, Value> = collected
        .into_iter()
        .map(|(name, values)| {
            let values = values.into_iter().map(Value::String).collect();
            (name.to_string(), Value::Array(values))
        })
        .collect();

    SchemaFragment::new().with("utterances", Value::Object(utterances))
}

/// 発話を正規化する
///
/// `{...}` のプレースホルダーはキャメルケースに、それ以外のトークンは小文字にします。
pub(crate) fn normalize_utterance(raw: &str) -> String {
    let replaced = PLACEHOLDER.replace_all(raw.trim(), |caps: &Captures| {
        format!("{{{}}}", camel_case(&caps[1]))
    });

    replaced
        .split(' ')
        .map(|token| {
            if token.contains('{') {
                token.to_string()
            } else {
                token.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::test_support::row;
    use serde_json::json;

    #[test]
    fn test_normalize_placeholders_and_tokens() {
        assert_eq!(
            normalize_utterance("Book a {RoomName} for {Start Time}"),
            "book a {roomName} for {startTime}"
        );
        assert_eq!(normalize_utterance("  HELP me  "), "help me");
        assert_eq!(normalize_utterance("Call {Room's Owner}"), "call {roomsOwner}");
        assert_eq!(normalize_utterance(""), "");
    }

    #[test]
    fn test_utterances_per_header() {
        let rows = vec![
            row(&[("bookroomintent", "BookRoom_intent"), ("helpintent", "HelpIntent"), ("notes", "ignored")]),
            row(&[("bookroomintent", "Book a {RoomName} for {Start Time}"), ("helpintent", "Help")]),
            row(&[("bookroomintent", "book a {roomName} for {startTime}"), ("helpintent", "")]),
            row(&[("bookroomintent", "Reserve {RoomName}"), ("notes", "anything")]),
        ];
        let fragment = utterances(&rows);
        assert_eq!(
            fragment.get("utterances").unwrap(),
            &json!({
                "BookRoom_intent": ["book a {roomName} for {startTime}", "reserve {roomName}"],
                "HelpIntent": ["help"]
            })
        );
    }

    #[test]
    fn test_header_without_samples_is_empty_list() {
        let rows = vec![row(&[("stopintent", "StopIntent")])];
        let fragment = utterances(&rows);
        assert_eq!(fragment.get("utterances").unwrap(), &json!({"StopIntent": []}));
    }

    #[test]
    fn test_blank_header_is_skipped() {
        let rows = vec![
            row(&[("intent", " "), ("otherintent", "Other")]),
            row(&[("intent", "lost"), ("otherintent", "kept")]),
        ];
        let fragment = utterances(&rows);
        assert_eq!(fragment.get("utterances").unwrap(), &json!({"Other": ["kept"]}));
    }

    #[test]
    fn test_empty_worksheet() {
        let fragment = utterances(&[]);
        assert_eq!(fragment.get("utterances").unwrap(), &json!({}));
    }
}
