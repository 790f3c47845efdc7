//! Slot Reducer
//!
//! `LIST_OF_<NAME>` ワークシートを、スロット値と同義語のマップ、応答文、発音、
//! カテゴリーマップの断片に変換します。

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

use crate::fold::{assign, carry_forward, PathExpr};
use crate::schema::SchemaFragment;
use crate::text::column_key;
use crate::types::RowRecord;

const LIST_PREFIX: &str = "LIST_OF_";
const BUILT_IN_MARKER: &str = "AMAZON.";
const RESPONSE_PREFIX: &str = "response-";

/// セル値に含まれる `[2]` のような数値インデックス
static BRACKET_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9]+)\]").expect("bracket index pattern is valid"));

/// 列キーの `-alternate1` のような別応答の接尾辞
static ALTERNATE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-alternate[0-9]+").expect("alternate suffix pattern is valid"));

/// 1つの応答フィールドに集まった値
///
/// 主応答は常に先頭、別応答は行の順に並びます。
#[derive(Debug, Default)]
struct ResponseValue {
    primary: Option<String>,
    alternates: Vec<String>,
}

impl ResponseValue {
    fn into_json(self) -> Value {
        if self.alternates.is_empty() {
            return self.primary.map(Value::String).unwrap_or(Value::Null);
        }

        Value::Array(
            self.primary
                .into_iter()
                .chain(self.alternates)
                .map(Value::String)
                .collect(),
        )
    }
}

/// `(カテゴリー, スロットキー)` ごとの応答フィールド
type ResponseTable = IndexMap<(String, String), IndexMap<String, ResponseValue>>;

/// `response-` 列の1セルを解析した結果
#[derive(Debug, PartialEq)]
struct ResponseCell {
    /// 応答オブジェクト内のドット区切りのパス
    path: String,
    /// 別応答かどうか
    alternate: bool,
    /// インデックスを取り除いた応答文
    text: String,
}

/// `response-` 列の列キーとセル値を解析する
///
/// 別応答の接尾辞を列キーから取り除いた後に、セル値の `[n]` を
/// パスの末尾のセグメントとして追加します。
fn parse_response_cell(column: &str, cell: &str) -> Option<ResponseCell> {
    let sub_path = column.strip_prefix(RESPONSE_PREFIX)?;

    let alternate = ALTERNATE_SUFFIX.is_match(sub_path);
    let mut path = if alternate {
        ALTERNATE_SUFFIX.replace_all(sub_path, "").into_owned()
    } else {
        sub_path.to_string()
    };

    let text = match BRACKET_INDEX.captures(cell) {
        Some(caps) => {
            path = format!("{}.{}", path, &caps[1]);
            BRACKET_INDEX.replacen(cell, 1, "").trim().to_string()
        }
        None => cell.to_string(),
    };

    if path.is_empty() {
        return None;
    }

    Some(ResponseCell {
        path,
        alternate,
        text,
    })
}

/// ワークシートのタイトルからスロット名を求める
///
/// 組み込みスロット（`AMAZON.` を含むタイトル）のみ `LIST_OF_` を取り除きます。
fn slot_name_of(title: &str) -> String {
    if title.contains(BUILT_IN_MARKER) {
        title.replacen(LIST_PREFIX, "", 1)
    } else {
        title.to_string()
    }
}

/// `LIST_OF_<NAME>` ワークシートを変換する
pub(super) fn slots(title: &str, rows: &[RowRecord]) -> SchemaFragment {
    let slot_name = slot_name_of(title);
    let value_column = column_key(slot_name.trim());
    debug!(title, slot = %slot_name, column = %value_column, "Reducing slot list");

    // 1. 値と同義語のマップ（同義語は直前の非空値を引き継ぐ）
    let synonyms = carry_forward(rows.iter().map(|row| row.get("synonym")));
    let pairs: IndexSet<(String, String)> = rows
        .iter()
        .zip(synonyms)
        .filter_map(|(row, synonym)| {
            let value = row.get(&value_column).trim();
            if value.is_empty() {
                None
            } else {
                Some((value.to_string(), synonym.unwrap_or_default()))
            }
        })
        .collect();

    let mut slot_values = Map::new();
    for (value, synonym) in pairs {
        slot_values.insert(value, Value::String(synonym));
    }

    // 2. 応答・発音・カテゴリー（元の行の同義語を使用し、引き継ぎは行わない）
    let default_category = slot_name.replacen(LIST_PREFIX, "", 1);
    let mut responses = ResponseTable::new();
    let mut pronunciations = Map::new();
    let mut slot_map = Map::new();

    for row in rows {
        let synonym = row.get("synonym").trim();
        let slot_key = if synonym.is_empty() {
            slot_name.clone()
        } else {
            synonym.replace('.', "")
        };

        let category = row.get("category").trim();
        let response_category = if category.is_empty() {
            default_category.clone()
        } else {
            category.to_uppercase()
        };

        let cells: Vec<ResponseCell> = row
            .iter()
            .filter(|(_, cell)| !cell.is_empty())
            .filter_map(|(column, cell)| parse_response_cell(column, cell))
            .collect();

        if !cells.is_empty() {
            let fields = responses
                .entry((response_category, slot_key.clone()))
                .or_default();
            for cell in cells {
                let field = fields.entry(cell.path).or_default();
                if cell.alternate {
                    field.alternates.push(cell.text);
                } else {
                    field.primary = Some(cell.text);
                }
            }
        }

        let pronunciation = row.get("pronunciation");
        if !pronunciation.is_empty() {
            pronunciations.insert(slot_key.clone(), Value::String(pronunciation.to_string()));
        }

        if !category.is_empty() {
            let path = PathExpr::from_keys([slot_name.as_str(), slot_key.as_str()]);
            assign(&mut slot_map, &path, Value::String(category.to_string()));
        }
    }

    let mut slots = Map::new();
    slots.insert(slot_name, Value::Object(slot_values));

    SchemaFragment::new()
        .with("slots", Value::Object(slots))
        .with("responses", Value::Object(build_responses(responses)))
        .with("pronunciations", Value::Object(pronunciations))
        .with("slotMap", Value::Object(slot_map))
}

/// 応答テーブルを `responses.<category>.<slotKey>.<path>` の形に組み立てる
fn build_responses(table: ResponseTable) -> Map<String, Value> {
    let mut responses = Map::new();

    for ((category, slot_key), fields) in table {
        let base = PathExpr::from_keys([category, slot_key]);
        for (path, value) in fields {
            let path = base.join(&PathExpr::parse(&path));
            assign(&mut responses, &path, value.into_json());
        }
    }

    responses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::test_support::row;
    use serde_json::json;

    fn value_of(fragment: &SchemaFragment, key: &str) -> Value {
        fragment.get(key).cloned().unwrap_or(Value::Null)
    }

    #[test]
    fn test_slot_values_inherit_synonyms() {
        let rows = vec![
            row(&[("listofrooms", "Main Hall"), ("synonym", "hall")]),
            row(&[("listofrooms", "Great Hall"), ("synonym", "")]),
            row(&[("listofrooms", " "), ("synonym", "")]),
            row(&[("listofrooms", "Kitchen"), ("synonym", "kitchen")]),
        ];
        let fragment = slots("LIST_OF_ROOMS", &rows);
        assert_eq!(
            value_of(&fragment, "slots"),
            json!({"LIST_OF_ROOMS": {"Main Hall": "hall", "Great Hall": "hall", "Kitchen": "kitchen"}})
        );
    }

    #[test]
    fn test_leading_rows_without_synonym_map_to_empty() {
        let rows = vec![row(&[("listofrooms", "Lobby"), ("synonym", "")])];
        let fragment = slots("LIST_OF_ROOMS", &rows);
        assert_eq!(
            value_of(&fragment, "slots"),
            json!({"LIST_OF_ROOMS": {"Lobby": ""}})
        );
    }

    #[test]
    fn test_built_in_slot_name_strips_prefix() {
        let rows = vec![row(&[("amazon.number", "1"), ("synonym", "one")])];
        let fragment = slots("LIST_OF_AMAZON.NUMBER", &rows);
        assert_eq!(
            value_of(&fragment, "slots"),
            json!({"AMAZON.NUMBER": {"1": "one"}})
        );
    }

    #[test]
    fn test_missing_value_column_yields_empty_slot() {
        let rows = vec![row(&[("rooms", "Main Hall")])];
        let fragment = slots("LIST_OF_ROOMS", &rows);
        assert_eq!(value_of(&fragment, "slots"), json!({"LIST_OF_ROOMS": {}}));
    }

    #[test]
    fn test_responses_grouped_by_category_and_slot_key() {
        let rows = vec![row(&[
            ("listofrooms", "Main Hall"),
            ("synonym", "main.hall"),
            ("category", "venue"),
            ("response-description", "The biggest room."),
            ("response-capacity", "[2]Two hundred people"),
        ])];
        let fragment = slots("LIST_OF_ROOMS", &rows);
        assert_eq!(
            value_of(&fragment, "responses"),
            json!({"VENUE": {"mainhall": {
                "description": "The biggest room.",
                "capacity": {"2": "Two hundred people"}
            }}})
        );
        assert_eq!(
            value_of(&fragment, "slotMap"),
            json!({"LIST_OF_ROOMS": {"mainhall": "venue"}})
        );
    }

    #[test]
    fn test_response_defaults_without_synonym_or_category() {
        let rows = vec![row(&[("listofrooms", "Attic"), ("response-greeting", "Hello")])];
        let fragment = slots("LIST_OF_ROOMS", &rows);
        assert_eq!(
            value_of(&fragment, "responses"),
            json!({"ROOMS": {"LIST_OF_ROOMS": {"greeting": "Hello"}}})
        );
        assert_eq!(value_of(&fragment, "slotMap"), json!({}));
    }

    #[test]
    fn test_alternate_after_primary_in_same_row() {
        let rows = vec![row(&[
            ("listofrooms", "Attic"),
            ("synonym", "attic"),
            ("response-greeting", "Hello"),
            ("response-greeting-alternate1", "Hi"),
            ("response-greeting-alternate2", "Hey"),
        ])];
        let fragment = slots("LIST_OF_ROOMS", &rows);
        assert_eq!(
            value_of(&fragment, "responses")["ROOMS"]["attic"]["greeting"],
            json!(["Hello", "Hi", "Hey"])
        );
    }

    #[test]
    fn test_alternate_before_primary_across_rows() {
        let rows = vec![
            row(&[
                ("listofrooms", "Attic"),
                ("synonym", "attic"),
                ("response-greeting", ""),
                ("response-greeting-alternate1", "Hi"),
            ]),
            row(&[
                ("listofrooms", "Loft"),
                ("synonym", "attic"),
                ("response-greeting", "Hello"),
                ("response-greeting-alternate1", ""),
            ]),
        ];
        let fragment = slots("LIST_OF_ROOMS", &rows);
        assert_eq!(
            value_of(&fragment, "responses")["ROOMS"]["attic"]["greeting"],
            json!(["Hello", "Hi"])
        );
    }

    #[test]
    fn test_alternates_without_primary() {
        let rows = vec![
            row(&[("listofrooms", "Attic"), ("response-bye-alternate1", "Bye")]),
            row(&[("listofrooms", "Attic"), ("response-bye-alternate2", "Ciao")]),
        ];
        let fragment = slots("LIST_OF_ROOMS", &rows);
        assert_eq!(
            value_of(&fragment, "responses")["ROOMS"]["LIST_OF_ROOMS"]["bye"],
            json!(["Bye", "Ciao"])
        );
    }

    #[test]
    fn test_pronunciations_use_slot_key() {
        let rows = vec![
            row(&[("listofrooms", "Café"), ("synonym", "cafe"), ("pronunciation", "ka-fay")]),
            row(&[("listofrooms", "Hall"), ("synonym", "hall"), ("pronunciation", "")]),
        ];
        let fragment = slots("LIST_OF_ROOMS", &rows);
        assert_eq!(value_of(&fragment, "pronunciations"), json!({"cafe": "ka-fay"}));
    }

    #[test]
    fn test_reducer_is_idempotent() {
        let rows = vec![
            row(&[("listofrooms", "Attic"), ("synonym", "attic"), ("response-greeting-alternate1", "Hi")]),
            row(&[("listofrooms", "Loft"), ("synonym", ""), ("response-greeting", "Hello")]),
        ];
        assert_eq!(slots("LIST_OF_ROOMS", &rows), slots("LIST_OF_ROOMS", &rows));
    }

    #[test]
    fn test_parse_response_cell_orders_alternate_then_index() {
        let cell = parse_response_cell("response-greeting-alternate1", "[3] Hi").unwrap();
        assert_eq!(
            cell,
            ResponseCell {
                path: "greeting.3".to_string(),
                alternate: true,
                text: "Hi".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_response_cell_pass_through() {
        // 数値でない括弧はそのまま残す
        let cell = parse_response_cell("response-greeting", "[loud] Hi").unwrap();
        assert_eq!(cell.path, "greeting");
        assert_eq!(cell.text, "[loud] Hi");
        assert!(!cell.alternate);

        // `-alternate` に数字が続かない場合は通常の応答
        let cell = parse_response_cell("response-greeting-alternate", "Hi").unwrap();
        assert_eq!(cell.path, "greeting-alternate");
        assert!(!cell.alternate);

        assert!(parse_response_cell("synonym", "x").is_none());
        assert!(parse_response_cell("response-", "x").is_none());
    }
}
