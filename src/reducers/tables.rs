//! Table Reducers
//!
//! 行をそのまま射影するだけの単純なワークシート（環境情報、呼び出し名、
//! 表記ゆれ、その他の表）を変換します。

use indexmap::IndexSet;
use serde_json::{Map, Value};
use tracing::debug;

use crate::schema::{to_json, EnvironmentInfo, Invocation, SchemaFragment, SlotVariant};
use crate::text::{camel_case, column_key};
use crate::types::RowRecord;

/// 取得元が付与するメタデータ列（見出しとして扱わない）
const METADATA_COLUMNS: [&str; 4] = ["_xml", "id", "app:edited", "_links"];

/// `SKILL_ENVIRONMENTS_INFORMATION` ワークシートを変換する
pub(super) fn environments(rows: &[RowRecord]) -> SchemaFragment {
    let infos: IndexSet<EnvironmentInfo> = rows
        .iter()
        .filter(|row| !row.is_blank())
        .map(|row| EnvironmentInfo {
            key: row.get("key").to_string(),
            value: row.get("value").to_string(),
            environment: row.get("environment").to_string(),
            platform: row.get("platform").to_string(),
        })
        .collect();

    let values = infos.iter().map(to_json).collect();
    SchemaFragment::new().with("skillEnvironmentsInformation", Value::Array(values))
}

/// `INVOCATION_NAMES` ワークシートを変換する
pub(super) fn invocations(rows: &[RowRecord]) -> SchemaFragment {
    let invocations: IndexSet<Invocation> = rows
        .iter()
        .filter(|row| !row.is_blank())
        .map(|row| Invocation {
            invocation_name: row.get("invocationname").to_string(),
            environment: row.get("environment").to_string(),
        })
        .collect();

    let values = invocations.iter().map(to_json).collect();
    SchemaFragment::new().with("invocations", Value::Array(values))
}

/// `CHATBOT_SLOT_VARIANTS` ワークシートを変換する
///
/// `joined` をキーとし、同じキーの行は後勝ちになります。
pub(super) fn variants(rows: &[RowRecord]) -> SchemaFragment {
    let mut variants = Map::new();

    for row in rows {
        let joined = row.get("joined");
        if joined.is_empty() {
            continue;
        }
        let variant = SlotVariant {
            joined: joined.to_string(),
            split: row.get("split").to_string(),
            alt: row.get("alternatespelling").to_string(),
        };
        variants.insert(joined.to_string(), to_json(&variant));
    }

    SchemaFragment::new().with("variants", Value::Object(variants))
}

/// 許可リストに含まれるその他のワークシートを変換する
///
/// 先頭行の値を見出しとし、以降の各行を `camelCase(見出し) → 値` に付け替えます。
/// 結果はワークシートのタイトルをキーとして `others` に格納されます。
pub(super) fn others(title: &str, rows: &[RowRecord]) -> SchemaFragment {
    let mut others = Map::new();

    let table = match rows.split_first() {
        Some((header_row, records)) => {
            let headers: Vec<(String, String)> = header_row
                .iter()
                .filter(|(key, _)| !METADATA_COLUMNS.contains(key))
                .map(|(_, value)| value.trim())
                .filter(|header| !header.is_empty())
                .map(|header| (camel_case(header), column_key(header)))
                .collect();
            debug!(title, columns = headers.len(), "Reducing other worksheet");

            records
                .iter()
                .map(|record| remap_record(record, &headers))
                .collect()
        }
        None => Vec::new(),
    };

    if !title.is_empty() {
        others.insert(title.to_string(), Value::Array(table));
    }
    SchemaFragment::new().with("others", Value::Object(others))
}

fn remap_record(record: &RowRecord, headers: &[(String, String)]) -> Value {
    let remapped: Map<String, Value> = headers
        .iter()
        .filter(|(_, column)| record.contains_key(column))
        .map(|(name, column)| (name.clone(), Value::String(record.get(column).to_string())))
        .collect();
    Value::Object(remapped)
}
