//! Merge Module
//!
//! スキーマ断片を集約スキーマへ深くマージする処理を提供するモジュール。

use serde_json::map::Entry;
use serde_json::{Map, Value};

/// `source` を `target` へ深くマージする
///
/// - オブジェクト同士はキーごとに再帰的にマージします。
/// - 配列同士は連結します（行やワークシートをまたいだ追加の蓄積先）。
/// - それ以外の衝突は後から来た値で上書きします。
pub(crate) fn deep_merge(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, incoming) in source {
        match target.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
            Entry::Occupied(mut slot) => merge_value(slot.get_mut(), incoming),
        }
    }
}

fn merge_value(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => deep_merge(existing, incoming),
        (Value::Array(existing), Value::Array(incoming)) => existing.extend(incoming),
        (existing, incoming) => *existing = incoming,
    }
}
