//! Intent Reducer
//!
//! `INTENT` ワークシートをインテント定義の一覧に変換します。
//! `intent` 列は結合セルとして扱い、空のセルは直前のインテント名を引き継ぎます。

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::fold::carry_forward;
use crate::schema::{to_json, Intent, IntentSlot, SchemaFragment};
use crate::text::{camel_case, split_list};
use crate::types::RowRecord;

/// インテントワークシートの1行を射影したもの
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct IntentRow {
    intent: String,
    slot_type: String,
    slot_name: String,
    environment: String,
    platform_slot: String,
    platform_intent: String,
}

/// `INTENT` ワークシートを変換する
pub(super) fn intents(rows: &[RowRecord]) -> SchemaFragment {
    // 1. インテント名の引き継ぎと射影（インテント名が決まる前の行は捨てる）
    let names = carry_forward(rows.iter().map(|row| row.get("intent")));
    let drafts: IndexSet<IntentRow> = rows
        .iter()
        .zip(names)
        .filter_map(|(row, intent)| {
            intent.map(|intent| IntentRow {
                intent,
                slot_type: row.get("slottype").trim().to_string(),
                slot_name: row.get("slotname").trim().to_string(),
                environment: row.get("environment").trim().to_string(),
                platform_slot: row.get("platformslot").to_string(),
                platform_intent: row.get("platformintent").to_string(),
            })
        })
        .collect();

    // 2. インテント名でグループ化（最初に現れた順）
    let mut groups: IndexMap<&str, Vec<&IntentRow>> = IndexMap::new();
    for draft in &drafts {
        groups.entry(draft.intent.as_str()).or_default().push(draft);
    }

    // 3. グループごとにインテントを組み立てる
    let intents: Vec<Value> = groups
        .into_iter()
        .map(|(name, group)| to_json(&build_intent(name, &group)))
        .collect();

    SchemaFragment::new().with("intents", Value::Array(intents))
}

fn build_intent(name: &str, group: &[&IntentRow]) -> Intent {
    let platform_intent: IndexSet<String> = group
        .iter()
        .map(|row| row.platform_intent.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();

    let slots: IndexSet<IntentSlot> = group
        .iter()
        .filter(|row| !row.slot_name.is_empty())
        .map(|row| IntentSlot {
            name: camel_case(&row.slot_name),
            slot_type: row.slot_type.clone(),
            platform: split_list(&row.platform_slot),
        })
        .collect();

    let environment = group
        .iter()
        .map(|row| row.environment.as_str())
        .find(|env| !env.is_empty())
        .map(split_list)
        .unwrap_or_default();

    Intent {
        name: name.to_string(),
        slots: slots.into_iter().collect(),
        platform_intent: platform_intent.into_iter().collect(),
        environment,
    }
}
