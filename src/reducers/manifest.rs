//! Manifest Reducers
//!
//! `SKILL_GENERAL_INFORMATION` と `SKILL_LOCALE_INFORMATION-<locale>` のワークシートを
//! マニフェストの断片に変換します。各行は `key`（ドット区切りのパス）と `value` を持ちます。

use serde_json::{Map, Value};
use tracing::debug;

use crate::api::SheetType;
use crate::fold::{assign, ensure_array, is_truthy, CellValue, PathExpr};
use crate::schema::SchemaFragment;
use crate::text::split_list;
use crate::types::RowRecord;

const MANIFEST_VERSION: &str = "1.0";

/// `apis.custom.interfaces[].type.AUDIO_PLAYER = TRUE` のような行を配列要素へ書き換える規則
struct ArrayRewrite {
    /// キーに含まれる接頭辞（この後ろが要素の値になる）
    prefix: &'static str,
    /// 追加先の配列のパス
    array_path: &'static str,
    /// 追加する要素のフィールド名
    field: &'static str,
}

static ARRAY_REWRITES: [ArrayRewrite; 3] = [
    ArrayRewrite {
        prefix: "apis.custom.interfaces[].type.",
        array_path: "apis.custom.interfaces",
        field: "type",
    },
    ArrayRewrite {
        prefix: "events.subscriptions[].eventName.",
        array_path: "events.subscriptions",
        field: "eventName",
    },
    ArrayRewrite {
        prefix: "permissions[].name.",
        array_path: "permissions",
        field: "name",
    },
];

/// キーが配列書き換え規則に一致すれば、規則と要素の値を返す
fn match_rewrite(key: &str) -> Option<(&'static ArrayRewrite, &str)> {
    ARRAY_REWRITES.iter().find_map(|rewrite| {
        key.split_once(rewrite.prefix)
            .map(|(_, name)| name)
            .filter(|name| !name.is_empty())
            .map(|name| (rewrite, name))
    })
}

/// `SKILL_GENERAL_INFORMATION` ワークシートを変換する
pub(super) fn skill_general(rows: &[RowRecord]) -> SchemaFragment {
    let mut manifest = Map::new();
    manifest.insert(
        "manifestVersion".to_string(),
        Value::String(MANIFEST_VERSION.to_string()),
    );

    for row in rows {
        let key = row.get("key").trim();
        if key.is_empty() {
            continue;
        }

        let mut value = CellValue::parse(row.get("value")).into_json();
        if key.contains("distributionCountries") {
            if let Value::String(text) = &value {
                value = list_value(text);
            }
        }

        if let Some((rewrite, name)) = match_rewrite(key) {
            // 偽の値でも配列自体は作成する
            ensure_array(&mut manifest, &PathExpr::parse(rewrite.array_path));
            if is_truthy(&value) {
                let mut entry = Map::new();
                entry.insert(rewrite.field.to_string(), Value::String(name.to_string()));
                let path = PathExpr::parse(&format!("{}[]", rewrite.array_path));
                assign(&mut manifest, &path, Value::Object(entry));
            }
            continue;
        }

        assign(&mut manifest, &PathExpr::parse(key), value);
    }

    SchemaFragment::new().with("manifest", Value::Object(manifest))
}

/// `SKILL_LOCALE_INFORMATION-<locale>` ワークシートを変換する
///
/// タイトルのプレースホルダー以降をロケールとし、`locales.` で始まるキーを
/// `locales.<locale>.` に書き換えます。数値は文字列のまま扱います。
pub(super) fn skill_locale_settings(title: &str, rows: &[RowRecord]) -> SchemaFragment {
    let locale = SheetType::SkillLocaleSettings
        .placeholder()
        .map(|placeholder| title.replacen(placeholder, "", 1))
        .unwrap_or_default();
    let locale = locale.trim();
    debug!(title, locale, "Reducing locale settings");

    let locale_prefix = format!("locales.{}.", locale);
    let mut manifest = Map::new();

    for row in rows {
        let raw_key = row.get("key").trim();
        if raw_key.is_empty() {
            continue;
        }

        let key = if locale.is_empty() {
            raw_key.to_string()
        } else {
            raw_key.replacen("locales.", &locale_prefix, 1)
        };

        let mut value = CellValue::parse_flag(row.get("value")).into_json();
        if key.contains("keywords") {
            if let Value::String(text) = &value {
                value = list_value(text);
            }
        }

        assign(&mut manifest, &PathExpr::parse(&key), value);
    }

    SchemaFragment::new().with("manifest", Value::Object(manifest))
}

fn list_value(text: &str) -> Value {
    Value::Array(split_list(text).into_iter().map(Value::String).collect())
}
