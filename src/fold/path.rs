//! Path Expression Module
//!
//! `apis.custom.interfaces[]` のようなドット区切りのパス式の解析と、
//! ネストしたJSONオブジェクトへの代入を提供します。

use serde_json::{Map, Value};
use std::fmt;

/// 配列追加を表すセグメント末尾のマーカー
const APPEND_MARKER: &str = "[]";

/// パス式の1セグメント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    /// オブジェクトのキー
    pub key: String,

    /// `[]` が付いていた場合は `true`（このキーの配列に追加する）
    pub append: bool,
}

impl PathSegment {
    /// 通常のキーセグメントを生成
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            append: false,
        }
    }
}

/// 解析済みのパス式
///
/// # 使用例
///
/// ```rust
/// use serde_json::{json, Map};
/// use sheetvoice::fold::{assign, PathExpr};
///
/// let mut target = Map::new();
/// let path = PathExpr::parse("a.b[].c");
/// assign(&mut target, &path, json!(1));
/// assign(&mut target, &path, json!(2));
/// assert_eq!(serde_json::Value::Object(target), json!({"a": {"b": [{"c": 1}, {"c": 2}]}}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathExpr {
    segments: Vec<PathSegment>,
}

impl PathExpr {
    /// ドット区切りの文字列を解析する
    ///
    /// 空のセグメント（`a..b` や末尾の `.`）は無視されます。
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('.')
            .filter_map(|raw| {
                let (key, append) = match raw.strip_suffix(APPEND_MARKER) {
                    Some(stripped) => (stripped, true),
                    None => (raw, false),
                };
                if key.is_empty() {
                    None
                } else {
                    Some(PathSegment {
                        key: key.to_string(),
                        append,
                    })
                }
            })
            .collect();

        Self { segments }
    }

    /// キーをそのまま並べたパスを生成する（ドットや `[]` を解釈しない）
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: keys.into_iter().map(PathSegment::key).collect(),
        }
    }

    /// 末尾にパスを連結した新しいパスを返す
    pub fn join(&self, other: &PathExpr) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// セグメント一覧
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// セグメントを持たないかを判定
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            f.write_str(&segment.key)?;
            if segment.append {
                f.write_str(APPEND_MARKER)?;
            }
        }
        Ok(())
    }
}

/// パスで示される位置に値を代入する
///
/// - `[]` のないパスは、ネストしたキーの値を上書きします。
/// - `[]` の付いたセグメントは配列として扱い、値（または残りのパスで包んだ
///   オブジェクト）を末尾に追加します。配列がなければ空の配列を作成します。
///
/// 途中のキーがオブジェクトでない場合は空のオブジェクトで置き換えます。
/// 追加先が配列でないスカラー値の場合は、その値を先頭要素とする配列に変換します。
pub fn assign(target: &mut Map<String, Value>, path: &PathExpr, value: Value) {
    assign_segments(target, path.segments(), value);
}

fn assign_segments(target: &mut Map<String, Value>, segments: &[PathSegment], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    if head.append {
        let slot = target
            .entry(head.key.clone())
            .or_insert_with(|| Value::Array(Vec::new()));
        wrap_in_array(slot);

        if let Value::Array(items) = slot {
            if rest.is_empty() {
                items.push(value);
            } else {
                let mut entry = Map::new();
                assign_segments(&mut entry, rest, value);
                items.push(Value::Object(entry));
            }
        }
        return;
    }

    if rest.is_empty() {
        target.insert(head.key.clone(), value);
        return;
    }

    let slot = target
        .entry(head.key.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(child) = slot {
        assign_segments(child, rest, value);
    }
}

/// パスで示される位置に配列が存在することを保証する
///
/// 既に値が存在する場合は配列に変換します（スカラー値は先頭要素になります）。
/// `[]` マーカーはここでは通常のキーとして扱います。
pub fn ensure_array(target: &mut Map<String, Value>, path: &PathExpr) {
    let Some((last, parents)) = path.segments().split_last() else {
        return;
    };

    let mut current = target;
    for segment in parents {
        let slot = current
            .entry(segment.key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        match slot {
            Value::Object(child) => current = child,
            _ => return,
        }
    }

    let slot = current
        .entry(last.key.clone())
        .or_insert_with(|| Value::Array(Vec::new()));
    wrap_in_array(slot);
}

/// 配列でない値を配列に変換する（`null` は空配列になる）
fn wrap_in_array(slot: &mut Value) {
    match slot {
        Value::Array(_) => {}
        Value::Null => *slot = Value::Array(Vec::new()),
        other => {
            let previous = other.take();
            *other = Value::Array(vec![previous]);
        }
    }
}
