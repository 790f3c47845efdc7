//! Types Module
//!
//! クレート全体で使用する入力データ型（ワークシートと行レコード）を定義するモジュール。

use indexmap::IndexMap;
use serde::Serialize;

/// 1行分のレコード
///
/// 小文字化された列キーからセル文字列へのマッピングです。
/// 列の順序はワークシート上の順序を保持します。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RowRecord {
    cells: IndexMap<String, String>,
}

impl RowRecord {
    /// 空のレコードを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// セルを追加する（キーは小文字化される）
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(key.into().to_lowercase(), value.into());
    }

    /// 列キーに対応するセル文字列を取得する
    ///
    /// 列が存在しない場合は空文字列を返します。
    pub fn get(&self, key: &str) -> &str {
        self.cells.get(key).map(String::as_str).unwrap_or("")
    }

    /// 列が存在するかを判定
    pub fn contains_key(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    /// 列キーとセル文字列を列順に走査する
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 列数
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// 列を1つも持たないかを判定
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// すべてのセルが空白のみかを判定
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for RowRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RowRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// ワークシート
///
/// タイトルと順序付きの行レコード列を保持する不変の入力です。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Worksheet {
    /// ワークシートのタイトル
    pub title: String,

    /// 行レコード（ヘッダー行は含まない）
    pub rows: Vec<RowRecord>,
}

impl Worksheet {
    /// 新しいワークシートを生成
    pub fn new(title: impl Into<String>, rows: Vec<RowRecord>) -> Self {
        Self {
            title: title.into(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_record_lowercases_keys() {
        let row: RowRecord = [("Synonym", "Big"), ("LIST_OF_ROOMS", "hall")]
            .into_iter()
            .collect();
        assert_eq!(row.get("synonym"), "Big");
        assert_eq!(row.get("list_of_rooms"), "hall");
        assert!(!row.contains_key("Synonym"));
    }

    #[test]
    fn test_row_record_missing_column_is_empty() {
        let row = RowRecord::new();
        assert_eq!(row.get("anything"), "");
        assert!(row.is_empty());
        assert!(row.is_blank());
    }

    #[test]
    fn test_row_record_preserves_column_order() {
        let row: RowRecord = [("b", "1"), ("a", "2"), ("c", "3")].into_iter().collect();
        let keys: Vec<&str> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_row_record_is_blank() {
        let row: RowRecord = [("a", "  "), ("b", "")].into_iter().collect();
        assert!(row.is_blank());

        let row: RowRecord = [("a", "  "), ("b", "x")].into_iter().collect();
        assert!(!row.is_blank());
    }

    #[test]
    fn test_worksheet_serializes_in_column_order() {
        let row: RowRecord = [("Intent", "BookRoom"), ("Slot Name", "room")]
            .into_iter()
            .collect();
        let worksheet = Worksheet::new("INTENT", vec![row]);
        assert_eq!(
            serde_json::to_string(&worksheet).unwrap(),
            r#"{"title":"INTENT","rows":[{"intent":"BookRoom","slot name":"room"}]}"#
        );
    }
}
