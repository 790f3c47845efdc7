//! Cell Coercion Module
//!
//! セル文字列を論理値・数値・文字列のいずれかに変換します。

use serde_json::{Number, Value};

/// 型変換後のセル値
///
/// 変換の優先順位は「論理値リテラル → 数値 → 文字列」です。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 論理値（`TRUE` / `FALSE`）
    Bool(bool),

    /// 数値
    Number(Number),

    /// 文字列（変換できなかった値はそのまま）
    Text(String),
}

impl CellValue {
    /// 論理値・数値・文字列の順に変換を試みる
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheetvoice::fold::CellValue;
    ///
    /// assert_eq!(CellValue::parse("TRUE"), CellValue::Bool(true));
    /// assert_eq!(CellValue::parse("42"), CellValue::Number(42.into()));
    /// assert_eq!(CellValue::parse("US,GB"), CellValue::Text("US,GB".to_string()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        match Self::parse_flag(raw) {
            CellValue::Text(text) => Self::parse_number(&text).unwrap_or(CellValue::Text(text)),
            flag => flag,
        }
    }

    /// 論理値リテラルのみを変換する（数値は文字列のまま）
    pub fn parse_flag(raw: &str) -> Self {
        match raw {
            "TRUE" => CellValue::Bool(true),
            "FALSE" => CellValue::Bool(false),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    fn parse_number(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Ok(int) = trimmed.parse::<i64>() {
            return Some(CellValue::Number(int.into()));
        }

        // "inf" / "NaN" などは f64 としては解釈できるが数値として扱わない
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .and_then(Number::from_f64)
            .map(CellValue::Number)
    }

    /// JSON値に変換
    pub fn into_json(self) -> Value {
        match self {
            CellValue::Bool(b) => Value::Bool(b),
            CellValue::Number(n) => Value::Number(n),
            CellValue::Text(s) => Value::String(s),
        }
    }
}

/// 値が真として扱われるかを判定
///
/// `false`、`0`、空文字列、`null` は偽です。
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bool_literals() {
        assert_eq!(CellValue::parse("TRUE"), CellValue::Bool(true));
        assert_eq!(CellValue::parse("FALSE"), CellValue::Bool(false));
        // 大文字のリテラルのみが論理値になる
        assert_eq!(CellValue::parse("true"), CellValue::Text("true".to_string()));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(CellValue::parse("12").into_json(), json!(12));
        assert_eq!(CellValue::parse(" 1.5 ").into_json(), json!(1.5));
        assert_eq!(CellValue::parse("0").into_json(), json!(0));
    }

    #[test]
    fn test_parse_non_numbers_pass_through() {
        assert_eq!(CellValue::parse("").into_json(), json!(""));
        assert_eq!(CellValue::parse("inf").into_json(), json!("inf"));
        assert_eq!(CellValue::parse("NaN").into_json(), json!("NaN"));
        assert_eq!(CellValue::parse("1.0.0").into_json(), json!("1.0.0"));
    }

    #[test]
    fn test_parse_flag_keeps_numbers_as_text() {
        assert_eq!(CellValue::parse_flag("12"), CellValue::Text("12".to_string()));
        assert_eq!(CellValue::parse_flag("TRUE"), CellValue::Bool(true));
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(3)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&Value::Null));
    }
}
