//! Carry-Forward Module
//!
//! 空セルに直前の非空値を補完する畳み込みを提供します。

/// 列の値を順に走査し、空の値を直前の非空値で補完する
///
/// 値はトリムされ、空白のみの値は空として扱います。
/// 最初の非空値が現れるまでの値は`None`のままです。
///
/// # 引数
///
/// * `values` - 1列分の値（ワークシートの行順）
///
/// # 戻り値
///
/// 入力と同じ長さの補完済みの値
///
/// # 使用例
///
/// ```rust
/// use sheetvoice::fold::carry_forward;
///
/// let filled = carry_forward(["A", "", "", " B", ""]);
/// let filled: Vec<&str> = filled.iter().map(|v| v.as_deref().unwrap_or("")).collect();
/// assert_eq!(filled, vec!["A", "A", "A", "B", "B"]);
/// ```
pub fn carry_forward<'a, I>(values: I) -> Vec<Option<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .scan(None::<String>, |last_seen, value| {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                *last_seen = Some(trimmed.to_string());
            }
            Some(last_seen.clone())
        })
        .collect()
}
