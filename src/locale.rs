//! Locale Module
//!
//! スプレッドシートのタイトルからロケールを推定するモジュール。

/// 既定のロケール一覧（先頭が既定値）
pub const VALID_LOCALES: [&str; 15] = [
    "en-US", "en-GB", "en-CA", "en-AU", "en-IN", "de-DE", "ja-JP", "es-ES", "es-MX", "es-US",
    "fr-FR", "fr-CA", "it-IT", "pt-BR", "hi-IN",
];

/// タイトルに含まれる最初のロケールを返す
///
/// 大文字小文字を区別せずに部分文字列として照合します。一致するものがなければ
/// 一覧の先頭を返します。一覧が空の場合のみ `None` を返します。
///
/// # 使用例
///
/// ```rust
/// use sheetvoice::resolve_locale;
///
/// let locales = ["en-US", "de-DE"];
/// assert_eq!(resolve_locale("Room Booker de-de", &locales), Some("de-DE"));
/// assert_eq!(resolve_locale("Room Booker", &locales), Some("en-US"));
/// ```
pub fn resolve_locale<'a, S: AsRef<str>>(title: &str, locales: &'a [S]) -> Option<&'a str> {
    let title = title.to_lowercase();

    locales
        .iter()
        .map(|locale| locale.as_ref())
        .find(|locale| title.contains(&locale.to_lowercase()))
        .or_else(|| locales.first().map(|locale| locale.as_ref()))
}
