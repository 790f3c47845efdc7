//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// sheetvoiceクレート全体で使用するエラー型
///
/// ワークブックの読み込み、ワークシートの取得、スキーマの組み立て中に
/// 発生するエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Parse`: ワークブックの解析中に発生したエラー（calamine由来）
/// - `Json`: スキーマ値の(デ)シリアライズに失敗したエラー
/// - `Config`: ビルダー設定の検証に失敗したエラー
/// - `Fetch`: Row Sourceがワークシートの行を取得できなかったエラー
/// - `SecurityViolation`: 入力サイズ制限に違反したエラー
///
/// リデューサー自体はエラーを返しません。不正な行は空の断片として扱われます。
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetvoice::{SheetVoiceError, XlsxSource};
///
/// fn load(path: &str) -> Result<XlsxSource, SheetVoiceError> {
///     let source = XlsxSource::open(path)?; // Io / Parse エラーが自動的に変換される
///     Ok(source)
/// }
/// ```
#[derive(Error, Debug)]
pub enum SheetVoiceError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// calamineクレートがワークブックを開く際に発生したエラーです。
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse workbook: {0}")]
    Parse(#[from] calamine::Error),

    /// JSON値の変換エラー
    ///
    /// 集約スキーマから型付きビュー（`Intent`など）を取り出す際に発生します。
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `CompilerBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、ロケール一覧が空の場合などです。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use sheetvoice::{CompilerBuilder, SheetVoiceError};
    ///
    /// let result = CompilerBuilder::new()
    ///     .with_locales(Vec::<String>::new())
    ///     .build();
    ///
    /// match result {
    ///     Err(SheetVoiceError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// ワークシートの行取得に失敗したエラー
    ///
    /// Row Sourceが返すエラーです。コアは再試行せず、そのまま呼び出し元へ返します。
    #[error("Failed to fetch rows of worksheet '{worksheet}': {message}")]
    Fetch {
        /// 取得に失敗したワークシートのタイトル
        worksheet: String,
        /// エラーの詳細メッセージ
        message: String,
    },

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限を超えた場合などに発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
