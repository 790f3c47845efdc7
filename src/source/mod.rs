//! Row Source Module
//!
//! ワークシートのタイトルと行レコード列を供給する取得元を抽象化するモジュール。
//! コンパイラーは取得元の種類（メモリ上の表、XLSXファイル）を区別しません。

mod xlsx;

pub use xlsx::XlsxSource;

use crate::error::SheetVoiceError;
use crate::types::{RowRecord, Worksheet};

/// ワークシートの取得元
///
/// 1つのスプレッドシート（ワークシートの集合）を表します。
/// ワークシートは並列に取得されるため、`Sync` である必要があります。
pub trait RowSource: Sync {
    /// スプレッドシートのタイトル（ロケールの推定に使用）
    fn title(&self) -> &str;

    /// ワークシートのタイトル一覧（ワークブック上の順序）
    ///
    /// タイトルは重複し得ます。ワークシートは一覧上の位置で識別されます。
    fn worksheet_titles(&self) -> Vec<String>;

    /// `index` 番目のワークシートの行レコード列を取得する
    ///
    /// # 引数
    ///
    /// * `index` - `worksheet_titles()` 上の位置
    ///
    /// # エラー
    ///
    /// ワークシートが存在しない、または読み込みに失敗した場合は
    /// `SheetVoiceError::Fetch` などのエラーを返します。
    fn fetch_rows(&self, index: usize) -> Result<Vec<RowRecord>, SheetVoiceError>;
}

/// 位置に対応するワークシートが存在しない場合のエラー
pub(crate) fn missing_worksheet(index: usize) -> SheetVoiceError {
    SheetVoiceError::Fetch {
        worksheet: format!("#{}", index),
        message: "worksheet not found".to_string(),
    }
}

/// メモリ上のワークシートを保持する取得元
///
/// # 使用例
///
/// ```rust
/// use sheetvoice::{MemorySource, RowRecord, RowSource, Worksheet};
///
/// let source = MemorySource::new("Room Booker en-US")
///     .with_worksheet(Worksheet::new("INVOCATION_NAMES", vec![RowRecord::new()]));
/// assert_eq!(source.worksheet_titles(), vec!["INVOCATION_NAMES".to_string()]);
/// assert!(source.fetch_rows(1).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    title: String,
    worksheets: Vec<Worksheet>,
}

impl MemorySource {
    /// 空の取得元を生成
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            worksheets: Vec::new(),
        }
    }

    /// ワークシートを追加する
    ///
    /// 同じタイトルのワークシートも別のワークシートとして保持します。
    pub fn with_worksheet(mut self, worksheet: Worksheet) -> Self {
        self.worksheets.push(worksheet);
        self
    }

    /// ワークシートを追加する
    pub fn push(&mut self, worksheet: Worksheet) {
        self.worksheets.push(worksheet);
    }
}

impl RowSource for MemorySource {
    fn title(&self) -> &str {
        &self.title
    }

    fn worksheet_titles(&self) -> Vec<String> {
        self.worksheets.iter().map(|ws| ws.title.clone()).collect()
    }

    fn fetch_rows(&self, index: usize) -> Result<Vec<RowRecord>, SheetVoiceError> {
        self.worksheets
            .get(index)
            .map(|ws| ws.rows.clone())
            .ok_or_else(|| missing_worksheet(index))
    }
}
