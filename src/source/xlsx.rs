//! XLSX Row Source
//!
//! calamineを使用してXLSXワークブックを行レコードの取得元として扱います。
//! 各ワークシートの先頭行を見出しとし、見出しを列キーに正規化して
//! 2行目以降を `RowRecord` に変換します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

use crate::error::SheetVoiceError;
use crate::security::SecurityConfig;
use crate::source::{missing_worksheet, RowSource};
use crate::text::column_key;
use crate::types::RowRecord;

/// XLSXワークブックの取得元
///
/// ワークブック全体をメモリに保持し、ワークシートの取得ごとに開き直します。
/// そのため複数のワークシートを並列に取得できます。
#[derive(Debug, Clone)]
pub struct XlsxSource {
    title: String,
    buffer: Vec<u8>,
    sheet_names: Vec<String>,
    security: SecurityConfig,
}

impl XlsxSource {
    /// ファイルパスからワークブックを開く
    ///
    /// スプレッドシートのタイトルにはファイル名（拡張子を除く）を使用します。
    ///
    /// # 引数
    ///
    /// * `path` - XLSXファイルのパス
    ///
    /// # 戻り値
    ///
    /// * `Ok(XlsxSource)` - ワークブックの読み込みに成功した場合
    /// * `Err(SheetVoiceError)` - ファイルが読めない、またはワークブックとして解析できない場合
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SheetVoiceError> {
        let path = path.as_ref();
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, title)
    }

    /// リーダーからワークブックを読み込む
    pub fn from_reader<R: Read>(reader: R, title: impl Into<String>) -> Result<Self, SheetVoiceError> {
        Self::from_reader_with_config(reader, title, SecurityConfig::default())
    }

    /// セキュリティ設定を指定してリーダーからワークブックを読み込む
    pub fn from_reader_with_config<R: Read>(
        reader: R,
        title: impl Into<String>,
        security: SecurityConfig,
    ) -> Result<Self, SheetVoiceError> {
        // 1. 上限+1バイトまで読み込み、サイズ制限を検証
        let mut buffer = Vec::new();
        let limit = security.max_input_file_size.saturating_add(1);
        let bytes_read = reader.take(limit).read_to_end(&mut buffer)?;
        security.check_input_size(bytes_read as u64)?;

        // 2. ワークブックとして開けることを確認し、シート名を取得
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer.as_slice()))?;
        let sheet_names = workbook.sheet_names().to_vec();

        let title = title.into();
        debug!(title = %title, sheets = sheet_names.len(), bytes = bytes_read, "Opened workbook");

        Ok(Self {
            title,
            buffer,
            sheet_names,
            security,
        })
    }
}

impl RowSource for XlsxSource {
    fn title(&self) -> &str {
        &self.title
    }

    fn worksheet_titles(&self) -> Vec<String> {
        self.sheet_names.clone()
    }

    fn fetch_rows(&self, index: usize) -> Result<Vec<RowRecord>, SheetVoiceError> {
        let title = self
            .sheet_names
            .get(index)
            .ok_or_else(|| missing_worksheet(index))?;
        let fetch_error = |message: String| SheetVoiceError::Fetch {
            worksheet: title.clone(),
            message,
        };

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(self.buffer.as_slice()))
            .map_err(|e| fetch_error(e.to_string()))?;
        let range = workbook
            .worksheet_range(title)
            .map_err(|e| fetch_error(e.to_string()))?;

        self.security.check_row_count(title, range.height())?;
        Ok(range_to_records(&range))
    }
}

/// セル範囲を行レコード列に変換する
///
/// 先頭行が見出し行です。見出しが空の列は読み飛ばし、すべてのセルが空の行は除外します。
fn range_to_records(range: &Range<Data>) -> Vec<RowRecord> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let headers: Vec<Option<String>> = header_row
        .iter()
        .map(|cell| {
            let key = column_key(&cell_text(cell));
            (!key.is_empty()).then_some(key)
        })
        .collect();

    rows.map(|row| {
        headers
            .iter()
            .zip(row)
            .filter_map(|(header, cell)| header.as_ref().map(|key| (key.clone(), cell_text(cell))))
            .collect::<RowRecord>()
    })
    .filter(|record| !record.is_blank())
    .collect()
}

/// セル値を文字列に変換する
///
/// 整数値の浮動小数点数は小数部なしで、真偽値は `TRUE`/`FALSE` で表現します。
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        other => other.to_string(),
    }
}
