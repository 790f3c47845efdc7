//! Security Module
//!
//! 入力ワークブックの読み込み時に適用する制限を実装するモジュール。
//! 巨大なファイルや行数の異常に多いワークシートによる資源枯渇を防ぎます。

use crate::error::SheetVoiceError;

/// セキュリティ設定
///
/// ワークブック読み込み時の制限を定義します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 256MB (268_435_456 bytes)
    pub max_input_file_size: u64,
    /// 1ワークシートあたりの最大行数
    /// デフォルト: 1_048_576（XLSXの行数上限）
    pub max_rows_per_sheet: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 268_435_456, // 256MB
            max_rows_per_sheet: 1_048_576,
        }
    }
}

impl SecurityConfig {
    /// 入力サイズを検証
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 上限以内の場合
    /// * `Err(SheetVoiceError::SecurityViolation)` - 上限を超えた場合
    pub(crate) fn check_input_size(&self, bytes: u64) -> Result<(), SheetVoiceError> {
        if bytes > self.max_input_file_size {
            return Err(SheetVoiceError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes, self.max_input_file_size
            )));
        }
        Ok(())
    }

    /// ワークシートの行数を検証
    pub(crate) fn check_row_count(&self, worksheet: &str, rows: usize) -> Result<(), SheetVoiceError> {
        if rows > self.max_rows_per_sheet {
            return Err(SheetVoiceError::SecurityViolation(format!(
                "Worksheet '{}' has too many rows: {} (max: {})",
                worksheet, rows, self.max_rows_per_sheet
            )));
        }
        Ok(())
    }
}
