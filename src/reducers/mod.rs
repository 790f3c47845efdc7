//! Reducer Module
//!
//! ワークシートの種類ごとに、行レコード列をスキーマ断片へ変換するモジュール。
//! すべてのリデューサーは純粋関数であり、ワークシート間で状態を共有しません。

mod intents;
mod manifest;
mod slots;
mod tables;
mod utterances;

use crate::api::SheetType;
use crate::schema::SchemaFragment;
use crate::types::Worksheet;

/// ワークシートをその種類のリデューサーで変換する
///
/// # 引数
///
/// * `sheet_type` - 分類済みのワークシートの種類
/// * `worksheet` - タイトルと行レコード列
///
/// # 戻り値
///
/// スキーマ断片。`Ignored` の場合は空の断片を返します。
///
/// # 使用例
///
/// ```rust
/// use sheetvoice::{reduce, RowRecord, SheetType, Worksheet};
///
/// let rows = vec![
///     [("invocationname", "room booker"), ("environment", "production")]
///         .into_iter()
///         .collect::<RowRecord>(),
/// ];
/// let fragment = reduce(SheetType::Invocations, &Worksheet::new("INVOCATION_NAMES", rows));
/// assert!(fragment.get("invocations").is_some());
/// ```
pub fn reduce(sheet_type: SheetType, worksheet: &Worksheet) -> SchemaFragment {
    let rows = &worksheet.rows;
    let title = worksheet.title.as_str();

    match sheet_type {
        SheetType::SkillGeneral => manifest::skill_general(rows),
        SheetType::SkillLocaleSettings => manifest::skill_locale_settings(title, rows),
        SheetType::SkillEnvironmentsInformation => tables::environments(rows),
        SheetType::Invocations => tables::invocations(rows),
        SheetType::Slots => slots::slots(title, rows),
        SheetType::Intents => intents::intents(rows),
        SheetType::Utterances => utterances::utterances(rows),
        SheetType::ChatbotSlotVariants => tables::variants(rows),
        SheetType::Other => tables::others(title, rows),
        SheetType::Ignored => SchemaFragment::new(),
    }
}
