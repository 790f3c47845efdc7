//! Sheet Classifier Module
//!
//! ワークシートのタイトルからワークシートの種類を判定するモジュール。

use crate::api::SheetType;

/// タイトルに含まれるプレースホルダー文字列と種類の対応表
///
/// 先頭から順に照合し、最初に一致したものを採用します。
/// 複数のプレースホルダーを含むタイトルは、表の順序のみで決まります。
pub(crate) const PLACEHOLDERS: [(SheetType, &str); 8] = [
    (SheetType::Slots, "LIST_OF_"),
    (SheetType::Intents, "INTENT"),
    (SheetType::Utterances, "UTTERANCES_"),
    (SheetType::Invocations, "INVOCATION_NAMES"),
    (SheetType::SkillGeneral, "SKILL_GENERAL_INFORMATION"),
    (SheetType::SkillLocaleSettings, "SKILL_LOCALE_INFORMATION-"),
    (SheetType::SkillEnvironmentsInformation, "SKILL_ENVIRONMENTS_INFORMATION"),
    (SheetType::ChatbotSlotVariants, "CHATBOT_SLOT_VARIANTS"),
];

impl SheetType {
    /// ワークシートのタイトルから種類を判定する
    ///
    /// # 引数
    ///
    /// * `title` - ワークシートのタイトル
    /// * `other_sheets` - `Other` として扱うタイトルの許可リスト
    ///
    /// # 戻り値
    ///
    /// プレースホルダーに一致すればその種類、許可リストに含まれれば `Other`、
    /// どちらでもなければ `Ignored` を返します。
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheetvoice::SheetType;
    ///
    /// assert_eq!(SheetType::classify("LIST_OF_ROOMS", &[]), SheetType::Slots);
    /// assert_eq!(SheetType::classify("FAQ", &["FAQ".to_string()]), SheetType::Other);
    /// assert_eq!(SheetType::classify("Notes", &[]), SheetType::Ignored);
    /// ```
    pub fn classify(title: &str, other_sheets: &[String]) -> SheetType {
        if let Some((sheet_type, _)) = PLACEHOLDERS
            .iter()
            .find(|(_, placeholder)| title.contains(placeholder))
        {
            return *sheet_type;
        }

        if other_sheets.iter().any(|other| other == title) {
            SheetType::Other
        } else {
            SheetType::Ignored
        }
    }

    /// 種類に対応するプレースホルダー文字列
    pub fn placeholder(&self) -> Option<&'static str> {
        PLACEHOLDERS
            .iter()
            .find(|(sheet_type, _)| sheet_type == self)
            .map(|(_, placeholder)| *placeholder)
    }
}
