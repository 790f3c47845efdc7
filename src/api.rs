//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SheetVoiceError;

/// 対象プラットフォーム
///
/// 集約スキーマをどのプラットフォーム向けのスキーマとして扱うかを指定します。
/// どのバリアントも同じ集約スキーマを保持し、下流のビルド・検証処理のみが異なります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum PlatformType {
    /// Alexa Skills Kit（デフォルト）
    #[default]
    Alexa,

    /// Dialogflow
    DialogFlow,

    /// Cortana
    Cortana,
}

impl PlatformType {
    /// 設定ファイルやCLIで使用する名前（`alexa` / `dialogFlow` / `cortana`）
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformType::Alexa => "alexa",
            PlatformType::DialogFlow => "dialogFlow",
            PlatformType::Cortana => "cortana",
        }
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformType {
    type Err = SheetVoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alexa" => Ok(PlatformType::Alexa),
            "dialogFlow" => Ok(PlatformType::DialogFlow),
            "cortana" => Ok(PlatformType::Cortana),
            other => Err(SheetVoiceError::Config(format!(
                "Unknown platform type: '{}'",
                other
            ))),
        }
    }
}

/// ワークシートの種類（タイトルから判定される）
///
/// 1つのワークシートに対して必ず1つの種類が割り当てられます。
/// `Ignored`（タグ名 `none`）のワークシートは集約前に破棄されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetType {
    /// スキル全体の設定（マニフェスト）
    SkillGeneral,

    /// ロケールごとのマニフェスト設定
    SkillLocaleSettings,

    /// 環境ごとの設定値
    SkillEnvironmentsInformation,

    /// 呼び出し名
    Invocations,

    /// スロットの値と同義語
    Slots,

    /// インテント定義
    Intents,

    /// サンプル発話
    Utterances,

    /// チャットボット用のスロット表記ゆれ
    ChatbotSlotVariants,

    /// 許可リストで明示されたその他のワークシート
    Other,

    /// 分類できなかったワークシート
    #[serde(rename = "none")]
    Ignored,
}

impl SheetType {
    /// タグ名を返す
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetType::SkillGeneral => "skillGeneral",
            SheetType::SkillLocaleSettings => "skillLocaleSettings",
            SheetType::SkillEnvironmentsInformation => "skillEnvironmentsInformation",
            SheetType::Invocations => "invocations",
            SheetType::Slots => "slots",
            SheetType::Intents => "intents",
            SheetType::Utterances => "utterances",
            SheetType::ChatbotSlotVariants => "chatbotSlotVariants",
            SheetType::Other => "other",
            SheetType::Ignored => "none",
        }
    }
}

impl fmt::Display for SheetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
