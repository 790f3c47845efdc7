//! Schema Module
//!
//! リデューサーが生成する断片（`SchemaFragment`）、それらを統合した集約スキーマ
//! （`AggregateSchema`）、プラットフォーム別のスキーマ（`PlatformSchema`）を定義します。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::PlatformType;
use crate::error::SheetVoiceError;

/// 1つのワークシートを変換した部分スキーマ
///
/// トップレベルのキーは `manifest`, `invocations`, `slots`, `responses`,
/// `pronunciations`, `slotMap`, `intents`, `utterances`, `variants`, `others`,
/// `skillEnvironmentsInformation` のいずれかです。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaFragment(Map<String, Value>);

impl SchemaFragment {
    /// 空の断片を生成
    pub fn new() -> Self {
        Self::default()
    }

    /// キーと値を追加した断片を返す（ビルダー形式）
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    /// トップレベルの値を取得
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// トップレベルのキー一覧
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// キーを1つも持たないかを判定
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 内部のマップを取り出す
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// インテントのスロット定義
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntentSlot {
    /// キャメルケース化されたスロット名
    pub name: String,

    /// スロットの型（`LIST_OF_ROOMS`, `AMAZON.NUMBER` など）
    #[serde(rename = "type")]
    pub slot_type: String,

    /// スロットを使用するプラットフォーム
    #[serde(default)]
    pub platform: Vec<String>,
}

/// インテント定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// インテント名
    #[serde(rename = "intent")]
    pub name: String,

    /// スロット（存在しない場合はシリアライズしない）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<IntentSlot>,

    /// プラットフォーム固有のインテント名
    #[serde(default)]
    pub platform_intent: Vec<String>,

    /// インテントを有効にする環境
    #[serde(default)]
    pub environment: Vec<String>,
}

/// 呼び出し名
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Invocation {
    /// 呼び出し名
    #[serde(rename = "invocationname")]
    pub invocation_name: String,

    /// 環境（`staging`, `production` など）
    #[serde(default)]
    pub environment: String,
}

impl Invocation {
    /// `invocations` ワークシートが存在しない場合に使用する既定の呼び出し名
    pub fn placeholder() -> Self {
        Self {
            invocation_name: "invocation name".to_string(),
            environment: "staging".to_string(),
        }
    }
}

/// 環境ごとの設定値
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub platform: String,
}

/// チャットボット用のスロット表記ゆれ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotVariant {
    /// 連結表記
    pub joined: String,
    /// 分割表記
    #[serde(default)]
    pub split: String,
    /// 別表記
    #[serde(default)]
    pub alt: String,
}

/// プレーンな構造体をJSON値に変換する
///
/// 文字列キーのみを持つ構造体のシリアライズは失敗しないため、失敗時は `null` とします。
pub(crate) fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// すべての断片を統合した集約スキーマ
///
/// シリアライズ時はトップレベルのキーに `locale` が加わります。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSchema {
    /// 解決されたロケール
    pub locale: String,

    /// 統合済みのスキーマ本体
    #[serde(flatten)]
    data: Map<String, Value>,
}

impl AggregateSchema {
    pub(crate) fn new(locale: String, data: Map<String, Value>) -> Self {
        Self { locale, data }
    }

    /// トップレベルの値を取得
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// トップレベルのキー一覧（`locale` を除く）
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// 統合済みのスキーマ本体
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// マニフェスト
    pub fn manifest(&self) -> Option<&Map<String, Value>> {
        self.data.get("manifest").and_then(Value::as_object)
    }

    /// インテント一覧
    pub fn intents(&self) -> Result<Vec<Intent>, SheetVoiceError> {
        self.typed_list("intents")
    }

    /// 呼び出し名一覧
    pub fn invocations(&self) -> Result<Vec<Invocation>, SheetVoiceError> {
        self.typed_list("invocations")
    }

    /// 環境ごとの設定値一覧
    pub fn environments(&self) -> Result<Vec<EnvironmentInfo>, SheetVoiceError> {
        self.typed_list("skillEnvironmentsInformation")
    }

    /// 指定した見出しのサンプル発話
    pub fn utterances_for(&self, header: &str) -> Vec<String> {
        self.data
            .get("utterances")
            .and_then(|u| u.get(header))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 指定したスロットの値と同義語のマップ
    pub fn slot_values(&self, slot: &str) -> Option<&Map<String, Value>> {
        self.data
            .get("slots")
            .and_then(|s| s.get(slot))
            .and_then(Value::as_object)
    }

    /// JSON値に変換
    pub fn to_json_value(&self) -> Value {
        to_json(self)
    }

    fn typed_list<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Vec<T>, SheetVoiceError> {
        match self.data.get(key) {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Ok(Vec::new()),
        }
    }
}

/// プラットフォーム別のスキーマ
///
/// どのバリアントも同じ集約スキーマを保持します。バリアントは組み立て時に
/// 一度だけ選択され、下流のビルド・検証処理の切り替えに使用されます。
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformSchema {
    Alexa(AggregateSchema),
    DialogFlow(AggregateSchema),
    Cortana(AggregateSchema),
}

impl PlatformSchema {
    /// プラットフォーム種別からバリアントを選択する
    pub fn new(platform: PlatformType, schema: AggregateSchema) -> Self {
        match platform {
            PlatformType::Alexa => PlatformSchema::Alexa(schema),
            PlatformType::DialogFlow => PlatformSchema::DialogFlow(schema),
            PlatformType::Cortana => PlatformSchema::Cortana(schema),
        }
    }

    /// プラットフォーム種別
    pub fn platform(&self) -> PlatformType {
        match self {
            PlatformSchema::Alexa(_) => PlatformType::Alexa,
            PlatformSchema::DialogFlow(_) => PlatformType::DialogFlow,
            PlatformSchema::Cortana(_) => PlatformType::Cortana,
        }
    }

    /// 集約スキーマ
    pub fn schema(&self) -> &AggregateSchema {
        match self {
            PlatformSchema::Alexa(schema)
            | PlatformSchema::DialogFlow(schema)
            | PlatformSchema::Cortana(schema) => schema,
        }
    }

    /// 集約スキーマを取り出す
    pub fn into_schema(self) -> AggregateSchema {
        match self {
            PlatformSchema::Alexa(schema)
            | PlatformSchema::DialogFlow(schema)
            | PlatformSchema::Cortana(schema) => schema,
        }
    }

    /// 解決されたロケール
    pub fn locale(&self) -> &str {
        &self.schema().locale
    }

    /// 指定した環境で有効なインテント
    ///
    /// 環境が指定されていないインテントはすべての環境で有効です。
    pub fn intents_for_environment(&self, environment: &str) -> Result<Vec<Intent>, SheetVoiceError> {
        Ok(self
            .schema()
            .intents()?
            .into_iter()
            .filter(|intent| {
                intent.environment.is_empty()
                    || intent.environment.iter().any(|env| env == environment)
            })
            .collect())
    }

    /// 指定した環境の呼び出し名
    pub fn invocations_for_environment(
        &self,
        environment: &str,
    ) -> Result<Vec<Invocation>, SheetVoiceError> {
        Ok(self
            .schema()
            .invocations()?
            .into_iter()
            .filter(|invocation| invocation.environment.trim() == environment)
            .collect())
    }

    /// JSON値に変換（`platform` キーを含む）
    pub fn to_json_value(&self) -> Value {
        let mut value = self.schema().to_json_value();
        if let Value::Object(map) = &mut value {
            map.insert(
                "platform".to_string(),
                Value::String(self.platform().as_str().to_string()),
            );
        }
        value
    }
}
