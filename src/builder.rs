//! Builder Module
//!
//! Fluent Builder APIを提供し、`SchemaCompiler`インスタンスを段階的に構築する。
//! `SchemaCompiler` はワークシートの分類、リデューサーによる変換、断片の統合を行う
//! スキーマ組み立て処理のファサードです。

use rayon::prelude::*;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::api::{PlatformType, SheetType};
use crate::error::SheetVoiceError;
use crate::locale::{resolve_locale, VALID_LOCALES};
use crate::merge::deep_merge;
use crate::reducers::reduce;
use crate::schema::{to_json, AggregateSchema, Invocation, PlatformSchema, SchemaFragment};
use crate::source::RowSource;
use crate::types::Worksheet;

/// コンパイル処理の設定を保持する内部構造体
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompilerConfig {
    /// 対象プラットフォーム
    pub platform: PlatformType,

    /// `Other` として扱うワークシートのタイトル
    pub other_sheets: Vec<String>,

    /// ロケールの候補（先頭が既定値）
    pub locales: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            platform: PlatformType::Alexa,
            other_sheets: Vec::new(),
            locales: VALID_LOCALES.iter().map(|locale| locale.to_string()).collect(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `SchemaCompiler`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use sheetvoice::{CompilerBuilder, PlatformType};
///
/// # fn main() -> Result<(), sheetvoice::SheetVoiceError> {
/// let compiler = CompilerBuilder::new()
///     .with_platform(PlatformType::DialogFlow)
///     .with_other_sheet("FAQ")
///     .build()?;
/// assert_eq!(compiler.platform(), PlatformType::DialogFlow);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct CompilerBuilder {
    /// 内部設定（構築中）
    config: CompilerConfig,
}

impl CompilerBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - プラットフォーム: Alexa
    /// - その他のワークシート: なし
    /// - ロケール: Alexaの有効なロケール一覧（先頭は `en-US`）
    pub fn new() -> Self {
        Self {
            config: CompilerConfig::default(),
        }
    }

    /// 対象プラットフォームを指定する
    pub fn with_platform(mut self, platform: PlatformType) -> Self {
        self.config.platform = platform;
        self
    }

    /// `Other` として扱うワークシートのタイトルを追加する
    pub fn with_other_sheet(mut self, title: impl Into<String>) -> Self {
        self.config.other_sheets.push(title.into());
        self
    }

    /// `Other` として扱うワークシートのタイトルをまとめて指定する（既存の指定は置き換え）
    pub fn with_other_sheets<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.other_sheets = titles.into_iter().map(Into::into).collect();
        self
    }

    /// ロケールの候補を指定する
    ///
    /// スプレッドシートのタイトルに含まれる最初の候補が採用され、
    /// 一致しない場合は先頭の候補が採用されます。
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheetvoice::CompilerBuilder;
    ///
    /// let builder = CompilerBuilder::new().with_locales(["de-DE", "en-GB"]);
    /// ```
    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// 設定を検証し、`SchemaCompiler`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `SheetVoiceError::Config(String)`: 設定の検証に失敗した場合
    ///   * ロケールの候補が空
    ///   * 空白のみのロケール
    pub fn build(self) -> Result<SchemaCompiler, SheetVoiceError> {
        // 1. ロケール候補の検証
        if self.config.locales.is_empty() {
            return Err(SheetVoiceError::Config(
                "Locale list must not be empty".to_string(),
            ));
        }

        if let Some(index) = self
            .config
            .locales
            .iter()
            .position(|locale| locale.trim().is_empty())
        {
            return Err(SheetVoiceError::Config(format!(
                "Invalid locale at index {}: blank entry",
                index
            )));
        }

        // 2. SchemaCompilerインスタンス生成
        Ok(SchemaCompiler::new(self.config))
    }
}

/// スキーマ組み立て処理のファサード
///
/// Row Source のワークシートを分類・変換し、1つの集約スキーマと
/// プラットフォーム別のバリアントを生成します。
///
/// # 使用例
///
/// ```rust
/// use sheetvoice::{CompilerBuilder, MemorySource, RowRecord, Worksheet};
///
/// # fn main() -> Result<(), sheetvoice::SheetVoiceError> {
/// let intent_rows = vec![[("intent", "BookRoom"), ("slotname", "room"), ("slottype", "LIST_OF_ROOMS")]
///     .into_iter()
///     .collect::<RowRecord>()];
/// let source = MemorySource::new("Room Booker en-GB")
///     .with_worksheet(Worksheet::new("INTENT", intent_rows));
///
/// let compiler = CompilerBuilder::new().build()?;
/// let schema = compiler.compile(&source)?;
/// assert_eq!(schema.locale(), "en-GB");
/// assert_eq!(schema.schema().intents()?[0].name, "BookRoom");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SchemaCompiler {
    /// コンパイル設定
    config: CompilerConfig,
}

impl SchemaCompiler {
    pub(crate) fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// 対象プラットフォーム
    pub fn platform(&self) -> PlatformType {
        self.config.platform
    }

    /// `Other` として扱うワークシートのタイトル
    pub fn other_sheets(&self) -> &[String] {
        &self.config.other_sheets
    }

    /// ロケールの候補
    pub fn locales(&self) -> &[String] {
        &self.config.locales
    }

    /// ワークシートのタイトルを分類する
    pub fn classify(&self, title: &str) -> SheetType {
        SheetType::classify(title, &self.config.other_sheets)
    }

    /// Row Source をコンパイルし、設定されたプラットフォームのスキーマを返す
    ///
    /// # 戻り値
    ///
    /// * `Ok(PlatformSchema)` - 組み立てに成功した場合
    /// * `Err(SheetVoiceError)` - ワークシートの取得に失敗した場合（取得元のエラーをそのまま返す）
    pub fn compile<S: RowSource + ?Sized>(&self, source: &S) -> Result<PlatformSchema, SheetVoiceError> {
        let aggregate = self.compile_aggregate(source)?;
        Ok(PlatformSchema::new(self.config.platform, aggregate))
    }

    /// Row Source をコンパイルし、集約スキーマを返す
    ///
    /// # 処理フロー
    ///
    /// 1. ワークシートのタイトルを分類（`Ignored` は取得前に除外）
    /// 2. 各ワークシートを位置で取得し、変換を並列に実行
    /// 3. 断片をワークシートの順序で統合
    pub fn compile_aggregate<S: RowSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<AggregateSchema, SheetVoiceError> {
        // 1. 分類
        let classified = self.classify_titles(source.worksheet_titles());

        // 2. 取得と変換を並列化
        let fragments: Result<Vec<(usize, SchemaFragment)>, SheetVoiceError> = classified
            .par_iter()
            .map(|(index, sheet_type, title)| {
                let rows = source.fetch_rows(*index)?;
                let worksheet = Worksheet::new(title.as_str(), rows);
                debug!(title = %title, sheet_type = %sheet_type, rows = worksheet.rows.len(), "Reducing worksheet");
                Ok((*index, reduce(*sheet_type, &worksheet)))
            })
            .collect();

        let mut fragments = fragments?;

        // 結果をインデックス順にソート（後勝ちの順序を保証）
        fragments.sort_by_key(|(index, _)| *index);

        // 3. 統合
        let fragments = fragments.into_iter().map(|(_, fragment)| fragment).collect();
        Ok(self.assemble(source.title(), fragments))
    }

    /// 取得済みのワークシートから集約スキーマを組み立てる
    ///
    /// ワークシートの順序がそのまま統合の順序になります。
    pub fn compile_worksheets(&self, title: &str, worksheets: &[Worksheet]) -> AggregateSchema {
        // rayonのcollectは元の順序を保つ
        let fragments: Vec<SchemaFragment> = worksheets
            .par_iter()
            .filter_map(|worksheet| {
                let sheet_type = self.classify(&worksheet.title);
                if sheet_type == SheetType::Ignored {
                    debug!(title = %worksheet.title, "Dropping unclassified worksheet");
                    return None;
                }
                Some(reduce(sheet_type, worksheet))
            })
            .collect();

        self.assemble(title, fragments)
    }

    /// 複数の Row Source を複数のプラットフォーム向けにコンパイルする
    ///
    /// 結果は取得元ごと、その中でプラットフォームの指定順に並びます。
    /// 各取得元のワークシートは1回だけ取得されます。
    pub fn compile_all<S: RowSource>(
        &self,
        sources: &[S],
        platforms: &[PlatformType],
    ) -> Result<Vec<PlatformSchema>, SheetVoiceError> {
        let mut schemas = Vec::with_capacity(sources.len() * platforms.len());

        for source in sources {
            let aggregate = self.compile_aggregate(source)?;
            for platform in platforms {
                schemas.push(PlatformSchema::new(*platform, aggregate.clone()));
            }
        }

        Ok(schemas)
    }

    /// タイトルを分類し、`(位置, 種類, タイトル)` を返す
    fn classify_titles(&self, titles: Vec<String>) -> Vec<(usize, SheetType, String)> {
        titles
            .into_iter()
            .enumerate()
            .filter_map(|(index, title)| match self.classify(&title) {
                SheetType::Ignored => {
                    debug!(title = %title, "Dropping unclassified worksheet");
                    None
                }
                sheet_type => {
                    debug!(title = %title, sheet_type = %sheet_type, "Classified worksheet");
                    Some((index, sheet_type, title))
                }
            })
            .collect()
    }

    /// 断片を統合し、既定値とロケールを付与する
    fn assemble(&self, title: &str, fragments: Vec<SchemaFragment>) -> AggregateSchema {
        let fragment_count = fragments.len();

        // 1. 深いマージ（後勝ち、配列は連結）
        let mut data = Map::new();
        for fragment in fragments {
            deep_merge(&mut data, fragment.into_map());
        }

        // 2. 呼び出し名の既定値
        if !data.contains_key("invocations") {
            data.insert(
                "invocations".to_string(),
                Value::Array(vec![to_json(&Invocation::placeholder())]),
            );
        }

        // 3. ロケールの解決
        let locale = resolve_locale(title, &self.config.locales)
            .unwrap_or(VALID_LOCALES[0])
            .to_string();

        info!(
            title,
            locale = %locale,
            fragments = fragment_count,
            keys = data.len(),
            "Assembled schema"
        );

        AggregateSchema::new(locale, data)
    }
}
