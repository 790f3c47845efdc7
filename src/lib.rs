//! sheetvoice - Compile spreadsheet worksheets into voice-assistant schemas
//!
//! This crate reads a spreadsheet (one worksheet per kind of data) and folds its
//! rows into a single platform-specific schema: intents, slots with synonym maps,
//! sample utterances, localized manifest fields, canned responses, pronunciations
//! and category maps.
//!
//! Each worksheet is classified by its title, reduced into a schema fragment by
//! the matching reducer, and all fragments are deep-merged into one
//! [`AggregateSchema`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sheetvoice::{CompilerBuilder, XlsxSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Open the workbook (the file stem is used for locale detection)
//!     let source = XlsxSource::open("room-booker-en-US.xlsx")?;
//!
//!     // Compile with default settings (Alexa, default locale list)
//!     let compiler = CompilerBuilder::new().build()?;
//!     let schema = compiler.compile(&source)?;
//!
//!     println!("{}", serde_json::to_string_pretty(&schema.to_json_value())?);
//!     Ok(())
//! }
//! ```
//!
//! # In-memory worksheets
//!
//! ```rust
//! use sheetvoice::{CompilerBuilder, MemorySource, PlatformType, RowRecord, Worksheet};
//!
//! # fn main() -> Result<(), sheetvoice::SheetVoiceError> {
//! let rows: Vec<RowRecord> = vec![
//!     [("invocationname", "room booker"), ("environment", "production")]
//!         .into_iter()
//!         .collect(),
//! ];
//! let source = MemorySource::new("Room Booker")
//!     .with_worksheet(Worksheet::new("INVOCATION_NAMES", rows));
//!
//! let compiler = CompilerBuilder::new()
//!     .with_platform(PlatformType::DialogFlow)
//!     .build()?;
//! let schema = compiler.compile(&source)?;
//! assert_eq!(schema.invocations_for_environment("production")?.len(), 1);
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod classifier;
mod error;
pub mod fold;
mod locale;
mod merge;
mod reducers;
mod schema;
mod security;
mod source;
mod text;
mod types;

// 公開API
pub use api::{PlatformType, SheetType};
pub use builder::{CompilerBuilder, SchemaCompiler};
pub use error::SheetVoiceError;
pub use locale::{resolve_locale, VALID_LOCALES};
pub use reducers::reduce;
pub use schema::{
    AggregateSchema, EnvironmentInfo, Intent, IntentSlot, Invocation, PlatformSchema,
    SchemaFragment, SlotVariant,
};
pub use security::SecurityConfig;
pub use source::{MemorySource, RowSource, XlsxSource};
pub use types::{RowRecord, Worksheet};
