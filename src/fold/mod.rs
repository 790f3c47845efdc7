//! Fold Module
//!
//! 複数のリデューサーで共有する行変換の基本操作を提供します。
//!
//! - 直前の非空値の引き継ぎ（結合セルの表現）
//! - ドット区切りパスへの代入（`[]`による配列追加を含む）
//! - セル文字列の型変換

mod carry;
mod coerce;
mod path;

pub use carry::carry_forward;
pub use coerce::{is_truthy, CellValue};
pub use path::{assign, ensure_array, PathExpr, PathSegment};
