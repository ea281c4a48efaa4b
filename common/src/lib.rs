//! Search Travels Common Library
//!
//! 認識結果の型とカテゴリ→おすすめ都市の解決ロジック

pub mod types;
pub mod destination;
pub mod error;

pub use types::{Destination, LatLng, RecognitionResult};
pub use destination::{CategoryTable, DestinationResolver};
pub use error::{Error, Result};
