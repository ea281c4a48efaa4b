//! 認識結果の型定義
//!
//! - LatLng: ランドマークの座標
//! - Destination: おすすめ都市（英語名・ロシア語名）
//! - RecognitionResult: 1リクエストにつき1回だけ届く認識結果

use serde::{Deserialize, Serialize};
use std::fmt;

/// 緯度経度（Vision APIの `latLng` と同じ形）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLng {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// おすすめ都市
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub english_name: String,
    pub localized_name: String,
}

impl Destination {
    pub fn new(english_name: impl Into<String>, localized_name: impl Into<String>) -> Self {
        Self {
            english_name: english_name.into(),
            localized_name: localized_name.into(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.english_name, self.localized_name)
    }
}

/// 認識結果
///
/// 通信エラー・認証エラー・認識不能はすべて `Failure` にまとめる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum RecognitionResult {
    /// ランドマークを座標付きで認識
    Success(LatLng),
    /// 場所は特定できないがシーンのカテゴリは判別できた
    CategoryMismatch(String),
    /// 認識できなかった
    Failure,
}

impl RecognitionResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, RecognitionResult::Failure)
    }

    /// ログ用の短い名前
    pub fn kind(&self) -> &'static str {
        match self {
            RecognitionResult::Success(_) => "success",
            RecognitionResult::CategoryMismatch(_) => "category",
            RecognitionResult::Failure => "failure",
        }
    }
}
