//! 認識結果からおすすめを組み立てる

use crate::recognizer::{self, Recognizer};
use crate::scanner::ImageInfo;
use search_travels_common::{Destination, DestinationResolver, LatLng, RecognitionResult};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Recommendation {
    /// ランドマークの場所そのもの
    Landmark { location: LatLng },
    /// カテゴリから選んだ都市
    Destination {
        category: String,
        destination: Destination,
    },
    /// 認識できなかった
    Unrecognized,
}

impl Recommendation {
    pub fn from_result(result: RecognitionResult, resolver: &DestinationResolver) -> Self {
        match result {
            RecognitionResult::Success(location) => Recommendation::Landmark { location },
            RecognitionResult::CategoryMismatch(category) => {
                let destination = resolver.resolve(&category).clone();
                Recommendation::Destination { category, destination }
            }
            RecognitionResult::Failure => Recommendation::Unrecognized,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Landmark { location } => write!(f, "ランドマーク: {}", location),
            Recommendation::Destination { category, destination } => {
                write!(f, "おすすめ: {} (カテゴリ: {})", destination, category)
            }
            Recommendation::Unrecognized => write!(f, "画像を認識できませんでした"),
        }
    }
}

/// 画像ごとのおすすめ
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecommendation {
    pub file_name: String,
    pub recommendation: Recommendation,
}

/// 画像を1枚ずつ認識しておすすめを作る
///
/// 読み込み失敗やタイムアウトはその画像だけ `Unrecognized` にして続行する。
pub async fn recommend_images<R>(
    recognizer: Arc<R>,
    images: &[ImageInfo],
    token: &str,
    timeout: Duration,
    resolver: &DestinationResolver,
) -> Vec<ImageRecommendation>
where
    R: Recognizer + ?Sized + 'static,
{
    let mut results = Vec::with_capacity(images.len());

    for image in images {
        let outcome = match image.read_bytes() {
            Ok(bytes) => {
                tracing::info!(file = %image.file_name, bytes = bytes.len(), "認識開始");
                recognizer::spawn_recognition(recognizer.clone(), bytes, token.to_string())
                    .wait(timeout)
                    .await
            }
            Err(e) => Err(e),
        };

        let recommendation = match outcome {
            Ok(result) => Recommendation::from_result(result, resolver),
            Err(e) => {
                tracing::warn!(file = %image.file_name, error = %e, "認識できませんでした");
                Recommendation::Unrecognized
            }
        };

        results.push(ImageRecommendation {
            file_name: image.file_name.clone(),
            recommendation,
        });
    }

    results
}
