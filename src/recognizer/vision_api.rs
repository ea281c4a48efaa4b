//! Google Cloud Vision API連携
//!
//! `images:annotate` にランドマーク検出とラベル検出をまとめて投げる。
//! - ランドマークに座標があれば Success
//! - ラベルだけならカテゴリとして CategoryMismatch
//! - それ以外（デコード失敗、通信・認証エラー、空レスポンス）は Failure

use super::Recognizer;
use crate::config::Config;
use crate::error::{Result, SearchTravelsError};
use async_trait::async_trait;
use base64::prelude::*;
use image::ImageFormat;
use reqwest::Client;
use search_travels_common::{CategoryTable, LatLng, RecognitionResult};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

const ANNOTATE_PATH: &str = "/v1/images:annotate";
const LANDMARK_MAX_RESULTS: u32 = 1;
const LABEL_MAX_RESULTS: u32 = 10;

#[derive(Serialize)]
struct BatchAnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    max_results: u32,
}

#[derive(Deserialize)]
struct BatchAnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

/// 1画像分のレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotateImageResponse {
    pub landmark_annotations: Vec<EntityAnnotation>,
    pub label_annotations: Vec<EntityAnnotation>,
    pub error: Option<Status>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EntityAnnotation {
    pub description: String,
    pub score: f32,
    pub locations: Vec<LocationInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationInfo {
    pub lat_lng: Option<LatLng>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Status {
    pub code: i32,
    pub message: String,
}

pub struct VisionApiRecognizer {
    client: Client,
    endpoint: String,
    max_image_size: u32,
    table: CategoryTable,
}

impl VisionApiRecognizer {
    pub fn new(config: &Config, table: CategoryTable) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SearchTravelsError::ApiCall(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            max_image_size: config.max_image_size,
            table,
        })
    }

    async fn annotate(&self, content: String, token: &str) -> Result<AnnotateImageResponse> {
        let request = BatchAnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent { content },
                features: vec![
                    Feature { kind: "LANDMARK_DETECTION", max_results: LANDMARK_MAX_RESULTS },
                    Feature { kind: "LABEL_DETECTION", max_results: LABEL_MAX_RESULTS },
                ],
            }],
        };

        let url = format!("{}{}", self.endpoint, ANNOTATE_PATH);
        tracing::debug!(%url, "Vision APIを呼び出します");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchTravelsError::ApiCall(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SearchTravelsError::ApiCall(format!("status {}: {}", status, text)));
        }

        let batch: BatchAnnotateResponse = response
            .json()
            .await
            .map_err(|e| SearchTravelsError::ApiCall(e.to_string()))?;

        batch
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| SearchTravelsError::ApiCall("Empty response".into()))
    }
}

#[async_trait]
impl Recognizer for VisionApiRecognizer {
    async fn recognize(&self, image: &[u8], token: &str) -> RecognitionResult {
        let content = match prepare_image(image, self.max_image_size) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(error = %e, bytes = image.len(), "画像をデコードできません");
                return RecognitionResult::Failure;
            }
        };

        match self.annotate(content, token).await {
            Ok(response) => interpret_response(&response, &self.table),
            Err(e) => {
                tracing::warn!(error = %e, "Vision API呼び出しに失敗しました");
                RecognitionResult::Failure
            }
        }
    }
}

/// 画像をデコードし、長辺 `max_size` 以下に縮小してJPEGのBase64にする
pub fn prepare_image(bytes: &[u8], max_size: u32) -> std::result::Result<String, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    let img = if img.width() > max_size || img.height() > max_size {
        img.thumbnail(max_size, max_size)
    } else {
        img
    };

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img.to_rgb8())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)?;

    Ok(BASE64_STANDARD.encode(&buf))
}

/// レスポンスを3通りの結果に振り分ける
///
/// ラベルはテーブルにあるカテゴリを優先し、なければ最上位のラベルを使う。
pub fn interpret_response(response: &AnnotateImageResponse, table: &CategoryTable) -> RecognitionResult {
    if let Some(status) = &response.error {
        tracing::warn!(code = status.code, message = %status.message, "Vision APIがエラーを返しました");
        return RecognitionResult::Failure;
    }

    let landmark = response
        .landmark_annotations
        .iter()
        .flat_map(|a| a.locations.iter())
        .find_map(|loc| loc.lat_lng);
    if let Some(latlng) = landmark {
        return RecognitionResult::Success(latlng);
    }

    let labels: Vec<String> = response
        .label_annotations
        .iter()
        .map(|a| a.description.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .collect();

    let category = labels
        .iter()
        .find(|label| table.contains(label))
        .or_else(|| labels.first());

    match category {
        Some(category) => RecognitionResult::CategoryMismatch(category.clone()),
        None => RecognitionResult::Failure,
    }
}
