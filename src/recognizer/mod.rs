//! 画像認識クライアント
//!
//! 1リクエストにつき結果はちょうど1回だけ届く:
//! - `spawn_recognition`: oneshotチャネルで結果を受け取る `RecognitionHandle` を返す
//! - `recognize_with_listener`: 別タスクでリスナーを1回だけ呼ぶ

mod vision_api;

pub use vision_api::{
    interpret_response, prepare_image, AnnotateImageResponse, VisionApiRecognizer,
};

use crate::error::{Result, SearchTravelsError};
use async_trait::async_trait;
use search_travels_common::RecognitionResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// 画像とトークンを受け取り、認識結果を返す外部サービス
///
/// 失敗は `RecognitionResult::Failure` で表し、エラーとしては返さない。
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, image: &[u8], token: &str) -> RecognitionResult;
}

/// 認識結果の受け取り口
#[derive(Debug)]
pub struct RecognitionHandle {
    rx: oneshot::Receiver<RecognitionResult>,
}

impl RecognitionHandle {
    /// 結果を待つ。`timeout` を過ぎたら `Timeout` エラー
    pub async fn wait(self, timeout: Duration) -> Result<RecognitionResult> {
        tokio::time::timeout(timeout, self.into_result())
            .await
            .map_err(|_| SearchTravelsError::Timeout(timeout))
    }

    /// 期限なしで結果を待つ
    ///
    /// 送信側が結果を送らずに消えた場合（タスクのpanic等）は `Failure` 扱い。
    async fn into_result(self) -> RecognitionResult {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("認識タスクが結果を返さずに終了しました");
                RecognitionResult::Failure
            }
        }
    }
}

/// 認識をバックグラウンドで開始する（呼び出し側はブロックしない）
pub fn spawn_recognition<R>(recognizer: Arc<R>, image: Vec<u8>, token: String) -> RecognitionHandle
where
    R: Recognizer + ?Sized + 'static,
{
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let result = recognizer.recognize(&image, &token).await;
        tracing::debug!(kind = result.kind(), "認識完了");
        // 受け取り側がすでに破棄されていれば結果は捨てる
        let _ = tx.send(result);
    });

    RecognitionHandle { rx }
}

/// 認識をバックグラウンドで開始し、結果でリスナーを1回だけ呼ぶ
///
/// 認識タスクがpanicしても `Failure` でリスナーを呼ぶ。
pub fn recognize_with_listener<R, F>(
    recognizer: Arc<R>,
    image: Vec<u8>,
    token: String,
    listener: F,
) -> JoinHandle<()>
where
    R: Recognizer + ?Sized + 'static,
    F: FnOnce(RecognitionResult) + Send + 'static,
{
    let handle = spawn_recognition(recognizer, image, token);
    tokio::spawn(async move {
        listener(handle.into_result().await);
    })
}
