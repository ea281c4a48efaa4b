use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchTravelsError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("トークンが設定されていません。`search-travels config --set-token YOUR_TOKEN` で設定してください")]
    MissingToken,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("認識結果が{0:?}以内に届きませんでした")]
    Timeout(std::time::Duration),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] search_travels_common::Error),
}

pub type Result<T> = std::result::Result<T, SearchTravelsError>;
