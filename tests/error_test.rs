//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use search_travels::error::SearchTravelsError;
use search_travels::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    let err = result.unwrap_err();
    assert!(matches!(err, SearchTravelsError::FolderNotFound(_)));
}

/// 画像のないフォルダは空のVec
#[test]
fn test_collect_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();

    let result = scanner::collect_images(dir.path()).unwrap();
    assert!(result.is_empty());
}

/// MissingTokenエラーのメッセージ確認
#[test]
fn test_missing_token_message() {
    let display = format!("{}", SearchTravelsError::MissingToken);
    assert!(display.contains("トークン"));
    assert!(display.contains("search-travels config"));
}

#[test]
fn test_timeout_message() {
    let display = format!("{}", SearchTravelsError::Timeout(std::time::Duration::from_secs(10)));
    assert!(display.contains("10s"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: SearchTravelsError = io_err.into();
    assert!(matches!(err, SearchTravelsError::Io(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = search_travels_common::Error::Config("デフォルトの都市が空です".to_string());
    let err: SearchTravelsError = common_err.into();

    assert!(matches!(err, SearchTravelsError::Common(_)));
    assert_eq!(format!("{}", err), "Config error: デフォルトの都市が空です");
}

/// テーブルファイルの読み込み失敗
#[test]
fn test_table_file_missing() {
    let result = search_travels_common::CategoryTable::from_file(Path::new("/nonexistent/table.json"));
    assert!(matches!(result, Err(search_travels_common::Error::Io(_))));
}
