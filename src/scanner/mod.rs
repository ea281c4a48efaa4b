use crate::error::{Result, SearchTravelsError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

impl ImageInfo {
    fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            file_name,
        }
    }

    /// 画像のバイト列を読み込む（デコードはしない）
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// ファイルならそれ1枚、フォルダなら直下の画像を返す
///
/// 拡張子を明示したファイルは中身に関わらず対象にする（壊れた画像も認識に回す）。
pub fn collect_images(path: &Path) -> Result<Vec<ImageInfo>> {
    if path.is_file() {
        return Ok(vec![ImageInfo::from_path(path)]);
    }
    if path.is_dir() {
        return scan_folder(path);
    }
    Err(SearchTravelsError::FileNotFound(path.display().to_string()))
}

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(SearchTravelsError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            if is_image_extension(&ext.to_string_lossy()) {
                images.push(ImageInfo::from_path(path));
            }
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("jpeg"));
        assert!(is_image_extension("png"));
        assert!(is_image_extension("WebP"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("pdf"));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(SearchTravelsError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_with_images() {
        let dir = tempdir().unwrap();

        File::create(dir.path().join("sea.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("beach.PNG")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("notes.txt")).unwrap().write_all(b"text").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("snow.jpg")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].file_name, "beach.PNG");
        assert_eq!(result[1].file_name, "sea.jpg");
    }

    #[test]
    fn test_collect_single_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sad-cat.jpg");
        fs::write(&path, b"").unwrap();

        let result = collect_images(&path).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].file_name, "sad-cat.jpg");
        assert!(result[0].read_bytes().unwrap().is_empty());
    }

    #[test]
    fn test_collect_missing_path() {
        let result = collect_images(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(SearchTravelsError::FileNotFound(_))));
    }
}
