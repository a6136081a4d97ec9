//! ネイティブ環境のアップロードファイル
//!
//! ブラウザの `File` に相当する（ファイル名・Content-Type・バイト列）

use crate::error::{ImageGenError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use imagegen_common::UploadedImage;
use std::path::Path;

/// 判定できない拡張子に付けるContent-Type（画像として受理されない）
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn from_bytes(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// ファイルを読み込み、拡張子からContent-Typeを決める
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ImageGenError::FileNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            file_name,
            content_type: content_type_for_path(path),
            bytes,
        })
    }

    /// 表示用のdata URL
    ///
    /// "data:image/png;base64,iVBORw0..." 形式
    pub fn preview_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }

    /// 画面状態に渡す入力画像
    pub fn to_uploaded_image(&self) -> UploadedImage {
        UploadedImage {
            preview_url: self.preview_url(),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
        }
    }
}

/// 拡張子からContent-Typeを推定
fn content_type_for_path(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_CONTENT_TYPE.to_string())
}
