//! アップロード検証
//!
//! ファイル選択・ドロップのどちらから来たファイルも同じ規則で検証する。
//! 複数ファイルの場合は呼び出し側で先頭の1件だけを渡す

use crate::config::{DROP_REJECTION_MESSAGE, PICKER_REJECTION_MESSAGE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// ファイル選択ダイアログの `accept` 属性
pub const IMAGE_ACCEPT: &str = "image/*";

/// ファイルの受け取り経路
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadChannel {
    Picker,
    Drop,
}

impl UploadChannel {
    pub fn rejection_message(&self) -> &'static str {
        match self {
            UploadChannel::Picker => PICKER_REJECTION_MESSAGE,
            UploadChannel::Drop => DROP_REJECTION_MESSAGE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadChannel::Picker => "picker",
            UploadChannel::Drop => "drop",
        }
    }
}

/// 宣言されたContent-Typeが画像か判定
///
/// ブラウザの `File.type` と同じく大文字小文字は区別する
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// アップロードを検証
///
/// # Arguments
/// * `channel` - 受け取り経路（エラーメッセージの出し分けに使う）
/// * `content_type` - 先頭ファイルのContent-Type。ファイルが無ければ `None`
///
/// # Returns
/// * `Ok(())` - 画像ファイル
/// * `Err(Error::InvalidFileType)` - ファイル無し、または画像以外
pub fn validate_upload(channel: UploadChannel, content_type: Option<&str>) -> Result<()> {
    match content_type {
        Some(ct) if is_image_content_type(ct) => Ok(()),
        _ => {
            log::debug!(
                "rejected {} upload (content type: {:?})",
                channel.as_str(),
                content_type
            );
            Err(Error::InvalidFileType(channel))
        }
    }
}
