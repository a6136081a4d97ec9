//! 生成エンドポイント設定
//!
//! エンドポイントURL・フィールド名・表示メッセージを名前付きの値として保持する

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 既定の生成エンドポイント
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/generate";

/// multipartで画像を載せるフィールド名
pub const IMAGE_FIELD_NAME: &str = "image";

/// 成功レスポンスで生成画像URLを保持するフィールド名
pub const RESULT_FIELD_NAME: &str = "generated_image_url";

/// ファイル選択で画像以外を選んだときのメッセージ
pub const PICKER_REJECTION_MESSAGE: &str = "Please upload a valid image file.";

/// ドロップで画像以外を受け取ったときのメッセージ
pub const DROP_REJECTION_MESSAGE: &str = "Please drop a valid image file.";

/// 非2xxレスポンス時のメッセージ（本文は読まない）
pub const REQUEST_FAILED_MESSAGE: &str = "Image processing failed";

/// 生成APIの接続設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub field_name: String,
    pub result_field: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: IMAGE_FIELD_NAME.to_string(),
            result_field: RESULT_FIELD_NAME.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// エンドポイントだけ差し替えた設定（テスト用サーバ向け）
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// JSON文字列から読み込み、検証まで行う
    ///
    /// 省略されたフィールドは既定値で補う
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 設定値の検証
    ///
    /// # Returns
    /// * `Ok(())` - エンドポイントが絶対http(s) URLで、フィールド名が空でない
    /// * `Err(Error::Config)` - それ以外
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint)
            .map_err(|e| Error::Config(format!("invalid endpoint '{}': {}", self.endpoint, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "endpoint must use http or https: {}",
                self.endpoint
            )));
        }

        if self.field_name.trim().is_empty() {
            return Err(Error::Config("field_name is empty".into()));
        }

        if self.result_field.trim().is_empty() {
            return Err(Error::Config("result_field is empty".into()));
        }

        Ok(())
    }
}
