//! 生成APIレスポンスの解釈
//!
//! ブラウザ(fetch)・ネイティブ(reqwest)のどちらもステータスと本文を
//! ここに渡して結果を得る

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 生成結果（リモートにホストされた生成画像のURL）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub image_url: String,
}

impl GenerationResult {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
        }
    }
}

/// 2xxかどうか
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// ステータスと本文から生成結果を取り出す
///
/// # Arguments
/// * `config` - 結果フィールド名を含む設定
/// * `status` - HTTPステータス
/// * `body` - レスポンス本文（非2xxの場合は参照しない）
///
/// # Returns
/// * `Ok(GenerationResult)` - 結果フィールドの文字列
/// * `Err(Error::RequestFailed)` - 非2xx
/// * `Err(Error::Parse)` - JSONでない、または結果フィールドが無い
pub fn interpret_response(
    config: &GeneratorConfig,
    status: u16,
    body: &str,
) -> Result<GenerationResult> {
    if !is_success_status(status) {
        return Err(Error::RequestFailed { status });
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))?;

    value
        .get(&config.result_field)
        .and_then(|v| v.as_str())
        .map(GenerationResult::new)
        .ok_or_else(|| {
            Error::Parse(format!("response is missing '{}'", config.result_field))
        })
}
