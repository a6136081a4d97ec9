//! エラー型定義
//!
//! `InvalidFileType`・`RequestFailed`・`Network`・`Parse` の表示文字列は
//! そのまま画面のエラーメッセージになる

use crate::upload::UploadChannel;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 画像以外のファイル（ネットワークには送らない）
    #[error("{}", .0.rejection_message())]
    InvalidFileType(UploadChannel),

    /// 非2xxレスポンス
    #[error("{}", crate::config::REQUEST_FAILED_MESSAGE)]
    RequestFailed { status: u16 },

    /// 接続失敗など。下位エラーのメッセージをそのまま保持
    #[error("{0}")]
    Network(String),

    /// レスポンス本文が解釈できない
    #[error("{0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
