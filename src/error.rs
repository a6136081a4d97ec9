use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageGenError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("非同期ランタイムがありません: {0}")]
    Runtime(String),

    #[error(transparent)]
    Generation(#[from] imagegen_common::Error),
}

pub type Result<T> = std::result::Result<T, ImageGenError>;
