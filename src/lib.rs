//! AI Image Generator ネイティブクライアント
//!
//! ブラウザ版と同じ状態遷移（imagegen-common）をreqwest + tokioで動かす

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod upload;

pub use client::{GenerationBackend, GenerationClient};
pub use config::Config;
pub use controller::ImageGenerator;
pub use error::{ImageGenError, Result};
pub use upload::UploadFile;
