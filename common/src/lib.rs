//! AI Image Generator Common Library
//!
//! ブラウザ(WASM)とネイティブで共有される状態遷移・検証・レスポンス解釈

pub mod config;
pub mod error;
pub mod response;
pub mod state;
pub mod upload;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use response::{interpret_response, is_success_status, GenerationResult};
pub use state::{Phase, RequestToken, UploadedImage, ViewState};
pub use upload::{is_image_content_type, validate_upload, UploadChannel, IMAGE_ACCEPT};
