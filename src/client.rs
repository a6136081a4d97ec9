//! 生成APIクライアント（reqwest）
//!
//! 画像1枚をmultipartで送信し、生成画像URLを受け取る

use crate::config::Config;
use crate::error::{ImageGenError, Result};
use crate::upload::UploadFile;
use async_trait::async_trait;
use imagegen_common::{interpret_response, Error, GenerationResult, GeneratorConfig};
use reqwest::multipart::{Form, Part};

/// 生成リクエストの送信先
///
/// コントローラはこのトレイト越しに送信するので、テストでは差し替えられる
#[async_trait]
pub trait GenerationBackend: Send + Sync + 'static {
    async fn generate(&self, file: &UploadFile) -> std::result::Result<GenerationResult, Error>;
}

/// 通信エラーを原因まで含めたメッセージに変換
///
/// reqwestのDisplayはURLしか出さないので、`source()` を末端まで連結する。
/// "error sending request for url (...): client error (Connect): tcp connect error: Connection refused (os error 111)"
fn network_error(error: &(dyn std::error::Error + 'static)) -> Error {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    Error::Network(message)
}

/// HTTPで生成APIを呼ぶクライアント
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    config: GeneratorConfig,
}

impl GenerationClient {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ImageGenError::Config(format!("HTTPクライアント初期化失敗: {}", e)))?;

        Ok(Self {
            http,
            config: config.generator.clone(),
        })
    }

    fn build_form(&self, file: &UploadFile) -> std::result::Result<Form, Error> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| {
                Error::Parse(format!("invalid content type '{}': {}", file.content_type, e))
            })?;

        Ok(Form::new().part(self.config.field_name.clone(), part))
    }
}

#[async_trait]
impl GenerationBackend for GenerationClient {
    async fn generate(&self, file: &UploadFile) -> std::result::Result<GenerationResult, Error> {
        let form = self.build_form(file)?;

        log::info!(
            "POST {} ({}, {} bytes)",
            self.config.endpoint,
            file.file_name,
            file.bytes.len()
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        let status = response.status().as_u16();

        // 非2xxは本文を読まない
        let body = if response.status().is_success() {
            response
                .text()
                .await
                .map_err(|e| network_error(&e))?
        } else {
            String::new()
        };

        let result = interpret_response(&self.config, status, &body);
        match &result {
            Ok(generated) => log::info!("generated image: {}", generated.image_url),
            Err(e) => log::info!("generation failed (status {}): {}", status, e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapped(std::io::Error);

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl std::error::Error for Wrapped {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_network_error_includes_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let err = network_error(&Wrapped(io));
        match err {
            Error::Network(message) => {
                assert_eq!(message, "error sending request: Connection refused");
            }
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[test]
    fn test_network_error_without_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        assert_eq!(network_error(&io).to_string(), "timed out");
    }
}
