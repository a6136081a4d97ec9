//! 生成API呼び出し（fetch + FormData）

use imagegen_common::{interpret_response, Error, GenerationResult, GeneratorConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

/// JS側の例外をメッセージ付きのエラーに変換
///
/// `TypeError: Failed to fetch` などは `message` をそのまま使う
pub fn js_error(value: JsValue) -> Error {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Network(message)
}

/// 画像1枚を送信して生成画像URLを得る
///
/// # Arguments
/// * `config` - エンドポイント・フィールド名
/// * `file` - 検証済みの画像ファイル
///
/// # Returns
/// * `Ok(GenerationResult)` - 生成画像URL
/// * `Err(Error::RequestFailed)` - 非2xx
/// * `Err(Error::Network | Error::Parse)` - 通信失敗・レスポンス不正
pub async fn generate_image(config: &GeneratorConfig, file: &File) -> Result<GenerationResult, Error> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(&config.field_name, file, &file.name())
        .map_err(js_error)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(&config.endpoint, &opts).map_err(js_error)?;

    let window = web_sys::window().ok_or_else(|| Error::Network("window is not available".into()))?;

    log::info!("POST {} ({})", config.endpoint, file.name());

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    // 非2xxは本文を読まない
    let body = if resp.ok() {
        JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default()
    } else {
        String::new()
    };

    interpret_response(config, resp.status(), &body)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_js_error_from_type_error() {
        let err: JsValue = js_sys::TypeError::new("Failed to fetch").into();
        assert_eq!(js_error(err).to_string(), "Failed to fetch");
    }

    #[wasm_bindgen_test]
    fn test_js_error_from_string() {
        let err = JsValue::from_str("aborted");
        assert_eq!(js_error(err).to_string(), "aborted");
    }

    #[wasm_bindgen_test]
    fn test_js_error_is_network() {
        let err = js_error(JsValue::NULL);
        assert!(matches!(err, Error::Network(_)));
    }
}
