//! メインアプリケーションコンポーネント

use crate::api::{generate::js_error, generate_image};
use crate::components::{
    error_banner::ErrorBanner,
    header::Header,
    reset_button::ResetButton,
    result_panel::ResultPanel,
    upload_area::UploadArea,
};
use imagegen_common::{validate_upload, GeneratorConfig, UploadChannel, UploadedImage, ViewState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{File, Url};

/// 差し替え・リセットで不要になったObject URLを解放
fn release_preview(image: &UploadedImage) {
    if let Err(e) = Url::revoke_object_url(&image.preview_url) {
        log::warn!("failed to revoke {}: {:?}", image.preview_url, e);
    }
}

/// ファイル受付（選択・ドロップ共通）
///
/// 検証・プレビュー作成・状態遷移を行い、受理した場合だけ送信タスクを起動する
fn handle_file(
    state: RwSignal<ViewState>,
    config: StoredValue<GeneratorConfig>,
    channel: UploadChannel,
    file: Option<File>,
) {
    let content_type = file.as_ref().map(|f| f.type_());
    if let Err(e) = validate_upload(channel, content_type.as_deref()) {
        state.update(|s| s.reject(&e));
        return;
    }
    let Some(file) = file else {
        return;
    };

    let preview_url = match Url::create_object_url_with_blob(&file) {
        Ok(url) => url,
        Err(e) => {
            state.update(|s| s.reject(&js_error(e)));
            return;
        }
    };

    let image = UploadedImage {
        preview_url,
        file_name: file.name(),
        content_type: file.type_(),
    };

    let Some((token, replaced)) = state.try_update(|s| s.begin(image)) else {
        return;
    };
    if let Some(old) = replaced {
        release_preview(&old);
    }

    let Some(config) = config.try_get_value() else {
        return;
    };
    spawn_local(async move {
        let outcome = generate_image(&config, &file).await;
        if state.try_update(|s| s.resolve(token, outcome)).is_none() {
            log::debug!("component disposed before response arrived");
        }
    });
}

/// 現在のOwnerが破棄されるとき（アンマウント時）に表示中のプレビューを解放
fn release_preview_on_cleanup(state: RwSignal<ViewState>) {
    on_cleanup(move || {
        if let Some(Some(image)) = state.try_with_untracked(|s| s.input_preview().cloned()) {
            release_preview(&image);
        }
    });
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App(config: GeneratorConfig) -> impl IntoView {
    let state = RwSignal::new(ViewState::new());
    let config = StoredValue::new(config);

    let on_file = move |channel: UploadChannel, file: Option<File>| {
        handle_file(state, config, channel, file);
    };

    release_preview_on_cleanup(state);

    // リセットハンドラ
    let on_reset = move |_: ()| {
        if let Some(Some(old)) = state.try_update(|s| s.reset()) {
            release_preview(&old);
        }
    };

    let preview = Signal::derive(move || {
        state.with(|s| s.input_preview().map(|image| image.preview_url.clone()))
    });
    let output = Signal::derive(move || {
        state.with(|s| s.generation_result().map(|result| result.image_url.clone()))
    });
    let error = Signal::derive(move || state.with(|s| s.error_message().map(str::to_string)));
    let is_processing = Signal::derive(move || state.with(|s| s.is_processing()));

    view! {
        <div class="container">
            <Header />

            <div class="grid">
                <UploadArea preview=preview on_file=on_file />
                <ResultPanel output=output is_processing=is_processing />
            </div>

            <ErrorBanner message=error />

            <ResetButton on_reset=on_reset />
        </div>
    }
}
