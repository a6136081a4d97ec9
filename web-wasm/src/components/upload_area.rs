//! アップロードエリアコンポーネント
//!
//! ドロップ対象はセクション全体。プレビューが無い間だけファイル選択を出す

use imagegen_common::{UploadChannel, IMAGE_ACCEPT};
use leptos::prelude::*;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

#[component]
pub fn UploadArea<F>(
    preview: Signal<Option<String>>,
    on_file: F,
) -> impl IntoView
where
    F: Fn(UploadChannel, Option<File>) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let on_drop = {
        let on_file = on_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            // 複数ドロップされても先頭の1件だけ
            let file = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            on_file(UploadChannel::Drop, file);
        }
    };

    // 既定のナビゲーションを止めないとdropが届かない
    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|files| files.get(0));
        on_file(UploadChannel::Picker, file);
    };

    view! {
        <div
            class=move || {
                if is_dragover.get() {
                    "section upload-area dragover"
                } else {
                    "section upload-area"
                }
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <h2 class="section-title">"Input Sketch"</h2>
            <div class="image-preview">
                {move || match preview.get() {
                    Some(url) => view! {
                        <img src=url alt="Input sketch preview" class="image" />
                    }
                    .into_any(),
                    None => {
                        let on_change = on_change.clone();
                        view! {
                            <label class="upload-label" for="fileInput">
                                <div class="upload-icon">"⬆"</div>
                                <p class="text-muted">"Drag and drop an image here, or"</p>
                                <input
                                    type="file"
                                    id="fileInput"
                                    class="hidden"
                                    accept=IMAGE_ACCEPT
                                    on:change=on_change
                                />
                            </label>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}
