//! 生成結果パネルコンポーネント

use leptos::prelude::*;

#[component]
pub fn ResultPanel(
    output: Signal<Option<String>>,
    is_processing: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="section">
            <h2 class="section-title">"Generated Image"</h2>
            <div class="image-preview">
                {move || {
                    if is_processing.get() {
                        view! {
                            <div class="processing">
                                <div class="spinner"></div>
                                <p class="text-muted">"Processing image..."</p>
                            </div>
                        }
                        .into_any()
                    } else if let Some(url) = output.get() {
                        view! {
                            <img src=url alt="Generated image preview" class="image" />
                        }
                        .into_any()
                    } else {
                        view! {
                            <p class="text-muted">"Generated image will appear here"</p>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}
