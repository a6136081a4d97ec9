//! エラー表示コンポーネント

use leptos::prelude::*;

#[component]
pub fn ErrorBanner(message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="error-message" role="alert">
                <span class="error-icon">"⚠"</span>
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}
