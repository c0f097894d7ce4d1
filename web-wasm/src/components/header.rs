//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"License Plate Detector - ナンバープレート検出"</h1>
        </header>
    }
}
