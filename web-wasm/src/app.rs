//! アプリケーション本体
//!
//! 画像・動画の2つの検出セッションを並置する。両者は完全に独立で、
//! 共有するのは送信クライアント（の複製）だけ。

use leptos::logging;
use leptos::prelude::*;
use plate_detect_common::DetectorConfig;

use crate::api::transfer::TransferClient;
use crate::components::{header::Header, image_panel::ImagePanel, video_panel::VideoPanel};

/// 接続先の決定
///
/// `<meta name="plate-service" content="...">`があれば差し替え、
/// 不正な値は警告して既定値に戻す。
fn service_config() -> DetectorConfig {
    let meta_base = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| {
            document
                .query_selector(r#"meta[name="plate-service"]"#)
                .ok()
                .flatten()
        })
        .and_then(|element| element.get_attribute("content"));

    match meta_base {
        Some(base) => DetectorConfig::from_base(&base).unwrap_or_else(|err| {
            logging::warn!("サービス設定が不正なため既定値を使用します: {err}");
            DetectorConfig::default()
        }),
        None => DetectorConfig::default(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let client = TransferClient::new(service_config());

    view! {
        <div class="container">
            <Header />
            <main class="panels">
                <ImagePanel client=client.clone() />
                <VideoPanel client=client />
            </main>
        </div>
    }
}
