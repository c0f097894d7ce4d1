//! 検出サービスへのマルチパート送信
//!
//! ここは薄いHTTPクライアントで、セッション状態には一切触れない。
//! 応答の分類（エラー種別・プレート有無）はnormalizer側の責務。

use leptos::logging;
use plate_detect_common::{normalizer, DetectorConfig, TransferReply};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

/// 画像送信のマルチパートフィールド名（サービス側契約。変更不可）
pub const IMAGE_FIELD: &str = "file";

/// 動画送信のマルチパートフィールド名（サービス側契約。変更不可）
pub const VIDEO_FIELD: &str = "video";

/// 検出サービスへの送信クライアント
#[derive(Debug, Clone)]
pub struct TransferClient {
    config: DetectorConfig,
}

impl TransferClient {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub async fn submit_image(&self, file: &File) -> TransferReply {
        submit(&self.config.image_endpoint, IMAGE_FIELD, file).await
    }

    pub async fn submit_video(&self, file: &File) -> TransferReply {
        submit(&self.config.video_endpoint, VIDEO_FIELD, file).await
    }
}

async fn submit(url: &str, field: &str, file: &File) -> TransferReply {
    match post_multipart(url, field, file).await {
        Ok(reply) => reply,
        // 接続・DNS・タイムアウト等。整形済みのエラー本文とは区別する
        Err(err) => {
            logging::error!("送信失敗 ({url}): {err:?}");
            TransferReply::TransportFailure
        }
    }
}

/// 送信ファイルを契約どおりのフィールド名でマルチパート本文に詰める
fn build_form(field: &str, file: &File) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    form.append_with_blob(field, file)?;
    Ok(form)
}

async fn post_multipart(url: &str, field: &str, file: &File) -> Result<TransferReply, JsValue> {
    let form = build_form(field, file)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    // Content-Typeはブラウザがboundary付きで設定する
    opts.set_body(form.as_ref());

    let request = Request::new_with_str_and_init(url, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    let ok = resp.ok();
    let text = JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    let body = match normalizer::parse_body(&text) {
        Ok(value) => value,
        Err(err) => {
            logging::warn!("応答本文をJSONとして解釈できません: {err}");
            serde_json::Value::Null
        }
    };

    Ok(TransferReply::Http { ok, body })
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::Blob;

    wasm_bindgen_test_configure!(run_in_browser);

    fn dummy_file(name: &str) -> File {
        let parts = js_sys::Array::of1(&JsValue::from_str("dummy bytes"));
        File::new_with_str_sequence(&parts, name).expect("File作成に失敗")
    }

    // フィールド名はサービス側の契約。本文に実際に詰まるキーを確認する
    #[wasm_bindgen_test]
    fn wasm_image_form_uses_contract_field() {
        let form = build_form(IMAGE_FIELD, &dummy_file("plate.png")).expect("FormData作成に失敗");
        assert!(form.get("file").is_instance_of::<Blob>());
    }

    #[wasm_bindgen_test]
    fn wasm_video_form_uses_contract_field() {
        let form = build_form(VIDEO_FIELD, &dummy_file("drive.mp4")).expect("FormData作成に失敗");
        assert!(form.get("video").is_instance_of::<Blob>());
        assert!(form.get("file").is_undefined());
    }
}
