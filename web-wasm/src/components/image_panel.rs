//! 画像検出セッション
//!
//! 選択と送信は分離されている。画像の処理は短いため、ユーザーが
//! 「プレートを検出」を明示的に押して送信する（動画側との意図的な非対称）。

use leptos::html;
use leptos::logging;
use leptos::prelude::*;
use plate_detect_common::{normalize_image_reply, DetectionOutcome, ImageSession};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

use crate::api::transfer::TransferClient;
use crate::preview::SelectedMedia;

#[component]
pub fn ImagePanel(client: TransferClient) -> impl IntoView {
    // File・ObjectURLはJS側オブジェクトなのでローカル保持し、
    // 描画に使う状態（プレビューURL・セッション）は純データの信号に分ける
    let media = StoredValue::new_local(None::<SelectedMedia>);
    let session = RwSignal::new(ImageSession::default());
    let preview_url = RwSignal::new(None::<String>);
    let client = StoredValue::new(client);
    let input_ref = NodeRef::<html::Input>::new();

    let on_file_change = move |ev: web_sys::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // 同一ファイルの再選択でもchangeイベントを発火させる
        input.set_value("");
        match SelectedMedia::new(file) {
            Ok(selected) => {
                let url = selected.preview.url().to_string();
                // 新しいハンドルを設置してから旧ハンドルが解放される
                media.set_value(Some(selected));
                preview_url.set(Some(url));
                session.update(|s| s.select());
            }
            Err(err) => logging::error!("プレビューの作成に失敗: {err:?}"),
        }
    };

    let on_choose = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_submit = move |_| {
        let Some(file) = media.with_value(|m| m.as_ref().map(|m| m.file.clone())) else {
            return;
        };
        let Some(ticket) = session.try_update(|s| s.begin_submit()).flatten() else {
            return;
        };
        let client = client.get_value();
        spawn_local(async move {
            let reply = client.submit_image(&file).await;
            let outcome = normalize_image_reply(&reply);
            session.update(|s| {
                if !s.settle(ticket, outcome) {
                    // 選択が入れ替わった後に届いた結果は描画しない
                    logging::log!("古い画像送信の結果を破棄しました");
                }
            });
        });
    };

    view! {
        <section class="panel">
            <h2>"画像検出"</h2>
            <div class="panel-body">
                <Show
                    when=move || preview_url.get().is_some()
                    fallback=|| view! {
                        <div class="drop-hint">
                            <div class="drop-icon">"🚗"</div>
                            <p class="text-muted">"ナンバープレートが写った画像をアップロード"</p>
                        </div>
                    }
                >
                    <img
                        class="preview"
                        src=move || preview_url.get().unwrap_or_default()
                        alt="選択した画像"
                    />
                </Show>

                <input
                    type="file"
                    accept="image/*"
                    class="hidden-input"
                    node_ref=input_ref
                    on:change=on_file_change
                />
                <button class="btn btn-secondary" on:click=on_choose>
                    "ファイルを選択"
                </button>
                <button
                    class="btn btn-primary"
                    disabled=move || preview_url.get().is_none() || session.get().is_submitting()
                    on:click=on_submit
                >
                    {move || if session.get().is_submitting() { "処理中..." } else { "プレートを検出" }}
                </button>

                {move || failed_message(&session.get()).map(|message| view! {
                    <div class="result-box message error">{message}</div>
                })}

                <Show when=move || {
                    matches!(session.get().outcome(), Some(DetectionOutcome::NoPlateFound))
                }>
                    <div class="result-box message info">
                        "画像からナンバープレートは検出されませんでした"
                    </div>
                </Show>

                {move || plate_found(&session.get()).map(|(data_url, plate_text, validation_note)| {
                    let has_text = !plate_text.is_empty();
                    view! {
                        <div class="result-box">
                            <h3>"検出されたプレート"</h3>
                            <img class="plate-image" src=data_url alt="検出されたプレート" />
                            {has_text.then(|| view! {
                                <div class="plate-text">{plate_text.clone()}</div>
                            })}
                            {validation_note.map(|note| view! {
                                <p class="validation-note">{note}</p>
                            })}
                        </div>
                    }
                })}
            </div>
        </section>
    }
}

fn failed_message(session: &ImageSession) -> Option<String> {
    match session.outcome() {
        Some(DetectionOutcome::Failed { message }) => Some(message.clone()),
        _ => None,
    }
}

fn plate_found(session: &ImageSession) -> Option<(String, String, Option<String>)> {
    match session.outcome() {
        Some(DetectionOutcome::PlateFound {
            plate_image,
            plate_text,
            validation_note,
        }) => Some((
            plate_image.data_url(),
            plate_text.clone(),
            validation_note.clone(),
        )),
        _ => None,
    }
}
