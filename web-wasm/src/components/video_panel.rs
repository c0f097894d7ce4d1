//! 動画検出セッション
//!
//! 動画は処理が長いため、選択と同時に送信を開始する（fire and forget）。
//! 画像側の「選択→明示的に検出」とは意図的に非対称。
//! 現在の選択に対する再検出ボタンも残している。

use leptos::html;
use leptos::logging;
use leptos::prelude::*;
use plate_detect_common::{normalize_video_reply, PlateListOutcome, VideoSession};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

use crate::api::transfer::TransferClient;
use crate::preview::SelectedMedia;

#[component]
pub fn VideoPanel(client: TransferClient) -> impl IntoView {
    let media = StoredValue::new_local(None::<SelectedMedia>);
    let session = RwSignal::new(VideoSession::default());
    let preview_url = RwSignal::new(None::<String>);
    let client = StoredValue::new(client);
    let input_ref = NodeRef::<html::Input>::new();

    let do_submit = move || {
        let Some(file) = media.with_value(|m| m.as_ref().map(|m| m.file.clone())) else {
            return;
        };
        let Some(ticket) = session.try_update(|s| s.begin_submit()).flatten() else {
            return;
        };
        let client = client.get_value();
        spawn_local(async move {
            let reply = client.submit_video(&file).await;
            let outcome = normalize_video_reply(&reply);
            session.update(|s| {
                if !s.settle(ticket, outcome) {
                    logging::log!("古い動画送信の結果を破棄しました");
                }
            });
        });
    };

    let on_file_change = move |ev: web_sys::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        input.set_value("");
        match SelectedMedia::new(file) {
            Ok(selected) => {
                let url = selected.preview.url().to_string();
                media.set_value(Some(selected));
                preview_url.set(Some(url));
                session.update(|s| s.select());
                // 動画は選択と同時に処理を始める
                do_submit();
            }
            Err(err) => logging::error!("プレビューの作成に失敗: {err:?}"),
        }
    };

    let on_choose = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <section class="panel">
            <h2>"動画検出"</h2>
            <div class="panel-body">
                <Show
                    when=move || preview_url.get().is_some()
                    fallback=|| view! {
                        <div class="drop-hint">
                            <div class="drop-icon">"🎬"</div>
                            <p class="text-muted">"ナンバープレートが写った動画をアップロード"</p>
                        </div>
                    }
                >
                    <div class="uploaded-video">
                        <h3>"アップロードした動画"</h3>
                        <video
                            class="video-player"
                            controls=true
                            src=move || preview_url.get().unwrap_or_default()
                        ></video>
                    </div>
                </Show>

                <input
                    type="file"
                    accept="video/*"
                    class="hidden-input"
                    node_ref=input_ref
                    on:change=on_file_change
                />
                <button class="btn btn-secondary" on:click=on_choose>
                    "動画を選択"
                </button>
                <button
                    class="btn btn-primary"
                    disabled=move || preview_url.get().is_none() || session.get().is_submitting()
                    on:click=move |_| do_submit()
                >
                    {move || if session.get().is_submitting() { "処理中..." } else { "プレートを再検出" }}
                </button>

                {move || failed_message(&session.get()).map(|message| view! {
                    <div class="result-box message error">{message}</div>
                })}

                {move || processed(&session.get()).map(|(video_url, plates)| {
                    let no_plates = plates.is_empty();
                    view! {
                        <div class="result-box">
                            <h3>"処理済みの動画"</h3>
                            <video class="video-player" controls=true src=video_url></video>
                            {no_plates.then(|| view! {
                                <div class="message info">
                                    "動画からナンバープレートは検出されませんでした"
                                </div>
                            })}
                            {(!no_plates).then(|| view! {
                                <div class="plate-list">
                                    <h3>"検出されたプレート"</h3>
                                    <ul>
                                        {plates.iter().map(|plate| view! {
                                            <li class="plate-list-item">{plate.clone()}</li>
                                        }).collect_view()}
                                    </ul>
                                </div>
                            })}
                        </div>
                    }
                })}
            </div>
        </section>
    }
}

fn failed_message(session: &VideoSession) -> Option<String> {
    match session.outcome() {
        Some(PlateListOutcome::Failed { message }) => Some(message.clone()),
        _ => None,
    }
}

fn processed(session: &VideoSession) -> Option<(String, Vec<String>)> {
    match session.outcome() {
        Some(PlateListOutcome::Processed { video_url, plates }) => {
            Some((video_url.clone(), plates.clone()))
        }
        _ => None,
    }
}
