//! セッション状態機械のテスト
//!
//! 選択→送信→確定の基本遷移と、古い送信結果の破棄を検証

use plate_detect_common::normalizer::IMAGE_FALLBACK_ERROR;
use plate_detect_common::{DetectionOutcome, ImageSession, PlateListOutcome, VideoSession};

fn failed(message: &str) -> DetectionOutcome {
    DetectionOutcome::Failed {
        message: message.to_string(),
    }
}

/// 選択→送信→確定の基本フロー
#[test]
fn test_select_submit_settle() {
    let mut session = ImageSession::default();
    assert!(!session.is_submitting());
    assert!(session.outcome().is_none());

    session.select();
    let ticket = session.begin_submit().expect("送信を開始できるはず");
    assert!(session.is_submitting());
    // 送信中は結果なし（Pendingはこの組で表現される）
    assert!(session.outcome().is_none());

    assert!(session.settle(ticket, DetectionOutcome::NoPlateFound));
    assert!(!session.is_submitting());
    assert_eq!(session.outcome(), Some(&DetectionOutcome::NoPlateFound));
}

/// 送信中の再送信は拒否される
#[test]
fn test_begin_submit_is_reentrant_guarded() {
    let mut session = ImageSession::default();
    session.select();

    let first = session.begin_submit();
    assert!(first.is_some());
    assert!(session.begin_submit().is_none());

    // 確定後は再送信できる（同じ選択の再検出）
    assert!(session.settle(first.unwrap(), failed("x")));
    assert!(session.begin_submit().is_some());
}

/// 新しい選択後に届いた古い送信の結果は破棄される
#[test]
fn test_stale_settlement_is_discarded() {
    let mut session = ImageSession::default();
    session.select();
    let stale_ticket = session.begin_submit().unwrap();

    // 応答を待たずに別の画像を選択
    session.select();
    assert!(!session.is_submitting());
    assert!(session.outcome().is_none());

    // 古い送信がどう決着しても現在の状態を上書きしない
    assert!(!session.settle(stale_ticket, failed(IMAGE_FALLBACK_ERROR)));
    assert!(session.outcome().is_none());
    assert!(!session.is_submitting());

    // 新しい選択の送信は通常どおり確定する
    let ticket = session.begin_submit().unwrap();
    assert!(session.settle(ticket, DetectionOutcome::NoPlateFound));
    assert_eq!(session.outcome(), Some(&DetectionOutcome::NoPlateFound));
}

/// 確定済みの結果も新しい選択で消える
#[test]
fn test_new_selection_clears_prior_outcome() {
    let mut session = ImageSession::default();
    session.select();
    let ticket = session.begin_submit().unwrap();
    session.settle(ticket, failed("OCR engine timeout"));
    assert!(session.outcome().is_some());

    session.select();
    assert!(session.outcome().is_none());
}

/// 画像・動画のセッションは独立している
#[test]
fn test_sessions_are_independent() {
    let mut image = ImageSession::default();
    let mut video = VideoSession::default();

    image.select();
    let image_ticket = image.begin_submit().unwrap();

    video.select();
    let video_ticket = video.begin_submit().unwrap();

    // 片方の確定がもう片方へ影響しない
    assert!(video.settle(
        video_ticket,
        PlateListOutcome::Processed {
            video_url: "/out/1.mp4".to_string(),
            plates: vec![],
        }
    ));
    assert!(image.is_submitting());

    assert!(image.settle(image_ticket, DetectionOutcome::NoPlateFound));
    assert!(matches!(
        video.outcome(),
        Some(PlateListOutcome::Processed { plates, .. }) if plates.is_empty()
    ));
}
