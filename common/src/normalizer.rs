//! サービス応答の正規化
//!
//! 検出サービスの応答語彙は版によって揺れてきた（素の`error`、
//! `validation_result`の追加、「プレートなし」番兵値の複数化）。
//! 揺れの吸収はこのモジュールだけで行い、他のコンポーネントは
//! `DetectionOutcome` / `PlateListOutcome` の閉じた型だけを見る。
//! 新しい応答形式への対応もここへの追加だけで済ませる。
//!
//! ## 判定順序（先勝ち）
//! 1. 接続失敗またはHTTPエラー → Failed（本文の`error`→`message`→既定文言）
//! 2. 「プレートなし」の明示シグナル → NoPlateFound
//!    （付随する`detected_plate`があっても優先される）
//! 3. 空でない`detected_plate` → PlateFound
//! 4. それ以外の成功応答 → Failed（想定外の本文）

use serde_json::Value;

use crate::error::Result;
use crate::types::{DetectionOutcome, PlateCrop, PlateListOutcome, TransferReply};

/// 画像送信の既定エラーメッセージ（接続失敗・本文なしのサーバーエラー）
pub const IMAGE_FALLBACK_ERROR: &str = "画像の処理中にエラーが発生しました";

/// 動画送信の既定エラーメッセージ
pub const VIDEO_FALLBACK_ERROR: &str = "動画の処理中にエラーが発生しました";

/// 成功ステータスだが本文を解釈できない場合のメッセージ
pub const MALFORMED_RESPONSE_ERROR: &str = "サーバーから想定外の応答を受信しました";

/// `plate_number`の「プレートなし」番兵値（版によって揺れる）
const NO_PLATE_SENTINELS: [&str; 2] = ["No plate detected", "No license plate detected"];

/// `message`に含まれる「プレートなし」句
const NO_PLATE_MESSAGE_MARKER: &str = "No license plate detected";

/// 画像応答を正規化する
pub fn normalize_image_reply(reply: &TransferReply) -> DetectionOutcome {
    let (ok, body) = match reply {
        TransferReply::TransportFailure => {
            return DetectionOutcome::Failed {
                message: IMAGE_FALLBACK_ERROR.to_string(),
            }
        }
        TransferReply::Http { ok, body } => (*ok, body),
    };

    if !ok {
        return DetectionOutcome::Failed {
            message: error_message(body, IMAGE_FALLBACK_ERROR),
        };
    }

    // 「プレートなし」シグナルは付随する画像フィールドより常に優先する
    if has_no_plate_signal(body) {
        return DetectionOutcome::NoPlateFound;
    }

    if let Some(image) = non_empty_str(body, "detected_plate") {
        return DetectionOutcome::PlateFound {
            plate_image: PlateCrop::from_base64(image),
            plate_text: str_field(body, "plate_number").unwrap_or_default().to_string(),
            validation_note: str_field(body, "validation_result").map(str::to_string),
        };
    }

    // 成功ステータスだが既知の成功形でも「プレートなし」でもない
    DetectionOutcome::Failed {
        message: MALFORMED_RESPONSE_ERROR.to_string(),
    }
}

/// 動画応答を正規化する
///
/// 成功の条件は空でない`video_url`。`detected_plates`が欠落・空でも
/// 成功（プレート0件）として扱う。
pub fn normalize_video_reply(reply: &TransferReply) -> PlateListOutcome {
    let (ok, body) = match reply {
        TransferReply::TransportFailure => {
            return PlateListOutcome::Failed {
                message: VIDEO_FALLBACK_ERROR.to_string(),
            }
        }
        TransferReply::Http { ok, body } => (*ok, body),
    };

    if !ok {
        return PlateListOutcome::Failed {
            message: error_message(body, VIDEO_FALLBACK_ERROR),
        };
    }

    if let Some(url) = non_empty_str(body, "video_url") {
        let plates = body
            .get("detected_plates")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        return PlateListOutcome::Processed {
            video_url: url.to_string(),
            plates,
        };
    }

    PlateListOutcome::Failed {
        message: MALFORMED_RESPONSE_ERROR.to_string(),
    }
}

/// 応答本文のテキストをJSONとして解釈する
///
/// 呼び出し側（TransferClient）は失敗時に`Value::Null`として扱う。
pub fn parse_body(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

fn has_no_plate_signal(body: &Value) -> bool {
    if let Some(message) = str_field(body, "message") {
        if message.contains(NO_PLATE_MESSAGE_MARKER) {
            return true;
        }
    }
    matches!(
        str_field(body, "plate_number"),
        Some(number) if NO_PLATE_SENTINELS.contains(&number)
    )
}

fn str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

fn non_empty_str<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    str_field(body, key).filter(|s| !s.is_empty())
}

fn error_message(body: &Value, fallback: &str) -> String {
    str_field(body, "error")
        .or_else(|| str_field(body, "message"))
        .unwrap_or(fallback)
        .to_string()
}
