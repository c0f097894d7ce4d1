//! 検出結果の型定義
//!
//! サービス応答は版によって形が揺れるため、描画に使う型はここで閉じる:
//! - DetectionOutcome: 画像1回分の正規化済み結果
//! - PlateListOutcome: 動画1回分の正規化済み結果（プレート文字列の列）
//! - TransferReply: TransferClientがnormalizerへ渡す生の応答

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 切り出されたプレート画像（Base64、data URI接頭辞なし）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateCrop {
    pub base64: String,
    pub mime_type: String,
}

impl PlateCrop {
    /// サービスはPNGをdata URI接頭辞なしで返す
    pub fn from_base64(base64: impl Into<String>) -> Self {
        Self {
            base64: base64.into(),
            mime_type: "image/png".to_string(),
        }
    }

    /// `<img src=...>`に渡せるdata URLへ変換する
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// 画像送信1回分の正規化済み結果
///
/// 確定した結果はこの3状態のいずれか1つだけを持つ。送信中（Pending）は
/// セッション側の`is_submitting`と「結果なし」で表現される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionOutcome {
    /// プレートを検出した
    PlateFound {
        plate_image: PlateCrop,
        /// 認識された番号。空文字の場合もある（それ自体は失敗ではない）
        plate_text: String,
        /// サービスが付けたチェックサム等の検証メモ
        validation_note: Option<String>,
    },
    /// プレートなし（正常系の否定結果）
    NoPlateFound,
    /// 送信が失敗した
    Failed { message: String },
}

/// 動画送信1回分の正規化済み結果
///
/// プレート0件は正常（「動画からプレートは検出されませんでした」として描画）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlateListOutcome {
    /// 処理済み動画への参照と、認識されたプレート文字列の列
    Processed {
        video_url: String,
        plates: Vec<String>,
    },
    /// 送信が失敗した
    Failed { message: String },
}

/// TransferClientが返す生の応答
///
/// 分類（エラー種別・プレート有無）はnormalizerの責務で、ここでは
/// 「応答を得られたか」と生の本文だけを運ぶ。
#[derive(Debug, Clone, PartialEq)]
pub enum TransferReply {
    /// HTTP応答を取得できた。本文がJSONでない場合は`Value::Null`
    Http { ok: bool, body: Value },
    /// 接続・DNS・タイムアウト等で応答を得られなかった
    TransportFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plate_crop_data_url() {
        let crop = PlateCrop::from_base64("iVBORw0KGgo=");
        assert_eq!(crop.mime_type, "image/png");
        assert_eq!(crop.data_url(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_plate_crop_empty_base64() {
        let crop = PlateCrop::from_base64("");
        assert_eq!(crop.data_url(), "data:image/png;base64,");
    }
}
