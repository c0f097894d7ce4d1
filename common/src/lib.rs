//! License Plate Detector Common Library
//!
//! Web(WASM)クライアントと共有される中核ロジック:
//! - types: 提示モデル（閉じた結果型）と生応答のキャリア
//! - normalizer: サービス応答の揺れを吸収する正規化
//! - session: 選択→送信→確定のセッション状態機械
//! - config: 検出サービスの接続設定

pub mod config;
pub mod error;
pub mod normalizer;
pub mod session;
pub mod types;

pub use config::{DetectorConfig, DEFAULT_SERVICE_BASE};
pub use error::{Error, Result};
pub use normalizer::{normalize_image_reply, normalize_video_reply, parse_body};
pub use session::{DetectionSession, ImageSession, SubmissionTicket, VideoSession};
pub use types::{DetectionOutcome, PlateCrop, PlateListOutcome, TransferReply};
