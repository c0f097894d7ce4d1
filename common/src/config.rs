//! 検出サービスの接続設定

use crate::error::{Error, Result};

/// 既定の接続先（ローカル開発サーバー）
pub const DEFAULT_SERVICE_BASE: &str = "http://localhost:5000";

/// 画像・動画それぞれの送信先エンドポイント
///
/// パス（`/upload`・`/upload_video`）はサービス側の契約で固定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    pub image_endpoint: String,
    pub video_endpoint: String,
}

impl DetectorConfig {
    /// ベースURLから両エンドポイントを組み立てる
    pub fn from_base(base: &str) -> Result<Self> {
        let base = base.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(Error::Config("サービスURLが空です".to_string()));
        }
        let host = base
            .strip_prefix("http://")
            .or_else(|| base.strip_prefix("https://"));
        if !host.is_some_and(|h| !h.is_empty()) {
            return Err(Error::Config(format!("不正なサービスURL: {base}")));
        }
        Ok(Self {
            image_endpoint: format!("{base}/upload"),
            video_endpoint: format!("{base}/upload_video"),
        })
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            image_endpoint: format!("{DEFAULT_SERVICE_BASE}/upload"),
            video_endpoint: format!("{DEFAULT_SERVICE_BASE}/upload_video"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base() {
        let config = DetectorConfig::from_base("http://example.com:5000").unwrap();
        assert_eq!(config.image_endpoint, "http://example.com:5000/upload");
        assert_eq!(config.video_endpoint, "http://example.com:5000/upload_video");
    }

    #[test]
    fn test_from_base_trailing_slash() {
        let config = DetectorConfig::from_base("https://plates.example.org/").unwrap();
        assert_eq!(config.image_endpoint, "https://plates.example.org/upload");
    }

    #[test]
    fn test_from_base_empty() {
        let result = DetectorConfig::from_base("   ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_base_bad_scheme() {
        let result = DetectorConfig::from_base("ftp://example.com");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_base_scheme_without_host() {
        // 素のスキームだけでは "http:///upload" になってしまう
        assert!(matches!(
            DetectorConfig::from_base("http://"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            DetectorConfig::from_base("https:///"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_default_matches_from_base() {
        let config = DetectorConfig::from_base(DEFAULT_SERVICE_BASE).unwrap();
        assert_eq!(config, DetectorConfig::default());
    }
}
