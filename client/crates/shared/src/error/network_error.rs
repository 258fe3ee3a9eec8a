//! Network Error - Unified error type for the client
//!
//! Defines the [`NetworkError`] enum and the [`NetworkResult<T>`] type alias.

use thiserror::Error;

use super::kind::ErrorKind;

/// クライアント統一エラー型
///
/// ネットワーク層・認証層・機能サービス層で共通に使用する標準エラー型です。
/// ビューモデルの境界で [`ErrorKind`] に従って振り分けられます。
///
/// ## Examples
/// ```rust
/// use kernel::error::network_error::NetworkError;
/// use kernel::error::kind::ErrorKind;
///
/// let err = NetworkError::client("M001", "member not found");
/// assert_eq!(err.kind(), ErrorKind::Client);
/// assert_eq!(err.description(), "member not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// URL の組み立てに失敗
    #[error("url encoding error")]
    UrlEncoding,

    /// レスポンスのデコードに失敗
    #[error("json decoding error: {0}")]
    JsonDecoding(String),

    /// 必須値の欠落
    #[error("bad casting")]
    BadCasting,

    /// 画像取得の失敗
    #[error("fetch image error")]
    FetchImage,

    /// 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// 4xx
    #[error("client error [{code}]: {message}")]
    Client { code: String, message: String },

    /// 5xx
    #[error("server error")]
    Server,
}

/// クライアント結果型エイリアス
///
/// `Result<T, NetworkError>` の省略形です。
pub type NetworkResult<T> = Result<T, NetworkError>;

impl NetworkError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 4xx クライアントエラーを作成
    #[inline]
    pub fn client(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Client {
            code: code.into(),
            message: message.into(),
        }
    }

    /// HTTP ステータスコードから分類
    ///
    /// ## Arguments
    /// * `status` - HTTP ステータスコード
    /// * `code` - エンベロープのエラーコード（なければステータスコード）
    /// * `message` - エンベロープのメッセージ
    ///
    /// ## Returns
    /// 2xx の場合は `None`
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::network_error::NetworkError;
    ///
    /// assert_eq!(NetworkError::from_status(200, None, ""), None);
    /// assert_eq!(NetworkError::from_status(401, None, ""), Some(NetworkError::Unauthorized));
    /// assert_eq!(NetworkError::from_status(503, None, ""), Some(NetworkError::Server));
    /// ```
    pub fn from_status(status: u16, code: Option<String>, message: &str) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(Self::Unauthorized),
            400..=499 => Some(Self::Client {
                code: code.unwrap_or_else(|| status.to_string()),
                message: message.to_string(),
            }),
            _ => Some(Self::Server),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UrlEncoding => ErrorKind::UrlEncoding,
            Self::JsonDecoding(_) => ErrorKind::JsonDecoding,
            Self::BadCasting => ErrorKind::BadCasting,
            Self::FetchImage => ErrorKind::FetchImage,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Client { .. } => ErrorKind::Client,
            Self::Server => ErrorKind::Server,
        }
    }

    /// 401 かどうか
    #[inline]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// ユーザー向けのメッセージを取得
    ///
    /// トーストやバナーにそのまま表示できる文言を返します。
    pub fn description(&self) -> String {
        match self {
            Self::UrlEncoding => "The request address could not be built.".to_string(),
            Self::JsonDecoding(_) => "The server response could not be read.".to_string(),
            Self::BadCasting => "Some required information is missing.".to_string(),
            Self::FetchImage => "The image could not be loaded.".to_string(),
            Self::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            Self::Client { message, code } if message.is_empty() => {
                format!("The request was rejected ({code}).")
            }
            Self::Client { message, .. } => message.clone(),
            Self::Server => "The server is not responding. Please try again later.".to_string(),
        }
    }
}

// ============================================================================
// Option extension traits
// ============================================================================

/// `Option<T>` を `NetworkResult<T>` に変換するための拡張トレイト
pub trait OptionExt<T> {
    /// `None` の場合に `BadCasting` を返す
    fn ok_or_bad_casting(self) -> NetworkResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_bad_casting(self) -> NetworkResult<T> {
        self.ok_or(NetworkError::BadCasting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert_eq!(NetworkError::from_status(204, None, ""), None);
        assert_eq!(
            NetworkError::from_status(401, Some("A001".into()), "expired"),
            Some(NetworkError::Unauthorized)
        );
        assert_eq!(
            NetworkError::from_status(404, None, "not found"),
            Some(NetworkError::client("404", "not found"))
        );
        assert_eq!(
            NetworkError::from_status(409, Some("M002".into()), "dup"),
            Some(NetworkError::client("M002", "dup"))
        );
        assert_eq!(NetworkError::from_status(500, None, ""), Some(NetworkError::Server));
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(NetworkError::UrlEncoding.kind(), ErrorKind::UrlEncoding);
        assert_eq!(
            NetworkError::JsonDecoding("eof".into()).kind(),
            ErrorKind::JsonDecoding
        );
        assert_eq!(NetworkError::BadCasting.kind(), ErrorKind::BadCasting);
        assert_eq!(NetworkError::FetchImage.kind(), ErrorKind::FetchImage);
        assert_eq!(NetworkError::Unauthorized.kind(), ErrorKind::Unauthorized);
        assert_eq!(NetworkError::client("x", "y").kind(), ErrorKind::Client);
        assert_eq!(NetworkError::Server.kind(), ErrorKind::Server);
    }

    #[test]
    fn test_client_description_falls_back_to_code() {
        let err = NetworkError::client("C404", "");
        assert!(err.description().contains("C404"));

        let err = NetworkError::client("C404", "No such article");
        assert_eq!(err.description(), "No such article");
    }

    #[test]
    fn test_option_ext() {
        let none: Option<u8> = None;
        assert_eq!(none.ok_or_bad_casting(), Err(NetworkError::BadCasting));
        assert_eq!(Some(3u8).ok_or_bad_casting(), Ok(3));
    }
}
