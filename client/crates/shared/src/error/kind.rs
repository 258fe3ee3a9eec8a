//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum, the payload-free classification every
//! failure reaching a view model is reduced to.

use serde::Serialize;

/// エラー種別の列挙体
///
/// クライアントが扱うすべての失敗をこの閉じた分類に落とし込みます。
/// `Unauthorized` だけはユーザーに表示されず、トークン再発行フローへ回されます。
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Unauthorized;
/// assert!(!kind.is_user_visible());
/// assert_eq!(kind.as_str(), "unauthorizedError");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// リクエスト URL を組み立てられない
    UrlEncoding,
    /// レスポンスのデコードに失敗
    JsonDecoding,
    /// 必須値が欠けている / 型が合わない
    BadCasting,
    /// 画像の取得に失敗
    FetchImage,
    /// 401 - 認証切れ（再発行対象）
    Unauthorized,
    /// 4xx - クライアント側のエラー
    Client,
    /// 5xx - サーバー側のエラー
    Server,
}

impl ErrorKind {
    /// 識別子としての文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::JsonDecoding.as_str(), "jsonDecodingError");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UrlEncoding => "urlEncodingError",
            ErrorKind::JsonDecoding => "jsonDecodingError",
            ErrorKind::BadCasting => "badCasting",
            ErrorKind::FetchImage => "fetchImageError",
            ErrorKind::Unauthorized => "unauthorizedError",
            ErrorKind::Client => "clientError",
            ErrorKind::Server => "serverError",
        }
    }

    /// トークン再発行で回復できるかどうか
    ///
    /// `Unauthorized` のみ `true` を返します。
    #[inline]
    pub const fn is_retryable_by_reissue(&self) -> bool {
        matches!(self, ErrorKind::Unauthorized)
    }

    /// 画面上のトースト等でユーザーに表示すべきかどうか
    #[inline]
    pub const fn is_user_visible(&self) -> bool {
        !self.is_retryable_by_reissue()
    }

    /// サーバー側のエラーかどうかを判定
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, ErrorKind::Server)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unauthorized_is_hidden() {
        assert!(!ErrorKind::Unauthorized.is_user_visible());
        assert!(ErrorKind::UrlEncoding.is_user_visible());
        assert!(ErrorKind::JsonDecoding.is_user_visible());
        assert!(ErrorKind::BadCasting.is_user_visible());
        assert!(ErrorKind::FetchImage.is_user_visible());
        assert!(ErrorKind::Client.is_user_visible());
        assert!(ErrorKind::Server.is_user_visible());
    }

    #[test]
    fn test_serialize_screaming_snake() {
        let json = serde_json::to_string(&ErrorKind::JsonDecoding).unwrap();
        assert_eq!(json, r#""JSON_DECODING""#);
    }

    #[test]
    fn test_is_server_error() {
        assert!(ErrorKind::Server.is_server_error());
        assert!(!ErrorKind::Client.is_server_error());
    }
}
