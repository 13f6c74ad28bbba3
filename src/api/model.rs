use serde::Deserialize;

use super::session::Session;

/// Value of the `status` field marking a successful call.
///
/// The provider sends it as the string `"1"`; anything else is a rejection
/// and comes with a `comment`.
pub const STATUS_OK: &str = "1";

/// `auth.json` response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub status: String,
    /// Present on success
    pub data: Option<Session>,
    /// Present on rejection
    pub comment: Option<String>,
}

/// `mongo_history/search.json` response for a window search.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub status: String,
    #[serde(default)]
    pub data: Vec<CallRecord>,
    pub comment: Option<String>,
}

/// One call in the provider's history result set.
///
/// Only `uuid` is consumed here; whatever else the provider sends rides
/// along unexamined.
#[derive(Debug, Clone, Deserialize)]
pub struct CallRecord {
    pub uuid: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `mongo_history/search.json` response for a bundled download request.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadResponse {
    pub status: String,
    /// On success, the URL of the prepared archive
    pub data: Option<String>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{AuthResponse, DownloadResponse, HistoryResponse, STATUS_OK};

    const AUTH_OK: &str = r#"
{
    "status": "1",
    "data": {
        "key": "8c2b4a13f7d9e0a1",
        "key_id": "1024"
    }
}
    "#;

    const AUTH_REJECTED: &str = r#"
{
    "status": "0",
    "comment": "auth_key is invalid"
}
    "#;

    const HISTORY_OK: &str = r#"
{
    "status": "1",
    "data": [
        {
            "uuid": "3f2b6c1a-9d4e-4f8b-a1c2-7e5d0b9a3c21",
            "caller_id_number": "74950000000",
            "start_stamp": 1704103200,
            "duration": 35
        },
        {
            "uuid": "b7a1d9e3-2c4f-4a6b-8d0e-1f3c5a7b9d42",
            "caller_id_number": "74951111111",
            "start_stamp": 1704106800,
            "duration": 122
        }
    ]
}
    "#;

    const DOWNLOAD_OK: &str = r#"
{
    "status": "1",
    "data": "https://files.onlinepbx.ru/bundle/3f2b6c1a.tar"
}
    "#;

    #[test]
    fn parse_auth_success() {
        let resp = serde_json::from_str::<AuthResponse>(AUTH_OK).unwrap();

        assert_eq!(resp.status, STATUS_OK);
        let session = resp.data.unwrap();
        assert_eq!(session.key, "8c2b4a13f7d9e0a1");
        assert_eq!(session.key_id, "1024");
        assert_eq!(resp.comment, None);
    }

    #[test]
    fn parse_auth_rejection() {
        let resp = serde_json::from_str::<AuthResponse>(AUTH_REJECTED).unwrap();

        assert_ne!(resp.status, STATUS_OK);
        assert!(resp.data.is_none());
        assert_eq!(resp.comment.as_deref(), Some("auth_key is invalid"));
    }

    #[test]
    fn parse_history_keeps_extra_fields_opaque() {
        let resp = serde_json::from_str::<HistoryResponse>(HISTORY_OK).unwrap();

        assert_eq!(resp.status, STATUS_OK);
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[0].uuid, "3f2b6c1a-9d4e-4f8b-a1c2-7e5d0b9a3c21");
        assert_eq!(resp.data[1].uuid, "b7a1d9e3-2c4f-4a6b-8d0e-1f3c5a7b9d42");
        assert_eq!(resp.data[0].extra["duration"], 35);
    }

    #[test]
    fn parse_history_rejection_has_no_records() {
        let resp = serde_json::from_str::<HistoryResponse>(AUTH_REJECTED).unwrap();

        assert_ne!(resp.status, STATUS_OK);
        assert!(resp.data.is_empty());
    }

    #[test]
    fn parse_download_url() {
        let resp = serde_json::from_str::<DownloadResponse>(DOWNLOAD_OK).unwrap();

        assert_eq!(resp.status, STATUS_OK);
        assert_eq!(
            resp.data.as_deref(),
            Some("https://files.onlinepbx.ru/bundle/3f2b6c1a.tar")
        );
    }
}
