use std::time::Duration;

use anyhow::Context;
use thiserror::Error;

use super::model::{AuthResponse, CallRecord, DownloadResponse, HistoryResponse, STATUS_OK};
use super::session::{Session, AUTH_HEADER};
use crate::window::Window;

const API_BASE: &str = "https://api.onlinepbx.ru";

/// Applies to every API call. None of the endpoints guarantee a timeout on
/// their own, so an unresponsive provider would otherwise hang a cron run
/// forever.
const API_TIMEOUT: Duration = Duration::from_secs(10);

/// The archive GET streams the whole bundle body, which can take a while.
const ARCHIVE_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("couldn't decode auth response: {source}")]
    Body {
        source: serde_json::Error,
        body: String,
    },
    #[error("authentication rejected: {comment}")]
    Rejected { comment: String, body: String },
    #[error("auth response is missing the session keys")]
    MissingKeys { body: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("couldn't decode history response: {source}")]
    Body {
        source: serde_json::Error,
        body: String,
    },
    #[error("history search rejected: {comment}")]
    Rejected { comment: String, body: String },
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("couldn't decode download response: {source}")]
    Body {
        source: serde_json::Error,
        body: String,
    },
    #[error("bundled download rejected: {comment}")]
    Rejected { comment: String, body: String },
    #[error("download response is missing the archive url")]
    MissingUrl { body: String },
}

/// A successful history search.
///
/// Carries the raw body next to the parsed records so the caller can journal
/// the provider's response verbatim.
#[derive(Debug)]
pub struct History {
    pub records: Vec<CallRecord>,
    pub body: String,
}

/// Client for the onlinePBX REST API.
pub struct Client {
    inner: reqwest::Client,
    /// Example: `mycompany.onpbx.ru`
    domain: String,
}

impl Client {
    pub fn new(domain: impl Into<String>) -> anyhow::Result<Client> {
        let inner = reqwest::Client::builder()
            .timeout(API_TIMEOUT)
            .build()
            .context("invalid http client configuration")?;

        Ok(Client {
            inner,
            domain: domain.into(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}/{}", API_BASE, self.domain, endpoint)
    }

    /// Exchange the account API key for a fresh session credential.
    pub async fn authenticate(&self, api_key: &str) -> Result<Session, AuthError> {
        let form = [("auth_key", api_key), ("new", "true")];

        let req = self.inner.post(self.url("auth.json")).form(&form);
        let body = req.send().await?.text().await?;

        let resp = serde_json::from_str::<AuthResponse>(&body).map_err(|source| {
            AuthError::Body {
                source,
                body: body.clone(),
            }
        })?;

        if resp.status != STATUS_OK {
            return Err(AuthError::Rejected {
                comment: resp.comment.unwrap_or_default(),
                body,
            });
        }
        resp.data.ok_or(AuthError::MissingKeys { body })
    }

    /// All calls whose start falls inside `window`.
    pub async fn call_history(
        &self,
        session: &Session,
        window: &Window,
    ) -> Result<History, FetchError> {
        let req = self
            .inner
            .post(self.url("mongo_history/search.json"))
            .header(AUTH_HEADER, session.header_value())
            .form(&history_form(window));
        let body = req.send().await?.text().await?;

        let resp = serde_json::from_str::<HistoryResponse>(&body).map_err(|source| {
            FetchError::Body {
                source,
                body: body.clone(),
            }
        })?;

        if resp.status != STATUS_OK {
            return Err(FetchError::Rejected {
                comment: resp.comment.unwrap_or_default(),
                body,
            });
        }
        Ok(History {
            records: resp.data,
            body,
        })
    }

    /// Ask the provider to bundle the recordings of `uuids` and return the
    /// URL of the prepared archive.
    pub async fn recording_archive_url(
        &self,
        session: &Session,
        uuids: &[String],
    ) -> Result<String, DownloadError> {
        let req = self
            .inner
            .post(self.url("mongo_history/search.json"))
            .header(AUTH_HEADER, session.header_value())
            .form(&download_form(uuids));
        let body = req.send().await?.text().await?;

        let resp = serde_json::from_str::<DownloadResponse>(&body).map_err(|source| {
            DownloadError::Body {
                source,
                body: body.clone(),
            }
        })?;

        if resp.status != STATUS_OK {
            return Err(DownloadError::Rejected {
                comment: resp.comment.unwrap_or_default(),
                body,
            });
        }
        resp.data.ok_or(DownloadError::MissingUrl { body })
    }

    /// Plain unauthenticated GET for the archive bytes.
    pub async fn fetch_archive(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let req = self.inner.get(url).timeout(ARCHIVE_TIMEOUT);
        let resp = req.send().await?;
        let bytes = resp.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

fn history_form(window: &Window) -> [(&'static str, String); 2] {
    [
        ("start_stamp_from", window.start_stamp().to_string()),
        ("start_stamp_to", window.end_stamp().to_string()),
    ]
}

fn download_form(uuids: &[String]) -> [(&'static str, String); 2] {
    [
        ("uuid_array", uuids.join(",")),
        ("download", "true".to_string()),
    ]
}
