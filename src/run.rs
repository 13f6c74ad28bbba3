use chrono::Local;
use thiserror::Error;

use crate::api::{AuthError, Client, DownloadError, FetchError, Session, AUTH_HEADER};
use crate::archive::{save_archive, SaveError};
use crate::config::Config;
use crate::journal::Journal;
use crate::window::Window;

/// Days of history each run covers.
const WINDOW_DAYS: i64 = 30;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("failed to fetch call history: {0}")]
    Fetch(#[from] FetchError),
    #[error("failed to download call recordings: {0}")]
    Download(#[from] DownloadError),
    #[error("failed to save call recordings: {0}")]
    Save(#[from] SaveError),
    #[error("couldn't write journal: {0}")]
    Journal(#[from] std::io::Error),
    #[error(transparent)]
    Window(#[from] anyhow::Error),
}

/// One full load: authenticate, fetch the trailing window's call history,
/// download the bundled recordings and save them.
///
/// Strictly linear, no retries; the first failure is journaled with its
/// diagnostics and ends the run.
pub async fn run(client: &Client, journal: &Journal, config: &Config) -> Result<(), RunError> {
    let session = match client.authenticate(&config.api_key).await {
        Ok(session) => {
            journal.append("Authentication successful.")?;
            session
        }
        Err(err) => {
            journal_auth_failure(journal, &err, &config.api_key)?;
            return Err(err.into());
        }
    };

    let window = Window::trailing_days(Local::now(), WINDOW_DAYS)?;
    journal.append(&format!(
        "Fetching calls for the period from {} to {}",
        window.start.format("%Y-%m-%d"),
        window.end.format("%Y-%m-%d"),
    ))?;

    let history = match client.call_history(&session, &window).await {
        Ok(history) => history,
        Err(err) => {
            journal_fetch_failure(journal, &err, &session, &window)?;
            return Err(err.into());
        }
    };
    journal.append("Call history fetched successfully.")?;
    journal.append(&format!("Response data: {}", history.body.trim()))?;

    let uuids: Vec<String> = history.records.into_iter().map(|call| call.uuid).collect();
    if uuids.is_empty() {
        journal.append("No calls in the requested period; nothing to download.")?;
        return Ok(());
    }

    let url = match client.recording_archive_url(&session, &uuids).await {
        Ok(url) => url,
        Err(err) => {
            journal_download_failure(journal, &err, &uuids)?;
            return Err(err.into());
        }
    };
    journal.append(&format!("Downloading call recordings from {}", url))?;

    let bytes = match client.fetch_archive(&url).await {
        Ok(bytes) => bytes,
        Err(err) => {
            journal.append(&format!("Failed to download call recordings: {}", err))?;
            return Err(err.into());
        }
    };

    let path = match save_archive(&config.records_path, &bytes, Local::now()) {
        Ok(path) => path,
        Err(err) => {
            journal.append(&format!("Failed to save call recordings: {}", err))?;
            return Err(err.into());
        }
    };
    journal.append(&format!(
        "Call recordings downloaded successfully to file {}.",
        path.display()
    ))?;

    Ok(())
}

/// The error kind decides how much diagnostic context lands in the journal;
/// rejections get the payload and the provider's full response, transport
/// errors just the summary line.
fn journal_auth_failure(
    journal: &Journal,
    err: &AuthError,
    api_key: &str,
) -> std::io::Result<()> {
    match err {
        AuthError::Rejected { comment, body } => {
            journal.append(&format!("Authentication failed: {}", comment))?;
            journal.append(&format!("Request payload: auth_key={}, new=true", api_key))?;
            journal.append(&format!("Response data: {}", body.trim()))
        }
        AuthError::Body { body, .. } | AuthError::MissingKeys { body } => {
            journal.append(&format!("Authentication failed: {}", err))?;
            journal.append(&format!("Response data: {}", body.trim()))
        }
        err => journal.append(&format!("Authentication failed: {}", err)),
    }
}

fn journal_fetch_failure(
    journal: &Journal,
    err: &FetchError,
    session: &Session,
    window: &Window,
) -> std::io::Result<()> {
    match err {
        FetchError::Rejected { comment, body } => {
            journal.append(&format!("Failed to fetch call history: {}", comment))?;
            journal.append(&format!(
                "Request headers: {}: {}",
                AUTH_HEADER,
                session.header_value()
            ))?;
            journal.append(&format!(
                "Request payload: start_stamp_from={}, start_stamp_to={}",
                window.start_stamp(),
                window.end_stamp()
            ))?;
            journal.append(&format!("Response data: {}", body.trim()))
        }
        FetchError::Body { body, .. } => {
            journal.append(&format!("Failed to fetch call history: {}", err))?;
            journal.append(&format!("Response data: {}", body.trim()))
        }
        err => journal.append(&format!("Failed to fetch call history: {}", err)),
    }
}

fn journal_download_failure(
    journal: &Journal,
    err: &DownloadError,
    uuids: &[String],
) -> std::io::Result<()> {
    match err {
        DownloadError::Rejected { comment, body } => {
            journal.append(&format!("Failed to download call recordings: {}", comment))?;
            journal.append(&format!(
                "Request payload: uuid_array={}, download=true",
                uuids.join(",")
            ))?;
            journal.append(&format!("Response data: {}", body.trim()))
        }
        DownloadError::Body { body, .. } | DownloadError::MissingUrl { body } => {
            journal.append(&format!("Failed to download call recordings: {}", err))?;
            journal.append(&format!("Response data: {}", body.trim()))
        }
        err => journal.append(&format!("Failed to download call recordings: {}", err)),
    }
}
