use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

/// Upper bound on `(n)` suffixes tried before giving up on a base name.
const MAX_SUFFIX: u32 = 999_999;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("couldn't write archive: {0}")]
    Io(#[from] std::io::Error),
    #[error("no free file name for `{base}.tar` after {attempts} attempts")]
    Exhausted { base: String, attempts: u32 },
}

/// Persist archive bytes under `dir`.
///
/// The file name is derived from `now` (`%Y-%m-%d_%H-%M-%S.tar`); when that
/// name is taken a `(n)` suffix disambiguates. Never overwrites.
pub fn save_archive(dir: &Path, bytes: &[u8], now: DateTime<Local>) -> Result<PathBuf, SaveError> {
    let base = now.format("%Y-%m-%d_%H-%M-%S").to_string();
    let path = unique_path(dir, &base, MAX_SUFFIX)?;
    std::fs::write(&path, bytes)?;
    Ok(path)
}

/// First free `dir/base[(n)].tar` name, trying at most `limit` suffixes.
fn unique_path(dir: &Path, base: &str, limit: u32) -> Result<PathBuf, SaveError> {
    let mut path = dir.join(format!("{base}.tar"));
    let mut counter = 0u32;

    while path.exists() {
        counter += 1;
        if counter > limit {
            return Err(SaveError::Exhausted {
                base: base.to_string(),
                attempts: limit,
            });
        }
        path = dir.join(format!("{base}({counter}).tar"));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::{save_archive, unique_path, SaveError};

    #[test]
    fn writes_bytes_under_timestamp_name() {
        let dir = tempfile::tempdir().unwrap();
        let now = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let path = save_archive(dir.path(), b"archive bytes", now).unwrap();

        assert_eq!(path, dir.path().join("2024-01-01_00-00-00.tar"));
        assert_eq!(std::fs::read(&path).unwrap(), b"archive bytes");
    }

    #[test]
    fn collisions_get_counted_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let now = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let first = save_archive(dir.path(), b"one", now).unwrap();
        let second = save_archive(dir.path(), b"two", now).unwrap();
        let third = save_archive(dir.path(), b"three", now).unwrap();

        assert_eq!(first, dir.path().join("2024-01-01_00-00-00.tar"));
        assert_eq!(second, dir.path().join("2024-01-01_00-00-00(1).tar"));
        assert_eq!(third, dir.path().join("2024-01-01_00-00-00(2).tar"));
        assert_eq!(std::fs::read(&second).unwrap(), b"two");
    }

    #[test]
    fn exhausted_names_fail_instead_of_overwriting() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.tar"), b"").unwrap();
        for n in 1..=3u32 {
            std::fs::write(dir.path().join(format!("base({n}).tar")), b"").unwrap();
        }

        let err = unique_path(dir.path(), "base", 3).unwrap_err();
        assert!(matches!(
            err,
            SaveError::Exhausted { attempts: 3, .. }
        ));
    }
}
