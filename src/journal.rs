use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Plain-text run journal with one file per calendar day.
///
/// Each append opens and closes the file, so two processes writing at once
/// rely only on the operating system's append semantics.
pub struct Journal {
    dir: PathBuf,
}

impl Journal {
    pub fn new(dir: impl AsRef<Path>) -> Journal {
        Journal {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Append `msg` stamped with the current wall-clock time.
    pub fn append(&self, msg: &str) -> std::io::Result<()> {
        self.append_at(Local::now(), msg)
    }

    fn append_at(&self, now: DateTime<Local>, msg: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(format!("{}.txt", now.format("%Y-%m-%d")));
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(format_line(&now, msg).as_bytes())
    }
}

fn format_line(now: &DateTime<Local>, msg: &str) -> String {
    format!("[{}] {}\n", now.format("%Y-%m-%d %H:%M:%S"), msg)
}
