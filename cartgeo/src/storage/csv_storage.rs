use std::fs::{File, OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::CsvMode;
use crate::error::Result;
use crate::models::User;

/// File sink writing one CSV row per user.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
    mode: CsvMode,
}

impl CsvStorage {
    pub fn new(path: PathBuf, mode: CsvMode) -> Self {
        Self { path, mode }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn save_users(&self, users: &[User]) -> Result<()> {
        if users.is_empty() {
            warn!("no users to write to {:?}", self.path);
            return Ok(());
        }
        let path = self.path.clone();
        let mode = self.mode;
        let users = users.to_vec();
        let written =
            tokio::task::spawn_blocking(move || write_users(&path, mode, &users)).await??;
        info!("{written} users written to {:?}", self.path);
        Ok(())
    }
}

fn write_users(path: &Path, mode: CsvMode, users: &[User]) -> Result<usize> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }
    let file = match mode {
        CsvMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
        CsvMode::Overwrite => File::create(path)?,
    };
    // a header goes only into a file that has none yet
    let write_header = file.metadata()?.len() == 0;
    debug!("writing {path:?} in {mode:?} mode, header: {write_header}");

    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);
    for user in users {
        writer.serialize(user)?;
    }
    writer.flush()?;
    Ok(users.len())
}
