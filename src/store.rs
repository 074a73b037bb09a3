use crate::codeforces::types::Handle;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotPresent,
}

/// The watch list of handles whose ratings the bot reports.
pub trait HandleStore {
    fn get(&self) -> Vec<Handle>;
    fn add(&mut self, handle: Handle) -> Result<AddOutcome, StoreError>;
    fn remove(&mut self, handle: &Handle) -> Result<RemoveOutcome, StoreError>;
}

#[derive(Serialize, Deserialize, Default)]
struct HandlesFile {
    handles: Vec<String>,
}

pub struct JsonHandleStore {
    path: PathBuf,
    handles: Vec<Handle>,
}

impl JsonHandleStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file: HandlesFile = match File::open(&path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("{} not found, starting with an empty watch list", path.display());
                HandlesFile::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let mut handles: Vec<Handle> = Vec::with_capacity(file.handles.len());
        for raw in file.handles {
            match Handle::new(raw.clone()) {
                Ok(handle) if handles.iter().any(|h| h.matches(&handle)) => {
                    log::warn!("duplicate handle {} in {}", handle, path.display());
                }
                Ok(handle) => handles.push(handle),
                Err(e) => log::warn!("ignoring invalid handle {:?} in {}: {:?}", raw, path.display(), e),
            }
        }
        log::info!("{} watched handles loaded", handles.len());

        Ok(JsonHandleStore { path, handles })
    }

    fn save(&self) -> Result<(), StoreError> {
        let io_error = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let file = File::create(&self.path).map_err(io_error)?;
        let content = HandlesFile {
            handles: self.handles.iter().map(|h| h.to_string()).collect(),
        };
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &content)?;
        writer.flush().map_err(io_error)?;
        Ok(())
    }
}

impl HandleStore for JsonHandleStore {
    fn get(&self) -> Vec<Handle> {
        self.handles.clone()
    }

    fn add(&mut self, handle: Handle) -> Result<AddOutcome, StoreError> {
        if self.handles.iter().any(|h| h.matches(&handle)) {
            return Ok(AddOutcome::AlreadyPresent);
        }
        self.handles.push(handle);
        if let Err(e) = self.save() {
            self.handles.pop();
            return Err(e);
        }
        Ok(AddOutcome::Added)
    }

    fn remove(&mut self, handle: &Handle) -> Result<RemoveOutcome, StoreError> {
        let Some(position) = self.handles.iter().position(|h| h.matches(handle)) else {
            return Ok(RemoveOutcome::NotPresent);
        };
        let removed = self.handles.remove(position);
        if let Err(e) = self.save() {
            self.handles.insert(position, removed);
            return Err(e);
        }
        Ok(RemoveOutcome::Removed)
    }
}
