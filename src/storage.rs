use crate::errors::AppError;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::HashMap,
    env, fs, io,
    path::PathBuf,
};
use tracing::error;

pub trait KeyValueStore: Send {
    /// `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;
    fn write(&mut self, key: &str, bytes: &[u8]) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), bytes)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Falls back to `default` when the key is absent or the value is unreadable.
pub fn get_item<T: DeserializeOwned>(backend: &dyn KeyValueStore, key: &str, default: T) -> T {
    match backend.read(key) {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                error!(key, "failed to parse stored value: {err}");
                default
            }
        },
        Ok(None) => default,
        Err(err) => {
            error!(key, "failed to read stored value: {err}");
            default
        }
    }
}

pub fn set_item<T: Serialize + ?Sized>(
    backend: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(value)?;
    backend.write(key, &payload)?;
    Ok(())
}

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("data")
}
