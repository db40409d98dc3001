use std::{
    fs,
    io,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};
use tracing::{
    debug,
    warn,
};

use crate::core::MishuError;

const APP_NAME: &str = "mishu";

/// Per-user data directory, created on first use. Without a platform data dir the
/// working directory is used.
pub fn app_data_dir() -> PathBuf {
    let Some(base) = dirs::data_local_dir() else {
        warn!("No local data directory available, storing data in the working directory");
        return PathBuf::from(".");
    };

    let dir = base.join(APP_NAME);
    if let Err(e) = fs::create_dir_all(&dir) {
        warn!("Could not create data directory {}: {}", dir.display(), e);
    }
    dir
}

pub fn data_file_path(filename: &str) -> PathBuf {
    app_data_dir().join(filename)
}

pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), MishuError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// A missing file reads as `T::default()`; any other failure is an error.
pub fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, MishuError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(e.into()),
    };

    let data = serde_json::from_str(&json)?;
    debug!("Read {}", path.display());
    Ok(data)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), MishuError> {
    write_json(&data_file_path(filename), data)
}

pub fn load_json<T: DeserializeOwned + Default>(filename: &str) -> Result<T, MishuError> {
    read_json(&data_file_path(filename))
}

pub fn load_json_or_default<T: DeserializeOwned + Default>(filename: &str) -> T {
    load_json(filename).unwrap_or_else(|e| {
        warn!("Failed to load {}: {}. Using defaults.", filename, e);
        T::default()
    })
}
