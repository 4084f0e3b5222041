use crate::errors::AppError;
use crate::store::MemoryStore;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/state.json")
}

pub async fn load_data(path: &Path) -> MemoryStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                MemoryStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => MemoryStore::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            MemoryStore::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &MemoryStore) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(|err| {
        AppError::internal_message(format!("failed to write {}: {err}", path.display()))
    })?;
    Ok(())
}
