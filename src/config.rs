use crate::controller::ResetSchedule;
use crate::storage::resolve_data_path;
use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub layout_path: Option<PathBuf>,
    pub reset: ResetSchedule,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);
        let layout_path = env::var("CHECKLIST_LAYOUT_PATH").ok().map(PathBuf::from);
        let reset = env::var("CHECKLIST_RESET_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(|secs| ResetSchedule::Every(Duration::from_secs(secs)))
            .unwrap_or(ResetSchedule::Midnight);

        Self {
            port,
            data_path: resolve_data_path(),
            layout_path,
            reset,
        }
    }
}
