use crate::board::SvgBoard;
use crate::clock::SystemClock;
use crate::controller::ChecklistController;
use crate::layout::ChecklistLayout;
use crate::store::MemoryStore;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

pub type Checklist = ChecklistController<MemoryStore, SvgBoard, SystemClock>;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub layout: Arc<ChecklistLayout>,
    pub checklist: Arc<Mutex<Checklist>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, layout: ChecklistLayout, checklist: Checklist) -> Self {
        Self {
            data_path,
            layout: Arc::new(layout),
            checklist: Arc::new(Mutex::new(checklist)),
        }
    }
}
