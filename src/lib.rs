pub mod app;
pub mod board;
pub mod clock;
pub mod config;
pub mod controller;
pub mod day_key;
pub mod errors;
pub mod handlers;
pub mod layout;
pub mod models;
pub mod scheduler;
pub mod state;
pub mod storage;
pub mod store;
pub mod surface;
pub mod ui;

pub use app::router;
pub use controller::{ChecklistController, InputEvent, ResetSchedule};
pub use state::AppState;
pub use storage::{load_data, persist_data, resolve_data_path};
