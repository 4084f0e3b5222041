use daily_checklist::board::SvgBoard;
use daily_checklist::clock::SystemClock;
use daily_checklist::config::Config;
use daily_checklist::layout::{load_layout, ChecklistLayout};
use daily_checklist::scheduler::ResetTask;
use daily_checklist::{load_data, persist_data, router, AppState, ChecklistController};
use std::net::SocketAddr;
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let layout = match &config.layout_path {
        Some(path) => load_layout(path).await,
        None => ChecklistLayout::default(),
    };
    let store = load_data(&config.data_path).await;

    let mut checklist = ChecklistController::new(
        store,
        SvgBoard::from_layout(&layout),
        SystemClock,
        layout.label_index.clone(),
    )
    .with_schedule(config.reset);
    let attached = checklist.initialize();

    let state = AppState::new(config.data_path.clone(), layout, checklist);

    let mut reset_task = if attached {
        let persist_state = state.clone();
        Some(ResetTask::spawn(state.checklist.clone(), move || {
            let state = persist_state.clone();
            async move {
                let checklist = state.checklist.lock().await;
                if let Err(err) = persist_data(&state.data_path, checklist.store()).await {
                    error!("failed to persist reset: {err}");
                }
            }
        }))
    } else {
        None
    };

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    if let Some(task) = reset_task.as_mut() {
        task.stop();
    }

    Ok(())
}
