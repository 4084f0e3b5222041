use crate::clock::Clock;
use crate::controller::InputEvent;
use crate::errors::AppError;
use crate::models::{ChecklistView, InputRequest, ItemView};
use crate::state::{AppState, Checklist};
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Json,
};
use tracing::error;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let checklist = state.checklist.lock().await;
    let date = checklist.clock().now().date().to_string();
    Html(render_index(&date, checklist.surface()))
}

pub async fn get_today(State(state): State<AppState>) -> Json<ChecklistView> {
    let checklist = state.checklist.lock().await;
    Json(to_view(&state, &checklist))
}

pub async fn input(
    State(state): State<AppState>,
    Json(payload): Json<InputRequest>,
) -> Result<Json<ChecklistView>, AppError> {
    let event = match payload.kind.trim() {
        "pointerup" => InputEvent::PointerUp {
            target: payload.target,
        },
        "keydown" => InputEvent::KeyDown {
            target: payload.target,
            key: payload
                .key
                .ok_or_else(|| AppError::bad_request("keydown needs a key"))?,
        },
        _ => return Err(AppError::bad_request("kind must be 'pointerup' or 'keydown'")),
    };

    let mut checklist = state.checklist.lock().await;
    if checklist.handle_input(event) {
        persist_checklist(&state, &checklist).await?;
    }

    Ok(Json(to_view(&state, &checklist)))
}

pub async fn toggle_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let mut checklist = state.checklist.lock().await;
    let handled = checklist.handle_input(InputEvent::PointerUp {
        target: Some(id.clone()),
    });
    if !handled {
        return Err(AppError::not_found(format!("no checklist item '{id}'")));
    }

    persist_checklist(&state, &checklist).await?;
    Ok(Redirect::to("/"))
}

/// Writes the store to disk. On failure the change stays applied in memory
/// and goes out with the next successful write.
async fn persist_checklist(state: &AppState, checklist: &Checklist) -> Result<(), AppError> {
    persist_data(&state.data_path, checklist.store())
        .await
        .map_err(|err| {
            let day_key = checklist.today_key();
            error!("saving {day_key} failed: {}", err.message);
            AppError::internal_message(format!(
                "change to {day_key} is held in memory only: {}",
                err.message
            ))
        })
}

fn to_view(state: &AppState, checklist: &Checklist) -> ChecklistView {
    let items = checklist
        .discover_items()
        .into_iter()
        .map(|id| {
            let label = state
                .layout
                .items
                .iter()
                .find(|item| item.id == id)
                .map(|item| item.label.clone())
                .unwrap_or_default();
            let checked = checklist.read_checked(&id);
            ItemView { id, label, checked }
        })
        .collect();

    ChecklistView {
        date: checklist.clock().now().date().to_string(),
        day_key: checklist.today_key(),
        items,
        complete: checklist.compute_completion(),
    }
}
