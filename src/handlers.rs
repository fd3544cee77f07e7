use crate::dates::{self, format_date, parse_date};
use crate::errors::AppError;
use crate::models::{
    Log, LogQuery, NewLog, NewSkill, ReportResponse, Skill, UpdateLogRequest,
};
use crate::report::{generate_weekly_report_at, statuses};
use crate::state::AppState;
use crate::store::ExecutionStore;
use crate::tracker;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use tokio::task;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = dates::today();
    let store = state.store.lock().await;
    let report = generate_weekly_report_at(&*store, today);
    Html(render_index(&report, today))
}

pub async fn get_report(State(state): State<AppState>) -> Json<ReportResponse> {
    let today = dates::today();
    let store = state.store.lock().await;
    let report = generate_weekly_report_at(&*store, today);
    let statuses = statuses(&report, today);
    Json(ReportResponse { report, statuses })
}

pub async fn list_skills(State(state): State<AppState>) -> Json<Vec<Skill>> {
    let store = state.store.lock().await;
    Json(store.skills())
}

pub async fn create_skill(
    State(state): State<AppState>,
    Json(payload): Json<NewSkill>,
) -> Result<(StatusCode, Json<Skill>), AppError> {
    let skill = mutate(&state, |store| tracker::create_skill(store, payload)).await?;
    Ok((StatusCode::CREATED, Json(skill)))
}

pub async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NewSkill>,
) -> Result<Json<Skill>, AppError> {
    let skill = mutate(&state, |store| tracker::update_skill(store, &id, payload)).await?;
    Ok(Json(skill))
}

pub async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    mutate(&state, |store| tracker::delete_skill(store, &id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn quick_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Log>, AppError> {
    let log = mutate(&state, |store| tracker::quick_log(store, &id, dates::today())).await?;
    Ok(Json(log))
}

pub async fn quick_log_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    mutate(&state, |store| tracker::quick_log(store, &id, dates::today())).await?;
    Ok(Redirect::to("/"))
}

pub async fn list_logs(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<Log>>, AppError> {
    let store = state.store.lock().await;
    let mut logs = match (query.start.as_deref(), query.end.as_deref()) {
        (Some(start), Some(end)) => {
            let start = date_param(start)?;
            let end = date_param(end)?;
            store.logs_in_date_range(&start, &end)
        }
        (None, None) => store.logs(),
        _ => return Err(AppError::bad_request("start and end must be given together")),
    };

    if let Some(skill_id) = query.skill_id {
        logs.retain(|log| log.skill_id == skill_id);
    }

    Ok(Json(logs))
}

pub async fn add_log(
    State(state): State<AppState>,
    Json(payload): Json<NewLog>,
) -> Result<(StatusCode, Json<Log>), AppError> {
    let log = mutate(&state, |store| tracker::add_log(store, payload)).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn update_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateLogRequest>,
) -> Result<Json<Log>, AppError> {
    let log = mutate(&state, |store| tracker::update_log(store, &id, payload.count)).await?;
    Ok(Json(log))
}

pub async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    mutate(&state, |store| tracker::delete_log(store, &id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Runs a read-modify-write under the store lock. Saves hit the disk, so the
/// work is moved off the async worker with `block_in_place`.
async fn mutate<T>(
    state: &AppState,
    op: impl FnOnce(&mut dyn ExecutionStore) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut store = state.store.lock().await;
    task::block_in_place(|| op(&mut *store))
}

fn date_param(value: &str) -> Result<String, AppError> {
    parse_date(value)
        .map(format_date)
        .ok_or_else(|| AppError::bad_request("dates must be YYYY-MM-DD"))
}
