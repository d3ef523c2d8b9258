use crate::charts::ChartKind;
use crate::errors::AppError;
use crate::models::{CatchForm, CatchId, ChartResponse, PageResponse};
use crate::state::AppState;
use crate::store::CatchStore;
use crate::ui::{render_charts, render_edit, render_index};
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Local;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    #[serde(default)]
    pub kind: Option<String>,
}

pub async fn index(State(state): State<AppState>, Query(query): Query<TableQuery>) -> Html<String> {
    // Failures are queued as a notice and rendered below.
    let _ = state.refresh(true).await;

    let mut store = state.store.lock().await;
    apply_query(&mut store, &query);
    let notice = store.take_notice();
    Html(render_index(&store.page_response(), notice.as_deref()))
}

pub async fn list_catches(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> Result<Json<PageResponse>, AppError> {
    ensure_loaded(&state).await?;

    let mut store = state.store.lock().await;
    apply_query(&mut store, &query);
    Ok(Json(store.page_response()))
}

pub async fn get_chart(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<ChartResponse>, AppError> {
    let kind: ChartKind = kind
        .parse()
        .map_err(|err: crate::charts::UnknownChart| AppError::not_found(err.to_string()))?;
    ensure_loaded(&state).await?;

    let store = state.store.lock().await;
    Ok(Json(store.series(kind).into_response(kind)))
}

pub async fn charts(Query(query): Query<ChartQuery>) -> Result<Html<String>, AppError> {
    let kind = match query.kind.as_deref() {
        Some(raw) => raw
            .parse()
            .map_err(|err: crate::charts::UnknownChart| AppError::bad_request(err.to_string()))?,
        None => ChartKind::Species,
    };
    Ok(Html(render_charts(kind)))
}

pub async fn create_catch(State(state): State<AppState>, Form(form): Form<CatchForm>) -> Redirect {
    match form.into_draft(Some(Local::now().naive_local())) {
        // A rejected create has already queued its notice.
        Ok(draft) => {
            let _ = state.create(&draft).await;
        }
        Err(err) => state.store.lock().await.notify(err.to_string()),
    }
    Redirect::to("/")
}

pub async fn edit_catch(
    State(state): State<AppState>,
    Path(id): Path<CatchId>,
) -> Result<Html<String>, AppError> {
    // The record may have been created since the last listing.
    let cached = state.store.lock().await.find(id).is_some();
    if !cached {
        let _ = state.refresh(true).await;
    }

    let store = state.store.lock().await;
    let record = store
        .find(id)
        .ok_or_else(|| AppError::not_found(format!("catch {id} not found")))?;
    Ok(Html(render_edit(id, &CatchForm::from(record), None)))
}

/// Invalid input or a backend failure re-renders the form with the error so
/// the user's edits are not lost.
pub async fn update_catch(
    State(state): State<AppState>,
    Path(id): Path<CatchId>,
    Form(form): Form<CatchForm>,
) -> Response {
    let result = match form.clone().into_draft(None) {
        Ok(draft) => state.update(id, &draft).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => {
            // The edit page shows this error inline instead.
            let _ = state.store.lock().await.take_notice();
            Html(render_edit(id, &form, Some(&err.to_string()))).into_response()
        }
    }
}

pub async fn delete_catch(State(state): State<AppState>, Path(id): Path<CatchId>) -> Redirect {
    // A rejected delete has already queued its notice.
    let _ = state.delete(id).await;
    Redirect::to("/")
}

/// A missing `q` keeps the active search; an empty one clears it.
fn apply_query(store: &mut CatchStore, query: &TableQuery) {
    if let Some(keyword) = query.q.as_deref() {
        store.set_filter(keyword);
    }
    if let Some(page) = query.page {
        store.go_to_page(page);
    }
}

/// Refreshes, but only fails when there is no earlier listing to fall back on.
async fn ensure_loaded(state: &AppState) -> Result<(), AppError> {
    if let Err(err) = state.refresh(true).await {
        let mut store = state.store.lock().await;
        store.take_notice();
        if !store.is_loaded() {
            return Err(err.into());
        }
    }
    Ok(())
}
