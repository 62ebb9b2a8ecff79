//! Request handlers.

use crate::error::ApiError;
use crate::{API_VERSION, AppState};
use axum::Json;
use axum::extract::{Path, Query, State};
use kinetyk_core::model::Difficulty;
use kinetyk_query::engine::{DEFAULT_LIMIT, DEFAULT_PAGE};
use kinetyk_query::{ExerciseFilter, PageParams, PageResult};
use serde::Deserialize;
use serde_json::{Value, json};

fn default_page() -> usize {
    DEFAULT_PAGE
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// Split a comma-separated query parameter into trimmed, non-empty items.
fn comma_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn fields_list(raw: Option<&str>) -> Option<Vec<String>> {
    let fields = comma_list(raw);
    if fields.is_empty() { None } else { Some(fields) }
}

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Category equality filter.
    pub category: Option<String>,
    /// Difficulty equality filter.
    pub difficulty: Option<Difficulty>,
    /// Equipment membership filter.
    pub equipment: Option<String>,
    /// Muscle membership filter (primary ∪ secondary).
    pub muscle: Option<String>,
    /// Comma-separated tags; any-of semantics.
    pub tags: Option<String>,
    /// Comma-separated projection fields.
    pub fields: Option<String>,
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: usize,
    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl ListParams {
    fn filter(&self) -> ExerciseFilter {
        ExerciseFilter {
            category: self.category.clone(),
            difficulty: self.difficulty,
            equipment: self.equipment.clone(),
            muscle: self.muscle.clone(),
            tags: comma_list(self.tags.as_deref()),
        }
    }

    fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// GET /api/v1/exercises
pub async fn list_exercises(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageResult>, ApiError> {
    let fields = fields_list(params.fields.as_deref());
    let result = state
        .engine
        .list(&params.filter(), params.page_params(), fields.as_deref())?;
    Ok(Json(result))
}

/// Query parameters for the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Query text; optional when filters are supplied.
    pub q: Option<String>,
    /// Category equality filter.
    pub category: Option<String>,
    /// Difficulty equality filter.
    pub difficulty: Option<Difficulty>,
    /// Equipment membership filter.
    pub equipment: Option<String>,
    /// Muscle membership filter (primary ∪ secondary).
    pub muscle: Option<String>,
    /// Comma-separated tags; any-of semantics.
    pub tags: Option<String>,
    /// Comma-separated projection fields.
    pub fields: Option<String>,
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: usize,
    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// GET /api/v1/exercises/search
pub async fn search_exercises(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<PageResult>, ApiError> {
    let filter = ExerciseFilter {
        category: params.category.clone(),
        difficulty: params.difficulty,
        equipment: params.equipment.clone(),
        muscle: params.muscle.clone(),
        tags: comma_list(params.tags.as_deref()),
    };
    let fields = fields_list(params.fields.as_deref());
    let page = PageParams {
        page: params.page,
        limit: params.limit,
    };
    let result = state
        .engine
        .search(params.q.as_deref(), &filter, page, fields.as_deref())?;
    Ok(Json(result))
}

/// Query parameters for the batch endpoint.
#[derive(Debug, Deserialize)]
pub struct BatchParams {
    /// Comma-separated, ordered id list.
    pub ids: Option<String>,
}

/// GET /api/v1/exercises/batch?ids=a,b,c
pub async fn batch_exercises(
    State(state): State<AppState>,
    Query(params): Query<BatchParams>,
) -> Result<Json<Value>, ApiError> {
    let ids = comma_list(params.ids.as_deref());
    let exercises = state.engine.batch(&ids)?;
    Ok(Json(json!({ "exercises": exercises })))
}

/// Query parameters for the single-record endpoint.
#[derive(Debug, Deserialize)]
pub struct GetParams {
    /// Comma-separated projection fields.
    pub fields: Option<String>,
}

/// GET /api/v1/exercises/{id}
pub async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<GetParams>,
) -> Result<Json<Value>, ApiError> {
    let fields = fields_list(params.fields.as_deref());
    let value = state.engine.get_by_id(&id, fields.as_deref())?;
    Ok(Json(value))
}

/// GET /api/v1/facets/categories
pub async fn category_facets(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "categories": state.engine.category_facets() }))
}

/// GET /api/v1/facets/muscles
pub async fn muscle_facets(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "muscles": state.engine.muscle_facets() }))
}

/// GET /api/v1/facets/equipment
pub async fn equipment_facets(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "equipment": state.engine.equipment_facets() }))
}

/// GET /api/v1/version
pub async fn version(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "version": state.engine.data_version(),
        "apiVersion": API_VERSION,
    }))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// ============================================================================
// Tests
// ============================================================================
