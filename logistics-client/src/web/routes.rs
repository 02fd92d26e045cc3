//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::NaiveDate;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::api::{ApiError, RouteSearchRequest};
use crate::domain::{
    InvalidLocationCode, Location, LocationCode, LocationDraft, LocationId, Transportation,
    TransportationDraft, TransportationId,
};
use crate::query::{Locations, QueryChange, QueryError, Transportations, ViewSnapshot};
use crate::typeahead::FieldState;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/views/locations",
            get(location_view).post(change_location_view),
        )
        .route(
            "/api/views/transportations",
            get(transportation_view).post(change_transportation_view),
        )
        .route("/api/locations", post(create_location))
        .route(
            "/api/locations/:id",
            put(update_location).delete(delete_location),
        )
        .route("/api/transportations", post(create_transportation))
        .route(
            "/api/transportations/:id",
            put(update_transportation).delete(delete_transportation),
        )
        .route("/api/lookup/:field", get(lookup).delete(clear_lookup))
        .route("/api/lookup/:field/select", post(select_candidate))
        .route("/routes", get(search_routes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

// ============================================================================
// List views
// ============================================================================

async fn location_view(State(state): State<AppState>) -> Json<ViewSnapshot<Locations>> {
    Json(state.locations.snapshot().await)
}

/// Apply one change to the location view and return the resulting view.
///
/// A failed fetch is reported inside the snapshot, not as an HTTP error.
async fn change_location_view(
    State(state): State<AppState>,
    Json(change): Json<QueryChange<Locations>>,
) -> Result<Json<ViewSnapshot<Locations>>, AppError> {
    state.locations.apply(change).await?;
    Ok(Json(state.locations.snapshot().await))
}

async fn transportation_view(
    State(state): State<AppState>,
) -> Json<ViewSnapshot<Transportations>> {
    Json(state.transportations.snapshot().await)
}

async fn change_transportation_view(
    State(state): State<AppState>,
    Json(change): Json<QueryChange<Transportations>>,
) -> Result<Json<ViewSnapshot<Transportations>>, AppError> {
    state.transportations.apply(change).await?;
    Ok(Json(state.transportations.snapshot().await))
}

// ============================================================================
// Mutations
// ============================================================================

async fn create_location(
    State(state): State<AppState>,
    Json(draft): Json<LocationDraft>,
) -> Result<(StatusCode, Json<Location>), AppError> {
    let created = state.locations.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<LocationDraft>,
) -> Result<Json<Location>, AppError> {
    Ok(Json(state.locations.update(LocationId(id), &draft).await?))
}

async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.locations.delete(LocationId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_transportation(
    State(state): State<AppState>,
    Json(draft): Json<TransportationDraft>,
) -> Result<(StatusCode, Json<Transportation>), AppError> {
    let created = state.transportations.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_transportation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<TransportationDraft>,
) -> Result<Json<Transportation>, AppError> {
    let updated = state
        .transportations
        .update(TransportationId(id), &draft)
        .await?;
    Ok(Json(updated))
}

async fn delete_transportation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.transportations.delete(TransportationId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Typeahead
// ============================================================================

/// Look up candidates for the `origin` or `destination` field.
async fn lookup(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(req): Query<LookupQuery>,
) -> Result<Json<FieldState>, AppError> {
    let field = state.endpoints.field(&name).ok_or_else(|| unknown_field(&name))?;
    field.search(&req.q).await;
    Ok(Json(field.snapshot().await))
}

async fn select_candidate(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<FieldState>, AppError> {
    let field = state.endpoints.field(&name).ok_or_else(|| unknown_field(&name))?;
    field.select(req.id).await.ok_or_else(|| AppError::NotFound {
        message: format!("Location {} is not among the candidates", req.id),
    })?;
    Ok(Json(field.snapshot().await))
}

async fn clear_lookup(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FieldState>, AppError> {
    let field = state.endpoints.field(&name).ok_or_else(|| unknown_field(&name))?;
    field.clear().await;
    Ok(Json(field.snapshot().await))
}

fn unknown_field(name: &str) -> AppError {
    AppError::NotFound {
        message: format!("Unknown lookup field: {name}"),
    }
}

// ============================================================================
// Route search
// ============================================================================

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Search routes and show them, as HTML or JSON based on the Accept header.
///
/// Endpoints missing from the query fall back to the typeahead selections.
/// Without either, the current search state is shown unchanged.
async fn search_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RouteQuery>,
) -> Response {
    let html = accepts_html(&headers);
    let selected = state.endpoints.selected_codes().await;

    let request = match route_request(&query, selected) {
        Ok(request) => request,
        Err(e) if html => return e.into_html(),
        Err(e) => return e.into_response(),
    };

    if let Some(request) = request {
        state.routes.search(request).await;
    }
    let snapshot = state.routes.snapshot().await;

    if html {
        match RoutesTemplate::from_state(&snapshot).render() {
            Ok(page) => Html(page).into_response(),
            Err(e) => AppError::Internal {
                message: format!("Template error: {}", e),
            }
            .into_html(),
        }
    } else {
        Json(snapshot).into_response()
    }
}

/// Parse the route form. `None` means no search was requested.
///
/// Typed codes win over the `selected` typeahead codes; a blank date
/// means today.
fn route_request(
    query: &RouteQuery,
    selected: (Option<LocationCode>, Option<LocationCode>),
) -> Result<Option<RouteSearchRequest>, AppError> {
    let origin = typed_or_selected(query.origin.as_deref(), selected.0)?;
    let destination = typed_or_selected(query.destination.as_deref(), selected.1)?;

    let (origin, destination) = match (origin, destination) {
        (None, None) => return Ok(None),
        (Some(o), Some(d)) => (o, d),
        _ => {
            return Err(AppError::BadRequest {
                message: "Both origin and destination are required".to_string(),
            });
        }
    };

    let request = match non_blank(query.date.as_deref()) {
        Some(s) => {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                AppError::BadRequest {
                    message: format!("Invalid date: {s}"),
                }
            })?;
            RouteSearchRequest::new(origin, destination, date)
        }
        None => RouteSearchRequest::today(origin, destination),
    };
    Ok(Some(request))
}

fn typed_or_selected(
    typed: Option<&str>,
    selected: Option<LocationCode>,
) -> Result<Option<LocationCode>, InvalidLocationCode> {
    match non_blank(typed) {
        Some(s) => LocationCode::parse(s).map(Some),
        None => Ok(selected),
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Error handling
// ============================================================================

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The planner API answered with a failure, or not at all
    Upstream { status: StatusCode, message: String },
    Internal { message: String },
}

impl AppError {
    fn parts(&self) -> (StatusCode, &str) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.as_str()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.as_str()),
            AppError::Upstream { status, message } => (*status, message.as_str()),
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.as_str())
            }
        }
    }

    fn log(&self) {
        let (status, reason) = self.parts();
        if status.is_server_error() {
            error!(%status, reason, "request failed");
        } else {
            warn!(%status, reason, "request rejected");
        }
    }

    /// Render as an HTML error page.
    fn into_html(self) -> Response {
        self.log();
        let (status, message) = self.parts();
        let page = ErrorTemplate {
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.to_string(),
        };
        let body = page
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e));
        (status, Html(body)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        let message = e.user_message();
        match e {
            ApiError::Validation(_) => AppError::BadRequest { message },
            ApiError::Server { status, .. } => AppError::Upstream {
                status: StatusCode::from_u16(status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            },
            ApiError::Transport(_) | ApiError::Decode { .. } | ApiError::Contract(_) => {
                AppError::Upstream {
                    status: StatusCode::BAD_GATEWAY,
                    message,
                }
            }
            ApiError::NotConfigured(_) => AppError::Internal { message },
        }
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<InvalidLocationCode> for AppError {
    fn from(e: InvalidLocationCode) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let (status, message) = self.parts();
        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
