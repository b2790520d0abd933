//! HTTP handlers for the Starport server.

use actix_web::error::BlockingError;
use actix_web::{HttpResponse, Responder, delete, get, post, web};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use starport_core::{
    Ship, ShipDraft, ShipFilter, ShipPatch, ShipService, ShipType, SortKey, StarportError,
    parse_id,
};

use crate::db::DbPool;
use crate::openapi::ApiDoc;
use crate::store::PgShipStore;

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Query parameters for ship listings and counts.
///
/// Field names match the wire protocol exactly; every parameter is
/// optional and absent parameters impose no constraint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipListQuery {
    /// Substring match on the name.
    pub name: Option<String>,
    /// Substring match on the planet.
    pub planet: Option<String>,
    /// Exact category match.
    pub ship_type: Option<ShipType>,
    /// Production date strictly after this epoch-millisecond instant.
    pub after: Option<i64>,
    /// Production date strictly before this epoch-millisecond instant.
    pub before: Option<i64>,
    /// Exact used-flag match.
    pub is_used: Option<bool>,
    /// Inclusive lower speed bound.
    pub min_speed: Option<f64>,
    /// Inclusive upper speed bound.
    pub max_speed: Option<f64>,
    /// Inclusive lower crew size bound.
    pub min_crew_size: Option<i32>,
    /// Inclusive upper crew size bound.
    pub max_crew_size: Option<i32>,
    /// Inclusive lower rating bound.
    pub min_rating: Option<f64>,
    /// Inclusive upper rating bound.
    pub max_rating: Option<f64>,
    /// Sort key: one of `id`, `speed`, `prodDate`, `rating`.
    pub order: Option<String>,
    /// Zero-based page number, default 0.
    pub page_number: Option<u32>,
    /// Page size, default 3.
    pub page_size: Option<u32>,
}

impl ShipListQuery {
    /// Resolve the sort key, rejecting unrecognized literals.
    fn sort_key(&self) -> starport_core::Result<SortKey> {
        match self.order.as_deref() {
            Some(raw) => SortKey::parse(raw),
            None => Ok(SortKey::default()),
        }
    }

    /// Build the core filter from the wire parameters.
    fn to_filter(&self) -> starport_core::Result<ShipFilter> {
        Ok(ShipFilter {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            after: millis_bound(self.after, "after")?,
            before: millis_bound(self.before, "before")?,
            is_used: self.is_used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        })
    }
}

fn millis_bound(
    value: Option<i64>,
    field: &str,
) -> starport_core::Result<Option<DateTime<Utc>>> {
    match value {
        None => Ok(None),
        Some(millis) => Utc
            .timestamp_millis_opt(millis)
            .single()
            .map(Some)
            .ok_or_else(|| {
                StarportError::InvalidRequest(format!("{field} is out of range: {millis}"))
            }),
    }
}

/// Map a core error to its HTTP response.
fn error_response(err: StarportError) -> HttpResponse {
    let message = err.to_string();
    match err {
        StarportError::InvalidRequest(_) => {
            HttpResponse::BadRequest().json(ErrorResponse { message })
        }
        StarportError::NotFound => HttpResponse::NotFound().json(ErrorResponse { message }),
        StarportError::Store(_) => {
            HttpResponse::InternalServerError().json(ErrorResponse { message })
        }
    }
}

/// Map the outcome of a blocking service call to an HTTP response.
fn respond<T: Serialize>(
    result: std::result::Result<starport_core::Result<T>, BlockingError>,
) -> HttpResponse {
    match result {
        Ok(Ok(value)) => HttpResponse::Ok().json(value),
        Ok(Err(err)) => error_response(err),
        Err(err) => HttpResponse::InternalServerError().json(ErrorResponse {
            message: format!("blocking task failed: {err}"),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/rest/ships",
    params(ShipListQuery),
    responses(
        (status = 200, description = "Matching ships, sorted and paginated", body = [Ship]),
        (status = 400, description = "Malformed filter, sort, or paging parameter", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships")]
/// List ships with filtering, sorting, and pagination.
pub async fn list_ships(
    state: web::Data<AppState>,
    query: web::Query<ShipListQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let sort = match query.sort_key() {
        Ok(sort) => sort,
        Err(err) => return error_response(err),
    };
    let filter = match query.to_filter() {
        Ok(filter) => filter,
        Err(err) => return error_response(err),
    };
    let (page_number, page_size) = (query.page_number, query.page_size);
    let pool = state.pool.clone();
    let result = web::block(move || {
        ShipService::new(PgShipStore::new(pool)).list(&filter, sort, page_number, page_size)
    })
    .await;
    respond(result)
}

#[utoipa::path(
    get,
    path = "/rest/ships/count",
    params(ShipListQuery),
    responses(
        (status = 200, description = "Count of matching ships", body = usize),
        (status = 400, description = "Malformed filter parameter", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/count")]
/// Count ships matching a filter, ignoring pagination.
pub async fn count_ships(
    state: web::Data<AppState>,
    query: web::Query<ShipListQuery>,
) -> impl Responder {
    let filter = match query.to_filter() {
        Ok(filter) => filter,
        Err(err) => return error_response(err),
    };
    let pool = state.pool.clone();
    let result =
        web::block(move || ShipService::new(PgShipStore::new(pool)).count(&filter)).await;
    respond(result)
}

#[utoipa::path(
    post,
    path = "/rest/ships",
    request_body = ShipDraft,
    responses(
        (status = 200, description = "Created ship with assigned id and computed rating", body = Ship),
        (status = 400, description = "Missing or out-of-range field", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships")]
/// Create a ship from a full draft.
pub async fn create_ship(
    state: web::Data<AppState>,
    payload: web::Json<ShipDraft>,
) -> impl Responder {
    let draft = payload.into_inner();
    let pool = state.pool.clone();
    let result =
        web::block(move || ShipService::new(PgShipStore::new(pool)).create(&draft)).await;
    respond(result)
}

#[utoipa::path(
    get,
    path = "/rest/ships/{id}",
    params(
        ("id" = String, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "The ship", body = Ship),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "No such ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/{id}")]
/// Fetch a ship by identifier.
pub async fn get_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_id(&path.into_inner()) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };
    let pool = state.pool.clone();
    let result = web::block(move || ShipService::new(PgShipStore::new(pool)).get(id)).await;
    respond(result)
}

#[utoipa::path(
    post,
    path = "/rest/ships/{id}",
    params(
        ("id" = String, Path, description = "Ship identifier")
    ),
    request_body = ShipPatch,
    responses(
        (status = 200, description = "Updated ship with recomputed rating", body = Ship),
        (status = 400, description = "Malformed identifier or field", body = ErrorResponse),
        (status = 404, description = "No such ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships/{id}")]
/// Apply a partial update to a ship.
pub async fn update_ship(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ShipPatch>,
) -> impl Responder {
    let id = match parse_id(&path.into_inner()) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };
    let patch = payload.into_inner();
    let pool = state.pool.clone();
    let result =
        web::block(move || ShipService::new(PgShipStore::new(pool)).update(id, &patch)).await;
    respond(result)
}

#[utoipa::path(
    delete,
    path = "/rest/ships/{id}",
    params(
        ("id" = String, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship removed"),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "No such ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[delete("/rest/ships/{id}")]
/// Delete a ship by identifier.
pub async fn delete_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_id(&path.into_inner()) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };
    let pool = state.pool.clone();
    let result = web::block(move || ShipService::new(PgShipStore::new(pool)).delete(id)).await;
    match result {
        Ok(Ok(())) => HttpResponse::Ok().finish(),
        Ok(Err(err)) => error_response(err),
        Err(err) => HttpResponse::InternalServerError().json(ErrorResponse {
            message: format!("blocking task failed: {err}"),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/rest/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/rest/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
