//! OpenAPI specification for the Starport server.

use utoipa::OpenApi;

use starport_core::{Ship, ShipDraft, ShipPatch, ShipType};

use crate::routes::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::list_ships,
        crate::routes::count_ships,
        crate::routes::create_ship,
        crate::routes::get_ship,
        crate::routes::update_ship,
        crate::routes::delete_ship,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            Ship,
            ShipDraft,
            ShipPatch,
            ShipType,
            ErrorResponse
        )
    ),
    tags(
        (name = "ships", description = "Ship inventory"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Starport server.
pub struct ApiDoc;
