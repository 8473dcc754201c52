use actix_web::{web, HttpResponse, Scope};

use crate::api::dtos::{
    AtmCreatedResponse, AtmLocationResponse, AtmResponse, CreateAtmRequest, ErrorResponse,
    MessageResponse, NearestQueryParams, UpdateAtmRequest,
};
use crate::api::routes::{parse_id, AppState};
use crate::error::AppResult;
use crate::observability::SearchKind;
use crate::utils::geo::{parse_radius_km, GeoPoint};

/// Mounts the ATM routes under `/atm` and the plural alias `/atms`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(atm_scope("/atm")).service(atm_scope("/atms"));
}

fn atm_scope(prefix: &str) -> Scope {
    web::scope(prefix)
        .route("", web::get().to(list_atms))
        .route("", web::post().to(create_atm))
        .route("/location", web::get().to(list_locations))
        .route(
            "/location/nearestme/{lat}/{lon}",
            web::get().to(nearest_locations),
        )
        .route(
            "/location/{lat}/{lon}/{radius}",
            web::get().to(locations_within),
        )
        .route("/{atm_id}", web::get().to(get_atm))
        .route("/{atm_id}", web::put().to(update_atm))
        .route("/{atm_id}", web::delete().to(delete_atm))
}

#[utoipa::path(
    get,
    path = "/atm",
    responses((status = 200, description = "All ATMs", body = [AtmResponse])),
    tag = "atms"
)]
async fn list_atms(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let result = state.atm_service.list().await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/atm/{atmId}",
    params(("atmId" = i32, Path, description = "ATM identifier")),
    responses(
        (status = 200, description = "ATM found", body = AtmResponse),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "No such ATM", body = ErrorResponse),
    ),
    tag = "atms"
)]
async fn get_atm(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let atm_id = parse_id(&path, "atmId")?;
    let result = state.atm_service.get_by_id(atm_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/atm",
    request_body = CreateAtmRequest,
    responses(
        (status = 201, description = "ATM created", body = AtmCreatedResponse),
        (status = 400, description = "Invalid body or unknown branch", body = ErrorResponse),
        (status = 409, description = "ATM id already taken", body = ErrorResponse),
    ),
    tag = "atms"
)]
async fn create_atm(
    state: web::Data<AppState>,
    payload: web::Json<CreateAtmRequest>,
) -> AppResult<HttpResponse> {
    let result = state.atm_service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(result))
}

#[utoipa::path(
    put,
    path = "/atm/{atmId}",
    params(("atmId" = i32, Path, description = "ATM identifier")),
    request_body = UpdateAtmRequest,
    responses(
        (status = 200, description = "ATM updated", body = AtmResponse),
        (status = 400, description = "Invalid body or identifier", body = ErrorResponse),
        (status = 404, description = "No such ATM", body = ErrorResponse),
    ),
    tag = "atms"
)]
async fn update_atm(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateAtmRequest>,
) -> AppResult<HttpResponse> {
    let atm_id = parse_id(&path, "atmId")?;
    let result = state
        .atm_service
        .update(atm_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    delete,
    path = "/atm/{atmId}",
    params(("atmId" = i32, Path, description = "ATM identifier")),
    responses(
        (status = 200, description = "ATM deleted", body = MessageResponse),
        (status = 404, description = "No such ATM", body = ErrorResponse),
    ),
    tag = "atms"
)]
async fn delete_atm(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let atm_id = parse_id(&path, "atmId")?;
    state.atm_service.delete(atm_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("ATM deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/atm/location",
    responses((status = 200, description = "Every ATM location", body = [AtmLocationResponse])),
    tag = "atms"
)]
async fn list_locations(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let result = state.atm_service.locations().await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/atm/location/{lat}/{lon}/{radius}",
    params(
        ("lat" = f64, Path, description = "Latitude in degrees"),
        ("lon" = f64, Path, description = "Longitude in degrees"),
        ("radius" = f64, Path, description = "Search radius in kilometres"),
    ),
    responses(
        (status = 200, description = "ATMs strictly inside the radius, nearest first", body = [AtmLocationResponse]),
        (status = 400, description = "Malformed coordinates or radius", body = ErrorResponse),
    ),
    tag = "atms"
)]
async fn locations_within(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> AppResult<HttpResponse> {
    let (lat, lon, radius) = path.into_inner();
    let origin = GeoPoint::parse(&lat, &lon)?;
    let radius_km = parse_radius_km(&radius)?;
    let result = state.atm_service.locations_within(origin, radius_km).await?;
    state.metrics.record_search(SearchKind::Radius, result.len());
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/atm/location/nearestme/{lat}/{lon}",
    params(
        ("lat" = f64, Path, description = "Latitude in degrees"),
        ("lon" = f64, Path, description = "Longitude in degrees"),
        NearestQueryParams,
    ),
    responses(
        (status = 200, description = "Closest ATMs, nearest first", body = [AtmLocationResponse]),
        (status = 400, description = "Malformed coordinates", body = ErrorResponse),
    ),
    tag = "atms"
)]
async fn nearest_locations(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<NearestQueryParams>,
) -> AppResult<HttpResponse> {
    let (lat, lon) = path.into_inner();
    let origin = GeoPoint::parse(&lat, &lon)?;
    let result = state
        .atm_service
        .nearest_locations(origin, query.exclude)
        .await?;
    state.metrics.record_search(SearchKind::Nearest, result.len());
    Ok(HttpResponse::Ok().json(result))
}
