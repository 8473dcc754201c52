use actix_web::{web, HttpResponse};

use crate::api::dtos::{
    AccessibilityQueryParams, AccessibilityResponse, AvailabilityFilterParams,
    AvailabilityResponse, BranchCreatedResponse, BranchLocationResponse, BranchResponse,
    CreateBranchRequest, ErrorResponse, MessageResponse, NearestQueryParams, UpdateBranchRequest,
};
use crate::api::routes::{parse_id, AppState};
use crate::error::AppResult;
use crate::observability::SearchKind;
use crate::utils::geo::{parse_radius_km, GeoPoint};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/branches")
            .route("", web::get().to(list_branches))
            .route("", web::post().to(create_branch))
            .route("/accessibility", web::get().to(filter_accessibility))
            .route("/accessibility/{branch_id}", web::get().to(get_accessibility))
            .route("/location", web::get().to(list_locations))
            .route("/location-town/{town}", web::get().to(locations_in_town))
            .route(
                "/location/nearestme/{lat}/{lon}",
                web::get().to(nearest_locations),
            )
            .route(
                "/location/{lat}/{lon}/{radius}",
                web::get().to(locations_within),
            )
            .route("/availability", web::get().to(list_availability))
            .route("/availability/filter", web::get().to(filter_availability))
            .route("/availability/{branch_id}", web::get().to(get_availability))
            .route("/{branch_id}", web::get().to(get_branch))
            .route("/{branch_id}", web::put().to(update_branch))
            .route("/{branch_id}", web::delete().to(delete_branch)),
    );
}

#[utoipa::path(
    get,
    path = "/branches",
    responses((status = 200, description = "All branches", body = [BranchResponse])),
    tag = "branches"
)]
async fn list_branches(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let result = state.branch_service.list().await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/branches/{branchId}",
    params(("branchId" = i32, Path, description = "Branch identifier")),
    responses(
        (status = 200, description = "Branch found", body = BranchResponse),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "No such branch", body = ErrorResponse),
    ),
    tag = "branches"
)]
async fn get_branch(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let branch_id = parse_id(&path, "branchId")?;
    let result = state.branch_service.get_by_id(branch_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/branches",
    request_body = CreateBranchRequest,
    responses(
        (status = 201, description = "Branch created", body = BranchCreatedResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 409, description = "Branch id already taken", body = ErrorResponse),
    ),
    tag = "branches"
)]
async fn create_branch(
    state: web::Data<AppState>,
    payload: web::Json<CreateBranchRequest>,
) -> AppResult<HttpResponse> {
    let result = state.branch_service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(result))
}

#[utoipa::path(
    put,
    path = "/branches/{branchId}",
    params(("branchId" = i32, Path, description = "Branch identifier")),
    request_body = UpdateBranchRequest,
    responses(
        (status = 200, description = "Branch updated", body = BranchResponse),
        (status = 400, description = "Invalid body or identifier", body = ErrorResponse),
        (status = 404, description = "No such branch", body = ErrorResponse),
    ),
    tag = "branches"
)]
async fn update_branch(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateBranchRequest>,
) -> AppResult<HttpResponse> {
    let branch_id = parse_id(&path, "branchId")?;
    let result = state
        .branch_service
        .update(branch_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    delete,
    path = "/branches/{branchId}",
    params(("branchId" = i32, Path, description = "Branch identifier")),
    responses(
        (status = 200, description = "Branch deleted", body = MessageResponse),
        (status = 404, description = "No such branch", body = ErrorResponse),
    ),
    tag = "branches"
)]
async fn delete_branch(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let branch_id = parse_id(&path, "branchId")?;
    state.branch_service.delete(branch_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Branch deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/branches/accessibility",
    params(AccessibilityQueryParams),
    responses(
        (status = 200, description = "Branches offering every requested feature", body = [AccessibilityResponse]),
        (status = 400, description = "Missing or unknown option", body = ErrorResponse),
    ),
    tag = "branches"
)]
async fn filter_accessibility(
    state: web::Data<AppState>,
    query: web::Query<AccessibilityQueryParams>,
) -> AppResult<HttpResponse> {
    let result = state
        .branch_service
        .filter_accessibility(query.options.as_deref())
        .await?;
    state
        .metrics
        .record_search(SearchKind::Accessibility, result.len());
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/branches/accessibility/{branchId}",
    params(("branchId" = i32, Path, description = "Branch identifier")),
    responses(
        (status = 200, description = "Accessibility features of one branch", body = AccessibilityResponse),
        (status = 404, description = "No accessibility record", body = ErrorResponse),
    ),
    tag = "branches"
)]
async fn get_accessibility(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let branch_id = parse_id(&path, "branchId")?;
    let result = state.branch_service.accessibility(branch_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/branches/location",
    responses((status = 200, description = "Every branch location", body = [BranchLocationResponse])),
    tag = "branches"
)]
async fn list_locations(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let result = state.branch_service.locations().await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/branches/location-town/{town}",
    params(("town" = String, Path, description = "Town name, matched case-insensitively")),
    responses((status = 200, description = "Branch locations in the town", body = [BranchLocationResponse])),
    tag = "branches"
)]
async fn locations_in_town(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let result = state.branch_service.locations_in_town(&path).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/branches/location/{lat}/{lon}/{radius}",
    params(
        ("lat" = f64, Path, description = "Latitude in degrees"),
        ("lon" = f64, Path, description = "Longitude in degrees"),
        ("radius" = f64, Path, description = "Search radius in kilometres"),
    ),
    responses(
        (status = 200, description = "Branches strictly inside the radius, nearest first", body = [BranchLocationResponse]),
        (status = 400, description = "Malformed coordinates or radius", body = ErrorResponse),
    ),
    tag = "branches"
)]
async fn locations_within(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> AppResult<HttpResponse> {
    let (lat, lon, radius) = path.into_inner();
    let origin = GeoPoint::parse(&lat, &lon)?;
    let radius_km = parse_radius_km(&radius)?;
    let result = state
        .branch_service
        .locations_within(origin, radius_km)
        .await?;
    state.metrics.record_search(SearchKind::Radius, result.len());
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/branches/location/nearestme/{lat}/{lon}",
    params(
        ("lat" = f64, Path, description = "Latitude in degrees"),
        ("lon" = f64, Path, description = "Longitude in degrees"),
        NearestQueryParams,
    ),
    responses(
        (status = 200, description = "Closest branches, nearest first", body = [BranchLocationResponse]),
        (status = 400, description = "Malformed coordinates", body = ErrorResponse),
    ),
    tag = "branches"
)]
async fn nearest_locations(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<NearestQueryParams>,
) -> AppResult<HttpResponse> {
    let (lat, lon) = path.into_inner();
    let origin = GeoPoint::parse(&lat, &lon)?;
    let result = state
        .branch_service
        .nearest_locations(origin, query.exclude)
        .await?;
    state.metrics.record_search(SearchKind::Nearest, result.len());
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/branches/availability",
    responses((status = 200, description = "Opening hours of every branch", body = [AvailabilityResponse])),
    tag = "branches"
)]
async fn list_availability(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let result = state.branch_service.availability().await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/branches/availability/{branchId}",
    params(("branchId" = i32, Path, description = "Branch identifier")),
    responses(
        (status = 200, description = "Opening hours of one branch", body = AvailabilityResponse),
        (status = 404, description = "No availability record", body = ErrorResponse),
    ),
    tag = "branches"
)]
async fn get_availability(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let branch_id = parse_id(&path, "branchId")?;
    let result = state.branch_service.availability_by_id(branch_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/branches/availability/filter",
    params(AvailabilityFilterParams),
    responses(
        (status = 200, description = "Branches open at the time on some day", body = [AvailabilityResponse]),
        (status = 400, description = "Missing or malformed time", body = ErrorResponse),
    ),
    tag = "branches"
)]
async fn filter_availability(
    state: web::Data<AppState>,
    query: web::Query<AvailabilityFilterParams>,
) -> AppResult<HttpResponse> {
    let result = state
        .branch_service
        .filter_availability(query.time.as_deref())
        .await?;
    state
        .metrics
        .record_search(SearchKind::Availability, result.len());
    Ok(HttpResponse::Ok().json(result))
}
