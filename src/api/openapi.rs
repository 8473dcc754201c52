use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dtos::{
    AccessibilityResponse, AtmCreatedResponse, AtmLocationResponse, AtmResponse,
    AvailabilityResponse, BranchCreatedResponse, BranchLocationResponse, BranchResponse,
    CreateAtmRequest, CreateBranchRequest, ErrorResponse, MessageResponse, PoolStatusResponse,
    ReadinessResponse, UpdateAtmRequest, UpdateBranchRequest, ValidationIssueResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Branch endpoints
        crate::api::routes::branches::list_branches,
        crate::api::routes::branches::get_branch,
        crate::api::routes::branches::create_branch,
        crate::api::routes::branches::update_branch,
        crate::api::routes::branches::delete_branch,
        crate::api::routes::branches::filter_accessibility,
        crate::api::routes::branches::get_accessibility,
        crate::api::routes::branches::list_locations,
        crate::api::routes::branches::locations_in_town,
        crate::api::routes::branches::locations_within,
        crate::api::routes::branches::nearest_locations,
        crate::api::routes::branches::list_availability,
        crate::api::routes::branches::get_availability,
        crate::api::routes::branches::filter_availability,
        // ATM endpoints
        crate::api::routes::atms::list_atms,
        crate::api::routes::atms::get_atm,
        crate::api::routes::atms::create_atm,
        crate::api::routes::atms::update_atm,
        crate::api::routes::atms::delete_atm,
        crate::api::routes::atms::list_locations,
        crate::api::routes::atms::locations_within,
        crate::api::routes::atms::nearest_locations,
        // Operational endpoints
        crate::api::routes::system::health,
        crate::api::routes::system::ready,
        crate::api::routes::system::metrics,
    ),
    components(
        schemas(
            BranchResponse,
            CreateBranchRequest,
            UpdateBranchRequest,
            BranchCreatedResponse,
            BranchLocationResponse,
            AccessibilityResponse,
            AvailabilityResponse,
            AtmResponse,
            CreateAtmRequest,
            UpdateAtmRequest,
            AtmCreatedResponse,
            AtmLocationResponse,
            MessageResponse,
            ErrorResponse,
            ValidationIssueResponse,
            ReadinessResponse,
            PoolStatusResponse,
        )
    ),
    tags(
        (name = "branches", description = "Branch records, accessibility, opening hours and location search"),
        (name = "atms", description = "ATM records and location search"),
        (name = "system", description = "Liveness, readiness and metrics"),
    ),
    info(
        title = "Bank Locator API",
        version = "0.1.0",
        description = "Bank branch and ATM directory with radius and nearest-neighbour search",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub fn configure_swagger_ui(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
