use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use bank_locator::config::SearchConfig;

use super::common::fixtures::*;
use super::common::{app_state_with, mock_app_state, unreachable_pool};
use super::common::mocks::MockBranchRepo;
use super::{ids, json_body, repos};

fn london_branches() -> Arc<MockBranchRepo> {
    let repo = Arc::new(MockBranchRepo::default());
    repo.push_location(location(1, CHARING_CROSS, "London"));
    repo.push_location(location(2, KINGS_CROSS, "London"));
    repo.push_location(location(3, WATERLOO, "London"));
    repo.push_location(location(4, CANARY_WHARF, "London"));
    repo.push_location(location(5, MANCHESTER, "Manchester"));
    repo
}

#[actix_rt::test]
async fn radius_search_returns_rows_inside_radius_nearest_first() {
    let (_, atm_repo) = repos();
    let app = test_app!(mock_app_state(london_branches(), atm_repo));

    let request = actix_test::TestRequest::get()
        .uri("/branches/location/51.5074/-0.1278/3")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    // Charing Cross itself (0 km), Waterloo (~1.1 km), King's Cross (~2.6 km)
    assert_eq!(ids(&body, "branchId"), vec![1, 3, 2]);
    assert!(body[0]["distanceKm"].as_f64().unwrap_or(f64::MAX) < 0.001);
    let waterloo = body[1]["distanceKm"].as_f64().unwrap_or_default();
    assert!((1.0..1.3).contains(&waterloo), "{waterloo}");
}

#[actix_rt::test]
async fn radius_search_excludes_rows_on_the_boundary() {
    let (_, atm_repo) = repos();
    let app = test_app!(mock_app_state(london_branches(), atm_repo));

    let request = actix_test::TestRequest::get()
        .uri("/branches/location/51.5074/-0.1278/2.6")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(ids(&json_body(response).await, "branchId"), vec![1, 3]);

    let request = actix_test::TestRequest::get()
        .uri("/branches/location/51.5074/-0.1278/0")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert!(ids(&json_body(response).await, "branchId").is_empty());
}

#[actix_rt::test]
async fn coordinate_errors_name_the_offending_field() {
    let (_, atm_repo) = repos();
    let app = test_app!(mock_app_state(london_branches(), atm_repo));

    for (uri, field) in [
        ("/branches/location/91/0/5", "latitude"),
        ("/branches/location/51.5/-0.12/-1", "radius"),
        ("/atm/location/nearestme/0/abc", "longitude"),
    ] {
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json_body(response).await["details"][0]["field"], field, "{uri}");
    }
}

#[actix_rt::test]
async fn radius_search_rejects_bad_parameters() {
    let (_, atm_repo) = repos();
    let app = test_app!(mock_app_state(london_branches(), atm_repo));

    for uri in [
        "/branches/location/91/0/5",
        "/branches/location/0/181/5",
        "/branches/location/abc/0/5",
        "/branches/location/51.5/-0.12/-1",
        "/branches/location/51.5/-0.12/NaN",
        "/branches/location/51.5/-0.12/inf",
    ] {
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json_body(response).await["code"], "VALIDATION_ERROR", "{uri}");
    }
}

#[actix_rt::test]
async fn nearest_skips_self_match_and_applies_prefilter() {
    let (_, atm_repo) = repos();
    let app = test_app!(mock_app_state(london_branches(), atm_repo));

    let request = actix_test::TestRequest::get()
        .uri("/branches/location/nearestme/51.5074/-0.1278")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    // Canary Wharf (~7.2 km) and Manchester fall outside the 5 km pre-filter.
    assert_eq!(ids(&body, "branchId"), vec![3, 2]);
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .all(|row| row["distanceKm"].as_f64().unwrap_or_default() > 0.0));
}

#[actix_rt::test]
async fn nearest_honours_exclude_parameter() {
    let (_, atm_repo) = repos();
    let app = test_app!(mock_app_state(london_branches(), atm_repo));

    // A point near, but not at, Waterloo; Waterloo is the caller's own branch.
    let request = actix_test::TestRequest::get()
        .uri("/branches/location/nearestme/51.5032/-0.1133?exclude=3")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(ids(&json_body(response).await, "branchId"), vec![1, 2]);
}

#[actix_rt::test]
async fn nearest_rejects_non_numeric_exclude() {
    let (_, atm_repo) = repos();
    let app = test_app!(mock_app_state(london_branches(), atm_repo));

    let request = actix_test::TestRequest::get()
        .uri("/branches/location/nearestme/51.5074/-0.1278?exclude=me")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "BAD_REQUEST");
}

#[actix_rt::test]
async fn nearest_without_prefilter_returns_true_k_nearest() {
    let (_, atm_repo) = repos();
    let search = SearchConfig {
        nearest_prefilter_enabled: false,
        nearest_limit: 3,
        ..SearchConfig::default()
    };
    let app = test_app!(app_state_with(
        london_branches(),
        atm_repo,
        search,
        unreachable_pool()
    ));

    let request = actix_test::TestRequest::get()
        .uri("/branches/location/nearestme/51.5074/-0.1278")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(ids(&json_body(response).await, "branchId"), vec![3, 2, 4]);
}

#[actix_rt::test]
async fn nearest_returns_at_most_five() {
    let branch_repo = Arc::new(MockBranchRepo::default());
    for branch_id in 1..=9 {
        let offset = f64::from(branch_id) * 0.002;
        branch_repo.push_location(location(
            branch_id,
            (CHARING_CROSS.0 + offset, CHARING_CROSS.1),
            "London",
        ));
    }
    let (_, atm_repo) = repos();
    let app = test_app!(mock_app_state(branch_repo, atm_repo));

    let request = actix_test::TestRequest::get()
        .uri("/branches/location/nearestme/51.5074/-0.1278")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(
        ids(&json_body(response).await, "branchId"),
        vec![1, 2, 3, 4, 5]
    );
}

#[actix_rt::test]
async fn nearest_rejects_out_of_range_coordinates() {
    let (_, atm_repo) = repos();
    let app = test_app!(mock_app_state(london_branches(), atm_repo));

    let request = actix_test::TestRequest::get()
        .uri("/branches/location/nearestme/-90.5/0")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn atm_searches_mirror_branch_searches() {
    let (branch_repo, atm_repo) = repos();
    atm_repo.push_location(atm_location(10, CHARING_CROSS));
    atm_repo.push_location(atm_location(11, WATERLOO));
    atm_repo.push_location(atm_location(12, CANARY_WHARF));
    let app = test_app!(mock_app_state(branch_repo, atm_repo));

    let request = actix_test::TestRequest::get()
        .uri("/atm/location/51.5074/-0.1278/10")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(ids(&json_body(response).await, "atmId"), vec![10, 11, 12]);

    let request = actix_test::TestRequest::get()
        .uri("/atms/location/nearestme/51.5074/-0.1278")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let body = json_body(response).await;
    assert_eq!(ids(&body, "atmId"), vec![11]);
    assert!(body[0]["distanceKm"].as_f64().is_some());
}

#[actix_rt::test]
async fn completed_searches_show_up_in_metrics() {
    let (_, atm_repo) = repos();
    let app = test_app!(mock_app_state(london_branches(), atm_repo));

    let request = actix_test::TestRequest::get()
        .uri("/branches/location/nearestme/51.5074/-0.1278")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let request = actix_test::TestRequest::get()
        .uri("/metrics")
        .peer_addr("10.0.0.7:50000".parse().unwrap())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let body = actix_test::read_body(response).await;
    let text = std::str::from_utf8(&body).unwrap();

    // Waterloo and King's Cross fall inside the 5 km pre-filter.
    assert!(text.contains("location_searches_total{kind=\"nearest\"} 1"));
    assert!(text.contains("location_search_results_total{kind=\"nearest\"} 2"));
}
