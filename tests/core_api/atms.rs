use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::json;

use super::common::fixtures::*;
use super::common::mock_app_state;
use super::{ids, json_body, repos};

#[actix_rt::test]
async fn atm_routes_are_served_under_both_prefixes() {
    let (branch_repo, atm_repo) = repos();
    atm_repo.push(atm(1, Some(7)));
    atm_repo.push(atm(2, None));
    let app = test_app!(mock_app_state(branch_repo, atm_repo));

    for uri in ["/atm", "/atms"] {
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let body = json_body(response).await;
        assert_eq!(ids(&body, "atmId"), vec![1, 2]);
        assert_eq!(body[0]["branchId"], 7);
        assert_eq!(body[1]["open24Hours"], true);
        assert_eq!(body[1]["minimumWithdrawal"], "10.00");
    }
}

#[actix_rt::test]
async fn atm_crud_round_trip() {
    let (branch_repo, atm_repo) = repos();
    let app = test_app!(mock_app_state(branch_repo, atm_repo));

    let request = actix_test::TestRequest::post()
        .uri("/atm")
        .set_json(json!({
            "atmId": 21,
            "branchId": 4,
            "open24Hours": false,
            "minimumWithdrawal": "20.00",
            "isExternal": false
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await, json!({"atmId": 21}));

    let request = actix_test::TestRequest::put()
        .uri("/atms/21")
        .set_json(json!({
            "branchId": null,
            "open24Hours": true,
            "minimumWithdrawal": 5,
            "isExternal": true
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["branchId"].is_null());
    assert_eq!(body["isExternal"], true);

    let request = actix_test::TestRequest::get().uri("/atm/21").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(json_body(response).await["open24Hours"], true);

    let request = actix_test::TestRequest::delete().uri("/atm/21").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["message"], "ATM deleted successfully");

    let request = actix_test::TestRequest::get().uri("/atm/21").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn atm_create_rejects_negative_withdrawal() {
    let (branch_repo, atm_repo) = repos();
    let app = test_app!(mock_app_state(branch_repo, atm_repo));

    let request = actix_test::TestRequest::post()
        .uri("/atm")
        .set_json(json!({
            "atmId": 3,
            "open24Hours": true,
            "minimumWithdrawal": "-1.00",
            "isExternal": true
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"][0]["field"], "minimumWithdrawal");
}

#[actix_rt::test]
async fn atm_create_rejects_sub_cent_withdrawal() {
    let (branch_repo, atm_repo) = repos();
    let app = test_app!(mock_app_state(branch_repo, atm_repo));

    let request = actix_test::TestRequest::post()
        .uri("/atm")
        .set_json(json!({
            "atmId": 4,
            "open24Hours": false,
            "minimumWithdrawal": "10.005",
            "isExternal": false
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"][0]["field"], "minimumWithdrawal");
    assert_eq!(body["details"][0]["code"], "scale");

    let request = actix_test::TestRequest::get().uri("/atm/4").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn atm_create_with_taken_id_conflicts() {
    let (branch_repo, atm_repo) = repos();
    atm_repo.push(atm(8, None));
    let app = test_app!(mock_app_state(branch_repo, atm_repo));

    let request = actix_test::TestRequest::post()
        .uri("/atm")
        .set_json(json!({
            "atmId": 8,
            "open24Hours": true,
            "minimumWithdrawal": "0",
            "isExternal": true
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn atm_update_and_delete_of_missing_atm_return_404() {
    let (branch_repo, atm_repo) = repos();
    let app = test_app!(mock_app_state(branch_repo, atm_repo));

    let request = actix_test::TestRequest::put()
        .uri("/atm/55")
        .set_json(json!({"open24Hours": true, "minimumWithdrawal": "0", "isExternal": true}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = actix_test::TestRequest::delete().uri("/atm/55").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = actix_test::TestRequest::get().uri("/atm/x1").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn atm_locations_list_has_no_distance() {
    let (branch_repo, atm_repo) = repos();
    atm_repo.push_location(atm_location(1, MANCHESTER));
    let app = test_app!(mock_app_state(branch_repo, atm_repo));

    let request = actix_test::TestRequest::get().uri("/atm/location").to_request();
    let response = actix_test::call_service(&app, request).await;

    let body = json_body(response).await;
    assert_eq!(ids(&body, "atmId"), vec![1]);
    assert!(body[0].get("distanceKm").is_none());
}
