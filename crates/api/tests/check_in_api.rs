use actix_web::dev::ServiceResponse;
use actix_web::{http::StatusCode, test, web, App};
use checkin_scheduler_api::configure_server_api;
use checkin_scheduler_api_structs::{list_check_ins, reclassify_missed, CheckInResponse};
use checkin_scheduler_domain::ID;
use checkin_scheduler_infra::{CheckInContext, Config};
use serde_json::json;

fn setup_ctx() -> CheckInContext {
    CheckInContext::create(Config::default())
}

async fn perform(ctx: CheckInContext, req: test::TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ctx))
            .service(web::scope("/api/v1").configure(configure_server_api)),
    )
    .await;
    test::call_service(&app, req.to_request()).await
}

fn create_req(user_id: &ID, check_in_time: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/check-ins")
        .set_json(json!({
            "userId": user_id,
            "checkInTime": check_in_time,
            "frequency": "daily",
            "notify": true,
            "reminderTimes": [3600]
        }))
}

#[actix_web::test]
async fn test_status_ok() {
    let resp = perform(setup_ctx(), test::TestRequest::with_uri("/api/v1/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn creates_and_fetches_a_check_in() {
    let ctx = setup_ctx();
    let user_id = ID::new();

    let resp = perform(ctx.clone(), create_req(&user_id, "2030-06-10T09:00:00+02:00")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: CheckInResponse = test::read_body_json(resp).await;
    assert_eq!(created.check_in.user_id, user_id);
    assert_eq!(created.check_in.reminder_times, vec![3600]);
    assert_eq!(created.check_in.last_conversation, "");

    let uri = format!("/api/v1/check-ins/{}", created.check_in.id);
    let resp = perform(ctx, test::TestRequest::with_uri(&uri)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: CheckInResponse = test::read_body_json(resp).await;
    assert_eq!(fetched.check_in.id, created.check_in.id);
    // The stored time keeps its offset
    assert_eq!(
        fetched.check_in.check_in_time.to_rfc3339(),
        "2030-06-10T09:00:00+02:00"
    );
}

#[actix_web::test]
async fn rejects_invalid_frequency_with_400() {
    let user_id = ID::new();
    let req = test::TestRequest::post()
        .uri("/api/v1/check-ins")
        .set_json(json!({
            "userId": user_id,
            "checkInTime": "2030-06-10T09:00:00Z",
            "frequency": "Daily"
        }));
    let resp = perform(setup_ctx(), req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn rejects_invalid_reminder_time_with_400() {
    let user_id = ID::new();
    let req = test::TestRequest::post()
        .uri("/api/v1/check-ins")
        .set_json(json!({
            "userId": user_id,
            "checkInTime": "2030-06-10T09:00:00Z",
            "frequency": "daily",
            "reminderTimes": [1800]
        }));
    let resp = perform(setup_ctx(), req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn conflicting_check_in_gets_409() {
    let ctx = setup_ctx();
    let user_id = ID::new();

    let resp = perform(ctx.clone(), create_req(&user_id, "2030-06-10T09:00:00Z")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = perform(ctx, create_req(&user_id, "2030-06-10T09:59:59Z")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn sixth_check_in_of_the_day_gets_403() {
    let ctx = setup_ctx();
    let user_id = ID::new();

    for check_in_time in [
        "2030-06-10T01:00:00Z",
        "2030-06-10T03:00:00Z",
        "2030-06-10T05:00:00Z",
        "2030-06-10T07:00:00Z",
        "2030-06-10T09:00:00Z",
    ]
    .iter()
    {
        let resp = perform(ctx.clone(), create_req(&user_id, check_in_time)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = perform(ctx, create_req(&user_id, "2030-06-10T11:00:00Z")).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn malformed_check_in_id_gets_400() {
    let resp = perform(
        setup_ctx(),
        test::TestRequest::with_uri("/api/v1/check-ins/not-a-valid-id"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_check_in_id_gets_404() {
    let uri = format!("/api/v1/check-ins/{}", ID::new());
    let resp = perform(setup_ctx(), test::TestRequest::with_uri(&uri)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn updates_a_check_in() {
    let ctx = setup_ctx();
    let user_id = ID::new();

    let resp = perform(ctx.clone(), create_req(&user_id, "2030-06-10T09:00:00Z")).await;
    let created: CheckInResponse = test::read_body_json(resp).await;

    let uri = format!("/api/v1/check-ins/{}", created.check_in.id);
    let req = test::TestRequest::put().uri(&uri).set_json(json!({
        "lastConversation": "talked about the garden",
        "status": "completed"
    }));
    let resp = perform(ctx.clone(), req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: CheckInResponse = test::read_body_json(resp).await;
    assert_eq!(updated.check_in.last_conversation, "talked about the garden");

    // Completed is terminal
    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "status": "upcoming" }));
    let resp = perform(ctx, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn deletes_a_check_in() {
    let ctx = setup_ctx();
    let user_id = ID::new();

    let resp = perform(ctx.clone(), create_req(&user_id, "2030-06-10T09:00:00Z")).await;
    let created: CheckInResponse = test::read_body_json(resp).await;

    let uri = format!("/api/v1/check-ins/{}", created.check_in.id);
    let resp = perform(ctx.clone(), test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = perform(ctx.clone(), test::TestRequest::with_uri(&uri)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = perform(ctx, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn lists_a_users_check_ins() {
    let ctx = setup_ctx();
    let user_id = ID::new();

    perform(ctx.clone(), create_req(&user_id, "2030-06-10T09:00:00Z")).await;
    perform(ctx.clone(), create_req(&user_id, "2030-06-11T09:00:00Z")).await;
    perform(ctx.clone(), create_req(&ID::new(), "2030-06-10T09:00:00Z")).await;

    let uri = format!("/api/v1/user/{}/check-ins", user_id);
    let resp = perform(ctx.clone(), test::TestRequest::with_uri(&uri)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: list_check_ins::APIResponse = test::read_body_json(resp).await;
    assert_eq!(body.check_ins.len(), 2);

    // Unknown users get an empty list, not a 404
    let uri = format!("/api/v1/user/{}/check-ins", ID::new());
    let resp = perform(ctx, test::TestRequest::with_uri(&uri)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: list_check_ins::APIResponse = test::read_body_json(resp).await;
    assert!(body.check_ins.is_empty());
}

#[actix_web::test]
async fn reclassify_endpoint_returns_newly_missed() {
    let ctx = setup_ctx();
    let user_id = ID::new();

    // All check-ins are in the future, nothing to reclassify
    perform(ctx.clone(), create_req(&user_id, "2030-06-10T09:00:00Z")).await;

    let uri = format!("/api/v1/user/{}/check-ins/reclassify-missed", user_id);
    let resp = perform(ctx, test::TestRequest::post().uri(&uri)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: reclassify_missed::APIResponse = test::read_body_json(resp).await;
    assert!(body.missed.is_empty());
}
