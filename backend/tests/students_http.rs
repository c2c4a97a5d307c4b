//! End-to-end HTTP tests for the student endpoints over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::{
    App,
    body::BoxBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test::{self, TestRequest},
    web,
};
use backend::Trace;
use backend::domain::{StudentService, TRACE_ID_HEADER};
use backend::inbound::http::error::configure_extractors;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::students;
use backend::outbound::memory::InMemoryStudentRepository;
use rstest::rstest;
use serde_json::{Value, json};

async fn init_app()
-> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let service = StudentService::new(Arc::new(InMemoryStudentRepository::new()));
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::from_service(Arc::new(service))))
            .configure(configure_extractors)
            .wrap(Trace)
            .configure(students::configure),
    )
    .await
}

fn payload(code: &str, email: &str, major: &str) -> Value {
    json!({
        "studentCode": code,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
        "major": major,
    })
}

async fn send<S>(app: &S, req: TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

async fn create<S>(app: &S, code: &str, email: &str, major: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let (status, body) = send(
        app,
        TestRequest::post()
            .uri("/api/students")
            .set_json(payload(code, email, major)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["data"]["id"].as_i64().expect("numeric id")
}

async fn set_status<S>(app: &S, id: i64, status: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    send(
        app,
        TestRequest::patch()
            .uri(&format!("/api/students/{id}/status"))
            .set_json(json!({ "status": status })),
    )
    .await
}

#[actix_web::test]
async fn create_applies_defaults_and_wraps_in_envelope() {
    let app = init_app().await;

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/students")
            .set_json(payload("6501234567", "ada@uni.ac.th", "CS"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["id"], json!(1));
    assert_eq!(body["data"]["studentCode"], json!("6501234567"));
    assert_eq!(body["data"]["gpa"], json!(0.0));
    assert_eq!(body["data"]["status"], json!("active"));
    assert!(body["data"]["createdAt"].is_string());
}

#[actix_web::test]
async fn create_accepts_snake_case_fields() {
    let app = init_app().await;
    let (status, body) = send(
        &app,
        TestRequest::post().uri("/api/students").set_json(json!({
            "student_code": "6500000001",
            "first_name": "Alan",
            "last_name": "Turing",
            "email": "alan@uni.ac.th",
            "major": "SE",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["firstName"], json!("Alan"));
    assert_eq!(body["data"]["major"], json!("SE"));
}

#[rstest]
#[case::short_code(payload("12345", "a@uni.ac.th", "CS"), "studentCode")]
#[case::bad_email(payload("6501234567", "not-an-email", "CS"), "email")]
#[case::bad_major(payload("6501234567", "a@uni.ac.th", "Physics"), "major")]
#[case::missing_fields(json!({ "studentCode": "6501234567" }), "body")]
#[actix_web::test]
async fn create_rejects_invalid_input(#[case] body: Value, #[case] field: &str) {
    let app = init_app().await;
    let (status, response) = send(
        &app,
        TestRequest::post().uri("/api/students").set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], json!(false));
    assert_eq!(response["code"], json!("invalid_request"));
    assert_eq!(response["details"]["field"], json!(field));
}

#[actix_web::test]
async fn malformed_json_is_reported_as_invalid_request() {
    let app = init_app().await;
    let (status, body) = send(
        &app,
        TestRequest::post()
            .uri("/api/students")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[case::same_code(payload("6501234567", "other@uni.ac.th", "SE"), "studentCode", "Student code already exists")]
#[case::same_email(payload("6509999999", "ada@uni.ac.th", "SE"), "email", "Email already exists")]
#[actix_web::test]
async fn duplicates_conflict(
    #[case] second: Value,
    #[case] field: &str,
    #[case] message: &str,
) {
    let app = init_app().await;
    create(&app, "6501234567", "ada@uni.ac.th", "CS").await;

    let (status, body) = send(
        &app,
        TestRequest::post().uri("/api/students").set_json(second),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!("conflict"));
    assert_eq!(body["message"], json!(message));
    assert_eq!(body["details"]["field"], json!(field));
}

#[rstest]
#[case::not_numeric("/api/students/abc")]
#[case::zero("/api/students/0")]
#[case::negative("/api/students/-4")]
#[actix_web::test]
async fn invalid_ids_are_rejected(#[case] uri: &str) {
    let app = init_app().await;
    let (status, body) = send(&app, TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid student ID"));
}

#[actix_web::test]
async fn missing_student_is_not_found() {
    let app = init_app().await;
    let (status, body) = send(&app, TestRequest::get().uri("/api/students/42")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("not_found"));
    assert_eq!(body["message"], json!("Student not found"));
    assert!(body["traceId"].is_string());
}

#[actix_web::test]
async fn empty_list_reports_zeroed_statistics() {
    let app = init_app().await;
    let (status, body) = send(&app, TestRequest::get().uri("/api/students")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["students"], json!([]));
    assert_eq!(
        body["data"]["statistics"],
        json!({ "total": 0, "active": 0, "graduated": 0, "suspended": 0, "avgGPA": 0.0 })
    );
}

#[actix_web::test]
async fn list_filters_and_averages_gpa() {
    let app = init_app().await;
    let first = create(&app, "6500000001", "one@uni.ac.th", "CS").await;
    let second = create(&app, "6500000002", "two@uni.ac.th", "CS").await;
    create(&app, "6500000003", "three@uni.ac.th", "IT").await;

    for (id, gpa) in [(first, 3.0), (second, 4.0)] {
        let (status, _) = send(
            &app,
            TestRequest::patch()
                .uri(&format!("/api/students/{id}/gpa"))
                .set_json(json!({ "gpa": gpa })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    set_status(&app, second, "graduated").await;

    let (status, body) = send(&app, TestRequest::get().uri("/api/students?major=CS")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["students"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        body["data"]["statistics"],
        json!({ "total": 2, "active": 1, "graduated": 1, "suspended": 0, "avgGPA": 3.5 })
    );
}

#[rstest]
#[case::major("/api/students?major=Physics")]
#[case::status("/api/students?status=expelled")]
#[actix_web::test]
async fn unknown_filters_are_rejected(#[case] uri: &str) {
    let app = init_app().await;
    let (status, _) = send(&app, TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[case::above_range(json!({ "gpa": 4.5 }))]
#[case::below_range(json!({ "gpa": -0.1 }))]
#[case::not_a_number(json!({ "gpa": "3.0" }))]
#[case::absent(json!({}))]
#[actix_web::test]
async fn gpa_outside_range_is_rejected(#[case] body: Value) {
    let app = init_app().await;
    let id = create(&app, "6501234567", "ada@uni.ac.th", "CS").await;

    let (status, response) = send(
        &app,
        TestRequest::patch()
            .uri(&format!("/api/students/{id}/gpa"))
            .set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["details"]["field"], json!("gpa"));
}

#[actix_web::test]
async fn full_update_keeps_gpa_and_status() {
    let app = init_app().await;
    let id = create(&app, "6501234567", "ada@uni.ac.th", "CS").await;
    send(
        &app,
        TestRequest::patch()
            .uri(&format!("/api/students/{id}/gpa"))
            .set_json(json!({ "gpa": 3.25 })),
    )
    .await;

    let (status, body) = send(
        &app,
        TestRequest::put()
            .uri(&format!("/api/students/{id}"))
            .set_json(payload("6501234568", "ada.l@uni.ac.th", "DS")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["studentCode"], json!("6501234568"));
    assert_eq!(body["data"]["major"], json!("DS"));
    assert_eq!(body["data"]["gpa"], json!(3.25));
    assert_eq!(body["data"]["status"], json!("active"));
}

#[actix_web::test]
async fn withdrawn_students_cannot_change_status() {
    let app = init_app().await;
    let id = create(&app, "6501234567", "ada@uni.ac.th", "CS").await;

    let (status, _) = set_status(&app, id, "withdrawn").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = set_status(&app, id, "active").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        json!("Cannot change status of a withdrawn student")
    );
}

#[actix_web::test]
async fn active_students_cannot_be_deleted() {
    let app = init_app().await;
    let id = create(&app, "6501234567", "ada@uni.ac.th", "CS").await;

    let (status, body) = send(
        &app,
        TestRequest::delete().uri(&format!("/api/students/{id}")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], json!("Cannot delete an active student"));
}

#[actix_web::test]
async fn graduated_student_can_be_deleted_once() {
    let app = init_app().await;
    let id = create(&app, "6501234567", "ada@uni.ac.th", "CS").await;
    set_status(&app, id, "graduated").await;

    let (status, body) = send(
        &app,
        TestRequest::delete().uri(&format!("/api/students/{id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(id));
    assert_eq!(body["data"]["message"], json!("Student deleted successfully"));

    let (status, _) = send(
        &app,
        TestRequest::get().uri(&format!("/api/students/{id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        TestRequest::delete().uri(&format!("/api/students/{id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
