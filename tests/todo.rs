use actix_web::middleware::Logger;
use actix_web::{
    http::{header, StatusCode},
    rt, test, App, HttpServer,
};
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::net::TcpListener;
use todo_api::auth::AuthResponse;
use todo_api::config::JwtConfig;
use todo_api::models::TodoItemDto;
use todo_api::{routes, AppState};

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "todo-integration-secret".to_string(),
        issuer: "todo-api-tests".to_string(),
        audience: "todo-api-test-clients".to_string(),
        ttl_minutes: 30,
    }
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(Logger::default())
                .configure(routes::configure($state)),
        )
        .await
    };
}

// Registers and logs in a user, returning the bearer token.
async fn register_and_login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> String {
    let credentials = json!({ "username": username, "password": password });
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&credentials)
        .to_request();
    assert!(test::call_service(app, req).await.status().is_success());

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(&credentials)
        .to_request();
    let auth: AuthResponse = test::call_and_read_body_json(app, req).await;
    auth.token
}

#[actix_rt::test]
async fn test_todo_crud_flow() {
    let app = init_app!(AppState::in_memory(&jwt_config(), false));

    // 1. Create
    let before = Utc::now();
    let req = test::TestRequest::post()
        .uri("/api/todo")
        .set_json(json!({
            "title": "Buy milk",
            "description": "2%",
            "isCompleted": false,
            "createDate": "1999-12-31T00:00:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/api/todo/1"
    );
    let created: TodoItemDto = test::read_body_json(resp).await;
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "Buy milk");
    let create_date = created.create_date.expect("server sets createDate");
    assert!(create_date >= before && create_date <= Utc::now());

    // 2. Get by id
    let req = test::TestRequest::get().uri("/api/todo/1").to_request();
    let fetched: TodoItemDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    // 3. Update
    let req = test::TestRequest::put()
        .uri("/api/todo/1")
        .set_json(json!({
            "id": 1,
            "title": "Buy milk",
            "description": "2%",
            "isCompleted": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::get().uri("/api/todo/1").to_request();
    let fetched: TodoItemDto = test::call_and_read_body_json(&app, req).await;
    assert!(fetched.is_completed);
    assert_eq!(fetched.create_date, Some(create_date));

    // 4. Second item and list
    let req = test::TestRequest::post()
        .uri("/api/todo")
        .set_json(json!({ "title": "Walk dog" }))
        .to_request();
    let second: TodoItemDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second.id, 2);
    assert_eq!(second.description, None);
    assert!(!second.is_completed);

    let req = test::TestRequest::get().uri("/api/todo").to_request();
    let all: Vec<TodoItemDto> = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<i32> = all.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);

    // 5. Delete, then delete again
    let req = test::TestRequest::delete().uri("/api/todo/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete().uri("/api/todo/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/todo/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_update_missing_item_changes_nothing() {
    let app = init_app!(AppState::in_memory(&jwt_config(), false));

    let req = test::TestRequest::post()
        .uri("/api/todo")
        .set_json(json!({ "title": "Existing" }))
        .to_request();
    let existing: TodoItemDto = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/api/todo/42")
        .set_json(json!({ "id": 42, "title": "Ghost", "isCompleted": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/todo").to_request();
    let all: Vec<TodoItemDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all, vec![existing]);
}

#[actix_rt::test]
async fn test_invalid_todo_inputs() {
    let app = init_app!(AppState::in_memory(&jwt_config(), false));

    let create_cases = vec![
        (json!({ "description": "no title" }), "missing title"),
        (json!({ "title": "" }), "empty title"),
        (json!({ "title": "t".repeat(101) }), "title too long"),
        (
            json!({ "title": "ok", "description": "d".repeat(501) }),
            "description too long",
        ),
        (json!({ "title": "ok", "isCompleted": "yes" }), "wrong type"),
    ];

    for (payload, description) in create_cases {
        let req = test::TestRequest::post()
            .uri("/api/todo")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body_bytes = test::read_body(resp).await;
        assert_eq!(
            status,
            StatusCode::BAD_REQUEST,
            "Test case failed: {}. Body: {:?}",
            description,
            String::from_utf8_lossy(&body_bytes)
        );
    }

    let req = test::TestRequest::post()
        .uri("/api/todo")
        .set_json(json!({ "title": "t".repeat(101) }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["details"]["title"][0]["code"], "length");

    // Id mismatch between path and body
    let req = test::TestRequest::post()
        .uri("/api/todo")
        .set_json(json!({ "title": "Mine" }))
        .to_request();
    let created: TodoItemDto = test::call_and_read_body_json(&app, req).await;
    let req = test::TestRequest::put()
        .uri(&format!("/api/todo/{}", created.id))
        .set_json(json!({ "id": created.id + 1, "title": "Mine" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Non-numeric id
    let req = test::TestRequest::get().uri("/api/todo/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/todo").to_request();
    let all: Vec<TodoItemDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 1);
}

#[actix_rt::test]
async fn test_bearer_token_required_when_enabled() {
    let app = init_app!(AppState::in_memory(&jwt_config(), true));

    let req = test::TestRequest::get().uri("/api/todo").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/todo")
        .append_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let token = register_and_login(&app, "dave", "pa55word").await;

    let req = test::TestRequest::post()
        .uri("/api/todo")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(json!({ "title": "Authorized task" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/todo")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let all: Vec<TodoItemDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 1);

    // Health stays public.
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_create_todo_unauthorized_over_http() {
    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let state = AppState::in_memory(&jwt_config(), true);
    let server_handle = rt::spawn(async move {
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .configure(routes::configure(state.clone()))
        })
        .workers(1)
        .bind(("127.0.0.1", port))
        .unwrap_or_else(|_| panic!("Failed to bind to port {}", port))
        .run()
        .await
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://127.0.0.1:{}/api/todo", port))
        .json(&json!({ "title": "Unauthorized Task" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = resp.json().await.expect("JSON error body");
    assert_eq!(body["error"], "Missing token");

    server_handle.abort();
}
