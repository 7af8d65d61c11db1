use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Engineer, Team};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Send one request through a router that keeps its state between calls.
async fn call<S>(app: &mut S, req: Request<String>) -> axum::response::Response
where
    S: Service<Request<String>, Response = axum::response::Response>,
    S::Error: std::fmt::Debug,
{
    ServiceExt::ready(app).await.unwrap().call(req).await.unwrap()
}

// --- list ---

#[tokio::test]
async fn list_endpoints_start_empty() {
    for uri in ["/engineers", "/dev", "/op"] {
        let resp = app().oneshot(empty_request("GET", uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let items: Vec<serde_json::Value> = body_json(resp).await;
        assert!(items.is_empty(), "{uri}");
    }
}

// --- create ---

#[tokio::test]
async fn create_engineer_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/engineers",
            r#"{"name":"Alice","email":"alice@example.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let engineer: Engineer = body_json(resp).await;
    assert_eq!(engineer.name, "Alice");
    assert!(!engineer.id.is_empty());
}

#[tokio::test]
async fn create_engineer_missing_field_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/engineers", r#"{"name":"Alice"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_team_with_unknown_engineer_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/dev",
            r#"{"name":"Dev","engineers":[{"id":"nobody"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- get ---

#[tokio::test]
async fn get_unknown_ids_return_404() {
    for uri in ["/engineers/id/missing", "/dev/id/missing", "/op/id/missing"] {
        let resp = app().oneshot(empty_request("GET", uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn get_without_id_segment_is_not_routed() {
    let resp = app()
        .oneshot(empty_request("GET", "/dev/some-id"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- update / delete ---

#[tokio::test]
async fn update_unknown_team_returns_404() {
    let resp = app()
        .oneshot(json_request("PUT", "/op/missing", r#"{"name":"Nope","engineers":[]}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_engineer_returns_404() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/engineers/missing"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn team_lifecycle_resolves_engineers() {
    let mut app = app().into_service::<String>();

    let mut ids = Vec::new();
    for (name, email) in [("Alice", "alice@example.com"), ("Bob", "bob@example.com")] {
        let body = format!(r#"{{"name":"{name}","email":"{email}"}}"#);
        let resp = call(&mut app, json_request("POST", "/engineers", &body)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let engineer: Engineer = body_json(resp).await;
        ids.push(engineer.id);
    }

    // create with references in reverse order
    let body = format!(
        r#"{{"name":"Dev Team Alpha","engineers":[{{"id":"{}"}},{{"id":"{}"}}]}}"#,
        ids[1], ids[0]
    );
    let resp = call(&mut app, json_request("POST", "/dev", &body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Team = body_json(resp).await;
    assert_eq!(created.engineers.len(), 2);
    assert_eq!(created.engineers[0].name, "Bob");
    assert_eq!(created.engineers[1].email, "alice@example.com");
    let id = created.id.clone();

    // teams are kept apart per root
    let resp = call(&mut app, empty_request("GET", "/op")).await;
    let ops: Vec<Team> = body_json(resp).await;
    assert!(ops.is_empty());

    // get
    let resp = call(&mut app, empty_request("GET", &format!("/dev/id/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Team = body_json(resp).await;
    assert_eq!(fetched, created);

    // update replaces the association
    let body = format!(r#"{{"name":"Dev Team Beta","engineers":[{{"id":"{}"}}]}}"#, ids[0]);
    let resp = call(&mut app, json_request("PUT", &format!("/dev/{id}"), &body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Team = body_json(resp).await;
    assert_eq!(updated.name, "Dev Team Beta");
    assert_eq!(updated.engineers.len(), 1);
    assert_eq!(updated.engineers[0].name, "Alice");

    // delete
    let resp = call(&mut app, empty_request("DELETE", &format!("/dev/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("resource deleted"));

    // get after delete
    let resp = call(&mut app, empty_request("GET", &format!("/dev/id/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn engineer_changes_reach_both_team_kinds() {
    let mut app = app().into_service::<String>();

    let resp = call(
        &mut app,
        json_request("POST", "/engineers", r#"{"name":"Alice","email":"alice@example.com"}"#),
    )
    .await;
    let alice: Engineer = body_json(resp).await;

    let team_ids = {
        let body = format!(r#"{{"name":"Shared","engineers":[{{"id":"{}"}}]}}"#, alice.id);
        let mut ids = Vec::new();
        for root in ["/dev", "/op"] {
            let resp = call(&mut app, json_request("POST", root, &body)).await;
            assert_eq!(resp.status(), StatusCode::CREATED, "{root}");
            let team: Team = body_json(resp).await;
            ids.push((root, team.id));
        }
        ids
    };

    // update is reflected in the embedded copies
    let resp = call(
        &mut app,
        json_request(
            "PUT",
            &format!("/engineers/{}", alice.id),
            r#"{"name":"Alice","email":"alice@new.io"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    for (root, id) in &team_ids {
        let resp = call(&mut app, empty_request("GET", &format!("{root}/id/{id}"))).await;
        let team: Team = body_json(resp).await;
        assert_eq!(team.engineers[0].email, "alice@new.io", "{root}");
    }

    // delete strips the engineer from every team
    let resp = call(&mut app, empty_request("DELETE", &format!("/engineers/{}", alice.id))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    for (root, id) in &team_ids {
        let resp = call(&mut app, empty_request("GET", &format!("{root}/id/{id}"))).await;
        assert_eq!(resp.status(), StatusCode::OK, "{root}");
        let team: Team = body_json(resp).await;
        assert!(team.engineers.is_empty(), "{root}");
    }
}
