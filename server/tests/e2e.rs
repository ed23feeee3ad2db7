//! Full CRUD lifecycle against a live server over real HTTP.
//!
//! # Design
//! Starts the server on a random port in a background runtime, then drives it
//! with a blocking ureq agent. Catches anything the in-process router tests
//! cannot see: listener wiring, middleware headers on the wire, and JSON
//! framing through hyper.

use std::net::SocketAddr;

use todo_server::{ErrorResponse, Item};

struct Response {
    status: u16,
    request_id: Option<String>,
    body: String,
}

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// Execute a request, returning 4xx/5xx responses as data rather than `Err`.
fn execute(method: &str, url: &str, body: Option<&str>) -> Response {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (method, body) {
        ("GET", _) => agent.get(url).call(),
        ("DELETE", _) => agent.delete(url).call(),
        ("POST", Some(body)) => agent
            .post(url)
            .content_type("application/json")
            .send(body.as_bytes()),
        ("PATCH", Some(body)) => agent
            .patch(url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (other, _) => panic!("unsupported request: {other}"),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Response {
        status,
        request_id,
        body,
    }
}

#[test]
fn crud_lifecycle() {
    let base = format!("http://{}/v1/todos", start_server());

    // Step 1: list is empty and carries a request id.
    let resp = execute("GET", &base, None);
    assert_eq!(resp.status, 200);
    assert!(resp.request_id.is_some());
    let todos: Vec<Item> = serde_json::from_str(&resp.body).unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 2: create.
    let resp = execute("POST", &base, Some(r#"{"title":"Integration test"}"#));
    assert_eq!(resp.status, 201);
    let created: Item = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "Integration test");
    assert!(!created.done);
    let item_url = format!("{base}/{}", created.id);

    // Step 3: get.
    let resp = execute("GET", &item_url, None);
    assert_eq!(resp.status, 200);
    let fetched: Item = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(fetched, created);

    // Step 4: patch title.
    let resp = execute("PATCH", &item_url, Some(r#"{"title":"Updated title"}"#));
    assert_eq!(resp.status, 200);
    let updated: Item = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(!updated.done);

    // Step 5: patch done.
    let resp = execute("PATCH", &item_url, Some(r#"{"done":true}"#));
    assert_eq!(resp.status, 200);
    let updated: Item = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(updated.done);

    // Step 6: delete.
    let resp = execute("DELETE", &item_url, None);
    assert_eq!(resp.status, 204);
    assert!(resp.body.is_empty());

    // Step 7: get and delete after delete are 404.
    let resp = execute("GET", &item_url, None);
    assert_eq!(resp.status, 404);
    let err: ErrorResponse = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(err.message, format!("todo {} not found", created.id));
    assert_eq!(execute("DELETE", &item_url, None).status, 404);

    // Step 8: list is empty again.
    let resp = execute("GET", &base, None);
    let todos: Vec<Item> = serde_json::from_str(&resp.body).unwrap();
    assert!(todos.is_empty(), "expected empty list after delete");
}

#[test]
fn concurrent_creates_over_http_get_distinct_ids() {
    let base = format!("http://{}/v1/todos", start_server());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let base = base.clone();
            std::thread::spawn(move || {
                let body = format!(r#"{{"title":"task {i}"}}"#);
                let resp = execute("POST", &base, Some(&body));
                assert_eq!(resp.status, 201);
                serde_json::from_str::<Item>(&resp.body).unwrap().id
            })
        })
        .collect();

    let mut ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
}
