//! In-process products API for exercising the real HTTP fetcher.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A canned response for the mock API to return.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: format!(r#"{{"error": "{}"}}"#, message),
        }
    }
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<String>>>,
    response: MockResponse,
}

/// Mock products API bound to an ephemeral port. Serves one fixed response
/// and records the query string of every request.
pub struct MockApi {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    pub async fn start(response: MockResponse) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: requests.clone(),
            response,
        };

        let app = Router::new()
            .route("/api/products", get(handle_products))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("Failed to read mock API addr");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, requests }
    }

    /// The products endpoint URL.
    pub fn url(&self) -> String {
        format!("http://{}/api/products", self.addr)
    }

    /// Query strings of all requests seen so far, in arrival order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

async fn handle_products(State(state): State<MockState>, uri: Uri) -> impl IntoResponse {
    state
        .requests
        .lock()
        .await
        .push(uri.query().unwrap_or("").to_string());

    (
        StatusCode::from_u16(state.response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(header::CONTENT_TYPE, "application/json")],
        state.response.body.clone(),
    )
}
