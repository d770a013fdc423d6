//! Shared fixtures: a scripted transport and canned backend payloads.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hisi_client::{
    ApiClient, ApiRequest, ApiResponse, ClientConfig, ClientError, ClientResult, HttpTransport,
    MemoryStorage, RestClient, SessionStorage, SessionStore,
};
use serde_json::{json, Value};
use tokio::sync::Notify;

pub const BASE_URL: &str = "http://localhost:5000";

enum Step {
    Respond(ApiResponse),
    Fail(ClientError),
    Gated(Arc<Notify>, ApiResponse),
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: Value) {
        self.push(Step::Respond(ApiResponse::json(status, &body)));
    }

    pub fn respond_raw(&self, status: u16, body: &'static str) {
        self.push(Step::Respond(ApiResponse::new(status, body)));
    }

    pub fn fail(&self, err: ClientError) {
        self.push(Step::Fail(err));
    }

    /// Response held back until the returned handle is notified.
    pub fn respond_gated(&self, status: u16, body: Value) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.push(Step::Gated(gate.clone(), ApiResponse::json(status, &body)));
        gate
    }

    fn push(&self, step: Step) {
        self.steps.lock().unwrap().push_back(step);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub async fn wait_for_requests(&self, n: usize) {
        while self.request_count() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request: nothing scripted");

        match step {
            Step::Respond(response) => Ok(response),
            Step::Fail(err) => Err(err),
            Step::Gated(gate, response) => {
                gate.notified().await;
                Ok(response)
            }
        }
    }
}

pub fn rest(transport: &Arc<ScriptedTransport>) -> RestClient {
    let base = ClientConfig::with_base_url(BASE_URL).base_url().unwrap();
    RestClient::new(base, transport.clone())
}

pub fn store(transport: &Arc<ScriptedTransport>, storage: &Arc<MemoryStorage>) -> Arc<SessionStore> {
    let storage: Arc<dyn SessionStorage> = storage.clone();
    Arc::new(SessionStore::open(rest(transport), storage))
}

/// Client with an anonymous session.
pub fn client(transport: &Arc<ScriptedTransport>) -> ApiClient {
    let storage = Arc::new(MemoryStorage::new());
    ApiClient::new(rest(transport), store(transport, &storage))
}

/// Client whose session is already signed in with `role`.
pub fn signed_in_client(transport: &Arc<ScriptedTransport>, role: &str) -> ApiClient {
    let storage = Arc::new(MemoryStorage::with_entries([
        ("token", "token-abc".to_string()),
        ("user", user_json("u-1", role).to_string()),
    ]));
    ApiClient::new(rest(transport), store(transport, &storage))
}

pub fn user_json(id: &str, role: &str) -> Value {
    json!({
        "id": id,
        "email": "amani@example.com",
        "first_name": "Amani",
        "last_name": "Wanjiru",
        "phone": null,
        "role": role,
        "is_verified": true,
        "is_active": true,
        "created_at": "2024-05-01T09:30:00",
        "updated_at": "2024-05-01T09:30:00",
        "last_login": null
    })
}

pub fn auth_body(id: &str, role: &str, token: &str) -> Value {
    json!({
        "message": "Login successful",
        "user": user_json(id, role),
        "access_token": token,
        "refresh_token": "refresh-xyz"
    })
}

pub fn product_json(id: &str, name: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "slug": name.to_lowercase().replace(' ', "-"),
        "price": price,
        "currency": "KES",
        "stock_quantity": 4,
        "in_stock": true,
        "images": {"main": "/img/main.jpg", "hover": null, "gallery": []},
        "is_featured": true,
        "is_active": true
    })
}

pub fn review_json(id: &str, rating: u8, approved: bool) -> Value {
    json!({
        "id": id,
        "rating": rating,
        "title": "Perfect fit",
        "content": "The magnetic closures make dressing so much easier.",
        "is_approved": approved,
        "is_featured": false,
        "product_id": null,
        "created_at": "2024-06-02T12:00:00",
        "user": {"id": "u-1", "name": "Amani Wanjiru"}
    })
}

pub fn paginated(items: Vec<Value>, page: u32, per_page: u32, total: u64) -> Value {
    let total_pages = (total + per_page as u64 - 1) / per_page as u64;
    json!({
        "success": true,
        "message": "Success",
        "data": {
            "items": items,
            "pagination": {
                "page": page,
                "per_page": per_page,
                "total": total,
                "total_pages": total_pages,
                "has_next": (page as u64) < total_pages,
                "has_prev": page > 1
            }
        }
    })
}

pub fn envelope(data: Value) -> Value {
    json!({"success": true, "message": "Success", "data": data})
}

/// Query string of a request as ordered pairs.
pub fn query_pairs(request: &ApiRequest) -> Vec<(String, String)> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
