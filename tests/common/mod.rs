#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Mutex;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde::Deserialize;
use serde_json::{json, Value};

use registrations_client::config::Credentials;
use registrations_client::{FormsClient, Session};

pub const ADMIN_TOKEN: &str = "1|test-admin-token";
pub const FORM_KEY: &str = "form-key-1";

/// In-memory stand-in for the Dynamic Forms service.
pub struct FakeForms {
    pub nest_form: bool,
    pub html_on_create: bool,
    pub list_fields: bool,
    pub fail_on_page: Option<u32>,
    pub schema: Mutex<Value>,
    pub records: Mutex<Vec<Value>>,
    pub page_requests: Mutex<Vec<(u32, u32)>>,
    pub api_clients: Mutex<Vec<String>>,
}

impl Default for FakeForms {
    fn default() -> Self {
        FakeForms {
            nest_form: true,
            html_on_create: false,
            list_fields: false,
            fail_on_page: None,
            schema: Mutex::new(json!([])),
            records: Mutex::new(Vec::new()),
            page_requests: Mutex::new(Vec::new()),
            api_clients: Mutex::new(Vec::new()),
        }
    }
}

impl FakeForms {
    /// Pre-loads `count` submissions named REG-1, REG-2, ...
    pub fn with_records(self, count: usize) -> Self {
        {
            let mut records = self.records.lock().unwrap();
            for i in 1..=count {
                records.push(json!({
                    "id": i,
                    "code": format!("REG-{i}"),
                    "email": format!("coach{i}@club.test"),
                    "status": "pending",
                    "source": "api",
                    "submitted_at": format!("2026-03-0{}T10:00:00.000000Z", i % 9 + 1),
                    "fields": { "club_name": format!("Club {i}"), "num_players": 10 + i }
                }));
            }
        }
        self
    }

    pub fn page_requests(&self) -> Vec<(u32, u32)> {
        self.page_requests.lock().unwrap().clone()
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub state: web::Data<FakeForms>,
}

impl TestServer {
    pub fn api_base(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn client(&self) -> FormsClient {
        FormsClient::with_client(reqwest::Client::new(), &self.api_base())
    }

    pub fn session(&self, form_id: Option<u64>, form_key: Option<&str>) -> Session {
        let credentials = Credentials {
            admin_token: Some(ADMIN_TOKEN.to_string()),
            form_key: form_key.map(str::to_string),
        };
        Session::new(self.client(), credentials, form_id)
    }
}

/// Starts the fake service on an ephemeral port in its own actix system.
pub fn spawn(forms: FakeForms) -> TestServer {
    let state = web::Data::new(forms);
    let server_state = state.clone();
    let (tx, rx) = std::sync::mpsc::channel();

    std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        let _ = sys.block_on(async move {
            let server = HttpServer::new(move || {
                App::new()
                    .app_data(server_state.clone())
                    .route("/api/forms", web::post().to(create_form))
                    .route("/api/forms/{id}", web::get().to(show_form))
                    .route("/api/forms/{id}/submissions", web::post().to(submit_form))
                    .route("/api/forms/{id}/submissions", web::get().to(list_submissions))
            })
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .expect("bind fake forms service");

            tx.send(server.addrs()[0]).expect("report fake service address");
            server.run().await
        });
    });

    let addr = rx.recv().expect("fake forms service did not start");
    TestServer { addr, state }
}

fn bearer(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn create_form(
    req: HttpRequest,
    body: web::Json<Value>,
    state: web::Data<FakeForms>,
) -> HttpResponse {
    if bearer(&req) != Some(ADMIN_TOKEN) {
        return HttpResponse::Unauthorized().json(json!({ "message": "Unauthenticated." }));
    }
    if state.html_on_create {
        return HttpResponse::Ok()
            .content_type("text/html")
            .body("<html><body>Server Error</body></html>");
    }

    *state.schema.lock().unwrap() = body["schema"].clone();

    let form = json!({
        "id": 1,
        "code": "0b6f3c8e-form",
        "name": body["name"],
        "api_key": FORM_KEY,
        "embed_url": "http://forms.test/forms/0b6f3c8e-form/viewform",
        "api_endpoint": "http://forms.test/api/forms/1/submissions",
        "schema": body["schema"],
    });

    if state.nest_form {
        HttpResponse::Created().json(json!({ "success": true, "form": form }))
    } else {
        HttpResponse::Created().json(form)
    }
}

async fn show_form(path: web::Path<u64>, state: web::Data<FakeForms>) -> HttpResponse {
    let id = path.into_inner();
    if id != 1 {
        return HttpResponse::NotFound().json(json!({ "message": "Not found" }));
    }
    HttpResponse::Ok().json(json!({
        "id": 1,
        "code": "0b6f3c8e-form",
        "name": "U14 Championship Registration 2026",
        "description": "Register your team",
        "schema": state.schema.lock().unwrap().clone(),
        "status": "open",
    }))
}

async fn submit_form(
    req: HttpRequest,
    body: web::Json<Value>,
    state: web::Data<FakeForms>,
) -> HttpResponse {
    let client = req
        .headers()
        .get("X-API-Client")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    state.api_clients.lock().unwrap().push(client);

    if body.get("club_name").and_then(Value::as_str).is_none() {
        return HttpResponse::UnprocessableEntity()
            .json(json!({ "message": "The club name field is required." }));
    }

    let mut records = state.records.lock().unwrap();
    let n = records.len() + 1;
    let code = format!("REG-{n}");
    records.push(json!({
        "id": n,
        "code": code.clone(),
        "email": body.get("coach_email"),
        "status": "pending",
        "source": "api",
        "submitted_at": "2026-03-01T10:00:00.000000Z",
        "fields": body.into_inner(),
    }));

    HttpResponse::Created().json(json!({
        "success": true,
        "submission": { "id": n, "code": code, "submitted_at": "2026-03-01T10:00:00.000000Z" }
    }))
}

#[derive(Deserialize)]
struct ListQuery {
    page: Option<u32>,
    limit: Option<u32>,
}

async fn list_submissions(
    req: HttpRequest,
    query: web::Query<ListQuery>,
    state: web::Data<FakeForms>,
) -> HttpResponse {
    if bearer(&req) != Some(FORM_KEY) {
        return HttpResponse::Forbidden().json(json!({ "error": "Unauthorized" }));
    }

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(50).clamp(1, 100);
    state.page_requests.lock().unwrap().push((page, limit));

    if state.fail_on_page == Some(page) {
        return HttpResponse::InternalServerError().body("boom");
    }

    let records = state.records.lock().unwrap();
    let total = records.len();
    let per_page = limit as usize;
    let last_page = total.div_ceil(per_page).max(1);

    let data: Vec<Value> = records
        .iter()
        .skip((page as usize - 1) * per_page)
        .take(per_page)
        .map(|record| {
            let mut record = record.clone();
            if state.list_fields {
                let values: Vec<Value> = record["fields"]
                    .as_object()
                    .map(|m| m.values().cloned().collect())
                    .unwrap_or_default();
                record["fields"] = Value::Array(values);
            }
            record
        })
        .collect();

    HttpResponse::Ok().json(json!({
        "data": data,
        "pagination": {
            "total": total,
            "per_page": per_page,
            "current_page": page,
            "last_page": last_page,
        }
    }))
}
