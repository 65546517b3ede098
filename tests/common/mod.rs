#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use actix_web::web::{self, Data};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use taskfixer::time::current_timestamp;

const JWT_SECRET: &[u8] = b"taskfixer-mock-secret";

static ENCODING_KEY: Lazy<EncodingKey> = Lazy::new(|| EncodingKey::from_secret(JWT_SECRET));
static DECODING_KEY: Lazy<DecodingKey> = Lazy::new(|| DecodingKey::from_secret(JWT_SECRET));

/// Claims the mock API signs into its tokens. The profile fields use the
/// same wire names the real backend puts into its JWTs.
#[derive(Debug, Serialize, Deserialize)]
pub struct MockClaims {
    pub sub: String,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct MockProfession {
    pub id: String,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct MockOffering {
    pub id: String,
    pub description: String,
    pub estimated_price: f64,
    pub estimated_duration: f64,
    pub active: bool,
    pub profession_id: String,
}

/// Which field of the login response carries the token.
#[derive(Debug, Clone, Copy, Default)]
pub enum TokenField {
    #[default]
    IdToken,
    Token,
    /// Both fields present but empty, the client must refuse the login.
    Empty,
}

/// How resource ids appear on the wire.
#[derive(Debug, Clone, Copy, Default)]
pub enum IdShape {
    #[default]
    Plain,
    Underscore,
    Oid,
}

/// Wire inconsistencies of the real backend, switchable per test.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quirks {
    pub token_field: TokenField,
    /// Include the profile in the login response.
    pub include_user: bool,
    pub id_shape: IdShape,
    /// Serialize prices and durations as JSON strings.
    pub numeric_strings: bool,
    /// Wrap list bodies in an "items" object instead of a bare array.
    pub wrap_items: bool,
    /// Omit the "active" flag on embedded professions.
    pub omit_embedded_active: bool,
    /// Ship offerings with "profession_name" instead of an embedded
    /// profession object.
    pub profession_name_only: bool,
    /// Report a different first name in the login profile than the one
    /// signed into the claims.
    pub override_user_firstname: Option<&'static str>,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub users: Vec<MockUser>,
    pub professions: Vec<MockProfession>,
    pub offerings: Vec<MockOffering>,
    pub next_id: u64,
    pub quirks: Quirks,
}

impl MockState {
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }
}

pub fn hash_password(password: &str, email: &str) -> String {
    let hash = Sha256::digest(format!("{password}{email}"));
    format!("{hash:x}")
}

pub fn seed_user(
    id: &str,
    firstname: &str,
    lastname: &str,
    email: &str,
    password: &str,
) -> MockUser {
    MockUser {
        id: id.to_string(),
        firstname: firstname.to_string(),
        lastname: lastname.to_string(),
        email: email.to_string(),
        password_hash: hash_password(password, email),
    }
}

pub fn issue_token(user: &MockUser, exp: i64) -> String {
    let claims = MockClaims {
        sub: user.id.clone(),
        name: user.firstname.clone(),
        lastname: user.lastname.clone(),
        email: user.email.clone(),
        exp,
    };
    jsonwebtoken::encode(&Header::default(), &claims, &ENCODING_KEY).unwrap()
}

/// Start the mock API on a random port. The server thread lives for the
/// rest of the test process.
pub fn start_server(state: MockState) -> (SocketAddr, Data<Mutex<MockState>>) {
    let data = Data::new(Mutex::new(state));
    let server_data = data.clone();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        actix_web::rt::System::new().block_on(async move {
            let srv = HttpServer::new(move || {
                App::new()
                    .app_data(server_data.clone())
                    .route("/login", web::post().to(handle_login))
                    .route("/users", web::post().to(handle_register))
                    .route("/profession/", web::get().to(list_professions))
                    .route("/profession/", web::post().to(create_profession))
                    .route("/profession/{id}", web::put().to(update_profession))
                    .route("/profession/{id}", web::delete().to(delete_profession))
                    .route("/service_offering/", web::get().to(list_offerings))
                    .route("/service_offering/", web::post().to(create_offering))
                    .route("/service_offering/{id}", web::put().to(update_offering))
                    .route("/service_offering/{id}", web::delete().to(delete_offering))
            })
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();

            let addr = srv.addrs()[0];
            tx.send(addr).unwrap();
            srv.run().await.unwrap();
        });
    });

    let addr = rx.recv().unwrap();
    (addr, data)
}

pub fn server_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

fn unauthorized(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "message": message }))
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": message }))
}

fn bearer_claims(req: &HttpRequest) -> Result<MockClaims, HttpResponse> {
    let header = match req.headers().get("Authorization") {
        Some(header) => header.to_str().unwrap_or_default(),
        None => return Err(unauthorized("authentication required")),
    };
    let token = match header.strip_prefix("Bearer ") {
        Some(token) => token,
        None => return Err(unauthorized("authentication required")),
    };

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    match jsonwebtoken::decode::<MockClaims>(token, &DECODING_KEY, &validation) {
        Ok(data) => Ok(data.claims),
        Err(_) => Err(unauthorized("invalid or expired token")),
    }
}

fn id_value(id: &str, shape: IdShape) -> (&'static str, Value) {
    match shape {
        IdShape::Plain => ("id", json!(id)),
        IdShape::Underscore => ("_id", json!(id)),
        IdShape::Oid => ("_id", json!({ "$oid": id })),
    }
}

fn number_value(n: f64, as_string: bool) -> Value {
    if as_string {
        json!(format!("{n}"))
    } else {
        json!(n)
    }
}

fn profession_json(p: &MockProfession, q: Quirks) -> Value {
    let (key, id) = id_value(&p.id, q.id_shape);
    json!({ key: id, "name": p.name, "active": p.active })
}

fn offering_json(o: &MockOffering, state: &MockState) -> Value {
    let q = state.quirks;
    let (key, id) = id_value(&o.id, q.id_shape);
    let mut obj = json!({
        key: id,
        "description": o.description,
        "estimated_price": number_value(o.estimated_price, q.numeric_strings),
        "estimated_duration": number_value(o.estimated_duration, q.numeric_strings),
        "active": o.active,
        "id_profession": o.profession_id,
    });

    let profession = state.professions.iter().find(|p| p.id == o.profession_id);
    if let Some(p) = profession {
        if q.profession_name_only {
            obj["profession_name"] = json!(p.name);
        } else {
            let mut embedded = profession_json(p, q);
            if q.omit_embedded_active {
                embedded.as_object_mut().unwrap().remove("active");
            }
            obj["profession"] = embedded;
        }
    }
    obj
}

fn list_body(items: Vec<Value>, q: Quirks) -> Value {
    if q.wrap_items {
        json!({ "items": items })
    } else {
        Value::Array(items)
    }
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn handle_login(state: Data<Mutex<MockState>>, body: web::Json<LoginBody>) -> HttpResponse {
    let state = state.lock().unwrap();

    let hash = hash_password(&body.password, &body.email);
    let user = state
        .users
        .iter()
        .find(|u| u.email == body.email && u.password_hash == hash);
    let user = match user {
        Some(user) => user,
        None => return unauthorized("incorrect email or password"),
    };

    let token = issue_token(user, current_timestamp() as i64 + 3600);
    let mut obj = match state.quirks.token_field {
        TokenField::IdToken => json!({ "idToken": token }),
        TokenField::Token => json!({ "token": token }),
        TokenField::Empty => json!({ "idToken": "", "token": "" }),
    };
    if state.quirks.include_user {
        let firstname = state
            .quirks
            .override_user_firstname
            .unwrap_or(user.firstname.as_str());
        obj["user"] = json!({
            "id": user.id,
            "firstname": firstname,
            "lastname": user.lastname,
            "email": user.email,
        });
    }

    HttpResponse::Ok().json(obj)
}

#[derive(Debug, Deserialize)]
struct RegisterBody {
    name: String,
    lastname: String,
    email: String,
    password: String,
}

async fn handle_register(
    state: Data<Mutex<MockState>>,
    body: web::Json<RegisterBody>,
) -> HttpResponse {
    let mut state = state.lock().unwrap();

    if body.name.is_empty() || body.email.is_empty() {
        return bad_request("name and email are required");
    }
    if state.users.iter().any(|u| u.email == body.email) {
        return HttpResponse::Conflict().json(json!({ "error": "email already registered" }));
    }

    let id = state.next_id("u");
    let user = MockUser {
        id: id.clone(),
        firstname: body.name.clone(),
        lastname: body.lastname.clone(),
        email: body.email.clone(),
        password_hash: hash_password(&body.password, &body.email),
    };
    state.users.push(user);

    // The backend replies with the raw user document
    HttpResponse::Created().json(json!({
        "_id": { "$oid": id },
        "name": body.name,
        "lastname": body.lastname,
        "email": body.email,
    }))
}

async fn list_professions(
    req: HttpRequest,
    state: Data<Mutex<MockState>>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> HttpResponse {
    if let Err(resp) = bearer_claims(&req) {
        return resp;
    }
    let state = state.lock().unwrap();

    // The real backend expects this filter on every professions query
    let include_inactive = match query.get("include_inactive") {
        Some(value) => value == "true",
        None => return bad_request("include_inactive is required"),
    };

    let items = state
        .professions
        .iter()
        .filter(|p| include_inactive || p.active)
        .map(|p| profession_json(p, state.quirks))
        .collect();
    HttpResponse::Ok().json(list_body(items, state.quirks))
}

#[derive(Debug, Deserialize)]
struct ProfessionBody {
    name: String,
    active: bool,
}

async fn create_profession(
    req: HttpRequest,
    state: Data<Mutex<MockState>>,
    body: web::Json<ProfessionBody>,
) -> HttpResponse {
    if let Err(resp) = bearer_claims(&req) {
        return resp;
    }
    let mut state = state.lock().unwrap();

    if body.name.is_empty() {
        return bad_request("name is required");
    }

    let id = state.next_id("p");
    let profession = MockProfession {
        id,
        name: body.name.clone(),
        active: body.active,
    };
    state.professions.push(profession.clone());

    HttpResponse::Created().json(profession_json(&profession, state.quirks))
}

async fn update_profession(
    req: HttpRequest,
    state: Data<Mutex<MockState>>,
    path: web::Path<String>,
    body: web::Json<ProfessionBody>,
) -> HttpResponse {
    if let Err(resp) = bearer_claims(&req) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    let quirks = state.quirks;

    let id = path.into_inner();
    let profession = match state.professions.iter_mut().find(|p| p.id == id) {
        Some(profession) => profession,
        None => return HttpResponse::NotFound().json(json!({ "message": "profession not found" })),
    };

    profession.name = body.name.clone();
    profession.active = body.active;
    let updated = profession.clone();

    HttpResponse::Ok().json(profession_json(&updated, quirks))
}

async fn delete_profession(
    req: HttpRequest,
    state: Data<Mutex<MockState>>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = bearer_claims(&req) {
        return resp;
    }
    let mut state = state.lock().unwrap();

    let id = path.into_inner();
    if !state.professions.iter().any(|p| p.id == id) {
        return HttpResponse::NotFound().json(json!({ "message": "profession not found" }));
    }

    // Professions still referenced by offerings are disabled, not removed
    if state.offerings.iter().any(|o| o.profession_id == id) {
        let profession = state.professions.iter_mut().find(|p| p.id == id).unwrap();
        profession.active = false;
        return HttpResponse::Ok().json(json!({
            "softDisabled": true,
            "message": "profession is referenced by offerings, it was disabled",
        }));
    }

    state.professions.retain(|p| p.id != id);
    HttpResponse::Ok().json(json!({}))
}

async fn list_offerings(
    req: HttpRequest,
    state: Data<Mutex<MockState>>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> HttpResponse {
    if let Err(resp) = bearer_claims(&req) {
        return resp;
    }
    let state = state.lock().unwrap();

    let include_inactive = match query.get("include_inactive") {
        Some(value) => value == "true",
        None => false,
    };
    let profession = query.get("id_profession");

    let items = state
        .offerings
        .iter()
        .filter(|o| include_inactive || o.active)
        .filter(|o| profession.map_or(true, |id| &o.profession_id == id))
        .map(|o| offering_json(o, &state))
        .collect();
    HttpResponse::Ok().json(list_body(items, state.quirks))
}

#[derive(Debug, Deserialize)]
struct OfferingBody {
    description: String,
    estimated_price: f64,
    estimated_duration: f64,
    active: bool,
    id_profession: String,
}

async fn create_offering(
    req: HttpRequest,
    state: Data<Mutex<MockState>>,
    body: web::Json<OfferingBody>,
) -> HttpResponse {
    if let Err(resp) = bearer_claims(&req) {
        return resp;
    }
    let mut state = state.lock().unwrap();

    if body.description.is_empty() {
        return bad_request("description is required");
    }
    if body.estimated_price < 0.0 {
        return bad_request("estimated_price cannot be negative");
    }
    if !state.professions.iter().any(|p| p.id == body.id_profession) {
        return bad_request("unknown profession");
    }

    let id = state.next_id("o");
    let offering = MockOffering {
        id,
        description: body.description.clone(),
        estimated_price: body.estimated_price,
        estimated_duration: body.estimated_duration,
        active: body.active,
        profession_id: body.id_profession.clone(),
    };
    state.offerings.push(offering.clone());

    HttpResponse::Created().json(offering_json(&offering, &state))
}

async fn update_offering(
    req: HttpRequest,
    state: Data<Mutex<MockState>>,
    path: web::Path<String>,
    body: web::Json<OfferingBody>,
) -> HttpResponse {
    if let Err(resp) = bearer_claims(&req) {
        return resp;
    }
    let mut state = state.lock().unwrap();

    let id = path.into_inner();
    let offering = match state.offerings.iter_mut().find(|o| o.id == id) {
        Some(offering) => offering,
        None => return HttpResponse::NotFound().json(json!({ "message": "offering not found" })),
    };

    offering.description = body.description.clone();
    offering.estimated_price = body.estimated_price;
    offering.estimated_duration = body.estimated_duration;
    offering.active = body.active;
    offering.profession_id = body.id_profession.clone();
    let updated = offering.clone();

    HttpResponse::Ok().json(offering_json(&updated, &state))
}

async fn delete_offering(
    req: HttpRequest,
    state: Data<Mutex<MockState>>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = bearer_claims(&req) {
        return resp;
    }
    let mut state = state.lock().unwrap();

    let id = path.into_inner();
    if !state.offerings.iter().any(|o| o.id == id) {
        return HttpResponse::NotFound().json(json!({ "message": "offering not found" }));
    }

    state.offerings.retain(|o| o.id != id);
    // The real backend replies with an empty body here
    HttpResponse::Ok().finish()
}
