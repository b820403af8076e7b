//! Integration-test harness for the Sweet Shop client.
//!
//! Runs the SDK end-to-end against an in-process stub gateway: an axum
//! router that mimics the real REST surface (same endpoints, same snake_case
//! payloads, same `detail` error bodies) with all state held in memory.
//!
//! # Usage
//!
//! ```rust,ignore
//! let ctx = TestContext::new().await;
//! let sweet_id = ctx.stub.seed_sweet("Gulab Jamun", "traditional", 25.0, 10);
//! ctx.stub.seed_user("Jane", "jane@example.com", "pw123");
//!
//! ctx.shop.login("jane@example.com", "pw123").await?;
//! ctx.shop.add_to_cart(&sweet_id.into(), 2).await?;
//! ```
//!
//! The stub also exposes the knobs the error-path tests need: a request
//! counter (to prove an operation never touched the network), a switch that
//! makes logout answer 500, and session expiry (to provoke 401s).

// Test support crate: panicking on a broken stub is the desired behavior.
#![allow(clippy::unwrap_used, clippy::missing_panics_doc, clippy::missing_errors_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tempfile::TempDir;
use url::Url;

use sweetshop_client::{ClientConfig, SweetShop};

// =============================================================================
// TestContext
// =============================================================================

/// One stub gateway plus one SDK client pointed at it, with session state in
/// a throwaway directory.
pub struct TestContext {
    pub stub: StubGateway,
    pub shop: SweetShop,
    state_dir: TempDir,
}

impl TestContext {
    /// Spawn a stub gateway and build a client against it.
    pub async fn new() -> Self {
        let stub = StubGateway::spawn().await;
        let state_dir = TempDir::new().unwrap();
        let config = ClientConfig::new(stub.base_url(), state_dir.path().to_path_buf());
        let shop = SweetShop::new(&config).unwrap();
        Self {
            stub,
            shop,
            state_dir,
        }
    }

    /// Config pointing at this context's stub and state directory; used to
    /// construct a "restarted process" second client over the same durable
    /// session entries.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.stub.base_url(), self.state_dir.path().to_path_buf())
    }

    /// Whether the durable token entry currently exists on disk.
    #[must_use]
    pub fn token_entry_exists(&self) -> bool {
        self.state_dir.path().join("access_token").exists()
    }

    /// Whether the durable profile entry currently exists on disk.
    #[must_use]
    pub fn profile_entry_exists(&self) -> bool {
        self.state_dir.path().join("profile.json").exists()
    }
}

// =============================================================================
// Stub gateway
// =============================================================================

#[derive(Clone, Serialize)]
struct StubUser {
    id: String,
    name: String,
    email: String,
    role: String,
    avatar: Option<String>,
    provider: Option<String>,
    #[serde(skip)]
    password: String,
}

#[derive(Clone, Serialize)]
struct StubSweet {
    id: String,
    name: String,
    category: String,
    price: f64,
    original_price: Option<f64>,
    description: String,
    image: String,
    stock: u32,
    weight: String,
    ingredients: Vec<String>,
    featured: bool,
    rating: f64,
    reviews: u32,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
}

#[derive(Clone, Serialize)]
struct StubCartItem {
    sweet_id: String,
    quantity: u32,
    price: f64,
    name: String,
    image: String,
    weight: String,
}

#[derive(Clone, Serialize)]
struct StubWishlistItem {
    sweet_id: String,
    name: String,
    image: String,
    price: f64,
    added_at: chrono::DateTime<Utc>,
}

#[derive(Default)]
struct StubData {
    /// Keyed by email.
    users: HashMap<String, StubUser>,
    /// Token -> user id.
    tokens: HashMap<String, String>,
    /// User id -> cart lines.
    carts: HashMap<String, Vec<StubCartItem>>,
    /// User id -> wishlist lines.
    wishlists: HashMap<String, Vec<StubWishlistItem>>,
    sweets: Vec<StubSweet>,
    /// User id -> orders (stored as response JSON).
    orders: HashMap<String, Vec<Value>>,
}

struct StubShared {
    data: Mutex<StubData>,
    request_count: AtomicUsize,
    fail_logout: AtomicBool,
}

type SharedState = Arc<StubShared>;

/// In-process stand-in for the Sweet Shop REST gateway.
pub struct StubGateway {
    addr: SocketAddr,
    shared: SharedState,
}

impl StubGateway {
    /// Bind an ephemeral port and start serving. The task dies with the
    /// test process; no shutdown plumbing is needed.
    pub async fn spawn() -> Self {
        let shared: SharedState = Arc::new(StubShared {
            data: Mutex::new(StubData::default()),
            request_count: AtomicUsize::new(0),
            fail_logout: AtomicBool::new(false),
        });

        let app = router(shared.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, shared }
    }

    #[must_use]
    pub fn base_url(&self) -> Url {
        format!("http://{}", self.addr).parse().unwrap()
    }

    /// Total requests observed, across every endpoint.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.shared.request_count.load(Ordering::SeqCst)
    }

    /// Make every subsequent `POST /auth/logout` answer 500.
    pub fn fail_logout(&self) {
        self.shared.fail_logout.store(true, Ordering::SeqCst);
    }

    /// Drop every issued token so the next authenticated call gets a 401.
    pub fn expire_sessions(&self) {
        self.shared.data.lock().unwrap().tokens.clear();
    }

    /// Create an account directly (bypassing the register endpoint).
    pub fn seed_user(&self, name: &str, email: &str, password: &str) {
        let mut data = self.shared.data.lock().unwrap();
        data.users.insert(
            email.to_string(),
            StubUser {
                id: uuid::Uuid::new_v4().to_string(),
                name: name.to_string(),
                email: email.to_string(),
                role: "user".to_string(),
                avatar: None,
                provider: Some("email".to_string()),
                password: password.to_string(),
            },
        );
    }

    /// Add a sweet to the catalog and return its ID.
    pub fn seed_sweet(&self, name: &str, category: &str, price: f64, stock: u32) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        self.shared.data.lock().unwrap().sweets.push(StubSweet {
            id: id.clone(),
            name: name.to_string(),
            category: category.to_string(),
            price,
            original_price: None,
            description: format!("{name} from the test kitchen"),
            image: format!("https://img.test/{id}.jpg"),
            stock,
            weight: "250g".to_string(),
            ingredients: vec!["sugar".to_string(), "ghee".to_string()],
            featured: false,
            rating: 4.5,
            reviews: 3,
            created_at: now,
            updated_at: now,
        });
        id
    }
}

// =============================================================================
// Router
// =============================================================================

fn router(shared: SharedState) -> Router {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/social-login", post(social_login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
        .route("/api/sweets/", get(list_sweets))
        .route("/api/sweets/{id}", get(get_sweet))
        .route("/api/categories/", get(list_categories))
        .route("/api/cart/", get(get_cart))
        .route("/api/cart/add", post(cart_add))
        .route("/api/cart/item/{id}", put(cart_update).delete(cart_remove))
        .route("/api/cart/clear", delete(cart_clear))
        .route("/api/wishlist/", get(get_wishlist))
        .route("/api/wishlist/add/{id}", post(wishlist_add))
        .route("/api/wishlist/remove/{id}", delete(wishlist_remove))
        .route("/api/wishlist/clear", delete(wishlist_clear))
        .route("/api/orders/", get(list_orders).post(place_order))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/cancel", patch(cancel_order))
        .layer(axum::middleware::from_fn_with_state(
            shared.clone(),
            count_requests,
        ))
        .with_state(shared)
}

async fn count_requests(
    State(shared): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    shared.request_count.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

type Reject = (StatusCode, Json<Value>);

fn detail(status: StatusCode, message: &str) -> Reject {
    (status, Json(json!({ "detail": message })))
}

/// Resolve the bearer token to a user, exactly as strictly as the real
/// gateway: missing, malformed, or unknown tokens are all 401.
fn authed_user(data: &StubData, headers: &HeaderMap) -> Result<StubUser, Reject> {
    let token = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Not authenticated"))?;

    let user_id = data
        .tokens
        .get(token)
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"))?;

    data.users
        .values()
        .find(|user| &user.id == user_id)
        .cloned()
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
}

fn issue_token(data: &mut StubData, user_id: &str) -> String {
    let token = uuid::Uuid::new_v4().to_string();
    data.tokens.insert(token.clone(), user_id.to_string());
    token
}

fn token_response(token: String, user: &StubUser) -> Json<Value> {
    Json(json!({
        "access_token": token,
        "token_type": "bearer",
        "user": user,
    }))
}

fn cart_json(user_id: &str, items: &[StubCartItem]) -> Json<Value> {
    let total: f64 = items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum();
    Json(json!({
        "id": format!("cart-{user_id}"),
        "user_id": user_id,
        "items": items,
        "total": total,
        "created_at": Utc::now(),
        "updated_at": Utc::now(),
    }))
}

fn wishlist_json(user_id: &str, items: &[StubWishlistItem]) -> Json<Value> {
    Json(json!({
        "id": format!("wishlist-{user_id}"),
        "user_id": user_id,
        "items": items,
        "created_at": Utc::now(),
        "updated_at": Utc::now(),
    }))
}

// =============================================================================
// Auth handlers
// =============================================================================

#[derive(Deserialize)]
struct RegisterBody {
    name: String,
    email: String,
    password: String,
    avatar: Option<String>,
}

async fn register(
    State(shared): State<SharedState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<Value>, Reject> {
    let mut data = shared.data.lock().unwrap();
    if data.users.contains_key(&body.email) {
        return Err(detail(StatusCode::BAD_REQUEST, "Email already registered"));
    }

    let user = StubUser {
        id: uuid::Uuid::new_v4().to_string(),
        name: body.name,
        email: body.email.clone(),
        role: "user".to_string(),
        avatar: body.avatar,
        provider: Some("email".to_string()),
        password: body.password,
    };
    data.users.insert(body.email, user.clone());
    let token = issue_token(&mut data, &user.id);
    Ok(token_response(token, &user))
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(
    State(shared): State<SharedState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<Value>, Reject> {
    let mut data = shared.data.lock().unwrap();
    let user = match data.users.get(&body.email) {
        Some(user) if user.password == body.password => user.clone(),
        _ => {
            return Err(detail(
                StatusCode::UNAUTHORIZED,
                "Invalid email or password",
            ));
        }
    };
    let token = issue_token(&mut data, &user.id);
    Ok(token_response(token, &user))
}

#[derive(Deserialize)]
struct SocialLoginBody {
    provider: String,
    name: String,
    email: String,
    avatar: Option<String>,
}

async fn social_login(
    State(shared): State<SharedState>,
    Json(body): Json<SocialLoginBody>,
) -> Result<Json<Value>, Reject> {
    let mut data = shared.data.lock().unwrap();
    let user = data
        .users
        .entry(body.email.clone())
        .and_modify(|user| {
            user.name.clone_from(&body.name);
            user.avatar.clone_from(&body.avatar);
        })
        .or_insert_with(|| StubUser {
            id: uuid::Uuid::new_v4().to_string(),
            name: body.name,
            email: body.email.clone(),
            role: "user".to_string(),
            avatar: body.avatar,
            provider: Some(body.provider),
            password: String::new(),
        })
        .clone();
    let token = issue_token(&mut data, &user.id);
    Ok(token_response(token, &user))
}

async fn me(State(shared): State<SharedState>, headers: HeaderMap) -> Result<Json<Value>, Reject> {
    let data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;
    Ok(Json(json!(user)))
}

async fn logout(State(shared): State<SharedState>) -> Result<Json<Value>, Reject> {
    if shared.fail_logout.load(Ordering::SeqCst) {
        return Err(detail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Logout unavailable",
        ));
    }
    Ok(Json(json!({
        "message": "Logged out successfully",
        "success": true,
    })))
}

// =============================================================================
// Catalog handlers
// =============================================================================

#[derive(Deserialize)]
struct SweetFilters {
    category: Option<String>,
    search: Option<String>,
    featured: Option<bool>,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

async fn list_sweets(
    State(shared): State<SharedState>,
    Query(filters): Query<SweetFilters>,
) -> Json<Value> {
    let data = shared.data.lock().unwrap();
    let mut sweets: Vec<StubSweet> = data
        .sweets
        .iter()
        .filter(|sweet| {
            filters
                .category
                .as_ref()
                .is_none_or(|category| &sweet.category == category)
                && filters.search.as_ref().is_none_or(|needle| {
                    let needle = needle.to_lowercase();
                    sweet.name.to_lowercase().contains(&needle)
                        || sweet.description.to_lowercase().contains(&needle)
                })
                && filters
                    .featured
                    .is_none_or(|featured| sweet.featured == featured)
                && filters.min_price.is_none_or(|min| sweet.price >= min)
                && filters.max_price.is_none_or(|max| sweet.price <= max)
        })
        .cloned()
        .collect();
    sweets.sort_by(|a, b| a.name.cmp(&b.name));
    Json(json!(sweets))
}

async fn get_sweet(
    State(shared): State<SharedState>,
    Path(sweet_id): Path<String>,
) -> Result<Json<Value>, Reject> {
    let data = shared.data.lock().unwrap();
    data.sweets
        .iter()
        .find(|sweet| sweet.id == sweet_id)
        .map(|sweet| Json(json!(sweet)))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Sweet not found"))
}

async fn list_categories(State(shared): State<SharedState>) -> Json<Value> {
    let data = shared.data.lock().unwrap();
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for sweet in &data.sweets {
        *counts.entry(sweet.category.as_str()).or_default() += 1;
    }
    let categories: Vec<Value> = counts
        .into_iter()
        .map(|(name, count)| {
            json!({
                "id": format!("category-{name}"),
                "name": name,
                "icon": "🍬",
                "description": null,
                "count": count,
                "created_at": Utc::now(),
            })
        })
        .collect();
    Json(json!(categories))
}

// =============================================================================
// Cart handlers
// =============================================================================

async fn get_cart(
    State(shared): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Value>, Reject> {
    let data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;
    let items = data.carts.get(&user.id).cloned().unwrap_or_default();
    Ok(cart_json(&user.id, &items))
}

#[derive(Deserialize)]
struct CartAddBody {
    sweet_id: String,
    quantity: u32,
}

async fn cart_add(
    State(shared): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<CartAddBody>,
) -> Result<Json<Value>, Reject> {
    let mut data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;

    let sweet = data
        .sweets
        .iter()
        .find(|sweet| sweet.id == body.sweet_id)
        .cloned()
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Sweet not found"))?;
    if sweet.stock < body.quantity {
        return Err(detail(
            StatusCode::BAD_REQUEST,
            "Not enough stock available",
        ));
    }

    let items = data.carts.entry(user.id.clone()).or_default();
    if let Some(line) = items.iter_mut().find(|line| line.sweet_id == body.sweet_id) {
        line.quantity += body.quantity;
    } else {
        items.push(StubCartItem {
            sweet_id: sweet.id,
            quantity: body.quantity,
            price: sweet.price,
            name: sweet.name,
            image: sweet.image,
            weight: sweet.weight,
        });
    }
    let items = items.clone();
    Ok(cart_json(&user.id, &items))
}

#[derive(Deserialize)]
struct CartUpdateBody {
    quantity: u32,
}

async fn cart_update(
    State(shared): State<SharedState>,
    Path(sweet_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<CartUpdateBody>,
) -> Result<Json<Value>, Reject> {
    let mut data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;

    let stock = data
        .sweets
        .iter()
        .find(|sweet| sweet.id == sweet_id)
        .map(|sweet| sweet.stock);

    let items = data
        .carts
        .get_mut(&user.id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Cart not found"))?;
    let index = items
        .iter()
        .position(|line| line.sweet_id == sweet_id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Item not found in cart"))?;

    if body.quantity == 0 {
        items.remove(index);
    } else {
        if stock.is_some_and(|stock| stock < body.quantity) {
            return Err(detail(
                StatusCode::BAD_REQUEST,
                "Not enough stock available",
            ));
        }
        if let Some(line) = items.get_mut(index) {
            line.quantity = body.quantity;
        }
    }
    let items = items.clone();
    Ok(cart_json(&user.id, &items))
}

async fn cart_remove(
    State(shared): State<SharedState>,
    Path(sweet_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, Reject> {
    let mut data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;

    let items = data.carts.entry(user.id.clone()).or_default();
    items.retain(|line| line.sweet_id != sweet_id);
    let items = items.clone();
    Ok(cart_json(&user.id, &items))
}

async fn cart_clear(
    State(shared): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Value>, Reject> {
    let mut data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;
    data.carts.insert(user.id, Vec::new());
    Ok(Json(json!({
        "message": "Cart cleared successfully",
        "success": true,
    })))
}

// =============================================================================
// Wishlist handlers
// =============================================================================

async fn get_wishlist(
    State(shared): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Value>, Reject> {
    let data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;
    let items = data.wishlists.get(&user.id).cloned().unwrap_or_default();
    Ok(wishlist_json(&user.id, &items))
}

async fn wishlist_add(
    State(shared): State<SharedState>,
    Path(sweet_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, Reject> {
    let mut data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;

    let sweet = data
        .sweets
        .iter()
        .find(|sweet| sweet.id == sweet_id)
        .cloned()
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Sweet not found"))?;

    let items = data.wishlists.entry(user.id.clone()).or_default();
    if items.iter().any(|line| line.sweet_id == sweet_id) {
        return Err(detail(StatusCode::BAD_REQUEST, "Item already in wishlist"));
    }
    items.push(StubWishlistItem {
        sweet_id: sweet.id,
        name: sweet.name,
        image: sweet.image,
        price: sweet.price,
        added_at: Utc::now(),
    });
    let items = items.clone();
    Ok(wishlist_json(&user.id, &items))
}

async fn wishlist_remove(
    State(shared): State<SharedState>,
    Path(sweet_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, Reject> {
    let mut data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;
    let items = data.wishlists.entry(user.id.clone()).or_default();
    items.retain(|line| line.sweet_id != sweet_id);
    let items = items.clone();
    Ok(wishlist_json(&user.id, &items))
}

async fn wishlist_clear(
    State(shared): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Value>, Reject> {
    let mut data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;
    data.wishlists.insert(user.id, Vec::new());
    Ok(Json(json!({
        "message": "Wishlist cleared successfully",
        "success": true,
    })))
}

// =============================================================================
// Order handlers
// =============================================================================

async fn list_orders(
    State(shared): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Value>, Reject> {
    let data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;
    let orders = data.orders.get(&user.id).cloned().unwrap_or_default();
    Ok(Json(json!(orders)))
}

#[derive(Deserialize)]
struct PlaceOrderBody {
    address: String,
    phone: String,
    notes: Option<String>,
}

async fn place_order(
    State(shared): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<PlaceOrderBody>,
) -> Result<Json<Value>, Reject> {
    let mut data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;

    let items = data.carts.get(&user.id).cloned().unwrap_or_default();
    if items.is_empty() {
        return Err(detail(StatusCode::BAD_REQUEST, "Cart is empty"));
    }

    let total: f64 = items
        .iter()
        .map(|line| line.price * f64::from(line.quantity))
        .sum();
    let order_items: Vec<Value> = items
        .iter()
        .map(|line| {
            json!({
                "sweet_id": line.sweet_id,
                "name": line.name,
                "quantity": line.quantity,
                "price": line.price,
                "image": line.image,
            })
        })
        .collect();
    let order = json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "user_id": user.id,
        "items": order_items,
        "total": total,
        "status": "pending",
        "address": body.address,
        "phone": body.phone,
        "notes": body.notes,
        "created_at": Utc::now(),
        "updated_at": Utc::now(),
    });

    for line in &items {
        if let Some(sweet) = data.sweets.iter_mut().find(|sweet| sweet.id == line.sweet_id) {
            sweet.stock = sweet.stock.saturating_sub(line.quantity);
        }
    }
    data.carts.insert(user.id.clone(), Vec::new());
    data.orders
        .entry(user.id)
        .or_default()
        .push(order.clone());

    Ok(Json(order))
}

async fn get_order(
    State(shared): State<SharedState>,
    Path(order_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, Reject> {
    let data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;
    data.orders
        .get(&user.id)
        .and_then(|orders| {
            orders
                .iter()
                .find(|order| order["id"].as_str() == Some(order_id.as_str()))
        })
        .map(|order| Json(order.clone()))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Order not found"))
}

async fn cancel_order(
    State(shared): State<SharedState>,
    Path(order_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, Reject> {
    let mut data = shared.data.lock().unwrap();
    let user = authed_user(&data, &headers)?;
    let orders = data
        .orders
        .get_mut(&user.id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Order not found"))?;
    let order = orders
        .iter_mut()
        .find(|order| order["id"].as_str() == Some(order_id.as_str()))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Order not found"))?;

    if order["status"] != json!("pending") {
        return Err(detail(
            StatusCode::BAD_REQUEST,
            "Only pending orders can be cancelled",
        ));
    }
    order["status"] = json!("cancelled");
    order["updated_at"] = json!(Utc::now());
    Ok(Json(order.clone()))
}
