//! Tally Web Server
//!
//! Axum-based REST API for the Tally personal finance tracker.
//!
//! Security features:
//! - Cloudflare Access or API-key authentication (use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Input validation (pagination limits, body size limits)
//! - Audit logging for every mutation
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{debug, error, info, warn};

use tally_core::{Database, Tracker};

mod handlers;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Maximum accepted JSON body (64 KB)
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Identity used for every request when auth is disabled
pub const LOCAL_DEV_USER: &str = "local-dev";

/// Cloudflare Access header for authenticated user email
const CF_ACCESS_USER_HEADER: &str = "cf-access-authenticated-user-email";

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// An API key and the user it authenticates as
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey {
    pub key: String,
    pub user: String,
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only in production)
    pub allowed_origins: Vec<String>,
    /// API keys for service access (alternative to Cloudflare Access)
    /// Format: "Bearer <key>" in Authorization header
    pub api_keys: Vec<ApiKey>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub tracker: Tracker,
    pub config: ServerConfig,
}

/// How a request's identity was established
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    CloudflareHeader,
    ApiKey,
    None,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CloudflareHeader => "cloudflare_header",
            Self::ApiKey => "api_key",
            Self::None => "none",
        }
    }
}

/// Caller identity resolved by [`auth_middleware`], stored as a request extension
#[derive(Clone, Debug)]
pub struct Caller {
    pub user: Option<String>,
    pub method: AuthMethod,
}

impl Caller {
    pub fn id(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

/// Authentication middleware - resolves the caller from Cloudflare Access
/// headers or API keys
///
/// The middleware never rejects on its own. A request with no usable identity
/// carries `Caller { user: None }` and is refused with 401 by the first
/// operation that needs a caller.
///
/// **Cloudflare Access headers**: The `CF-Access-Authenticated-User-Email` header
/// is safe behind Cloudflare Tunnel (which strips/rewrites CF headers), but can
/// be spoofed if the server is exposed directly to the internet.
///
/// **API keys**: Compared using constant-time comparison to prevent timing attacks.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let caller = resolve_caller(&request, &state.config);
    match caller.id() {
        Some(user) => debug!(user = %user, method = caller.method.as_str(), path = %request.uri().path(), "Authenticated"),
        None => debug!(path = %request.uri().path(), "Anonymous request"),
    }
    request.extensions_mut().insert(caller);
    next.run(request).await
}

fn resolve_caller(request: &Request, config: &ServerConfig) -> Caller {
    if !config.require_auth {
        return Caller {
            user: Some(LOCAL_DEV_USER.to_string()),
            method: AuthMethod::None,
        };
    }

    let cf_user = request
        .headers()
        .get(CF_ACCESS_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());

    if let Some(email) = cf_user {
        return Caller {
            user: Some(email.to_string()),
            method: AuthMethod::CloudflareHeader,
        };
    }

    let bearer = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "));

    if let Some(key) = bearer {
        match validate_api_key(key, &config.api_keys) {
            Some(user) => {
                return Caller {
                    user: Some(user.to_string()),
                    method: AuthMethod::ApiKey,
                }
            }
            None => warn!(path = %request.uri().path(), "Rejected invalid API key"),
        }
    }

    Caller {
        user: None,
        method: AuthMethod::None,
    }
}

/// Validate an API key against the configured keys using constant-time comparison
/// to prevent timing attacks. Returns the user the key maps to.
fn validate_api_key<'a>(provided: &str, valid_keys: &'a [ApiKey]) -> Option<&'a str> {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    let mut matched = None;
    for entry in valid_keys {
        let key_bytes = entry.key.as_bytes();
        // Only compare if lengths match (constant-time for same-length keys)
        if provided_bytes.len() == key_bytes.len() && bool::from(provided_bytes.ct_eq(key_bytes)) {
            matched = Some(entry.user.as_str());
        }
    }
    matched
}

/// Parse a comma-separated list of `key=user` pairs
///
/// Entries without a user or with an empty key are skipped with a warning.
pub fn parse_api_keys(input: &str) -> Vec<ApiKey> {
    input
        .split(',')
        .filter_map(|s| {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            match s.split_once('=') {
                Some((key, user)) if !key.trim().is_empty() && !user.trim().is_empty() => {
                    Some(ApiKey {
                        key: key.trim().to_string(),
                        user: user.trim().to_string(),
                    })
                }
                _ => {
                    warn!("Skipping malformed API key entry (expected key=user)");
                    None
                }
            }
        })
        .collect()
}

/// The caller attached by [`auth_middleware`]
pub(crate) fn caller_of(request: &Request) -> Caller {
    request
        .extensions()
        .get::<Caller>()
        .cloned()
        .unwrap_or(Caller {
            user: None,
            method: AuthMethod::None,
        })
}

/// Read and parse a JSON request body
pub(crate) async fn read_json<T: DeserializeOwned>(request: Request) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))
}

/// Record a completed mutation for the caller
pub(crate) fn audit(
    state: &AppState,
    caller: &Caller,
    action: &str,
    entity_type: &str,
    entity_id: Option<i64>,
    details: Option<&str>,
) -> Result<(), AppError> {
    if let Some(user) = caller.id() {
        state
            .db
            .log_audit(user, action, Some(entity_type), entity_id, details)?;
    }
    Ok(())
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    create_router_with_tracker(Tracker::new(db), static_dir, config)
}

/// Create the application router around an existing tracker (for testing)
pub fn create_router_with_tracker(
    tracker: Tracker,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Router {
    let state = Arc::new(AppState {
        db: tracker.db().clone(),
        tracker,
        config: config.clone(),
    });

    let api_routes = Router::new()
        // Auth
        .route("/me", get(handlers::get_me))
        // Categories
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/categories/defaults", post(handlers::seed_categories))
        .route(
            "/categories/:id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        // Transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/transactions/recent", get(handlers::recent_transactions))
        .route(
            "/transactions/:id",
            get(handlers::get_transaction)
                .put(handlers::update_transaction)
                .delete(handlers::delete_transaction),
        )
        // Budgets
        .route(
            "/budgets",
            get(handlers::list_budgets).put(handlers::set_budget),
        )
        .route("/budgets/lookup", get(handlers::lookup_budget))
        .route(
            "/budgets/:id",
            axum::routing::delete(handlers::delete_budget),
        )
        // Summaries
        .route("/summary/monthly", get(handlers::monthly_summary))
        .route("/summary/yearly", get(handlers::yearly_summary))
        .route("/summary/all-time", get(handlers::all_time_summary))
        .route("/spending", get(handlers::spending_by_category))
        // Savings goals
        .route(
            "/goals",
            get(handlers::list_goals).post(handlers::create_goal),
        )
        .route(
            "/goals/:id",
            get(handlers::get_goal)
                .put(handlers::update_goal)
                .delete(handlers::delete_goal),
        )
        .route("/goals/:id/progress", post(handlers::update_goal_progress))
        // Preferences
        .route(
            "/preferences",
            get(handlers::get_preferences).patch(handlers::update_preferences),
        )
        // Audit log
        .route("/audit", get(handlers::list_audit_log));

    // Build CORS layer
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        // Allow specified origins
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    // CSP: same-origin only, inline styles allowed for the dashboard
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'"
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(db, host, port, static_dir, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - every request acts as '{}'", LOCAL_DEV_USER);
    } else if config.api_keys.is_empty() {
        info!("No API keys configured; only Cloudflare Access identities are accepted");
    }

    let app = create_router(db, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn conflict(msg: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Domain errors are user-facing; everything else stays internal
        if let Some(core) = err.downcast_ref::<tally_core::Error>() {
            use tally_core::Error as CoreError;
            let message = core.to_string();
            match core {
                CoreError::Unauthenticated => return Self::unauthorized(&message),
                CoreError::NotFoundOrUnauthorized { .. } => return Self::not_found(&message),
                CoreError::InvalidCategory | CoreError::InvalidData(_) => {
                    return Self::bad_request(&message)
                }
                CoreError::ProtectedDefault => return Self::conflict(&message),
                _ => {}
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
