use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use domain::models::{Tier, TierHandle};
use domain::repositories::{
    DeviceRepository, GeofenceRepository, InMemoryDeviceRepository, InMemoryGeofenceRepository,
    InMemoryPetRepository, InMemoryUserRepository, PetRepository, UserRepository,
};
use domain::services::{AuthFlow, AuthProvider, PairingService};
use persistence::repositories::{
    PgDeviceRepository, PgDocumentStore, PgGeofenceRepository, PgPetRepository, PgUserRepository,
};
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_user_auth, trace_id,
    RateLimiterState,
};
use crate::routes::{auth, devices, geofences, health, home, pets, session, users};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub users: Arc<dyn UserRepository>,
    pub pets: Arc<dyn PetRepository>,
    pub devices: Arc<dyn DeviceRepository>,
    pub geofences: Arc<dyn GeofenceRepository>,
    pub auth: Arc<dyn AuthProvider>,
    /// Present when documents live in PostgreSQL.
    pub pool: Option<PgPool>,
    pub auth_rate_limiter: Option<Arc<RateLimiterState>>,
}

impl AppState {
    /// Auth flow for one request, with the session starting at `tier`.
    pub fn auth_flow(&self, tier: Tier) -> AuthFlow {
        AuthFlow::new(
            Arc::clone(&self.users),
            Arc::clone(&self.auth),
            TierHandle::new(tier),
        )
    }

    pub fn pairing(&self) -> PairingService {
        PairingService::new(Arc::clone(&self.pets), Arc::clone(&self.devices))
    }
}

/// Storage and identity backends the router runs against.
pub struct Backends {
    pub users: Arc<dyn UserRepository>,
    pub pets: Arc<dyn PetRepository>,
    pub devices: Arc<dyn DeviceRepository>,
    pub geofences: Arc<dyn GeofenceRepository>,
    pub auth: Arc<dyn AuthProvider>,
    pub pool: Option<PgPool>,
}

impl Backends {
    pub fn in_memory(auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            pets: Arc::new(InMemoryPetRepository::new()),
            devices: Arc::new(InMemoryDeviceRepository::new()),
            geofences: Arc::new(InMemoryGeofenceRepository::new()),
            auth,
            pool: None,
        }
    }

    pub fn postgres(store: PgDocumentStore, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(store.clone())),
            pets: Arc::new(PgPetRepository::new(store.clone())),
            devices: Arc::new(PgDeviceRepository::new(store.clone())),
            geofences: Arc::new(PgGeofenceRepository::new(store.clone())),
            auth,
            pool: Some(store.pool().clone()),
        }
    }
}

pub fn build_state(config: Config, backends: Backends) -> Result<AppState, JwtError> {
    let jwt = JwtConfig::with_leeway(
        &config.jwt.private_key,
        &config.jwt.public_key,
        config.jwt.access_token_expiry_secs,
        config.jwt.refresh_token_expiry_secs,
        config.jwt.leeway_secs,
    )?;
    let auth_rate_limiter =
        RateLimiterState::new(config.security.auth_rate_limit_per_minute).map(Arc::new);

    Ok(AppState {
        config: Arc::new(config),
        jwt: Arc::new(jwt),
        users: backends.users,
        pets: backends.pets,
        devices: backends.devices,
        geofences: backends.geofences,
        auth: backends.auth,
        pool: backends.pool,
        auth_rate_limiter,
    })
}

pub fn create_app(config: Config, backends: Backends) -> Result<Router, JwtError> {
    Ok(create_app_with_state(build_state(config, backends)?))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn create_app_with_state(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let auth_routes = Router::new()
        .route("/api/v1/auth/signup", post(auth::sign_up))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/google", post(auth::google_sign_in))
        .route("/api/v1/auth/google/signup", post(auth::google_sign_up))
        .route("/api/v1/auth/password-reset", post(auth::request_password_reset))
        .route(
            "/api/v1/auth/password-reset/confirm",
            post(auth::confirm_password_reset),
        )
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    let protected_routes = Router::new()
        .route("/api/v1/home", get(home::get_home))
        .route("/api/v1/tier", get(home::get_tier))
        .route(
            "/api/v1/users/me",
            get(users::get_current_user).put(users::update_current_user),
        )
        .route("/api/v1/users/me/profile", post(users::complete_profile))
        .route("/api/v1/users/me/tier", put(users::update_tier))
        .route("/api/v1/pets", get(pets::list_pets).post(pets::create_pet))
        .route(
            "/api/v1/pets/:pet_id",
            get(pets::get_pet)
                .put(pets::update_pet)
                .delete(pets::delete_pet),
        )
        .route("/api/v1/pets/:pet_id/device", put(pets::update_pet_device))
        .route(
            "/api/v1/devices",
            get(devices::list_devices).post(devices::pair_device),
        )
        .route(
            "/api/v1/devices/:device_id",
            get(devices::get_device)
                .put(devices::update_device)
                .delete(devices::delete_device),
        )
        .route(
            "/api/v1/devices/:device_id/status",
            patch(devices::update_device_status),
        )
        .route(
            "/api/v1/geofences",
            get(geofences::list_geofences).post(geofences::create_geofence),
        )
        .route(
            "/api/v1/geofences/:geofence_id",
            get(geofences::get_geofence).delete(geofences::delete_geofence),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/api/v1/session", get(session::get_session))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config.security.cors_origins))
        .with_state(state)
}
