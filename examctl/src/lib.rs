//! # examctl: Exam Registration Platform Backend
//!
//! `examctl` is the authoritative backend for an exam registration platform. It provides a
//! RESTful API for exam management, the registration and payment lifecycle, admin enrollment
//! (including bulk operations), and a small CMS for public-facing content.
//!
//! ## Overview
//!
//! Exam providers need one system of record for who is registered for which exam, how far
//! through the payment flow each registration has progressed, and who has ultimately been
//! enrolled. This crate is that system of record: every state a registration can be in, and
//! every transition between states, is owned and enforced here.
//!
//! ### What It Does
//!
//! At its core, `examctl` authenticates users via Google-asserted identities, lets them
//! register for active exams once their profile is complete, and walks each registration
//! through a strict lifecycle: `REGISTERED` → `PAYMENT_PENDING` → `PAID` → `ENROLLED`.
//! Transitions only move forward and are enforced atomically, so double payments and
//! double enrollments are structurally impossible rather than merely discouraged.
//! Administrators manage exams, enroll registrations individually or in bulk, export
//! registration rosters as CSV, and publish CMS content (courses, blog posts, galleries)
//! through a one-way draft-to-published workflow.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer
//! with a concurrent in-memory store for persistence.
//!
//! ### Request Flow
//!
//! A request first passes through the session extractor, which validates the bearer token
//! and re-loads the user record so role changes take effect immediately. The handler then
//! performs a role check (USER or ADMIN) before touching any state, so a denied caller
//! learns nothing about the resources involved. Handlers interact with the store through
//! repository interfaces; lifecycle transitions are compare-and-swap operations that fail
//! with a conflict when the record has moved on.
//!
//! ### Core Components
//!
//! The **API layer** ([`api`]) exposes three surfaces: a public one (login, published
//! content), an authenticated one (profile, exams, payments), and an admin one under
//! `/admin/*` (registration management, enrollment, CMS authoring).
//!
//! The **authentication layer** ([`auth`]) issues and validates signed session tokens and
//! centralizes the role-based authorization rules for every operation.
//!
//! The **store layer** ([`store`]) uses the repository pattern over concurrent maps. Each
//! entity (users, exams, registrations, content) has a corresponding repository that
//! handles lookups, filtered listings, and atomic status transitions.
//!
//! The **payments layer** ([`payments`]) is the seam for payment gateways; the bundled
//! provider accepts everything, which is enough for the lifecycle to be exercised end to
//! end until a real gateway is wired in.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use examctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Parse CLI arguments and load configuration
//!     let args = examctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     // Initialize telemetry (structured logging)
//!     examctl::telemetry::init_telemetry()?;
//!
//!     // Create and start the application
//!     let app = Application::new(config).await?;
//!
//!     // Run with graceful shutdown on Ctrl+C
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod payments;
pub mod store;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use crate::{
    api::models::users::Role,
    payments::PaymentProvider,
    store::{
        handlers::Repository,
        models::users::{UserCreateStoreRequest, UserUpdateStoreRequest},
        Store,
    },
};
use anyhow::Context;
use axum::http::HeaderValue;
use axum::{
    http,
    routing::{get, post, put},
    Router,
};
use bon::Builder;
pub use config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, instrument, Level};

pub use types::{ContentId, ExamId, RegistrationId, UserId};

/// Application state shared across all request handlers.
///
/// This struct contains all the shared resources needed by the API handlers:
/// the record store, the loaded configuration, and the payment provider.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .store(store)
///     .config(config)
///     .payments(payments::create_provider())
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Store,
    pub config: Config,
    pub payments: Arc<dyn PaymentProvider>,
}

/// Create the initial admin user if it doesn't exist.
///
/// This function is idempotent - it creates the admin account on first startup
/// and promotes an existing account with the configured email on later ones.
/// It is called during application startup to ensure there's always an admin
/// user available.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(email: &str, name: &str, store: &Store) -> anyhow::Result<UserId> {
    let mut users = store.users();

    if let Some(existing) = users.get_by_email(email).await? {
        if existing.role != Role::Admin {
            users
                .update(
                    existing.id,
                    &UserUpdateStoreRequest {
                        role: Some(Role::Admin),
                        ..Default::default()
                    },
                )
                .await
                .context("promote initial admin user")?;
            info!("Promoted existing user {} to admin", email);
        }
        return Ok(existing.id);
    }

    let created = users
        .create(&UserCreateStoreRequest {
            email: email.to_string(),
            name: name.to_string(),
            role: Role::Admin,
            mobile: None,
        })
        .await
        .context("create initial admin user")?;

    info!("Created initial admin user {}", email);
    Ok(created.id)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    if config.cors_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let mut origins = Vec::new();
    for origin in &config.cors_origins {
        let header_value = origin
            .parse::<HeaderValue>()
            .with_context(|| format!("Invalid CORS origin: {origin}"))?;
        origins.push(header_value);
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT])
        .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE]))
}

/// Build the main application router with all endpoints and middleware.
///
/// This function constructs the complete Axum router with:
/// - Public routes (health, login, published content)
/// - Authenticated routes (profile, exams, registration, payments)
/// - Admin routes (registration management, enrollment, CMS)
/// - CORS configuration
/// - Tracing middleware
///
/// # Errors
///
/// Returns an error if the CORS configuration is invalid.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    // Public surface: health, login, published content
    let public_routes = Router::new()
        .route("/", get(api::handlers::health::root))
        .route("/health", get(api::handlers::health::health))
        .route("/auth/google", post(api::handlers::auth::google_login))
        .route("/content", get(api::handlers::contents::list_published_content))
        .route("/content/{content_id}", get(api::handlers::contents::get_published_content));

    // Authenticated surface: profile, exams, and the payment flow
    let user_routes = Router::new()
        .route("/auth/me", get(api::handlers::auth::me))
        .route("/auth/mobile", post(api::handlers::auth::update_mobile))
        .route("/auth/me/registrations", get(api::handlers::auth::my_registrations))
        .route("/exams", get(api::handlers::exams::list_exams))
        // Static segment, so it cannot collide with /exams/{exam_id}
        .route("/exams/admin", post(api::handlers::exams::create_exam))
        .route(
            "/exams/{exam_id}",
            get(api::handlers::exams::get_exam).put(api::handlers::exams::update_exam),
        )
        .route("/exams/{exam_id}/register", post(api::handlers::exams::register_for_exam))
        .route(
            "/payments/registrations/{registration_id}/pay",
            post(api::handlers::payments::initiate_payment),
        )
        .route("/payments/{registration_id}/confirm", post(api::handlers::payments::confirm_payment));

    // Admin surface: registration operations and the CMS
    let admin_routes = Router::new()
        .route(
            "/admin/exams/{exam_id}/registrations",
            get(api::handlers::registrations::list_exam_registrations),
        )
        .route(
            "/admin/exams/{exam_id}/registrations/count",
            get(api::handlers::registrations::count_exam_registrations),
        )
        .route(
            "/admin/exams/{exam_id}/registrations/export",
            get(api::handlers::exports::export_exam_registrations),
        )
        .route(
            "/admin/registrations/{registration_id}/enroll",
            post(api::handlers::enrollments::enroll_registration),
        )
        .route("/admin/registrations/enroll/bulk", post(api::handlers::enrollments::bulk_enroll))
        .route(
            "/admin/content",
            post(api::handlers::contents::create_content).get(api::handlers::contents::list_admin_content),
        )
        .route("/admin/content/{content_id}", put(api::handlers::contents::update_content))
        .route("/admin/content/{content_id}/publish", post(api::handlers::contents::publish_content));

    let router = Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .with_state(state.clone());

    // Create CORS layer from config
    let cors_layer = create_cors_layer(&state.config)?;
    let router = router.layer(cors_layer);

    // Add tracing layer
    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] initializes the store, seeds the initial
///    admin user, and builds the router
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: When the shutdown signal is received, in-flight requests drain first
pub struct Application {
    router: Router,
    app_state: AppState,
    config: Config,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting exam platform with configuration: {:#?}", config);

        let store = Store::new();

        // Ensure there is always an admin account to manage exams with
        create_initial_admin_user(&config.admin_email, &config.admin_name, &store).await?;

        let app_state = AppState::builder()
            .store(store)
            .config(config.clone())
            .payments(payments::create_provider())
            .build();

        let router = build_router(&app_state)?;

        Ok(Self {
            router,
            app_state,
            config,
        })
    }

    /// Shared application state, mainly for tests that seed the store directly
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Exam registration platform listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // Run the server with graceful shutdown
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
