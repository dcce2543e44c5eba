//! TaskHub application composition root
//!
//! Composes all domain routers into a single application.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use taskhub_auth::{AuthBackend, AuthConfig};
use taskhub_billing::BillingState;
use taskhub_payments::{PaymentConfig, PaymentGatewayFactory};
use taskhub_projects::{ProjectsRepositories, ProjectsState};
use taskhub_tenancy::{TenancyRepositories, TenancyState};

/// Create the main application router with all routes and middleware
pub async fn create_app(pool: PgPool) -> Result<Router, anyhow::Error> {
    // Create auth config from environment
    let auth_config = AuthConfig {
        jwt_secret: std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?,
        issuer: std::env::var("JWT_ISSUER").ok(),
        audience: std::env::var("JWT_AUDIENCE").ok(),
    };
    let auth = AuthBackend::new(pool.clone(), auth_config);

    // Create payment gateway from environment
    let payment_config = PaymentConfig::from_env()?;
    let webhook_secret = payment_config.webhook_secret.clone();
    let gateway = PaymentGatewayFactory::create(payment_config)?;

    // Create domain states
    let tenancy_state = TenancyState {
        repos: TenancyRepositories::new(pool.clone()),
        auth: auth.clone(),
    };
    let projects_state = ProjectsState {
        repos: ProjectsRepositories::new(pool),
        auth: auth.clone(),
    };
    let billing_state = BillingState {
        gateway: Arc::from(gateway),
        webhook_secret,
        auth,
    };

    // Build router — compose domain routers with shared infrastructure routes
    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "TaskHub API v0.1.0" }))
        .merge(taskhub_tenancy::routes().with_state(tenancy_state))
        .merge(taskhub_projects::routes().with_state(projects_state))
        .merge(taskhub_billing::routes().with_state(billing_state));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
