//! Billing domain: payment intents and provider webhooks

pub mod api;

pub use api::routes;
pub use api::BillingState;
