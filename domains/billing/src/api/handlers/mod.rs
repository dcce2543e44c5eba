//! HTTP handlers for the Billing domain

pub mod payments;
