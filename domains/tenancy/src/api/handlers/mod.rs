//! HTTP handlers for the Tenancy domain

pub mod organizations;
pub mod users;
