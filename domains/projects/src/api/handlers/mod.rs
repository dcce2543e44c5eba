//! HTTP handlers for the Projects domain

pub mod projects;
pub mod tasks;
