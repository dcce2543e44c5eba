//! Domain layer for the Tenancy domain

pub mod entities;
