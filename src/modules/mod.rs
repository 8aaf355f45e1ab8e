//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the client for the remote catalog REST service.

pub mod catalog_api;
