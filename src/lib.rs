#![doc = "The `taskwarden` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic for the TaskWarden backend:"]
#![doc = "credential storage and verification, the revocable session-token lifecycle,"]
#![doc = "the request-boundary auth gatekeeper, and the ownership-scoped task layer."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tasks;
