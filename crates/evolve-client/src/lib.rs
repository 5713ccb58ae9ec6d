//! # Evolve Client
//!
//! Typed wrapper over the self-learning agents REST backend: a single
//! request path with uniform JSON headers and error mapping, a reachability
//! probe, and one fetcher per endpoint.

pub mod client;
pub mod config;
pub mod resources;

pub use client::{ApiClient, ConnectionProbe};
pub use config::{ClientConfig, API_URL_ENV, DEFAULT_API_URL};
pub use resources::Ack;

// Re-export core types for convenience
pub use evolve_core::{EvolveError, Result};
