//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AdoptionCommand, AdoptionQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub adoptions: Arc<dyn AdoptionCommand>,
    pub adoptions_query: Arc<dyn AdoptionQuery>,
}

impl HttpState {
    /// Construct state from the lifecycle's driving ports.
    pub fn new(adoptions: Arc<dyn AdoptionCommand>, adoptions_query: Arc<dyn AdoptionQuery>) -> Self {
        Self {
            adoptions,
            adoptions_query,
        }
    }
}
