//! Network messages - communication between App and Network layers

use crate::models::{RequestSpec, ResolvedOutcome};
use crate::variables::VariableStore;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute a request against a snapshot of the variables
    ExecuteRequest {
        id: u64,
        spec: RequestSpec,
        variables: VariableStore,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A submission finished, successfully or not
    Completed { id: u64, outcome: ResolvedOutcome },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Completed { id, .. } => *id,
        }
    }
}
