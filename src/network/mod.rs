//! Network layer - request resolution and execution
//!
//! The Network actor receives request commands and sends back outcomes.

pub mod actor;
pub mod client;
pub mod transport;

pub use actor::NetworkActor;
pub use client::{build_request, execute, flatten_headers};
pub use transport::{ReqwestTransport, Transport};
