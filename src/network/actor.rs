//! Network actor - runs request submissions in the Tokio async runtime

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::execute;
use crate::network::transport::Transport;

/// Network actor that processes request commands
///
/// Every submission runs as its own task; nothing is cancelled or queued, so
/// overlapping submissions simply complete independently.
pub struct NetworkActor<T> {
    transport: Arc<T>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl<T: Transport + 'static> NetworkActor<T> {
    pub fn new(transport: T, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            transport: Arc::new(transport),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::ExecuteRequest { id, spec, variables }) => {
                            let response_tx = self.response_tx.clone();
                            let transport = Arc::clone(&self.transport);

                            self.active_requests.spawn(async move {
                                tracing::info!(id, method = spec.method.as_str(), "Executing request");
                                let outcome = execute(transport.as_ref(), &spec, &variables).await;
                                match outcome.status() {
                                    Some(status) => tracing::info!(id, status, "Request completed"),
                                    None => tracing::info!(id, "Request failed"),
                                }
                                let _ = response_tx.send(NetworkResponse::Completed { id, outcome });
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            // In-flight tasks are dropped along with the runtime
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
