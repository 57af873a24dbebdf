//! # Mock Framework
//!
//! Utilities for testing client wrappers in isolation.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its request channel.
//! Then use [`expect_dispatch`] to assert which event the wrapper sent and answer it.

use crate::framework::{FrameworkError, MachineClient, MachineRequest, StateMachine};
use tokio::sync::{mpsc, oneshot, watch};

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// A wrapper such as [`WorkflowClient`](crate::clients::WorkflowClient) only translates
/// method calls into events. Testing it does not need a running actor: the test plays the
/// actor by reading the channel and responding with any snapshot it likes.
///
/// `initial` is the snapshot visible through [`MachineClient::wait_for`] and
/// [`MachineClient::subscribe`].
pub fn create_mock_client<T: StateMachine>(
    buffer_size: usize,
    initial: T::Snapshot,
) -> (MachineClient<T>, mpsc::Receiver<MachineRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_snapshots, snapshot_receiver) = watch::channel(initial);
    (MachineClient::new(sender, snapshot_receiver), receiver)
}

/// Helper to verify that the next message is a Dispatch request
pub async fn expect_dispatch<T: StateMachine>(
    receiver: &mut mpsc::Receiver<MachineRequest<T>>,
) -> Option<(
    T::Event,
    oneshot::Sender<Result<T::Snapshot, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(MachineRequest::Dispatch { event, respond_to }) => Some((event, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Snapshot request
pub async fn expect_snapshot<T: StateMachine>(
    receiver: &mut mpsc::Receiver<MachineRequest<T>>,
) -> Option<oneshot::Sender<Result<T::Snapshot, FrameworkError>>> {
    match receiver.recv().await {
        Some(MachineRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}
