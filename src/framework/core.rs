//! # Core Actor Framework
//!
//! This module defines the generic building blocks for running a state machine as an actor.
//!
//! ## Key Types
//!
//! - [`StateMachine`]: The trait a session model implements (pure transitions + effects).
//! - [`MachineActor`]: The actor that owns the machine and runs its event loop.
//! - [`MachineClient`]: The cloneable handle used to dispatch events and observe snapshots.
//! - [`FrameworkError`]: Plumbing errors (actor closed, response dropped).

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

// =============================================================================
// 1. THE ABSTRACTION (Transitions, Effects and Snapshots)
// =============================================================================

/// Trait that a session model implements to be driven by [`MachineActor`].
///
/// # Architecture Note
/// Transitions (`handle`) are synchronous and never touch the outside world. Anything
/// that needs I/O is returned as an [`Effect`](StateMachine::Effect); the actor runs it
/// on a separate task via [`perform`](StateMachine::perform) and feeds the resulting event
/// back through its own queue. All state therefore lives in one place and is only ever
/// mutated by the actor's loop, one message at a time.
///
/// # Async & Context
/// `perform` is `#[async_trait]` and receives the runtime [`Context`](StateMachine::Context)
/// (service clients) injected through [`MachineActor::run`], not at construction time.
#[async_trait]
pub trait StateMachine: Send + 'static {
    /// Inputs: operator actions and effect completions.
    type Event: Send + Debug + 'static;

    /// Outbound work requested by a transition.
    type Effect: Send + Debug + 'static;

    /// Read-only view published after every transition.
    type Snapshot: Clone + Send + Sync + Debug + 'static;

    /// The runtime context (dependencies) used to perform effects.
    type Context: Send + Sync + 'static;

    /// Effects issued once when the actor starts.
    fn on_start(&mut self) -> Vec<Self::Effect> {
        Vec::new()
    }

    /// Apply one event and return the effects it requests.
    fn handle(&mut self, event: Self::Event) -> Vec<Self::Effect>;

    /// Current view of the machine.
    fn snapshot(&self) -> Self::Snapshot;

    /// Run an effect against the context. `None` means the effect has no completion.
    async fn perform(effect: Self::Effect, ctx: Arc<Self::Context>) -> Option<Self::Event>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message type sent from a [`MachineClient`] to its [`MachineActor`].
#[derive(Debug)]
pub enum MachineRequest<T: StateMachine> {
    /// Apply an event; respond with the snapshot taken right after it.
    Dispatch {
        event: T::Event,
        respond_to: Response<T::Snapshot>,
    },
    /// Read the current snapshot without changing anything.
    Snapshot { respond_to: Response<T::Snapshot> },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The actor that owns a [`StateMachine`].
///
/// **Concurrency Model**:
/// Client requests and effect completions arrive on two queues and are processed
/// *sequentially* in one loop. Effects themselves run on spawned tasks, so slow I/O never
/// blocks the loop, but their results are only applied by the loop. No `Mutex` is needed
/// for the machine.
pub struct MachineActor<T: StateMachine> {
    machine: T,
    receiver: mpsc::Receiver<MachineRequest<T>>,
    snapshots: watch::Sender<T::Snapshot>,
}

impl<T: StateMachine> MachineActor<T> {
    /// Creates the actor and its client.
    ///
    /// # Arguments
    ///
    /// * `machine` - The initial machine state
    /// * `buffer_size` - Capacity of the request channel; clients wait when it is full
    pub fn new(machine: T, buffer_size: usize) -> (Self, MachineClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, snapshot_receiver) = watch::channel(machine.snapshot());
        let actor = Self {
            machine,
            receiver,
            snapshots,
        };
        let client = MachineClient::new(sender, snapshot_receiver);
        (actor, client)
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// The `context` is shared with every effect task. Completions that arrive after the
    /// loop has ended are dropped.
    pub async fn run(mut self, context: T::Context) {
        let machine_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(machine_type, "Actor started");

        let context = Arc::new(context);
        let (completion_tx, mut completions) = mpsc::unbounded_channel::<T::Event>();

        let effects = self.machine.on_start();
        self.publish();
        Self::spawn_effects(effects, &context, &completion_tx);

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(MachineRequest::Dispatch { event, respond_to }) => {
                        debug!(machine_type, ?event, "Dispatch");
                        let effects = self.machine.handle(event);
                        let snapshot = self.publish();
                        let _ = respond_to.send(Ok(snapshot));
                        Self::spawn_effects(effects, &context, &completion_tx);
                    }
                    Some(MachineRequest::Snapshot { respond_to }) => {
                        let _ = respond_to.send(Ok(self.machine.snapshot()));
                    }
                    None => break,
                },
                Some(event) = completions.recv() => {
                    debug!(machine_type, ?event, "Completion");
                    let effects = self.machine.handle(event);
                    self.publish();
                    Self::spawn_effects(effects, &context, &completion_tx);
                }
            }
        }

        info!(machine_type, "Shutdown");
    }

    fn publish(&self) -> T::Snapshot {
        let snapshot = self.machine.snapshot();
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }

    fn spawn_effects(
        effects: Vec<T::Effect>,
        context: &Arc<T::Context>,
        completions: &mpsc::UnboundedSender<T::Event>,
    ) {
        for effect in effects {
            debug!(?effect, "Effect");
            let ctx = Arc::clone(context);
            let completions = completions.clone();
            tokio::spawn(async move {
                if let Some(event) = T::perform(effect, ctx).await {
                    let _ = completions.send(event);
                }
            });
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a [`MachineActor`].
///
/// Cheap to clone: it holds a request sender and a snapshot receiver.
pub struct MachineClient<T: StateMachine> {
    sender: mpsc::Sender<MachineRequest<T>>,
    snapshots: watch::Receiver<T::Snapshot>,
}

impl<T: StateMachine> Clone for MachineClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            snapshots: self.snapshots.clone(),
        }
    }
}

impl<T: StateMachine> MachineClient<T> {
    pub fn new(
        sender: mpsc::Sender<MachineRequest<T>>,
        snapshots: watch::Receiver<T::Snapshot>,
    ) -> Self {
        Self { sender, snapshots }
    }

    pub async fn dispatch(&self, event: T::Event) -> Result<T::Snapshot, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(MachineRequest::Dispatch { event, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn snapshot(&self) -> Result<T::Snapshot, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(MachineRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Waits until a published snapshot satisfies `predicate` and returns it.
    ///
    /// Checks the latest snapshot first, so a condition that already holds returns at once.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&T::Snapshot) -> bool,
    ) -> Result<T::Snapshot, FrameworkError> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(predicate)
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        Ok(snapshot.clone())
    }

    /// A receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<T::Snapshot> {
        self.snapshots.clone()
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
