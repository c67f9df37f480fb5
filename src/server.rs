//! Remote-service lifecycle: publishing the record store for remote access.
//!
//! One [`ServerLifecycle`] instance owns the process-wide server state.
//! Start and stop go through its guarded operations; presentation code only
//! observes. A single lock serializes the control surface: a second
//! start-or-stop request blocks until the in-flight transition settles.
//!
//! The underlying registry calls carry no timeout. If one hangs, the
//! control surface hangs with it; transitions are never cancelled midway.

use std::sync::{Mutex, PoisonError};

use tracing::{info, warn};

/// Failure to publish the store at a network location.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("port {0} is already registered")]
    PortInUse(u16),

    #[error("registration failed: {0}")]
    Failed(String),
}

/// Failure to withdraw a published store.
#[derive(Debug, thiserror::Error)]
pub enum UnregistrationError {
    #[error("no server registered on port {0}")]
    NotFound(u16),

    #[error("access to the registry was denied")]
    PermissionDenied,
}

/// Errors surfaced to the operator by [`ServerLifecycle`].
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("illegal port number: {0}")]
    InvalidPort(i64),

    #[error("server is already running")]
    AlreadyRunning,

    #[error("unable to start server: {0}")]
    Start(#[from] RegistrationError),

    #[error("unable to stop server: {0}")]
    Stop(#[from] UnregistrationError),
}

pub type Result<T> = core::result::Result<T, LifecycleError>;

/// The remote registry: publishes and withdraws a record store at a
/// network location.
pub trait RemoteRegistry {
    /// Publishes the store at `location:port`.
    fn register(&self, location: &str, port: u16) -> core::result::Result<(), RegistrationError>;

    /// Withdraws the store registered on `port`.
    fn unregister(&self, port: u16) -> core::result::Result<(), UnregistrationError>;
}

/// Where the server stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    Stopped,
    Starting,
    Running,
    Stopping,
}

struct State {
    status: ServerStatus,
    location: String,
    port: u16,
}

/// Governs whether the record store is currently published for remote
/// access.
///
/// State never flips optimistically: `Running` means registration
/// succeeded, and a failed stop leaves the lifecycle `Running`. Every
/// transition releases the lock on completion, so the operator can always
/// retry.
pub struct ServerLifecycle<R> {
    registry: R,
    state: Mutex<State>,
}

impl<R: RemoteRegistry> ServerLifecycle<R> {
    /// Creates a stopped lifecycle over the given registry.
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            state: Mutex::new(State {
                status: ServerStatus::Stopped,
                location: String::new(),
                port: 0,
            }),
        }
    }

    /// Starts the server: validates the port, publishes the store at
    /// `location:port`, and moves to `Running`.
    ///
    /// A port outside the 16-bit unsigned range is rejected before any
    /// network action and the lifecycle stays `Stopped`, as does a
    /// registration failure. On success the caller is expected to persist
    /// the configuration that worked (see [`crate::config`]); that save is
    /// a post-condition, not part of this contract.
    ///
    /// Blocks while another transition is in flight.
    pub fn start(&self, location: &str, port: i64) -> Result<()> {
        let mut state = self.lock();
        if state.status == ServerStatus::Running {
            return Err(LifecycleError::AlreadyRunning);
        }
        let Ok(port_number) = u16::try_from(port) else {
            warn!(port, "rejected out-of-range port before registration");
            return Err(LifecycleError::InvalidPort(port));
        };

        state.status = ServerStatus::Starting;
        match self.registry.register(location, port_number) {
            Ok(()) => {
                state.status = ServerStatus::Running;
                state.location = location.to_string();
                state.port = port_number;
                info!(location, port = port_number, "server started");
                Ok(())
            }
            Err(e) => {
                state.status = ServerStatus::Stopped;
                warn!(location, port = port_number, error = %e, "server failed to start");
                Err(e.into())
            }
        }
    }

    /// Stops the server by withdrawing its registry entry.
    ///
    /// A stop while already `Stopped` is a no-op. On failure the lifecycle
    /// remains `Running` — it never claims stopped unless unregistration
    /// actually succeeded.
    ///
    /// Blocks while another transition is in flight.
    pub fn stop(&self) -> Result<()> {
        let mut state = self.lock();
        if state.status == ServerStatus::Stopped {
            return Ok(());
        }

        state.status = ServerStatus::Stopping;
        match self.registry.unregister(state.port) {
            Ok(()) => {
                state.status = ServerStatus::Stopped;
                info!(port = state.port, "server stopped");
                Ok(())
            }
            Err(e) => {
                state.status = ServerStatus::Running;
                warn!(port = state.port, error = %e, "server failed to stop, still running");
                Err(e.into())
            }
        }
    }

    /// Current lifecycle status. Blocks while a transition is in flight.
    pub fn status(&self) -> ServerStatus {
        self.lock().status
    }

    /// Whether the store is currently published.
    pub fn is_running(&self) -> bool {
        self.status() == ServerStatus::Running
    }

    /// The location the store was last successfully published at.
    pub fn location(&self) -> String {
        self.lock().location.clone()
    }

    /// The port the store was last successfully published on.
    pub fn port(&self) -> u16 {
        self.lock().port
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A poisoned lock still holds truthful state: transitions settle
        // before unlocking, even on the error paths.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
