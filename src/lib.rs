//! Vacancy: fixed-width hotel-room occupancy records and the lifecycle of
//! the server that publishes them.
//!
//! The flat-file database stores one [`Occupancy`] per record body, exactly
//! [`record::RECORD_LENGTH`] bytes each. This crate owns the mapping
//! between that layout and the in-memory record — decode from the ordered
//! raw fields a store reads, encode back to the fields it writes — plus the
//! guarded start/stop state machine that governs remote access to the
//! store.
//!
//! Physical file I/O stays behind [`store::RecordStore`]; the network
//! registry stays behind [`server::RemoteRegistry`]. Field parsing never
//! fails a whole record: malformed sizes and dates degrade to defaults and
//! are reported as `tracing` diagnostics.

pub mod config;
pub mod normalize;
pub mod record;
pub mod server;
pub mod store;

pub use config::ServerConfig;
pub use record::Occupancy;
pub use server::{RemoteRegistry, ServerLifecycle, ServerStatus};
pub use store::{MemoryStore, RecordStore};
