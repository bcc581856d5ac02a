//! Deployment-time parameters for the Flume agent service component.
//!
//! A [`Snapshot`] of the orchestration host's configuration goes in, a flat
//! [`FlumeParams`] comes out.

mod error;
pub mod export;
pub mod layout;
pub mod params;
pub mod snapshot;
pub mod version;

pub use error::Error;
pub use export::ExportFormat;
pub use layout::PathSet;
pub use params::FlumeParams;
pub use snapshot::{Snapshot, SnapshotError};
pub use version::StackVersion;
