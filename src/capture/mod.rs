//! Sample capture module
//!
//! Provides the sample type, the lock-free driver-to-interpreter ingest ring,
//! and the bounded sample window the classifier reads from. The architecture
//! ensures zero blocking in the driver callback path.

pub mod types;
pub mod ingest;
pub mod window;

pub use types::Sample;
pub use ingest::{IngestStats, SampleConsumer, SampleProducer, SampleRing};
pub use window::SampleWindow;
