//! Trace Data Structures
//!
//! Defines the serialization format for captured sample traces. A trace is a
//! replayable recording of a sample stream: feeding its samples back through
//! an interpreter reproduces the original recognitions exactly, because the
//! interpreter takes all timing from sample timestamps.

use crate::capture::types::Sample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current trace format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Get the checkpoint (temporary) path for a trace file
fn checkpoint_path(final_path: &Path) -> std::path::PathBuf {
    final_path.with_extension("json.tmp")
}

/// Trace metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceMetadata {
    /// Unique trace ID
    pub id: Uuid,
    /// Trace name
    pub name: String,
    /// Optional description of what was captured
    pub description: Option<String>,
    /// Capture start time
    pub created_at: DateTime<Utc>,
    /// Capture end time
    pub ended_at: Option<DateTime<Utc>>,
    /// Total sample count
    pub sample_count: usize,
    /// Covered duration in milliseconds (first to last sample)
    pub duration_ms: u64,
    /// Version of the trace format
    pub format_version: String,
}

impl TraceMetadata {
    /// Create new metadata for a trace
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            created_at: Utc::now(),
            ended_at: None,
            sample_count: 0,
            duration_ms: 0,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }

    /// Finalize the trace with end time and sample count
    pub fn finalize(&mut self, sample_count: usize, duration_ms: u64) {
        self.ended_at = Some(Utc::now());
        self.sample_count = sample_count;
        self.duration_ms = duration_ms;
    }
}

impl Default for TraceMetadata {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            description: None,
            created_at: Utc::now(),
            ended_at: None,
            sample_count: 0,
            duration_ms: 0,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }
}

/// A complete captured sample trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleTrace {
    /// Trace metadata
    pub metadata: TraceMetadata,
    /// Samples in arrival order
    pub samples: Vec<Sample>,
}

impl SampleTrace {
    /// Create a new empty trace
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            metadata: TraceMetadata::new(name, description),
            samples: Vec::new(),
        }
    }

    /// Append a sample
    pub fn add_sample(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Finalize the trace, stamping count and covered duration
    pub fn finalize(&mut self) {
        let duration_ms = self.covered_duration_ms();
        self.metadata.finalize(self.samples.len(), duration_ms);
    }

    /// Duration from first to last sample in milliseconds
    pub fn covered_duration_ms(&self) -> u64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last
                .timestamp
                .duration_since(first.timestamp)
                .as_millis(),
            _ => 0,
        }
    }

    /// Verify that sample timestamps are monotonically non-decreasing.
    ///
    /// Returns the index of the first out-of-order sample, or `None` when the
    /// trace is well-formed.
    pub fn first_out_of_order(&self) -> Option<usize> {
        self.samples
            .windows(2)
            .position(|w| w[1].timestamp < w[0].timestamp)
            .map(|i| i + 1)
    }

    /// Save the trace to a file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Save atomically: write to `<path>.tmp`, then rename over the final
    /// path. The rename is atomic on most filesystems, so a crash never
    /// leaves a half-written trace behind.
    pub fn save_atomic(&self, path: &Path) -> crate::Result<()> {
        let tmp_path = checkpoint_path(path);
        let json = serde_json::to_string(self)?; // compact JSON for speed
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Load a trace from a file.
    ///
    /// Logs a warning if the trace was saved with an unknown format version,
    /// but still attempts to deserialize it (forward-compatible via
    /// `#[serde(default)]`).
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let trace: SampleTrace = serde_json::from_str(&content)?;
        if trace.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                name = %trace.metadata.name,
                found = %trace.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Trace has different format version; some fields may use default values"
            );
        }
        Ok(trace)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the trace is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
