//! Lock-Free Ingest Ring
//!
//! This module implements a high-performance, lock-free SPSC (Single
//! Producer, Single Consumer) ring connecting the pointer/touch driver to the
//! interpreter.
//!
//! Architecture:
//! - Producer (driver callback): never blocks, pushes samples at up to 1000 Hz
//! - Consumer (interpreter thread): drains samples in arrival order
//!
//! The design uses the `rtrb` crate for the core ring buffer implementation.
//! When the ring is full, new samples are dropped and counted; the producer
//! never blocks, so arrival order of accepted samples is preserved end to end.

use super::types::Sample;
use rtrb::{Consumer, Producer, RingBuffer};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default ingest ring capacity (must be a power of 2)
pub const DEFAULT_CAPACITY: usize = 8192;

/// Lock-free SPSC ring for samples
///
/// This is the core data structure connecting the input driver (producer)
/// to the interpreter (consumer).
pub struct SampleRing {
    producer: Option<Producer<Sample>>,
    consumer: Option<Consumer<Sample>>,
    stats: Arc<IngestStats>,
    capacity: usize,
}

/// Ingest statistics for monitoring
#[derive(Debug, Default)]
pub struct IngestStats {
    /// Total samples pushed
    pub samples_pushed: AtomicU64,
    /// Samples dropped due to a full ring
    pub samples_dropped: AtomicU64,
    /// Samples successfully consumed
    pub samples_consumed: AtomicU64,
    /// Peak ring occupancy
    pub peak_occupancy: AtomicU64,
}

impl SampleRing {
    /// Create a ring with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a ring with the specified capacity.
    ///
    /// # Panics
    /// Panics if capacity is not a power of 2.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "Ingest ring capacity must be a power of 2"
        );

        let (producer, consumer) = RingBuffer::new(capacity);

        Self {
            producer: Some(producer),
            consumer: Some(consumer),
            stats: Arc::new(IngestStats::default()),
            capacity,
        }
    }

    /// Split the ring into producer and consumer halves.
    ///
    /// This must be called once to separate the producer (for the driver
    /// thread) from the consumer (for the interpreter thread).
    pub fn split(mut self) -> (SampleProducer, SampleConsumer) {
        let producer = self.producer.take().expect("Producer already taken");
        let consumer = self.consumer.take().expect("Consumer already taken");

        (
            SampleProducer {
                inner: producer,
                stats: Arc::clone(&self.stats),
                capacity: self.capacity,
            },
            SampleConsumer {
                inner: consumer,
                stats: Arc::clone(&self.stats),
            },
        )
    }

    /// Get a handle on the shared statistics.
    pub fn stats(&self) -> Arc<IngestStats> {
        Arc::clone(&self.stats)
    }
}

impl Default for SampleRing {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer half of the ring (for the driver thread)
pub struct SampleProducer {
    inner: Producer<Sample>,
    stats: Arc<IngestStats>,
    capacity: usize,
}

impl SampleProducer {
    /// Push a sample into the ring.
    ///
    /// This method is lock-free and will never block. If the ring is full,
    /// the sample is dropped and the drop counter is incremented.
    ///
    /// Returns true if the sample was successfully pushed, false if dropped.
    #[inline]
    pub fn push(&mut self, sample: Sample) -> bool {
        match self.inner.push(sample) {
            Ok(()) => {
                self.stats.samples_pushed.fetch_add(1, Ordering::Relaxed);

                // Update peak occupancy
                let free = self.inner.slots();
                let occupied = self.capacity - free;
                let mut peak = self.stats.peak_occupancy.load(Ordering::Relaxed);
                while occupied as u64 > peak {
                    match self.stats.peak_occupancy.compare_exchange_weak(
                        peak,
                        occupied as u64,
                        Ordering::Relaxed,
                        Ordering::Relaxed,
                    ) {
                        Ok(_) => break,
                        Err(p) => peak = p,
                    }
                }

                true
            }
            Err(_) => {
                self.stats.samples_dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Check available slots without pushing.
    #[inline]
    pub fn available_slots(&self) -> usize {
        self.inner.slots()
    }

    /// Check if the ring is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }
}

/// Consumer half of the ring (for the interpreter thread)
pub struct SampleConsumer {
    inner: Consumer<Sample>,
    stats: Arc<IngestStats>,
}

impl SampleConsumer {
    /// Pop the next sample from the ring, in arrival order.
    #[inline]
    pub fn pop(&mut self) -> Option<Sample> {
        match self.inner.pop() {
            Ok(sample) => {
                self.stats.samples_consumed.fetch_add(1, Ordering::Relaxed);
                Some(sample)
            }
            Err(_) => None,
        }
    }

    /// Check if there are samples available.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Get the number of available samples.
    #[inline]
    pub fn available(&self) -> usize {
        self.inner.slots()
    }

    /// Pop up to `max_count` samples at once (batch processing).
    pub fn pop_batch(&mut self, max_count: usize) -> Vec<Sample> {
        let mut batch = Vec::with_capacity(max_count);
        for _ in 0..max_count {
            if let Some(sample) = self.pop() {
                batch.push(sample);
            } else {
                break;
            }
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_sample(t: u64) -> Sample {
        Sample::new(100.0, 200.0, t)
    }

    #[test]
    fn test_ring_creation() {
        let ring = SampleRing::new();
        assert_eq!(ring.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_ring_split() {
        let ring = SampleRing::with_capacity(64);
        let (producer, consumer) = ring.split();

        assert!(!producer.is_full());
        assert!(consumer.is_empty());
    }

    #[test]
    fn test_push_and_pop() {
        let ring = SampleRing::with_capacity(64);
        let (mut producer, mut consumer) = ring.split();

        assert!(producer.push(make_sample(1)));

        let sample = consumer.pop().expect("Should have sample");
        assert_eq!(sample.timestamp.as_millis(), 1);
    }

    #[test]
    fn test_ring_full_drops() {
        let ring = SampleRing::with_capacity(4);
        let (mut producer, _consumer) = ring.split();

        for t in 0..4 {
            assert!(producer.push(make_sample(t)));
        }

        assert!(producer.is_full());
        assert!(!producer.push(make_sample(4)), "push into full ring drops");
    }

    #[test]
    fn test_order_preserved() {
        let ring = SampleRing::with_capacity(64);
        let (mut producer, mut consumer) = ring.split();

        for t in 0..10 {
            producer.push(make_sample(t));
        }

        for t in 0..10 {
            let sample = consumer.pop().expect("Should have sample");
            assert_eq!(sample.timestamp.as_millis(), t);
        }
    }

    #[test]
    fn test_statistics() {
        let ring = SampleRing::with_capacity(4);
        let stats = ring.stats();
        let (mut producer, mut consumer) = ring.split();

        for t in 0..6 {
            producer.push(make_sample(t));
        }

        assert_eq!(stats.samples_pushed.load(Ordering::Relaxed), 4);
        assert_eq!(stats.samples_dropped.load(Ordering::Relaxed), 2);

        for _ in 0..4 {
            consumer.pop();
        }

        assert_eq!(stats.samples_consumed.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn test_batch_pop() {
        let ring = SampleRing::with_capacity(64);
        let (mut producer, mut consumer) = ring.split();

        for t in 0..10 {
            producer.push(make_sample(t));
        }

        let batch = consumer.pop_batch(5);
        assert_eq!(batch.len(), 5);
        assert_eq!(consumer.available(), 5);
    }

    #[test]
    fn test_peak_occupancy() {
        let ring = SampleRing::with_capacity(16);
        let stats = ring.stats();
        let (mut producer, mut consumer) = ring.split();

        for t in 0..10 {
            producer.push(make_sample(t));
        }

        let peak = stats.peak_occupancy.load(Ordering::Relaxed);
        assert!(peak >= 10);

        for _ in 0..5 {
            consumer.pop();
        }

        // Peak is a high-water mark; draining does not lower it
        assert!(stats.peak_occupancy.load(Ordering::Relaxed) >= 10);
    }

    #[test]
    #[should_panic(expected = "power of 2")]
    fn test_invalid_capacity() {
        let _ = SampleRing::with_capacity(100);
    }

    #[test]
    fn test_concurrent_producer_consumer() {
        use std::thread;

        let ring = SampleRing::with_capacity(256);
        let stats = ring.stats();
        let (mut producer, mut consumer) = ring.split();

        let producer_handle = thread::spawn(move || {
            for t in 0..100 {
                producer.push(make_sample(t));
                std::thread::sleep(std::time::Duration::from_micros(10));
            }
        });

        let consumer_handle = thread::spawn(move || {
            let mut consumed = 0u64;
            let mut last_t = None;
            while consumed < 100 {
                if let Some(sample) = consumer.pop() {
                    // Arrival order preserved across the thread boundary
                    if let Some(last) = last_t {
                        assert!(sample.timestamp.as_millis() > last);
                    }
                    last_t = Some(sample.timestamp.as_millis());
                    consumed += 1;
                }
                std::thread::sleep(std::time::Duration::from_micros(10));
            }
            consumed
        });

        producer_handle.join().unwrap();
        let consumed_count = consumer_handle.join().unwrap();

        assert_eq!(consumed_count, 100);
        assert_eq!(stats.samples_pushed.load(Ordering::Relaxed), 100);
        assert_eq!(stats.samples_consumed.load(Ordering::Relaxed), 100);
    }
}
