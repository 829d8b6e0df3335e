// SampleBuffer - fixed-capacity rolling window of sensor samples
//
// Holds the most recent N readings in chronological order (oldest first).
// When the buffer is at capacity, each append evicts exactly the oldest
// element. All allocation happens at construction; append never grows the
// backing storage beyond the configured capacity.

use std::collections::VecDeque;

/// Default rolling-window capacity (matches one chart width of samples)
pub const DEFAULT_CAPACITY: usize = 100;

/// Fixed-capacity rolling window with FIFO eviction
///
/// Invariant: `len() <= capacity()` after every operation; iteration order
/// is chronological, oldest sample first.
#[derive(Debug)]
pub struct SampleBuffer {
    samples: VecDeque<i32>,
    capacity: usize,
}

impl SampleBuffer {
    /// Create a buffer that keeps at most `capacity` samples
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `value` as the newest sample, evicting the oldest when full
    pub fn append(&mut self, value: i32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Reset to empty, keeping the configured capacity
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Chronological copy of the current contents (oldest first)
    pub fn snapshot(&self) -> Vec<i32> {
        self.samples.iter().copied().collect()
    }

    /// Newest sample, if any
    pub fn latest(&self) -> Option<i32> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
