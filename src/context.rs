// MonitorContext - the state the refresh loop operates on
//
// Consolidates the sample window, the threshold, and the consuming end of
// the reader ring into one explicit object owned by the UI, instead of
// module-level globals. One `tick` is one execution of the periodic
// refresh step: drain whatever the reader produced since the last tick,
// grow the window, and push the result at the display.

use rtrb::Consumer;

use crate::buffer::SampleBuffer;
use crate::display::DisplayAdapter;
use crate::threshold::ThresholdPolicy;

pub struct MonitorContext {
    buffer: SampleBuffer,
    threshold: ThresholdPolicy,
    samples: Consumer<i32>,
}

impl MonitorContext {
    pub fn new(buffer: SampleBuffer, threshold: ThresholdPolicy, samples: Consumer<i32>) -> Self {
        Self {
            buffer,
            threshold,
            samples,
        }
    }

    /// Run one refresh step
    ///
    /// Drains every sample currently in the ring into the window, then
    /// presents the newest one. A tick that drains nothing (silent device,
    /// or the reader skipped a malformed line) mutates nothing and does
    /// not touch the display.
    pub fn tick(&mut self, display: &mut dyn DisplayAdapter) {
        let mut newest = None;
        while let Ok(value) = self.samples.pop() {
            self.buffer.append(value);
            newest = Some(value);
        }

        if let Some(value) = newest {
            display.update(value, self.threshold.get(), &self.buffer.snapshot());
        }
    }

    /// Commit a threshold edit; invalid text is rejected silently
    pub fn set_threshold(&mut self, text: &str) -> bool {
        self.threshold.set_from_text(text)
    }

    pub fn threshold(&self) -> i32 {
        self.threshold.get()
    }

    /// Clear the window and the display
    pub fn reset(&mut self, display: &mut dyn DisplayAdapter) {
        self.buffer.clear();
        display.reset();
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }
}
