// Background sample acquisition
//
// One dedicated thread owns the SampleSource, reads and parses lines, and
// pushes finished samples into a bounded lock-free SPSC ring. The UI side
// drains the ring on its own schedule, so a slow or silent device never
// stalls a frame.
//
// Sample flow:
// 1. Reader thread blocks on read_line (bounded by the read timeout)
// 2. Line parses as an integer -> push into the ring
// 3. Malformed or undecodable line -> counted and skipped, never fatal
// 4. Transport failure other than a timeout -> logged, thread exits

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;

use log::{debug, info};
use rtrb::{Consumer, Producer, RingBuffer};

use crate::error::{log_source_error, SourceError};
use crate::source::{parse_sample_line, SampleSource};

/// Default capacity of the reader -> UI sample ring
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Log a running stats line every this many forwarded samples
const STATS_LOG_INTERVAL: u64 = 1000;

/// Counters shared between the reader thread and its handle
#[derive(Debug, Default)]
pub struct ReaderStats {
    forwarded: AtomicU64,
    malformed: AtomicU64,
    overflow: AtomicU64,
}

/// Point-in-time copy of the reader counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Samples pushed into the ring
    pub forwarded: u64,
    /// Lines skipped because they did not parse or decode
    pub malformed: u64,
    /// Samples dropped because the ring was full
    pub overflow: u64,
}

impl ReaderStats {
    fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            forwarded: self.forwarded.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
            overflow: self.overflow.load(Ordering::Relaxed),
        }
    }
}

/// Handle to a running acquisition thread
///
/// Dropping the handle stops the thread and joins it; `stop` does the same
/// explicitly. The thread also exits on its own when the source reports a
/// non-timeout transport error (e.g. the device disappears).
pub struct ReaderHandle {
    stop: Arc<AtomicBool>,
    stats: Arc<ReaderStats>,
    join: Option<JoinHandle<()>>,
}

impl ReaderHandle {
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Whether the acquisition thread has exited
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Request a stop and wait for the thread to exit
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Wait for the thread to exit on its own (source exhausted or failed)
    pub fn wait(mut self) {
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for ReaderHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

pub struct SampleReader;

impl SampleReader {
    /// Start an acquisition thread over `source`
    ///
    /// Returns the control handle and the consuming end of the sample
    /// ring. The ring is bounded; when the UI falls behind, the newest
    /// samples are dropped and counted rather than blocking the reader.
    ///
    /// # Panics
    /// Panics if `channel_capacity` is 0.
    pub fn spawn<S>(source: S, channel_capacity: usize) -> (ReaderHandle, Consumer<i32>)
    where
        S: SampleSource + Send + 'static,
    {
        assert!(channel_capacity > 0, "channel_capacity must be greater than 0");

        let (producer, consumer) = RingBuffer::new(channel_capacity);
        let stop = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(ReaderStats::default());

        let thread_stop = Arc::clone(&stop);
        let thread_stats = Arc::clone(&stats);
        let join = thread::spawn(move || {
            acquisition_loop(source, producer, thread_stop, thread_stats);
        });

        (
            ReaderHandle {
                stop,
                stats,
                join: Some(join),
            },
            consumer,
        )
    }
}

fn acquisition_loop<S: SampleSource>(
    mut source: S,
    mut producer: Producer<i32>,
    stop: Arc<AtomicBool>,
    stats: Arc<ReaderStats>,
) {
    info!("[Reader] acquisition started");

    while !stop.load(Ordering::Relaxed) {
        match source.read_line() {
            Ok(line) => match parse_sample_line(&line) {
                Some(value) => forward(value, &mut producer, &stats),
                None => {
                    stats.malformed.fetch_add(1, Ordering::Relaxed);
                    debug!("[Reader] skipping malformed line {:?}", line.trim_end());
                }
            },
            // Device silent for one timeout window; check the stop flag
            // and try again
            Err(err) if err.is_timeout() => continue,
            Err(SourceError::Decode { message }) => {
                stats.malformed.fetch_add(1, Ordering::Relaxed);
                debug!("[Reader] skipping undecodable line: {}", message);
            }
            Err(err) => {
                log_source_error(&err, "acquisition loop");
                break;
            }
        }
    }

    let totals = stats.snapshot();
    info!(
        "[Reader] acquisition stopped: {} forwarded, {} malformed, {} overflow",
        totals.forwarded, totals.malformed, totals.overflow
    );
}

fn forward(value: i32, producer: &mut Producer<i32>, stats: &ReaderStats) {
    if producer.push(value).is_err() {
        stats.overflow.fetch_add(1, Ordering::Relaxed);
        debug!("[Reader] sample ring full, dropping {}", value);
        return;
    }
    let forwarded = stats.forwarded.fetch_add(1, Ordering::Relaxed) + 1;
    if forwarded % STATS_LOG_INTERVAL == 0 {
        let totals = stats.snapshot();
        debug!(
            "[Reader] {} samples forwarded ({} malformed, {} overflow)",
            totals.forwarded, totals.malformed, totals.overflow
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedSource;

    #[test]
    fn test_parsed_samples_reach_the_consumer_in_order() {
        let source = ScriptedSource::new(["100", "200", "300"]);
        let (handle, mut consumer) = SampleReader::spawn(source, 8);
        handle.wait();

        let mut received = Vec::new();
        while let Ok(value) = consumer.pop() {
            received.push(value);
        }
        assert_eq!(received, vec![100, 200, 300]);
    }

    #[test]
    fn test_malformed_lines_are_counted_and_skipped() {
        let source = ScriptedSource::new(["100", "abc", "", "200"]);
        let (handle, mut consumer) = SampleReader::spawn(source, 8);

        // Wait for the natural EOF exit, then inspect the counters
        while !handle.is_finished() {
            thread::yield_now();
        }
        let stats = handle.stats();
        assert_eq!(stats.forwarded, 2);
        assert_eq!(stats.malformed, 2);
        assert_eq!(stats.overflow, 0);
        handle.wait();

        let mut received = Vec::new();
        while let Ok(value) = consumer.pop() {
            received.push(value);
        }
        assert_eq!(received, vec![100, 200]);
    }

    #[test]
    fn test_decode_errors_are_not_fatal() {
        let source = ScriptedSource::from_outcomes([
            Ok("10\n".to_string()),
            Err(SourceError::Decode {
                message: "invalid utf-8 sequence".to_string(),
            }),
            Ok("20\n".to_string()),
        ]);
        let (handle, mut consumer) = SampleReader::spawn(source, 8);
        handle.wait();

        let mut received = Vec::new();
        while let Ok(value) = consumer.pop() {
            received.push(value);
        }
        assert_eq!(received, vec![10, 20]);
    }

    #[test]
    fn test_ring_overflow_drops_newest_and_counts() {
        let source = ScriptedSource::new(["1", "2", "3", "4", "5"]);
        let (handle, mut consumer) = SampleReader::spawn(source, 2);
        while !handle.is_finished() {
            thread::yield_now();
        }

        let stats = handle.stats();
        assert_eq!(stats.forwarded, 2);
        assert_eq!(stats.overflow, 3);
        handle.wait();

        let mut received = Vec::new();
        while let Ok(value) = consumer.pop() {
            received.push(value);
        }
        // The first two fill the ring; later samples are dropped
        assert_eq!(received, vec![1, 2]);
    }
}
