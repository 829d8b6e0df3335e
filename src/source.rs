// SampleSource - line-oriented view of the sensor byte stream
//
// The serial device emits one ASCII integer per line, no framing or
// checksum. `SampleSource` narrows the transport to "give me the next
// line"; everything above it (parsing, buffering, display) is independent
// of where the bytes come from, which is what lets the acquisition
// pipeline run against a scripted source in tests.

use std::collections::VecDeque;
use std::io;
use std::io::Read;
use std::time::Duration;

use serialport::SerialPort;

use crate::error::SourceError;

/// Something that can yield one text line of sensor output at a time
///
/// `read_line` blocks until a `\n`-terminated line is available, bounded
/// by the transport's read timeout (reported as an `Io` error with kind
/// `TimedOut`). The returned line still carries its terminator.
pub trait SampleSource {
    fn read_line(&mut self) -> Result<String, SourceError>;
}

/// Parse one line of sensor output as a decimal integer sample
///
/// Trims the line terminator (`\n` or `\r\n`) and surrounding whitespace.
/// Returns `None` for anything that is not a plain decimal integer; the
/// 0-1023 ADC domain is expected but deliberately not enforced.
pub fn parse_sample_line(line: &str) -> Option<i32> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i32>().ok()
}

/// Line source backed by a serial connection
///
/// Owns the port handle exclusively for its whole lifetime. Bytes that
/// arrive without a terminator are held in `pending` across read timeouts,
/// so a line split by a slow device is still delivered whole.
pub struct SerialLineSource {
    port: Box<dyn SerialPort>,
    pending: Vec<u8>,
}

impl SerialLineSource {
    /// Open `port_name` at `baud_rate` with a finite read timeout
    ///
    /// The timeout bounds each `read_line` attempt; the acquisition loop
    /// relies on it to stay responsive to stop requests.
    pub fn open(
        port_name: &str,
        baud_rate: u32,
        read_timeout: Duration,
    ) -> Result<Self, serialport::Error> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(read_timeout)
            .open()?;
        Ok(Self {
            port,
            pending: Vec::with_capacity(64),
        })
    }
}

impl SampleSource for SerialLineSource {
    fn read_line(&mut self) -> Result<String, SourceError> {
        loop {
            if let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
                let raw: Vec<u8> = self.pending.drain(..=pos).collect();
                return String::from_utf8(raw).map_err(|err| SourceError::Decode {
                    message: err.to_string(),
                });
            }

            let mut chunk = [0u8; 64];
            match self.port.read(&mut chunk) {
                Ok(0) => {
                    return Err(SourceError::Io {
                        kind: io::ErrorKind::UnexpectedEof,
                        message: "serial stream closed".to_string(),
                    })
                }
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(err) => return Err(SourceError::from_io(&err)),
            }
        }
    }
}

/// In-memory source replaying fixed outcomes, for tests and deterministic
/// playback. Once exhausted it reports `UnexpectedEof`, which ends the
/// acquisition loop the same way a closed device would.
pub struct ScriptedSource {
    outcomes: VecDeque<Result<String, SourceError>>,
}

impl ScriptedSource {
    /// Source that yields `lines` in order, each with a `\n` terminator
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            outcomes: lines
                .into_iter()
                .map(|line| Ok(format!("{}\n", line.into())))
                .collect(),
        }
    }

    /// Source that yields arbitrary outcomes, including mid-stream errors
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Result<String, SourceError>>,
    {
        Self {
            outcomes: outcomes.into_iter().collect(),
        }
    }
}

impl SampleSource for ScriptedSource {
    fn read_line(&mut self) -> Result<String, SourceError> {
        self.outcomes.pop_front().unwrap_or_else(|| {
            Err(SourceError::Io {
                kind: io::ErrorKind::UnexpectedEof,
                message: "scripted source exhausted".to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plain_integers() {
        assert_eq!(parse_sample_line("512\n"), Some(512));
        assert_eq!(parse_sample_line("0\r\n"), Some(0));
        assert_eq!(parse_sample_line(" 1023 "), Some(1023));
        // Out-of-domain values still parse; the range is not enforced
        assert_eq!(parse_sample_line("-5\n"), Some(-5));
        assert_eq!(parse_sample_line("2048\n"), Some(2048));
    }

    #[test]
    fn test_parse_rejects_non_numeric_lines() {
        assert_eq!(parse_sample_line("abc\n"), None);
        assert_eq!(parse_sample_line("\n"), None);
        assert_eq!(parse_sample_line(""), None);
        assert_eq!(parse_sample_line("12.5\n"), None);
        assert_eq!(parse_sample_line("51x2\n"), None);
    }

    #[test]
    fn test_scripted_source_replays_then_reports_eof() {
        let mut source = ScriptedSource::new(["100", "200"]);
        assert_eq!(source.read_line().unwrap(), "100\n");
        assert_eq!(source.read_line().unwrap(), "200\n");
        let err = source.read_line().unwrap_err();
        assert_eq!(
            err,
            SourceError::Io {
                kind: io::ErrorKind::UnexpectedEof,
                message: "scripted source exhausted".to_string(),
            }
        );
    }

    #[test]
    fn test_scripted_source_can_inject_decode_errors() {
        let mut source = ScriptedSource::from_outcomes([
            Ok("300\n".to_string()),
            Err(SourceError::Decode {
                message: "invalid utf-8".to_string(),
            }),
        ]);
        assert_eq!(source.read_line().unwrap(), "300\n");
        assert!(matches!(
            source.read_line(),
            Err(SourceError::Decode { .. })
        ));
    }
}
