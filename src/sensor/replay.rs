//! Recorded Capture Playback
//!
//! [`ReplayDevice`] plays a capture file (see [`crate::sensor::capture`])
//! as if a live sensor were delivering it, honoring each frame's
//! `offset_ms` against the tokio clock. Pacing can be disabled for
//! tests, which makes playback run flat out.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::sensor::body::BodySlot;
use crate::sensor::capture::{parse_frame, parse_header};
use crate::sensor::device::{DepthSensor, FrameStatus, SensorInfo};
use crate::sensor::error::{Result, SensorError};

/// Plays a recorded capture file as a sensor device
pub struct ReplayDevice {
    path: PathBuf,
    lines: Option<Lines<BufReader<File>>>,
    pace: bool,
    origin: Option<Instant>,
}

impl ReplayDevice {
    /// Create a paced replay of the capture at `path`
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lines: None,
            pace: true,
            origin: None,
        }
    }

    /// Enable or disable frame pacing (enabled by default)
    pub fn with_pacing(mut self, pace: bool) -> Self {
        self.pace = pace;
        self
    }

    /// The capture file being played
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DepthSensor for ReplayDevice {
    async fn open(&mut self) -> Result<SensorInfo> {
        let file = File::open(&self.path).await?;
        let mut lines = BufReader::new(file).lines();

        let header_line = lines
            .next_line()
            .await?
            .ok_or_else(|| SensorError::Header("capture file is empty".to_string()))?;
        let header = parse_header(&header_line)?;

        debug!(
            path = %self.path.display(),
            width = header.depth_width,
            height = header.depth_height,
            bodies = header.body_capacity,
            "replay capture open"
        );

        self.lines = Some(lines);
        self.origin = None;
        Ok(header.to_info())
    }

    async fn next_frame(&mut self, slots: &mut [BodySlot]) -> Result<FrameStatus> {
        let lines = self.lines.as_mut().ok_or(SensorError::NotOpen)?;

        let line = loop {
            match lines.next_line().await? {
                None => return Ok(FrameStatus::Ended),
                Some(l) if l.trim().is_empty() => continue,
                Some(l) => break l,
            }
        };

        let frame = match parse_frame(&line) {
            Ok(frame) => frame,
            Err(e) => {
                debug!(error = %e, "skipping undecodable capture line");
                return Ok(FrameStatus::Empty);
            }
        };

        if self.pace {
            let origin = *self.origin.get_or_insert_with(Instant::now);
            tokio::time::sleep_until(origin + std::time::Duration::from_millis(frame.offset_ms))
                .await;
        }

        let dropped = frame.apply(slots);
        if dropped > 0 {
            trace!(dropped, "capture frame carried more bodies than the sensor capacity");
        }
        Ok(FrameStatus::Refreshed)
    }

    fn close(&mut self) {
        self.lines = None;
        self.origin = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_capture(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_open_reads_header() {
        let capture = write_capture(&[r#"{"depth_width": 512, "depth_height": 424, "body_capacity": 2}"#]);
        let mut device = ReplayDevice::from_path(capture.path()).with_pacing(false);

        let info = device.open().await.unwrap();
        assert_eq!(info.body_capacity, 2);
    }

    #[tokio::test]
    async fn test_frames_then_ended() {
        let capture = write_capture(&[
            "{}",
            r#"{"offset_ms": 0, "bodies": [{}]}"#,
            r#"{"offset_ms": 16, "bodies": [null]}"#,
        ]);
        let mut device = ReplayDevice::from_path(capture.path()).with_pacing(false);
        let info = device.open().await.unwrap();
        let mut slots: Vec<BodySlot> = vec![None; info.body_capacity];

        assert_eq!(device.next_frame(&mut slots).await.unwrap(), FrameStatus::Refreshed);
        assert!(slots[0].is_some());

        assert_eq!(device.next_frame(&mut slots).await.unwrap(), FrameStatus::Refreshed);
        assert!(slots[0].is_none());

        assert_eq!(device.next_frame(&mut slots).await.unwrap(), FrameStatus::Ended);
    }

    #[tokio::test]
    async fn test_undecodable_line_is_empty_frame() {
        let capture = write_capture(&["{}", "not json", r#"{"bodies": [{}]}"#]);
        let mut device = ReplayDevice::from_path(capture.path()).with_pacing(false);
        device.open().await.unwrap();
        let mut slots: Vec<BodySlot> = vec![None; 6];

        assert_eq!(device.next_frame(&mut slots).await.unwrap(), FrameStatus::Empty);
        assert_eq!(device.next_frame(&mut slots).await.unwrap(), FrameStatus::Refreshed);
    }

    #[tokio::test]
    async fn test_missing_header_errors() {
        let capture = write_capture(&[r#"{"offset_ms": 0, "bodies": []}"#]);
        let mut device = ReplayDevice::from_path(capture.path());

        assert!(matches!(device.open().await, Err(SensorError::Header(_))));
    }

    #[tokio::test]
    async fn test_next_frame_before_open() {
        let mut device = ReplayDevice::from_path("/nonexistent.jsonl");
        let mut slots: Vec<BodySlot> = vec![None];

        assert!(matches!(
            device.next_frame(&mut slots).await,
            Err(SensorError::NotOpen)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_honors_offsets() {
        let capture = write_capture(&["{}", r#"{"offset_ms": 250, "bodies": []}"#]);
        let mut device = ReplayDevice::from_path(capture.path());
        device.open().await.unwrap();
        let mut slots: Vec<BodySlot> = vec![None];

        let before = Instant::now();
        device.next_frame(&mut slots).await.unwrap();
        // Paused tokio clock auto-advances through the sleep
        assert!(Instant::now() - before >= std::time::Duration::from_millis(250));
    }
}
