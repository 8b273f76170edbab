//! Live Sensor Feeds
//!
//! Devices that consume the capture stream format from a live byte
//! stream published by a sensor-side helper process: [`StreamDevice`]
//! wraps any buffered async reader (typically a stdin pipe), and
//! [`TcpDevice`] connects to a publisher over TCP at open time.
//!
//! Live feeds ignore frame `offset_ms` values; frames are delivered as
//! they arrive.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::net::TcpStream;
use tracing::{debug, info, trace};

use crate::sensor::body::BodySlot;
use crate::sensor::capture::{parse_frame, parse_header};
use crate::sensor::device::{DepthSensor, FrameStatus, SensorInfo};
use crate::sensor::error::{Result, SensorError};

/// A sensor feed over any buffered async reader
pub struct StreamDevice<R> {
    source: Option<R>,
    lines: Option<Lines<R>>,
    label: String,
}

impl<R> StreamDevice<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    /// Wrap a reader carrying the capture stream format
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        Self {
            source: Some(reader),
            lines: None,
            label: label.into(),
        }
    }
}

impl StreamDevice<BufReader<Stdin>> {
    /// A feed reading from this process's standard input
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), "stdin")
    }
}

#[async_trait]
impl<R> DepthSensor for StreamDevice<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn open(&mut self) -> Result<SensorInfo> {
        // A stream reads once; after close there is nothing to reopen
        let source = self.source.take().ok_or(SensorError::Closed)?;
        let mut lines = source.lines();

        let header_line = lines
            .next_line()
            .await?
            .ok_or_else(|| SensorError::Header("feed closed before sending a header".to_string()))?;
        let header = parse_header(&header_line)?;

        debug!(
            feed = %self.label,
            width = header.depth_width,
            height = header.depth_height,
            bodies = header.body_capacity,
            "sensor feed open"
        );

        self.lines = Some(lines);
        Ok(header.to_info())
    }

    async fn next_frame(&mut self, slots: &mut [BodySlot]) -> Result<FrameStatus> {
        let lines = self.lines.as_mut().ok_or(SensorError::NotOpen)?;

        let line = loop {
            match lines.next_line().await? {
                None => {
                    info!(feed = %self.label, "sensor feed ended");
                    return Ok(FrameStatus::Ended);
                }
                Some(l) if l.trim().is_empty() => continue,
                Some(l) => break l,
            }
        };

        match parse_frame(&line) {
            Ok(frame) => {
                let dropped = frame.apply(slots);
                if dropped > 0 {
                    trace!(dropped, "feed frame carried more bodies than the sensor capacity");
                }
                Ok(FrameStatus::Refreshed)
            }
            Err(e) => {
                debug!(feed = %self.label, error = %e, "skipping undecodable feed line");
                Ok(FrameStatus::Empty)
            }
        }
    }

    fn close(&mut self) {
        self.lines = None;
        self.source = None;
    }
}

/// A sensor feed connecting to a TCP publisher
pub struct TcpDevice {
    addr: String,
    inner: Option<StreamDevice<BufReader<TcpStream>>>,
}

impl TcpDevice {
    /// A feed that will connect to `addr` (host:port) at open time
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            inner: None,
        }
    }
}

#[async_trait]
impl DepthSensor for TcpDevice {
    async fn open(&mut self) -> Result<SensorInfo> {
        let stream = TcpStream::connect(&self.addr).await?;
        info!(addr = %self.addr, "sensor feed connected");

        let mut inner = StreamDevice::new(BufReader::new(stream), format!("tcp://{}", self.addr));
        let info = inner.open().await?;
        self.inner = Some(inner);
        Ok(info)
    }

    async fn next_frame(&mut self, slots: &mut [BodySlot]) -> Result<FrameStatus> {
        self.inner
            .as_mut()
            .ok_or(SensorError::NotOpen)?
            .next_frame(slots)
            .await
    }

    fn close(&mut self) {
        if let Some(inner) = &mut self.inner {
            inner.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_from(bytes: &'static [u8]) -> StreamDevice<BufReader<&'static [u8]>> {
        StreamDevice::new(BufReader::new(bytes), "test")
    }

    #[tokio::test]
    async fn test_feed_header_and_frames() {
        let mut device = feed_from(b"{\"body_capacity\": 1}\n{\"bodies\": [{}]}\n");

        let info = device.open().await.unwrap();
        assert_eq!(info.body_capacity, 1);

        let mut slots: Vec<BodySlot> = vec![None; info.body_capacity];
        assert_eq!(device.next_frame(&mut slots).await.unwrap(), FrameStatus::Refreshed);
        assert!(slots[0].is_some());

        assert_eq!(device.next_frame(&mut slots).await.unwrap(), FrameStatus::Ended);
    }

    #[tokio::test]
    async fn test_feed_skips_garbage_lines() {
        let mut device = feed_from(b"{}\ngarbage\n{\"bodies\": []}\n");
        device.open().await.unwrap();
        let mut slots: Vec<BodySlot> = vec![None; 6];

        assert_eq!(device.next_frame(&mut slots).await.unwrap(), FrameStatus::Empty);
        assert_eq!(device.next_frame(&mut slots).await.unwrap(), FrameStatus::Refreshed);
    }

    #[tokio::test]
    async fn test_feed_without_header_errors() {
        let mut device = feed_from(b"");
        assert!(matches!(device.open().await, Err(SensorError::Header(_))));
    }

    #[tokio::test]
    async fn test_feed_before_open_errors() {
        let mut device = feed_from(b"{}\n");
        let mut slots: Vec<BodySlot> = vec![None];

        assert!(matches!(
            device.next_frame(&mut slots).await,
            Err(SensorError::NotOpen)
        ));
    }

    #[tokio::test]
    async fn test_feed_cannot_reopen_after_close() {
        let mut device = feed_from(b"{}\n");
        device.open().await.unwrap();
        device.close();

        assert!(matches!(device.open().await, Err(SensorError::Closed)));
    }

    #[tokio::test]
    async fn test_blank_lines_between_frames() {
        let mut device = feed_from(b"{}\n\n\n{\"bodies\": [{}]}\n");
        device.open().await.unwrap();
        let mut slots: Vec<BodySlot> = vec![None; 6];

        assert_eq!(device.next_frame(&mut slots).await.unwrap(), FrameStatus::Refreshed);
    }
}
