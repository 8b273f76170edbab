//! Sensor Session Lifecycle
//!
//! [`SensorSession`] owns a sensor device from acquisition to close:
//! it opens the device, caches the reported geometry, allocates the
//! tracked-body array once, pumps frames to a single handler, and
//! guarantees the device is closed exactly once - explicitly or via
//! `Drop` on early-return paths.
//!
//! # Delivery guarantee
//!
//! [`SensorSession::run`] is the only frame source and it awaits each
//! handler invocation to completion before acquiring the next frame.
//! Handlers therefore never observe overlapping invocations and may
//! keep per-frame state (such as debounce timers) without locking.

use tracing::{debug, info, trace, warn};

use crate::config::{SensorConfig, SensorSource};
use crate::sensor::body::BodySlot;
use crate::sensor::device::{DepthMapper, DepthSensor, FrameStatus, SensorInfo};
use crate::sensor::error::{Result, SensorError};
use crate::sensor::feed::{StreamDevice, TcpDevice};
use crate::sensor::replay::ReplayDevice;

/// Receives refreshed body slots, one frame at a time
///
/// Invocations are serialized by the session pump; see the module docs.
/// Implementations copy anything they keep past the call.
pub trait FrameHandler {
    /// Handle one delivered frame
    fn on_frame(&mut self, bodies: &[BodySlot]);
}

/// Frame pump counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames refreshed and delivered to the handler
    pub frames_delivered: u64,
    /// Frames skipped (dropped by the device or undecodable)
    pub frames_skipped: u64,
}

/// Owns one sensor device for its whole lifecycle
pub struct SensorSession {
    device: Box<dyn DepthSensor>,
    info: Option<SensorInfo>,
    bodies: Vec<BodySlot>,
    stats: SessionStats,
    closed: bool,
}

impl SensorSession {
    /// Acquire the device named by the sensor configuration
    ///
    /// Fails with [`SensorError::NoSensorAvailable`] when no source is
    /// configured or a configured replay capture does not exist. A TCP
    /// source is only probed at [`open`](Self::open) time.
    pub fn acquire_default(config: &SensorConfig) -> Result<Self> {
        let device: Box<dyn DepthSensor> = match &config.source {
            None => {
                warn!("no sensor source configured");
                return Err(SensorError::NoSensorAvailable);
            }
            Some(SensorSource::Replay(path)) => {
                if !path.exists() {
                    warn!(path = %path.display(), "replay capture not found");
                    return Err(SensorError::NoSensorAvailable);
                }
                Box::new(ReplayDevice::from_path(path).with_pacing(config.pace_replay))
            }
            Some(SensorSource::Stdin) => Box::new(StreamDevice::stdin()),
            Some(SensorSource::Tcp(addr)) => Box::new(TcpDevice::new(addr.clone())),
        };

        Ok(Self::from_device(device))
    }

    /// Wrap an already-constructed device
    pub fn from_device(device: Box<dyn DepthSensor>) -> Self {
        Self {
            device,
            info: None,
            bodies: Vec::new(),
            stats: SessionStats::default(),
            closed: false,
        }
    }

    /// Open the device and cache its geometry
    ///
    /// Allocates the tracked-body array sized to the sensor-reported
    /// capacity; the array is refreshed in place for every frame and
    /// never reallocated. Calling `open` on an open session returns the
    /// cached geometry.
    pub async fn open(&mut self) -> Result<&SensorInfo> {
        if self.closed {
            return Err(SensorError::Closed);
        }
        if self.info.is_none() {
            let info = self.device.open().await?;
            self.bodies = vec![None; info.body_capacity];
            self.info = Some(info);
        }
        // Just populated above when it was absent
        self.info.as_ref().ok_or(SensorError::NotOpen)
    }

    /// The geometry reported at open, if the session is open
    pub fn info(&self) -> Option<&SensorInfo> {
        self.info.as_ref()
    }

    /// Camera-to-depth mapper for this session's sensor
    ///
    /// Derived from the intrinsics reported at open and handed to the
    /// translator once; read-only thereafter.
    pub fn mapper(&self) -> Result<DepthMapper> {
        let info = self.info.as_ref().ok_or(SensorError::NotOpen)?;
        Ok(DepthMapper::new(info.intrinsics))
    }

    /// Pump frames to `handler` until the stream ends
    ///
    /// At most one handler is registered by construction: the pump takes
    /// it by exclusive borrow. Dropped or undecodable frames are counted
    /// and skipped without invoking the handler; only hard IO errors
    /// propagate. Cancelling the returned future (for shutdown) leaves
    /// the session ready to be closed.
    pub async fn run<H: FrameHandler>(&mut self, handler: &mut H) -> Result<()> {
        if self.closed {
            return Err(SensorError::Closed);
        }
        if self.info.is_none() {
            return Err(SensorError::NotOpen);
        }

        let Self {
            device,
            bodies,
            stats,
            ..
        } = self;

        loop {
            match device.next_frame(bodies).await? {
                FrameStatus::Refreshed => {
                    stats.frames_delivered += 1;
                    trace!(frame = stats.frames_delivered, "frame received");
                    handler.on_frame(bodies);
                }
                FrameStatus::Empty => {
                    stats.frames_skipped += 1;
                }
                FrameStatus::Ended => {
                    info!(
                        delivered = stats.frames_delivered,
                        skipped = stats.frames_skipped,
                        "sensor stream ended"
                    );
                    return Ok(());
                }
            }
        }
    }

    /// Frame pump counters so far
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Close the device
    ///
    /// Idempotent; the device sees exactly one close. After closing,
    /// `open` and `run` fail with [`SensorError::Closed`].
    pub fn close(&mut self) {
        if !self.closed {
            self.device.close();
            self.closed = true;
            debug!("sensor session closed");
        }
    }

    /// Whether the session has been closed
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for SensorSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::body::BodyRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Scripted device: yields the scripted statuses, then Ended
    struct ScriptedDevice {
        script: Vec<FrameStatus>,
        cursor: usize,
        closes: Arc<AtomicUsize>,
    }

    impl ScriptedDevice {
        fn new(script: Vec<FrameStatus>) -> (Self, Arc<AtomicUsize>) {
            let closes = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    script,
                    cursor: 0,
                    closes: Arc::clone(&closes),
                },
                closes,
            )
        }
    }

    #[async_trait]
    impl DepthSensor for ScriptedDevice {
        async fn open(&mut self) -> Result<SensorInfo> {
            Ok(SensorInfo {
                body_capacity: 2,
                ..SensorInfo::kinect_v2()
            })
        }

        async fn next_frame(&mut self, slots: &mut [BodySlot]) -> Result<FrameStatus> {
            let status = self
                .script
                .get(self.cursor)
                .copied()
                .unwrap_or(FrameStatus::Ended);
            self.cursor += 1;
            if status == FrameStatus::Refreshed {
                slots[0] = Some(BodyRecord::default());
            }
            Ok(status)
        }

        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct CountingHandler {
        frames: usize,
        slot_len: usize,
    }

    impl FrameHandler for CountingHandler {
        fn on_frame(&mut self, bodies: &[BodySlot]) {
            self.frames += 1;
            self.slot_len = bodies.len();
        }
    }

    #[tokio::test]
    async fn test_pump_delivers_and_counts() {
        let (device, _) = ScriptedDevice::new(vec![
            FrameStatus::Refreshed,
            FrameStatus::Empty,
            FrameStatus::Refreshed,
        ]);
        let mut session = SensorSession::from_device(Box::new(device));
        session.open().await.unwrap();

        let mut handler = CountingHandler {
            frames: 0,
            slot_len: 0,
        };
        session.run(&mut handler).await.unwrap();

        assert_eq!(handler.frames, 2);
        assert_eq!(handler.slot_len, 2);
        assert_eq!(
            session.stats(),
            SessionStats {
                frames_delivered: 2,
                frames_skipped: 1
            }
        );
    }

    #[tokio::test]
    async fn test_run_requires_open() {
        let (device, _) = ScriptedDevice::new(vec![]);
        let mut session = SensorSession::from_device(Box::new(device));
        let mut handler = CountingHandler {
            frames: 0,
            slot_len: 0,
        };

        assert!(matches!(
            session.run(&mut handler).await,
            Err(SensorError::NotOpen)
        ));
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let (device, _) = ScriptedDevice::new(vec![]);
        let mut session = SensorSession::from_device(Box::new(device));

        let first = *session.open().await.unwrap();
        let second = *session.open().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_device_sees_exactly_one_close() {
        let (device, closes) = ScriptedDevice::new(vec![]);
        let mut session = SensorSession::from_device(Box::new(device));
        session.open().await.unwrap();

        session.close();
        session.close();
        assert_eq!(closes.load(Ordering::SeqCst), 1);

        drop(session);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drop_closes_unclosed_session() {
        let (device, closes) = ScriptedDevice::new(vec![]);
        let session = SensorSession::from_device(Box::new(device));

        drop(session);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_closed_session_rejects_operations() {
        let (device, _) = ScriptedDevice::new(vec![]);
        let mut session = SensorSession::from_device(Box::new(device));
        session.close();

        assert!(matches!(session.open().await, Err(SensorError::Closed)));

        let mut handler = CountingHandler {
            frames: 0,
            slot_len: 0,
        };
        assert!(matches!(
            session.run(&mut handler).await,
            Err(SensorError::Closed)
        ));
    }

    #[test]
    fn test_acquire_without_source() {
        let config = SensorConfig {
            source: None,
            pace_replay: true,
        };
        assert!(matches!(
            SensorSession::acquire_default(&config),
            Err(SensorError::NoSensorAvailable)
        ));
    }

    #[test]
    fn test_acquire_missing_replay_capture() {
        let config = SensorConfig {
            source: Some(SensorSource::Replay("/nonexistent/capture.jsonl".into())),
            pace_replay: false,
        };
        assert!(matches!(
            SensorSession::acquire_default(&config),
            Err(SensorError::NoSensorAvailable)
        ));
    }

    #[tokio::test]
    async fn test_info_available_after_open() {
        let (device, _) = ScriptedDevice::new(vec![]);
        let mut session = SensorSession::from_device(Box::new(device));
        assert!(session.info().is_none());

        session.open().await.unwrap();
        let info = session.info().unwrap();
        assert_eq!(info.frame.width, 512);
    }

    #[tokio::test]
    async fn test_mapper_requires_open_session() {
        let (device, _) = ScriptedDevice::new(vec![]);
        let mut session = SensorSession::from_device(Box::new(device));
        assert!(matches!(session.mapper(), Err(SensorError::NotOpen)));

        session.open().await.unwrap();
        assert!(session.mapper().is_ok());
    }
}
