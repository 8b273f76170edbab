//! Hand-to-Pointer Translation
//!
//! [`HandInputTranslator`] is the frame handler: for every delivered
//! frame it walks the body slots, projects the chosen hand's joint to
//! screen coordinates, and dispatches on the hand pose - open moves
//! the cursor, closed left-clicks, lasso right-clicks, each click gated
//! by its own cooldown timer. Anything below high confidence is logged
//! but acts on nothing.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::config::TrackingConfig;
use crate::pointer::{PointerBackend, PointerButton};
use crate::sensor::body::{BodyRecord, BodySlot, Confidence, HandPose, TrackedHand, TrackingState};
use crate::sensor::device::DepthMapper;
use crate::sensor::session::FrameHandler;
use crate::translate::cooldown::{CooldownState, CooldownTimer};
use crate::translate::screen::ScreenMapper;

/// Translation counters for the shutdown summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslatorStats {
    /// Frames handled
    pub frames: u64,
    /// Cursor moves issued
    pub moves: u64,
    /// Left clicks fired
    pub left_clicks: u64,
    /// Right clicks fired
    pub right_clicks: u64,
}

/// Turns tracked-hand frames into pointer actions
pub struct HandInputTranslator<P: PointerBackend> {
    pointer: P,
    mapper: DepthMapper,
    screen: ScreenMapper,
    hand: TrackedHand,
    left_cooldown: CooldownTimer,
    right_cooldown: CooldownTimer,
    stats: TranslatorStats,
}

impl<P: PointerBackend> HandInputTranslator<P> {
    /// Build a translator over the given backend and mappers
    ///
    /// Both cooldown timers are seeded at construction, so the first
    /// click of either button requires a full cooldown after startup.
    pub fn new(
        pointer: P,
        mapper: DepthMapper,
        screen: ScreenMapper,
        tracking: &TrackingConfig,
    ) -> Self {
        let now = Instant::now();
        Self {
            pointer,
            mapper,
            screen,
            hand: tracking.hand,
            left_cooldown: CooldownTimer::starting_at(
                Duration::from_millis(tracking.left_click_cooldown_ms),
                now,
            ),
            right_cooldown: CooldownTimer::starting_at(
                Duration::from_millis(tracking.right_click_cooldown_ms),
                now,
            ),
            stats: TranslatorStats::default(),
        }
    }

    /// Handle one frame against an explicit clock reading
    ///
    /// Deterministic entry point; [`FrameHandler::on_frame`] calls this
    /// with `Instant::now()`. Bodies are processed in slot order, so
    /// with several tracked bodies the last one wins the cursor.
    pub fn process_frame(&mut self, bodies: &[BodySlot], now: Instant) {
        self.stats.frames += 1;
        for slot in bodies {
            let Some(body) = slot else { continue };
            if !body.tracked {
                continue;
            }
            self.process_body(body, now);
        }
    }

    fn process_body(&mut self, body: &BodyRecord, now: Instant) {
        let Some(joint) = body.joint(self.hand.joint()) else {
            return;
        };
        if joint.state != TrackingState::Tracked {
            return;
        }

        let Some(depth) = self.mapper.camera_to_depth(joint.position) else {
            trace!("hand joint has no depth projection");
            return;
        };
        let point = self.screen.to_screen(depth);

        let hand = body.hand(self.hand);
        debug!(
            depth_x = depth.x,
            depth_y = depth.y,
            screen_x = point.x,
            screen_y = point.y,
            pose = ?hand.pose,
            "hand sample"
        );

        if hand.confidence != Confidence::High {
            trace!("pose confidence below high, no action");
            return;
        }

        match hand.pose {
            HandPose::Open => {
                match self.pointer.move_to(point.x as i32, point.y as i32) {
                    Ok(()) => self.stats.moves += 1,
                    Err(e) => warn!(error = %e, "cursor move failed"),
                }
            }
            HandPose::Closed => self.fire_click(PointerButton::Left, now),
            HandPose::Lasso => self.fire_click(PointerButton::Right, now),
            // Unclassified poses take no action
            HandPose::Unknown | HandPose::NotTracked => {}
        }
    }

    fn fire_click(&mut self, button: PointerButton, now: Instant) {
        let timer = match button {
            PointerButton::Left => &mut self.left_cooldown,
            PointerButton::Right => &mut self.right_cooldown,
        };
        if timer.state(now) != CooldownState::Armed {
            trace!(button = %button, "click suppressed, cooling down");
            return;
        }

        match self.pointer.click(button) {
            Ok(()) => {
                // Only a delivered click consumes the cooldown
                match button {
                    PointerButton::Left => {
                        self.left_cooldown.reset(now);
                        self.stats.left_clicks += 1;
                    }
                    PointerButton::Right => {
                        self.right_cooldown.reset(now);
                        self.stats.right_clicks += 1;
                    }
                }
                info!(button = %button, "click injected");
            }
            Err(e) => warn!(button = %button, error = %e, "click injection failed"),
        }
    }

    /// Counters so far
    pub fn stats(&self) -> TranslatorStats {
        self.stats
    }

    /// The backend this translator injects through
    pub fn pointer(&self) -> &P {
        &self.pointer
    }
}

impl<P: PointerBackend> FrameHandler for HandInputTranslator<P> {
    fn on_frame(&mut self, bodies: &[BodySlot]) {
        self.process_frame(bodies, Instant::now());
    }
}
