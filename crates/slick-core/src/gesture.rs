#![forbid(unsafe_code)]

//! Pan gesture recognition: pointer input into grant/move/release events.
//!
//! [`PanRecognizer`] is a small stateful processor that turns raw
//! [`PointerEvent`]s into [`PanEvent`]s with the shape a slider wants:
//!
//! - `Grant` carries the absolute screen position where the gesture was
//!   captured;
//! - `Move`, `Release` and `Terminate` carry the cumulative delta since the
//!   pointer went down, never a per-frame increment.
//!
//! # State Machine
//!
//! ```text
//! Idle --down--> Pressed --(displacement >= threshold)--> Granted
//!                   |                                        |
//!                   +--up/cancel--> Idle      up --> Release, cancel --> Terminate
//! ```
//!
//! With a threshold of `0.0` (the default) the gesture is granted on
//! pointer-down, so a plain tap is delivered as `Grant` followed by
//! `Release { dx: 0, dy: 0 }`.
//!
//! # Invariants
//!
//! 1. Every `Move`/`Release`/`Terminate` is preceded by exactly one `Grant`
//!    for the same gesture.
//! 2. A gesture that was never granted produces no events at all.
//! 3. Only one pointer is tracked; a second `Down` while pressed is ignored.

/// Thresholds for capturing a pan gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanConfig {
    /// Euclidean distance in pixels the pointer must travel before the
    /// gesture is granted (default: 0.0, grant on pointer-down).
    pub grant_threshold: f64,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            grant_threshold: 0.0,
        }
    }
}

/// Raw single-pointer input, in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed.
    Down { x: f64, y: f64 },
    /// Pointer moved while pressed (moves while released are ignored).
    Move { x: f64, y: f64 },
    /// Pointer released.
    Up { x: f64, y: f64 },
    /// The host took the pointer away (scroll capture, focus loss).
    Cancel,
}

/// A pan gesture event with cumulative deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanEvent {
    /// The gesture was captured at this absolute position.
    Grant { move_x: f64, move_y: f64 },
    /// The pointer moved; deltas are since pointer-down.
    Move { dx: f64, dy: f64 },
    /// The pointer was released; deltas are since pointer-down.
    Release { dx: f64, dy: f64 },
    /// The gesture was taken away; deltas are the last known ones.
    Terminate { dx: f64, dy: f64 },
}

impl PanEvent {
    /// Horizontal cumulative delta, `None` for `Grant`.
    #[must_use]
    pub fn dx(&self) -> Option<f64> {
        match *self {
            Self::Grant { .. } => None,
            Self::Move { dx, .. } | Self::Release { dx, .. } | Self::Terminate { dx, .. } => {
                Some(dx)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: (f64, f64),
    last: (f64, f64),
    granted: bool,
}

impl Press {
    fn delta(&self) -> (f64, f64) {
        (self.last.0 - self.origin.0, self.last.1 - self.origin.1)
    }
}

/// Stateful pan recognizer. Feed it with [`process`](PanRecognizer::process).
#[derive(Debug, Clone, Default)]
pub struct PanRecognizer {
    config: PanConfig,
    press: Option<Press>,
}

impl PanRecognizer {
    /// Create a recognizer with the given configuration.
    #[must_use]
    pub fn new(config: PanConfig) -> Self {
        Self {
            config,
            press: None,
        }
    }

    /// Process one pointer event, returning the pan events it produced.
    pub fn process(&mut self, event: PointerEvent) -> Vec<PanEvent> {
        let mut out = Vec::with_capacity(1);
        match event {
            PointerEvent::Down { x, y } => {
                if self.press.is_some() {
                    return out;
                }
                let granted = self.config.grant_threshold <= 0.0;
                self.press = Some(Press {
                    origin: (x, y),
                    last: (x, y),
                    granted,
                });
                if granted {
                    out.push(PanEvent::Grant { move_x: x, move_y: y });
                }
            }
            PointerEvent::Move { x, y } => {
                let Some(press) = self.press.as_mut() else {
                    return out;
                };
                press.last = (x, y);
                let (dx, dy) = press.delta();
                if press.granted {
                    out.push(PanEvent::Move { dx, dy });
                } else if dx.hypot(dy) >= self.config.grant_threshold {
                    press.granted = true;
                    out.push(PanEvent::Grant { move_x: x, move_y: y });
                }
            }
            PointerEvent::Up { x, y } => {
                if let Some(mut press) = self.press.take()
                    && press.granted
                {
                    press.last = (x, y);
                    let (dx, dy) = press.delta();
                    out.push(PanEvent::Release { dx, dy });
                }
            }
            PointerEvent::Cancel => {
                if let Some(press) = self.press.take()
                    && press.granted
                {
                    let (dx, dy) = press.delta();
                    out.push(PanEvent::Terminate { dx, dy });
                }
            }
        }
        out
    }

    /// Whether a granted gesture is in progress.
    #[inline]
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.press.is_some_and(|p| p.granted)
    }

    /// Drop all gesture state without emitting anything.
    pub fn reset(&mut self) {
        self.press = None;
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PanConfig {
        &self.config
    }
}
