//! Telemetry helpers for applications embedding `ladder-rs`.
//!
//! This module keeps tracing setup explicit and opt-in.
//! Consumers can either call `init_default_tracing` or wire their own
//! `tracing` subscriber and filters. The render worker reports its frame rate
//! through [`FrameRateWindow`] at `debug` level.

use std::time::{Duration, Instant};

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Rolling window summary emitted once per elapsed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRateSample {
    pub frames: u64,
    pub window: Duration,
}

impl FrameRateSample {
    #[must_use]
    pub fn frames_per_second(self) -> f64 {
        let secs = self.window.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.frames as f64 / secs
    }
}

/// Counts painted frames and yields a sample each time `window` elapses.
#[derive(Debug, Clone, Copy)]
pub struct FrameRateWindow {
    window: Duration,
    started_at: Instant,
    frames: u64,
}

impl FrameRateWindow {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self::starting_at(window, Instant::now())
    }

    #[must_use]
    pub fn starting_at(window: Duration, started_at: Instant) -> Self {
        Self {
            window,
            started_at,
            frames: 0,
        }
    }

    pub fn record_frame(&mut self) {
        self.frames += 1;
    }

    /// Returns a sample and restarts the window once `now` is past its end.
    pub fn poll(&mut self, now: Instant) -> Option<FrameRateSample> {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed < self.window {
            return None;
        }
        let sample = FrameRateSample {
            frames: self.frames,
            window: elapsed,
        };
        self.frames = 0;
        self.started_at = now;
        Some(sample)
    }
}

impl Default for FrameRateWindow {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
