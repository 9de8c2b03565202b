//! The fade-in state machine.
//!
//! `Idle -> Loading` at startup, `Loading -> FadingIn` once the clip is
//! bound and playback starts at volume zero, `FadingIn -> Steady` after the
//! final tick forces the exact target volume. Load failure drops back to
//! `Idle`: nothing plays, nothing retries, every later poll is a no-op.

use std::time::{Duration, Instant};

use crate::fade::{FadeTimer, fade_volume};

/// Anything whose volume the fader can drive.
pub trait VolumeSink {
    /// Set the playback volume, 1.0 = unattenuated.
    fn set_volume(&mut self, volume: f32);
    /// Begin (or resume) playback.
    fn play(&mut self);
}

/// Fader lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    /// Nothing loaded; also the terminal phase after a failed load.
    Idle,
    /// The clip is being fetched/decoded.
    Loading,
    /// Playback running, volume ramping toward the target.
    FadingIn,
    /// Ramp complete; volume holds at the target.
    Steady,
}

/// Drives a [`VolumeSink`] through the stepped fade-in.
pub struct AudioFader<S: VolumeSink> {
    phase: FadePhase,
    target_volume: f32,
    duration: Duration,
    steps: u32,
    step: u32,
    volume: f32,
    timer: Option<FadeTimer>,
    sink: Option<S>,
}

impl<S: VolumeSink> AudioFader<S> {
    /// Create an idle fader with the given ramp parameters.
    pub fn new(target_volume: f32, duration: Duration, steps: u32) -> Self {
        Self {
            phase: FadePhase::Idle,
            target_volume,
            duration,
            steps,
            step: 0,
            volume: 0.0,
            timer: None,
            sink: None,
        }
    }

    /// Mark the asynchronous load as started (`Idle -> Loading`).
    pub fn begin_loading(&mut self) {
        if self.phase == FadePhase::Idle {
            self.phase = FadePhase::Loading;
        }
    }

    /// Bind the decoded clip and start silent playback
    /// (`Loading -> FadingIn`). The fade schedule starts at `now`.
    pub fn on_loaded(&mut self, mut sink: S, now: Instant) {
        debug_assert_eq!(self.phase, FadePhase::Loading);
        sink.set_volume(0.0);
        sink.play();
        self.volume = 0.0;
        self.step = 0;
        self.timer = Some(FadeTimer::new(self.duration, self.steps, now));
        self.sink = Some(sink);
        self.phase = FadePhase::FadingIn;
    }

    /// Record a failed load (`Loading -> Idle`). The viewer keeps running
    /// silently; there is no retry and no timeout.
    pub fn on_load_failed(&mut self) {
        log::warn!("audio load failed; continuing without sound");
        self.phase = FadePhase::Idle;
        self.timer = None;
        self.sink = None;
    }

    /// Advance the fade by however many ticks are due at `now`. A no-op in
    /// every phase but `FadingIn`.
    pub fn poll(&mut self, now: Instant) {
        if self.phase != FadePhase::FadingIn {
            return;
        }
        let Some(timer) = self.timer.as_mut() else {
            return;
        };

        let fired = timer.poll(now);
        if fired == 0 {
            return;
        }

        self.step += fired;
        self.volume = fade_volume(self.step, self.steps, self.target_volume);
        if let Some(sink) = self.sink.as_mut() {
            sink.set_volume(self.volume);
        }

        if self.step >= self.steps {
            // fade_volume already forced the exact target.
            self.timer = None;
            self.phase = FadePhase::Steady;
            log::debug!("fade-in complete at volume {}", self.volume);
        }
    }

    /// Current phase.
    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// Most recently applied volume.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Fade ticks applied so far.
    pub fn step(&self) -> u32 {
        self.step
    }
}
