//! Background audio with a stepped linear fade-in.
//!
//! The fade math is a pure function, the state machine drives any
//! [`VolumeSink`], and the poll-driven timer lives on the render thread —
//! no audio hardware is needed anywhere near the tests. The rodio-backed
//! [`Playback`] sink is the only piece that touches a device.

pub mod fade;
pub mod fader;
pub mod player;

pub use fade::{FadeTimer, fade_volume};
pub use fader::{AudioFader, FadePhase, VolumeSink};
pub use player::{AudioError, Playback};
