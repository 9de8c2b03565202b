//! Camera navigation for the orrery viewer.
//!
//! [`PointerState`] accumulates winit pointer events during a frame;
//! [`OrbitControls`] turns them into a damped orbit/zoom/pan camera that
//! eases toward rest over subsequent frames.

pub mod orbit;
pub mod pointer;

pub use orbit::OrbitControls;
pub use pointer::PointerState;
