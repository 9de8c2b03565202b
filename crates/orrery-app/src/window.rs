//! Window creation, event handling, and the render loop.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: the window and
//! GPU come up once in `resumed` (all-or-nothing — a GPU failure logs and
//! exits), pointer events accumulate between frames, and every
//! `RedrawRequested` runs exactly one loop tick: simulation step, controls
//! update, uniform upload, one draw, fader poll, then the next redraw
//! request. Vsync (Fifo presentation) paces the whole loop.

use std::sync::Arc;
use std::time::Instant;

use orrery_audio::{AudioFader, Playback, VolumeSink};
use orrery_config::Config;
use orrery_controls::{OrbitControls, PointerState};
use orrery_render::{Camera, RenderContext, SurfaceError, init_render_context_blocking};
use orrery_scene::SolarSystem;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::renderer::SceneRenderer;

/// Initial camera distance from the origin, along +Z.
pub const INITIAL_CAMERA_DISTANCE: f32 = 5.0;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Advance everything that is not a GPU side effect by one frame:
/// rotations, controller damping, camera pose, and the fade timer.
///
/// Kept free of rendering so the whole per-frame update is testable
/// without a window or a device.
pub fn advance_simulation<S: VolumeSink>(
    scene: &mut SolarSystem,
    pointer: &mut PointerState,
    controls: &mut OrbitControls,
    camera: &mut Camera,
    fader: &mut AudioFader<S>,
    now: Instant,
) {
    scene.tick();

    controls.apply_pointer(pointer);
    pointer.clear_transients();
    controls.update();
    camera.position = controls.eye();
    camera.rotation = controls.look_rotation();

    fader.poll(now);
}

/// Application state owning the window, GPU context, scene, and audio.
pub struct AppState {
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    renderer: Option<SceneRenderer>,
    scene: SolarSystem,
    pointer: PointerState,
    controls: OrbitControls,
    camera: Camera,
    fader: AudioFader<Playback>,
    config: Config,
}

impl AppState {
    /// Build the full scene and an idle fader from the given config. GPU
    /// resources follow in `resumed`.
    pub fn with_config(config: Config) -> Self {
        let scene = SolarSystem::new(config.sky.star_count);
        let fader = AudioFader::new(
            config.audio.target_volume,
            std::time::Duration::from_millis(config.audio.fade_duration_ms),
            config.audio.fade_steps,
        );

        Self {
            window: None,
            gpu: None,
            renderer: None,
            scene,
            pointer: PointerState::new(),
            controls: OrbitControls::new(INITIAL_CAMERA_DISTANCE),
            camera: Camera::default(),
            fader,
            config,
        }
    }

    /// Kick off the audio load. Failure leaves the viewer silent for the
    /// rest of the run; there is no retry and no timeout.
    fn start_audio(&mut self) {
        if self.config.audio.muted {
            info!("audio muted by configuration");
            return;
        }

        self.fader.begin_loading();
        let path = std::path::Path::new(&self.config.audio.track);
        match Playback::load(path) {
            Ok(playback) => {
                self.fader.on_loaded(playback, Instant::now());
                info!(
                    "audio fade-in started: {} steps over {} ms",
                    self.config.audio.fade_steps, self.config.audio.fade_duration_ms
                );
            }
            Err(e) => {
                warn!("could not load {}: {e}", path.display());
                self.fader.on_load_failed();
            }
        }
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect_ratio(width as f32, height as f32);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
        }
        if let (Some(renderer), Some(gpu)) = (&mut self.renderer, &self.gpu) {
            renderer.resize(gpu);
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = window_attributes_from_config(&self.config);
        let window = event_loop
            .create_window(attrs)
            .expect("Failed to create window");
        let window = Arc::new(window);

        let size = window.inner_size();
        self.camera
            .set_aspect_ratio(size.width as f32, size.height as f32);

        match init_render_context_blocking(window.clone()) {
            Ok(ctx) => {
                self.renderer = Some(SceneRenderer::new(&ctx, &self.scene));
                self.gpu = Some(ctx);
            }
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
        self.start_audio();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.handle_resize(new_size.width, new_size.height);
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.handle_resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.pointer.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.pointer.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                advance_simulation(
                    &mut self.scene,
                    &mut self.pointer,
                    &mut self.controls,
                    &mut self.camera,
                    &mut self.fader,
                    Instant::now(),
                );

                let render_result = match (&mut self.renderer, &self.gpu) {
                    (Some(renderer), Some(gpu)) => {
                        Some(renderer.render(gpu, &self.scene, &self.camera))
                    }
                    _ => None,
                };
                match render_result {
                    Some(Ok(())) | None => {}
                    Some(Err(SurfaceError::Lost)) => {
                        let (w, h) = match &self.window {
                            Some(window) => {
                                let s = window.inner_size();
                                (s.width, s.height)
                            }
                            None => (1, 1),
                        };
                        if let Some(gpu) = &mut self.gpu {
                            gpu.resize(w, h);
                        }
                    }
                    Some(Err(SurfaceError::OutOfMemory)) => {
                        error!("GPU out of memory");
                        event_loop.exit();
                    }
                    Some(Err(SurfaceError::Timeout)) => {
                        warn!("Surface timeout, skipping frame");
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Creates an event loop and runs the viewer with the given config.
///
/// This function blocks until the window is closed.
pub fn run_with_config(config: Config) {
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = AppState::with_config(config);
    event_loop.run_app(&mut app).expect("Event loop failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_audio::FadePhase;
    use std::time::Duration;

    struct NullSink;

    impl VolumeSink for NullSink {
        fn set_volume(&mut self, _volume: f32) {}
        fn play(&mut self) {}
    }

    fn harness() -> (
        SolarSystem,
        PointerState,
        OrbitControls,
        Camera,
        AudioFader<NullSink>,
    ) {
        (
            SolarSystem::new(0),
            PointerState::new(),
            OrbitControls::new(INITIAL_CAMERA_DISTANCE),
            Camera::default(),
            AudioFader::new(0.5, Duration::from_millis(3000), 60),
        )
    }

    #[test]
    fn test_window_attributes_follow_config() {
        let config = Config::default();
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Orrery");
        assert!(attrs.inner_size.is_some());
    }

    #[test]
    fn test_hundred_frames_advance_orbits() {
        let (mut scene, mut pointer, mut controls, mut camera, mut fader) = harness();
        let start = Instant::now();
        for _ in 0..100 {
            advance_simulation(
                &mut scene,
                &mut pointer,
                &mut controls,
                &mut camera,
                &mut fader,
                start,
            );
        }
        assert_eq!(scene.frame_count(), 100);
        // Earth: 100 * 1.00 * 0.005, Mercury: 100 * 4.17 * 0.005.
        assert!((scene.pivots()[2].angle - 0.5).abs() < 1e-4);
        assert!((scene.pivots()[0].angle - 2.085).abs() < 1e-3);
        assert!((scene.sun_angle - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_camera_holds_still_without_input() {
        let (mut scene, mut pointer, mut controls, mut camera, mut fader) = harness();
        let start = Instant::now();
        for _ in 0..50 {
            advance_simulation(
                &mut scene,
                &mut pointer,
                &mut controls,
                &mut camera,
                &mut fader,
                start,
            );
        }
        assert!((camera.position - glam::Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_drag_eases_camera_over_frames() {
        use winit::event::{ElementState, MouseButton};

        let (mut scene, mut pointer, mut controls, mut camera, mut fader) = harness();
        let start = Instant::now();

        pointer.on_button(MouseButton::Left, ElementState::Pressed);
        pointer.on_cursor_moved(0.0, 0.0);
        pointer.on_cursor_moved(120.0, 0.0);
        pointer.on_button(MouseButton::Left, ElementState::Released);

        advance_simulation(
            &mut scene,
            &mut pointer,
            &mut controls,
            &mut camera,
            &mut fader,
            start,
        );
        let after_one = camera.position;
        assert!((after_one - glam::Vec3::new(0.0, 0.0, 5.0)).length() > 1e-4);

        // The gesture keeps easing for several frames after release.
        advance_simulation(
            &mut scene,
            &mut pointer,
            &mut controls,
            &mut camera,
            &mut fader,
            start,
        );
        assert!((camera.position - after_one).length() > 1e-5);
    }

    #[test]
    fn test_fade_completes_through_the_loop() {
        let (mut scene, mut pointer, mut controls, mut camera, mut fader) = harness();
        let start = Instant::now();
        fader.begin_loading();
        fader.on_loaded(NullSink, start);

        for i in 1..=120u64 {
            advance_simulation(
                &mut scene,
                &mut pointer,
                &mut controls,
                &mut camera,
                &mut fader,
                start + Duration::from_millis(50 * i),
            );
        }
        assert_eq!(fader.phase(), FadePhase::Steady);
        assert_eq!(fader.volume(), 0.5);
    }

    #[test]
    fn test_muted_config_keeps_fader_idle() {
        let mut config = Config::default();
        config.audio.muted = true;
        let mut app = AppState::with_config(config);
        app.start_audio();
        assert_eq!(app.fader.phase(), FadePhase::Idle);
    }
}
