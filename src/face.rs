//! Frame compositor and host entry points
//!
//! `WatchFace` is what the host talks to. Render, resize, tap and style
//! notifications may come from different threads; they all go through one
//! mutex around the face state, so a scene teardown never overlaps a frame
//! that is still reading it.

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::clock::LocalTime;
use crate::consts::MAX_FRAME_DELTA_MS;
use crate::error::Result;
use crate::renderer::font::{self, draw_text_centered};
use crate::renderer::{Canvas, Color};
use crate::settings::Settings;
use crate::sim::{Bounds, SceneKind, SceneState};
use crate::style::{palette, resolve_accent_color};

/// Display power state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerMode {
    /// Full frame rate, animations running
    #[default]
    Interactive,
    /// Low-power display, animations paused
    Ambient,
}

impl PowerMode {
    pub fn from_low_power(low_power: bool) -> Self {
        if low_power {
            PowerMode::Ambient
        } else {
            PowerMode::Interactive
        }
    }
}

/// An externally owned on-screen data item drawn after the background and time
pub trait Widget {
    /// Whether the widget is shown in `mode`
    fn is_enabled(&self, mode: PowerMode) -> bool;

    fn draw(&self, canvas: &mut Canvas, timestamp_ms: i64, mode: PowerMode);

    /// Focus outline used while the widget is being configured
    fn draw_highlight(&self, canvas: &mut Canvas, timestamp_ms: i64);
}

/// Elapsed-time tracker between consecutive animated frames
#[derive(Debug, Clone, Copy, Default)]
struct FrameTimer {
    last_ms: Option<i64>,
}

impl FrameTimer {
    /// Milliseconds since the previous tick, 0 on the first tick after a reset
    fn tick(&mut self, now_ms: i64) -> f32 {
        let elapsed = self
            .last_ms
            .map(|last| (now_ms - last).clamp(0, MAX_FRAME_DELTA_MS))
            .unwrap_or(0);
        self.last_ms = Some(now_ms);
        elapsed as f32
    }

    fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Everything guarded by the face lock
#[derive(Debug)]
struct FaceState<R> {
    scene: SceneState<R>,
    settings: Settings,
    timer: FrameTimer,
    low_power: bool,
}

impl<R: Rng> FaceState<R> {
    fn render(
        &mut self,
        canvas: &mut Canvas,
        timestamp_ms: i64,
        low_power: bool,
        widgets: &[&dyn Widget],
    ) {
        self.low_power = low_power;
        let mode = PowerMode::from_low_power(low_power);

        let (width, height) = (canvas.width() as f32, canvas.height() as f32);
        let current = self.scene.bounds();
        let full = Bounds::from_size(width, height);
        if !current.fits_within(width, height) && full != current {
            if let Err(e) = self.scene.resize(full) {
                log::error!("Resize during render failed: {e}");
            }
        }

        let time = LocalTime::from_millis(timestamp_ms);
        let accent = resolve_accent_color(self.settings.theme, time.hour);

        let elapsed_ms = if self.scene.kind().is_animated() && !low_power {
            self.timer.tick(timestamp_ms)
        } else {
            self.timer.reset();
            0.0
        };

        self.scene.advance_and_draw(elapsed_ms, canvas, accent, low_power);

        draw_time_block(canvas, &time, self.settings.use_24_hour, accent);

        if self.scene.kind() == SceneKind::ZenGarden && !low_power {
            self.scene.draw_ball_overlay(canvas);
        }

        for widget in widgets.iter().filter(|w| w.is_enabled(mode)) {
            widget.draw(canvas, timestamp_ms, mode);
        }
    }

    fn on_style_changed(&mut self, settings: Settings) -> Result<()> {
        self.settings = settings;
        self.scene.select(settings.scene)
    }
}

/// Date line above the time line, the pair centered on the display
fn draw_time_block(canvas: &mut Canvas, time: &LocalTime, use_24_hour: bool, accent: Color) {
    let (w, h) = (canvas.width(), canvas.height());
    let time_scale = (w.min(h) / 40).max(1);
    let date_scale = (time_scale / 2).max(1);
    let gap = time_scale;

    let date_h = font::text_height(date_scale);
    let block_h = date_h + gap + font::text_height(time_scale);
    let top = h as i32 / 2 - block_h as i32 / 2;
    let center_x = w as f32 / 2.0;

    draw_text_centered(
        canvas,
        &time.date_text(),
        center_x,
        top,
        date_scale,
        palette::DATE_NEUTRAL,
    );
    draw_text_centered(
        canvas,
        &time.time_text(use_24_hour),
        center_x,
        top + (date_h + gap) as i32,
        time_scale,
        accent,
    );
}

/// The animated watch face
pub struct WatchFace<R = Pcg32> {
    state: Mutex<FaceState<R>>,
}

impl WatchFace<Pcg32> {
    /// Face seeded from the thread-local generator
    pub fn new(settings: Settings) -> Self {
        Self::with_rng(settings, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Face with reproducible randomness
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> WatchFace<R> {
    pub fn with_rng(settings: Settings, rng: R) -> Self {
        Self {
            state: Mutex::new(FaceState {
                scene: SceneState::new(settings.scene, rng),
                settings,
                timer: FrameTimer::default(),
                low_power: false,
            }),
        }
    }

    /// Drawable area changed
    pub fn resize(&self, bounds: Bounds) -> Result<()> {
        self.state.lock().scene.resize(bounds)
    }

    /// Draw one frame into `canvas`
    ///
    /// `timestamp_ms` is local wall-clock time. Bounds from the last resize
    /// are kept as long as the canvas holds them; otherwise the whole canvas
    /// becomes the new bounds.
    pub fn render(
        &self,
        canvas: &mut Canvas,
        timestamp_ms: i64,
        low_power: bool,
        widgets: &[&dyn Widget],
    ) {
        self.state
            .lock()
            .render(canvas, timestamp_ms, low_power, widgets);
    }

    /// Highlight pass: only the enabled widgets' focus outlines
    pub fn render_highlight(
        &self,
        canvas: &mut Canvas,
        timestamp_ms: i64,
        widgets: &[&dyn Widget],
    ) {
        let mode = PowerMode::from_low_power(self.state.lock().low_power);
        for widget in widgets.iter().filter(|w| w.is_enabled(mode)) {
            widget.draw_highlight(canvas, timestamp_ms);
        }
    }

    /// Pointer released at (x, y); returns how many particles were scattered
    pub fn on_tap(&self, x: f32, y: f32) -> usize {
        let mut state = self.state.lock();
        let low_power = state.low_power;
        state.scene.on_tap(x, y, low_power)
    }

    /// Preference store delivered new settings
    pub fn on_style_changed(&self, settings: Settings) -> Result<()> {
        self.state.lock().on_style_changed(settings)
    }

    /// Host entered or left ambient mode between frames
    pub fn set_low_power(&self, low_power: bool) {
        self.state.lock().low_power = low_power;
    }

    /// Whether the host should forward taps at all
    pub fn is_touch_scene_active(&self) -> bool {
        self.state.lock().scene.kind().is_touch_reactive()
    }

    pub fn settings(&self) -> Settings {
        self.state.lock().settings
    }

    /// Run `f` against the scene state (inspection and tests)
    pub fn with_scene<T>(&self, f: impl FnOnce(&SceneState<R>) -> T) -> T {
        f(&self.state.lock().scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NUM_PARTICLES;
    use crate::style::ColorTheme;
    use glam::Vec2;
    use std::cell::Cell;

    // 2023-11-14 22:13:20
    const NIGHT: i64 = 1_700_000_000_000;

    struct Badge {
        ambient: bool,
        color: Color,
        draws: Cell<u32>,
        highlights: Cell<u32>,
    }

    impl Badge {
        fn new(ambient: bool, color: Color) -> Self {
            Self {
                ambient,
                color,
                draws: Cell::new(0),
                highlights: Cell::new(0),
            }
        }
    }

    impl Widget for Badge {
        fn is_enabled(&self, mode: PowerMode) -> bool {
            mode == PowerMode::Interactive || self.ambient
        }

        fn draw(&self, canvas: &mut Canvas, _timestamp_ms: i64, _mode: PowerMode) {
            self.draws.set(self.draws.get() + 1);
            canvas.fill_rect(0, 0, 4, 4, self.color);
        }

        fn draw_highlight(&self, canvas: &mut Canvas, _timestamp_ms: i64) {
            self.highlights.set(self.highlights.get() + 1);
            canvas.fill_rect(0, 0, 2, 2, Color::WHITE);
        }
    }

    fn face(scene: SceneKind) -> WatchFace {
        WatchFace::with_seed(Settings::new(scene, ColorTheme::Mint), 42)
    }

    #[test]
    fn test_end_to_end_scene_switching() {
        let face = face(SceneKind::Static);
        let bounds = Bounds::from_size(200.0, 200.0);
        face.resize(bounds).unwrap();

        face.on_style_changed(Settings::new(SceneKind::FluidMotion, ColorTheme::Mint))
            .unwrap();
        face.with_scene(|s| {
            assert_eq!(s.particles().len(), NUM_PARTICLES);
            for p in s.particles() {
                assert!(p.pos.x >= -p.radius && p.pos.x <= 200.0 + p.radius);
                assert!(p.pos.y >= -p.radius && p.pos.y <= 200.0 + p.radius);
            }
        });

        face.on_style_changed(Settings::new(SceneKind::ZenGarden, ColorTheme::Mint))
            .unwrap();
        face.with_scene(|s| {
            assert!(s.particles().is_empty());
            assert_eq!(s.ball().unwrap().pos, Vec2::new(100.0, 100.0));

            let trail = s.trail().unwrap();
            assert_eq!((trail.width(), trail.height()), (200, 200));
            let pixels = trail.canvas().pixels();
            assert!(pixels.iter().any(|&p| p == palette::SAND));
            assert!(pixels.iter().any(|&p| p != palette::SAND));
        });
    }

    #[test]
    fn test_first_animated_frame_has_no_delta() {
        let face = face(SceneKind::ZenGarden);
        let mut canvas = Canvas::new(120, 120, Color::BLACK);

        face.render(&mut canvas, NIGHT, false, &[]);
        let start = face.with_scene(|s| s.ball().unwrap().pos);
        assert_eq!(start, Vec2::new(60.0, 60.0));

        face.render(&mut canvas, NIGHT + 16, false, &[]);
        let moved = face.with_scene(|s| s.ball().unwrap().pos);
        assert_ne!(moved, start);
    }

    #[test]
    fn test_static_resets_frame_timer() {
        let face = face(SceneKind::FluidMotion);
        let mut canvas = Canvas::new(100, 100, Color::BLACK);
        face.render(&mut canvas, NIGHT, false, &[]);

        face.on_style_changed(Settings::new(SceneKind::Static, ColorTheme::Mint))
            .unwrap();
        face.render(&mut canvas, NIGHT + 16, false, &[]);

        // An hour later the particles come back with a zero delta
        face.on_style_changed(Settings::new(SceneKind::FluidMotion, ColorTheme::Mint))
            .unwrap();
        face.resize(Bounds::from_size(100.0, 100.0)).unwrap();
        let fresh = face.with_scene(|s| s.particles().to_vec());
        face.render(&mut canvas, NIGHT + 3_600_000, false, &[]);
        face.with_scene(|s| assert_eq!(s.particles(), &fresh[..]));
    }

    #[test]
    fn test_large_gaps_are_clamped() {
        let face = face(SceneKind::ZenGarden);
        let mut canvas = Canvas::new(300, 300, Color::BLACK);
        face.render(&mut canvas, NIGHT, false, &[]);
        let (start, vel) = face.with_scene(|s| {
            let b = s.ball().unwrap();
            (b.pos, b.vel)
        });

        face.render(&mut canvas, NIGHT + 60_000, false, &[]);
        let end = face.with_scene(|s| s.ball().unwrap().pos);
        let max_step =
            vel.length() * crate::consts::SPEED_SCALE * MAX_FRAME_DELTA_MS as f32 / 1000.0;
        assert!((end - start).length() <= max_step + 1e-3);
    }

    #[test]
    fn test_ambient_freezes_and_hides_ball() {
        let face = face(SceneKind::ZenGarden);
        let mut canvas = Canvas::new(120, 120, Color::BLACK);
        face.render(&mut canvas, NIGHT, true, &[]);
        face.render(&mut canvas, NIGHT + 16, true, &[]);

        let ball = face.with_scene(|s| s.ball().unwrap().clone());
        assert_eq!(ball.pos, Vec2::new(60.0, 60.0));
        // Inside the body, clear of the highlight
        let (x, y) = (62, 62);
        assert_ne!(canvas.pixel(x, y), Some(palette::BALL_BODY));

        // Back to interactive: the timer restarts at zero, so the ball is
        // drawn where it stopped
        face.render(&mut canvas, NIGHT + 32, false, &[]);
        assert_eq!(face.with_scene(|s| s.ball().unwrap().pos), ball.pos);
        assert_eq!(canvas.pixel(x, y), Some(palette::BALL_BODY));
    }

    #[test]
    fn test_time_text_uses_accent() {
        let face = face(SceneKind::Static);
        let mut canvas = Canvas::new(200, 200, Color::BLACK);
        face.render(&mut canvas, NIGHT, false, &[]);

        let pixels = canvas.pixels();
        assert!(pixels.iter().any(|&p| p == palette::MINT));
        assert!(pixels.iter().any(|&p| p == palette::DATE_NEUTRAL));
        // Corners untouched by text
        assert_eq!(canvas.pixel(0, 0), Some(palette::STATIC_BACKGROUND));
    }

    #[test]
    fn test_dynamic_theme_follows_hour() {
        let face = WatchFace::with_seed(Settings::new(SceneKind::Static, ColorTheme::Dynamic), 1);
        let mut canvas = Canvas::new(200, 200, Color::BLACK);
        // 2023-11-14 08:00:00
        let morning = 1_699_948_800_000;
        face.render(&mut canvas, morning, false, &[]);
        assert!(canvas.pixels().iter().any(|&p| p == palette::SKY_BLUE));
    }

    #[test]
    fn test_widgets_follow_power_mode() {
        let face = face(SceneKind::Static);
        let always = Badge::new(true, Color::rgb(1, 2, 3));
        let interactive_only = Badge::new(false, Color::rgb(4, 5, 6));
        let widgets: [&dyn Widget; 2] = [&always, &interactive_only];
        let mut canvas = Canvas::new(100, 100, Color::BLACK);

        face.render(&mut canvas, NIGHT, false, &widgets);
        assert_eq!((always.draws.get(), interactive_only.draws.get()), (1, 1));
        // Drawn last, on top of the background
        assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(4, 5, 6)));

        face.render(&mut canvas, NIGHT, true, &widgets);
        assert_eq!((always.draws.get(), interactive_only.draws.get()), (2, 1));
    }

    #[test]
    fn test_highlight_pass_draws_only_highlights() {
        let face = face(SceneKind::FluidMotion);
        let badge = Badge::new(true, Color::rgb(1, 2, 3));
        let mut canvas = Canvas::new(50, 50, Color::BLACK);

        face.render_highlight(&mut canvas, NIGHT, &[&badge]);
        assert_eq!(badge.highlights.get(), 1);
        assert_eq!(badge.draws.get(), 0);
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(30, 30), Some(Color::BLACK));
    }

    #[test]
    fn test_tap_routing() {
        let face = face(SceneKind::FluidMotion);
        face.resize(Bounds::from_size(100.0, 100.0)).unwrap();
        assert!(!face.is_touch_scene_active());
        assert_eq!(face.on_tap(50.0, 50.0), 0);

        face.on_style_changed(Settings::new(SceneKind::FluidTouch, ColorTheme::Mint))
            .unwrap();
        assert!(face.is_touch_scene_active());

        face.set_low_power(true);
        assert_eq!(face.on_tap(50.0, 50.0), 0);
        face.set_low_power(false);
        assert!(face.on_tap(50.0, 50.0) > 0);
    }

    #[test]
    fn test_render_picks_up_new_canvas_size() {
        let face = face(SceneKind::ZenGarden);
        let mut canvas = Canvas::new(80, 60, Color::BLACK);
        face.render(&mut canvas, NIGHT, false, &[]);
        face.with_scene(|s| {
            let trail = s.trail().unwrap();
            assert_eq!((trail.width(), trail.height()), (80, 60));
        });
    }

    #[test]
    fn test_render_keeps_offset_bounds() {
        let face = face(SceneKind::ZenGarden);
        let offset = Bounds::new(10.0, 40.0, 170.0, 200.0);
        face.resize(offset).unwrap();
        let mut canvas = Canvas::new(200, 200, Color::BLACK);

        face.render(&mut canvas, NIGHT, false, &[]);
        face.with_scene(|s| {
            assert_eq!(s.bounds(), offset);
            assert_eq!(s.ball().unwrap().pos, Vec2::new(90.0, 120.0));
            let trail = s.trail().unwrap();
            assert_eq!((trail.width(), trail.height()), (160, 160));
        });
    }

    #[test]
    fn test_render_does_not_rebuild_fitting_pool() {
        let face = face(SceneKind::FluidMotion);
        face.resize(Bounds::new(20.0, 20.0, 180.0, 180.0)).unwrap();
        let pool = face.with_scene(|s| s.particles().to_vec());

        // First frame advances by zero, so an untouched pool compares equal
        let mut canvas = Canvas::new(200, 200, Color::BLACK);
        face.render(&mut canvas, NIGHT, false, &[]);
        face.with_scene(|s| assert_eq!(s.particles(), &pool[..]));
    }

    #[test]
    fn test_canvas_smaller_than_bounds_forces_resize() {
        let face = face(SceneKind::ZenGarden);
        face.resize(Bounds::from_size(200.0, 200.0)).unwrap();
        let mut canvas = Canvas::new(100, 100, Color::BLACK);

        face.render(&mut canvas, NIGHT, false, &[]);
        face.with_scene(|s| assert_eq!(s.bounds(), Bounds::from_size(100.0, 100.0)));
    }

    #[test]
    fn test_zero_sized_canvas_is_harmless() {
        let face = face(SceneKind::FluidTouch);
        let mut canvas = Canvas::new(0, 0, Color::BLACK);
        face.render(&mut canvas, NIGHT, false, &[]);
        face.with_scene(|s| assert!(s.particles().is_empty()));
    }

    #[test]
    fn test_style_changes_on_another_thread_never_mix_resources() {
        let face = face(SceneKind::FluidTouch);
        face.resize(Bounds::from_size(120.0, 120.0)).unwrap();
        let mut canvas = Canvas::new(120, 120, Color::BLACK);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for i in 0..200 {
                    let scene = if i % 2 == 0 {
                        SceneKind::ZenGarden
                    } else {
                        SceneKind::FluidTouch
                    };
                    face.on_style_changed(Settings::new(scene, ColorTheme::Mint))
                        .unwrap();
                }
            });

            for frame in 0..200i64 {
                face.render(&mut canvas, NIGHT + frame * 16, false, &[]);
                face.with_scene(|s| match s.kind() {
                    SceneKind::ZenGarden => {
                        assert!(s.particles().is_empty());
                        assert!(s.ball().is_some() && s.trail().is_some());
                    }
                    SceneKind::FluidTouch => {
                        assert_eq!(s.particles().len(), NUM_PARTICLES);
                        assert!(s.ball().is_none() && s.trail().is_none());
                    }
                    other => panic!("unexpected scene {other:?}"),
                });
            }
        });
    }

    #[test]
    fn test_face_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<WatchFace>();
    }
}
