// What you SEE:
// • A cloud of 6000 glowing particles (heart first) slowly spinning in the window.
// • Thumb-index pinch distance drives the cloud's size (closer = bigger) and color.
// • A tight pinch switches shape: heart -> ring -> burst -> heart (at most once per second).
// • With the built-in pointer hand: move the mouse = move the hand, hold LMB = pinch,
//   scroll = open/close the resting pinch. ESC quits.
// Set PARTICLE_MORPH_CONFIG=path/to/config.toml to override defaults.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use particle_morph::camera::spawn_camera;
use particle_morph::config::VizConfig;
use particle_morph::draw::{draw_crosshair, draw_text_5x7, Drawer};
use particle_morph::error::Error;
use particle_morph::gesture::TrackingState;
use particle_morph::render::Renderer;
use particle_morph::session::Session;
use particle_morph::tracker::{HandTracker, PointerTracker};
use particle_morph::types::{FrameBuffer, GestureSample};

/// Gesture cadence when there is no camera to pace it (~30 Hz).
const FALLBACK_TICK: Duration = Duration::from_millis(33);

enum CameraPoll {
    Frame(FrameBuffer),
    Pending,
    Gone,
}

fn poll_camera(rx: &Receiver<FrameBuffer>) -> CameraPoll {
    match rx.try_recv() {
        Ok(frame) => CameraPoll::Frame(frame),
        Err(TryRecvError::Empty) => CameraPoll::Pending,
        Err(TryRecvError::Disconnected) => CameraPoll::Gone,
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    /* --- Config --- */
    let cfg = VizConfig::from_env()?;
    cfg.validate()?;
    info!(
        particles = cfg.particles.count,
        camera = cfg.camera.enabled,
        cooldown_ms = cfg.gesture.cooldown_ms,
        "starting"
    );

    /* --- Scene state ---
       Visual: the heart appears in pink on the first frame. */
    let rng = match cfg.particles.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(&cfg, rng);

    /* --- Hand landmarks + camera frames --- */
    let mut tracker = PointerTracker::new();
    tracker.configure(&cfg.tracker)?;
    let mut frames = cfg.camera.enabled.then(|| spawn_camera(cfg.camera.clone()));
    let mut last_frame: Option<FrameBuffer> = None;
    let mut last_gesture_poll = Instant::now();
    let mut tips: Option<GestureSample> = None;

    /* --- Window + renderer --- */
    let mut drawer = Drawer::new("Particle Morph - Pinch to Switch", cfg.window.width, cfg.window.height)?;
    let mut renderer = Renderer::new(&cfg.window, &cfg.particles);

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Follow window resizes (aspect + frame size). */
        let (w, h) = drawer.size();
        if renderer.resize(w, h) {
            info!(width = w, height = h, "viewport resized");
        }

        /* 2) Gesture side: runs when a camera frame arrives, or on a timer without one. */
        tracker.update(drawer.pointer());
        let gesture_due = match frames.as_ref().map(poll_camera) {
            Some(CameraPoll::Frame(frame)) => {
                last_frame = Some(frame);
                true
            }
            Some(CameraPoll::Pending) => false,
            Some(CameraPoll::Gone) => {
                warn!("camera unavailable; gestures now run on a timer");
                frames = None;
                false
            }
            None => now.duration_since(last_gesture_poll) >= FALLBACK_TICK,
        };
        if gesture_due {
            last_gesture_poll = now;
            match tracker.process(last_frame.as_ref()) {
                Ok(hands) => {
                    tips = hands.hands.first().map(|h| h.sample());
                    session.on_gesture_frame(&hands, now);
                }
                Err(e) => warn!("hand tracker: {e}"),
            }
        }

        /* 3) Render side: rotate, project, splat. */
        let background = if cfg.camera.show_feed { last_frame.as_ref() } else { None };
        renderer.clear(background);
        {
            let list = session.on_render_tick();
            renderer.draw(&list);
        }

        /* 4) Overlay: tracked fingertips + HUD. */
        if let Some(s) = tips.filter(|_| session.tracking() == TrackingState::Tracking) {
            let (tx, ty) = renderer.to_screen(s.thumb_tip);
            let (ix, iy) = renderer.to_screen(s.index_tip);
            draw_crosshair(renderer.frame_mut(), tx, ty, 8, 0x00_FF_CC_33); // thumb: yellow
            draw_crosshair(renderer.frame_mut(), ix, iy, 8, 0x00_33_CC_FF); // index: cyan
        }
        let pinch = session.last_pinch().map_or_else(|| "-".to_string(), |p| format!("{p:.3}"));
        let tracking = match session.tracking() {
            TrackingState::Tracking => "TRACKING",
            TrackingState::Idle => "IDLE",
        };
        let hud = format!(
            "{} | SCALE {:.2} | PINCH {} | {} | {}",
            session.shape().name(),
            session.scale(),
            pinch,
            tracking,
            hud_fps_text
        );
        draw_text_5x7(renderer.frame_mut(), 8, 8, &hud, 0x00_FF_FF_FF);
        draw_text_5x7(renderer.frame_mut(), 8, 20, "LMB: PINCH  WHEEL: SPREAD  ESC: QUIT", 0x00_88_88_88);

        /* 5) Present. */
        drawer.present(renderer.frame())?;

        /* 6) FPS counter (logged + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            tracing::debug!(fps, "render rate");
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("window closed");
    Ok(())
}
