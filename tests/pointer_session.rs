// End-to-end: simulated pointer hand -> tracker -> session -> renderer.

use std::time::{Duration, Instant};

use rand::{rngs::StdRng, SeedableRng};

use particle_morph::config::VizConfig;
use particle_morph::render::Renderer;
use particle_morph::session::{GestureOutcome, Session};
use particle_morph::shapes::Shape;
use particle_morph::tracker::{HandTracker, PointerInput, PointerTracker};

fn setup() -> (VizConfig, Session<StdRng>, PointerTracker) {
    let mut cfg = VizConfig::default();
    cfg.particles.count = 500;
    cfg.window.width = 640;
    cfg.window.height = 480;
    let session = Session::new(&cfg, StdRng::seed_from_u64(11));
    let mut tracker = PointerTracker::new();
    tracker.configure(&cfg.tracker).unwrap();
    (cfg, session, tracker)
}

fn step(tracker: &mut PointerTracker, session: &mut Session<StdRng>, input: PointerInput, now: Instant) -> GestureOutcome {
    tracker.update(input);
    let hands = tracker.process(None).unwrap();
    session.on_gesture_frame(&hands, now)
}

#[test]
fn held_click_switches_once_per_cooldown() {
    let (_, mut session, mut tracker) = setup();
    let press = PointerInput { pos: Some((0.5, 0.5)), pressed: true, scroll: 0.0 };
    let t0 = Instant::now();

    // Hold the button for 1.5 s at ~30 Hz: exactly two switches (t=0 and t>=1s).
    let mut switches = 0;
    for k in 0..45 {
        let now = t0 + Duration::from_millis(33 * k);
        if matches!(step(&mut tracker, &mut session, press, now), GestureOutcome::Triggered { .. }) {
            switches += 1;
        }
    }
    assert_eq!(switches, 2);
    assert_eq!(session.shape(), Shape::Burst);
    assert_eq!(session.scale(), 2.2);
}

#[test]
fn pointer_leaving_window_freezes_the_scene() {
    let (_, mut session, mut tracker) = setup();
    let t0 = Instant::now();
    let open = PointerInput { pos: Some((0.2, 0.3)), pressed: false, scroll: 0.0 };
    assert!(matches!(step(&mut tracker, &mut session, open, t0), GestureOutcome::Tracked { .. }));
    let scale = session.scale();
    let colors = session.buffer().colors().to_vec();

    let gone = PointerInput::default();
    let out = step(&mut tracker, &mut session, gone, t0 + Duration::from_secs(5));
    assert_eq!(out, GestureOutcome::Idle);
    assert_eq!(session.scale(), scale);
    assert_eq!(session.buffer().colors(), &colors[..]);
    assert_eq!(session.shape(), Shape::Heart);
}

#[test]
fn rendered_frame_has_visible_particles() {
    let (cfg, mut session, _) = setup();
    let mut renderer = Renderer::new(&cfg.window, &cfg.particles);
    renderer.clear(None);
    let list = session.on_render_tick();
    renderer.draw(&list);
    let lit = renderer.frame().pixels.iter().filter(|&&p| p != 0).count();
    assert!(lit > 100, "only {lit} pixels lit");
}
