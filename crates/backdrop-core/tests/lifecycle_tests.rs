// Host-side tests for mounting, frame delivery and teardown of the composer.

use std::cell::RefCell;
use std::rc::Rc;

use backdrop_core::headless::{ManualEvents, ManualScheduler};
use backdrop_core::*;
use glam::Vec2;

fn seeded_config() -> BackdropConfig {
    BackdropConfig {
        seed: Some(42),
        ..BackdropConfig::default()
    }
}

fn composer(vp: Viewport) -> BackgroundComposer<RecordingSurface> {
    BackgroundComposer::new(seeded_config(), RecordingSurface::new(), vp).unwrap()
}

#[test]
fn new_composer_seeds_field_for_viewport() {
    let c = composer(Viewport::new(1024.0, 768.0));
    assert_eq!(c.field().particles().len(), 150);
    assert_eq!(c.pointer(), PointerState::Absent);
    assert!(c.field_visible());
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = seeded_config();
    cfg.field.connection_distance = 0.0;
    assert!(BackgroundComposer::new(cfg, RecordingSurface::new(), Viewport::new(1.0, 1.0)).is_err());
}

#[test]
fn mount_routes_events_and_frames() {
    let mut events = ManualEvents::new();
    let scheduler = ManualScheduler::new();
    let outputs: Rc<RefCell<Vec<FrameOutput>>> = Rc::default();
    let sink = outputs.clone();
    let mounted = mount(
        composer(Viewport::new(1024.0, 768.0)),
        &mut events,
        scheduler.clone(),
        move |out| sink.borrow_mut().push(out.clone()),
    )
    .unwrap();
    assert_eq!(events.listener_count(), 2);
    assert!(scheduler.is_running());

    events.move_pointer(512.0, 384.0);
    assert!(scheduler.tick(1.0 / 60.0));
    events.resize(Viewport::new(1920.0, 1080.0));
    assert!(scheduler.tick(1.0 / 60.0));

    {
        let c = mounted.composer().borrow();
        assert_eq!(c.pointer(), PointerState::At(Vec2::new(512.0, 384.0)));
        assert_eq!(c.viewport(), Viewport::new(1920.0, 1080.0));
        assert_eq!(c.field().generation(), 2);
        assert_eq!(c.frames(), 2);
        assert_eq!(c.surface().frames(), 2);
    }
    let outputs = outputs.borrow();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].orb_offsets.len(), 3);
    assert!(outputs[0].orbs_moving);
    assert_eq!(outputs[1].stats.particles, 150);
}

#[test]
fn resize_scenario_keeps_count_and_bounds() {
    let mut events = ManualEvents::new();
    let scheduler = ManualScheduler::new();
    let mounted = mount(
        composer(Viewport::new(800.0, 600.0)),
        &mut events,
        scheduler.clone(),
        |_| {},
    )
    .unwrap();
    for _ in 0..30 {
        scheduler.tick(1.0 / 60.0);
    }
    let before: Vec<Vec2> = mounted
        .composer()
        .borrow()
        .field()
        .particles()
        .iter()
        .map(|p| p.position)
        .collect();

    let big = Viewport::new(1920.0, 1080.0);
    events.resize(big);
    let c = mounted.composer().borrow();
    assert_eq!(c.field().particles().len(), 150);
    for p in c.field().particles() {
        assert!(big.contains(p.position));
        assert!(!before.contains(&p.position));
    }
}

#[test]
fn unmount_stops_frames_and_releases_listeners() {
    let mut events = ManualEvents::new();
    let scheduler = ManualScheduler::new();
    let mounted = mount(
        composer(Viewport::new(800.0, 600.0)),
        &mut events,
        scheduler.clone(),
        |_| {},
    )
    .unwrap();
    scheduler.tick(1.0 / 60.0);
    let handle = mounted.composer().clone();
    assert!(handle.borrow().surface().commands().len() > 1);
    mounted.unmount();

    assert!(!scheduler.is_running());
    assert!(!scheduler.tick(1.0 / 60.0));
    assert_eq!(events.listener_count(), 0);
    // events after teardown reach nobody
    events.move_pointer(10.0, 10.0);
    assert_eq!(handle.borrow().pointer(), PointerState::Absent);
    // the loop and listeners no longer hold the composer
    assert_eq!(Rc::strong_count(&handle), 1);
    // nothing of the last frame stays on screen
    let c = handle.borrow();
    assert!(c.field().particles().is_empty());
    assert_eq!(
        c.surface().commands(),
        &[DrawCommand::Clear(Viewport::new(800.0, 600.0))]
    );
}

#[test]
fn dropping_the_mount_tears_down() {
    let mut events = ManualEvents::new();
    let scheduler = ManualScheduler::new();
    {
        let _mounted = mount(
            composer(Viewport::new(800.0, 600.0)),
            &mut events,
            scheduler.clone(),
            |_| {},
        )
        .unwrap();
        assert_eq!(events.listener_count(), 2);
    }
    assert!(!scheduler.is_running());
    assert_eq!(events.listener_count(), 0);
}

#[test]
fn failed_pointer_subscription_releases_resize_listener() {
    let mut events = ManualEvents::refusing("pointer");
    let scheduler = ManualScheduler::new();
    let err = mount(
        composer(Viewport::new(800.0, 600.0)),
        &mut events,
        scheduler.clone(),
        |_| {},
    )
    .err()
    .unwrap();
    assert!(matches!(err, BackdropError::Subscribe { event: "pointer", .. }));
    assert_eq!(events.listener_count(), 0);
    assert!(!scheduler.is_running());
}

#[test]
fn failed_scheduler_start_releases_both_listeners() {
    let mut events = ManualEvents::new();
    let err = mount(
        composer(Viewport::new(800.0, 600.0)),
        &mut events,
        ManualScheduler::refusing(),
        |_| {},
    )
    .err()
    .unwrap();
    assert!(matches!(err, BackdropError::Scheduler(_)));
    assert_eq!(events.listener_count(), 0);
}

#[derive(Clone, Default)]
struct Journal(Rc<RefCell<Vec<&'static str>>>);

struct JournalScheduler(Journal);
struct JournalEvents(Journal);
struct JournalSubscription(Journal, &'static str);

impl Drop for JournalSubscription {
    fn drop(&mut self) {
        self.0 .0.borrow_mut().push(self.1);
    }
}

impl FrameScheduler for JournalScheduler {
    type Handle = ();
    fn start(&mut self, _callback: FrameCallback) -> Result<()> {
        self.0 .0.borrow_mut().push("start");
        Ok(())
    }
    fn cancel(&mut self, _handle: ()) {
        self.0 .0.borrow_mut().push("cancel");
    }
}

impl EventSource for JournalEvents {
    type Subscription = JournalSubscription;
    fn subscribe_pointer(&mut self, _cb: PointerCallback) -> Result<JournalSubscription> {
        self.0 .0.borrow_mut().push("subscribe pointer");
        Ok(JournalSubscription(self.0.clone(), "unsubscribe pointer"))
    }
    fn subscribe_resize(&mut self, _cb: ResizeCallback) -> Result<JournalSubscription> {
        self.0 .0.borrow_mut().push("subscribe resize");
        Ok(JournalSubscription(self.0.clone(), "unsubscribe resize"))
    }
}

#[test]
fn teardown_cancels_before_unsubscribing() {
    let journal = Journal::default();
    let mut events = JournalEvents(journal.clone());
    let mounted = mount(
        composer(Viewport::new(800.0, 600.0)),
        &mut events,
        JournalScheduler(journal.clone()),
        |_| {},
    )
    .unwrap();
    mounted.unmount();
    assert_eq!(
        *journal.0.borrow(),
        vec![
            "subscribe resize",
            "subscribe pointer",
            "start",
            "cancel",
            "unsubscribe resize",
            "unsubscribe pointer",
        ]
    );
}

#[test]
fn narrow_viewport_hides_field_but_keeps_orbs() {
    let mut c = composer(Viewport::new(500.0, 800.0));
    c.on_pointer_move(250.0, 400.0);
    let out = c.frame(1.0 / 60.0);
    assert!(!out.field_visible);
    assert_eq!(out.stats, FrameStats::default());
    assert_eq!(out.orb_offsets.len(), 3);
    assert_eq!(c.surface().frames(), 0);
    c.on_resize(Viewport::new(1280.0, 800.0));
    assert!(c.frame(1.0 / 60.0).field_visible);
}

#[test]
fn stalled_frame_delta_is_clamped() {
    let mut a = composer(Viewport::new(1000.0, 800.0));
    let mut b = composer(Viewport::new(1000.0, 800.0));
    a.on_pointer_move(1000.0, 800.0);
    b.on_pointer_move(1000.0, 800.0);
    a.frame(5.0);
    b.frame(MAX_FRAME_DT_SEC);
    assert_eq!(a.orbs().springs().0.value(), b.orbs().springs().0.value());
    // non-finite deltas do not move the springs at all
    let mut c = composer(Viewport::new(1000.0, 800.0));
    c.on_pointer_move(1000.0, 800.0);
    c.frame(f32::NAN);
    assert_eq!(c.orbs().springs().0.value(), 0.0);
}

#[test]
fn stiff_spring_override_keeps_orbs_moving() {
    let cfg = BackdropConfig {
        seed: Some(42),
        ..BackdropConfig::from_overrides([("stiffness", "5000")]).unwrap()
    };
    let mut c = BackgroundComposer::new(cfg, RecordingSurface::new(), Viewport::new(1000.0, 800.0))
        .unwrap();
    c.on_pointer_move(500.0, 400.0);
    let out = (0..200).map(|_| c.frame(MAX_FRAME_DT_SEC)).last().unwrap();
    let (x, y) = c.orbs().springs();
    assert!((x.value() - 500.0).abs() < 1.0, "x spring at {}", x.value());
    assert!((y.value() - 400.0).abs() < 1.0, "y spring at {}", y.value());
    for offset in &out.orb_offsets {
        assert!(offset.is_finite());
    }

    // away from the centre the offsets are no longer pinned to zero
    c.on_pointer_move(1000.0, 800.0);
    let out = (0..200).map(|_| c.frame(MAX_FRAME_DT_SEC)).last().unwrap();
    assert!((out.orb_offsets[0] - Vec2::new(50.0, 50.0)).length() < 1.0);
}
