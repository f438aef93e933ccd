//! End-to-end run in a 640x480 window: drop, bounce, settle, roll, hop

use std::time::Duration;

use kolobok::sim::{GameEvent, GameLoop, HeldKeys, Key, WorldConfig};

const FLOOR: f64 = 384.0;
const REST_Y: f64 = FLOOR - 16.0;

fn new_game() -> GameLoop {
    let world = WorldConfig::with_dimensions(640.0, 480.0, 0.2);
    assert!((world.floor_level - FLOOR).abs() < 1e-9);
    GameLoop::new(world, Duration::ZERO)
}

#[test]
fn test_spawn_at_center() {
    let game = new_game();
    let snap = game.snapshot();
    assert_eq!((snap.pos.x, snap.pos.y), (320.0, 240.0));
    assert_eq!(snap.radius, 16);
    assert!(!snap.on_floor);
}

#[test]
fn test_drop_bounce_and_settle() {
    let mut game = new_game();

    // Falls with y increasing every tick until it lands
    let mut last_y = game.snapshot().pos.y;
    let mut fall_ticks = 0;
    while !game.snapshot().on_floor {
        game.run_ticks(1);
        let y = game.snapshot().pos.y;
        assert!(y > last_y, "y went from {} to {}", last_y, y);
        last_y = y;
        fall_ticks += 1;
        assert!(fall_ticks < 120, "never reached the floor");
    }
    assert!((game.snapshot().pos.y - REST_Y).abs() < 1e-9);
    let impact = game.snapshot().vel.y;
    assert!(impact > 0.0);

    // Next tick flips the vertical velocity and reports the bounce
    game.run_ticks(1);
    let snap = game.snapshot();
    assert!(snap.vel.y < 0.0);
    assert!(snap.pos.y < REST_Y);
    assert!(
        game.events()
            .iter()
            .any(|e| matches!(e, GameEvent::Bounce { speed } if (*speed - impact).abs() < 1e-9))
    );

    // A few seconds later it rests on the floor
    game.run_ticks(600);
    for _ in 0..60 {
        game.run_ticks(1);
        let snap = game.snapshot();
        assert!((snap.pos.y - REST_Y).abs() < 1e-6);
        assert!(snap.on_floor);
        assert!(snap.vel.y.abs() < 50.0);
    }
    assert_eq!(game.snapshot().pos.x, 320.0);
}

#[test]
fn test_roll_right_then_hop() {
    let mut game = new_game();
    let frame = Duration::from_millis(17);
    let mut now = Duration::ZERO;

    // Let it land and settle
    for _ in 0..300 {
        now += frame;
        game.frame(&HeldKeys::NONE, now);
    }
    assert!(game.snapshot().on_floor);

    // Hold right: moves right, capped by damping
    let right = HeldKeys::of(&[Key::MoveRight]);
    let start_x = game.snapshot().pos.x;
    for _ in 0..30 {
        now += frame;
        game.frame(&right, now);
    }
    let snap = game.snapshot();
    assert!(snap.pos.x > start_x || game.events().contains(&GameEvent::Wrapped));
    assert!(snap.vel.x > 0.0 && snap.vel.x <= 600.0 + 1e-6);

    // Release: horizontal speed decays
    for _ in 0..60 {
        now += frame;
        game.frame(&HeldKeys::NONE, now);
    }
    assert!(game.snapshot().vel.x.abs() < 1e-2);

    // Jump from the floor
    let report = game.frame(&HeldKeys::of(&[Key::Jump]), now + frame);
    now += frame;
    assert!(report.jump_cue);
    assert!(game.events().contains(&GameEvent::Jump));
    let snap = game.snapshot();
    assert!(snap.vel.y < 0.0);
    assert!(snap.pos.y < REST_Y);

    // Airborne: holding jump does nothing
    let report = game.frame(&HeldKeys::of(&[Key::Jump]), now + frame);
    assert!(!report.jump_cue);
}

#[test]
fn test_reset_mid_air() {
    let mut game = new_game();
    let frame = Duration::from_millis(17);
    let mut now = Duration::ZERO;
    for _ in 0..20 {
        now += frame;
        game.frame(&HeldKeys::of(&[Key::MoveLeft]), now);
    }

    now += frame;
    let report = game.frame(&HeldKeys::of(&[Key::Reset]), now);
    assert!(report.reset);
    assert!(game.events().contains(&GameEvent::Reset));

    // Reset happens before this frame's ticks
    let snap = game.snapshot();
    assert_eq!(snap.pos.x, 320.0);
    assert!(snap.pos.y > 240.0 && snap.pos.y < 245.0);
}
