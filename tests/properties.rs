use freefall_playground::consts::G;
use freefall_playground::path::{PathCommand, generate_path, generate_points_data};
use freefall_playground::sim::{
    Frame, Measurement, PhysicsState, Rect, TickOutcome, displacement_for, tick, velocity_at,
};
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn falling_body(running: bool) -> PhysicsState {
    let mut state = PhysicsState::new(running);
    state
        .measure(Measurement {
            position: Vec2::ZERO,
            bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
            parent_bounds: Some(Rect::new(0.0, 0.0, 10.0, 1.0e9)),
        })
        .unwrap();
    state
}

proptest! {
    #[test]
    fn velocity_is_linear_in_time(v0 in 0.0f64..100.0, t in 0.0f64..60.0) {
        let v = velocity_at(v0, G, t);
        prop_assert!((v - (v0 + G * t)).abs() < 1e-9);
        prop_assert!(velocity_at(v0, G, t + 0.5) > v);
    }

    #[test]
    fn displacement_matches_energy_form(v in 0.0f64..500.0) {
        let s = displacement_for(v, G);
        prop_assert!((2.0 * G * s - v * v).abs() < 1e-6 * (1.0 + v * v));
        prop_assert!(s >= 0.0);
    }

    #[test]
    fn tick_velocity_follows_elapsed_time(steps in prop::collection::vec(1u64..100, 1..50)) {
        let mut state = falling_body(false);
        state.set_running(true, 0);
        let mut now = 0;
        let mut last_y = 0.0;
        for step in steps {
            now += step;
            prop_assert_eq!(tick(&mut state, Frame::at(now)).unwrap(), TickOutcome::Advanced);
            let expected = G * now as f64 / 1000.0;
            prop_assert!((state.velocity() - expected).abs() < 1e-9);
            prop_assert!(state.offset().y >= last_y);
            last_y = state.offset().y;
        }
    }

    #[test]
    fn stopped_body_never_moves(times in prop::collection::vec(0u64..100_000, 1..20)) {
        let mut state = falling_body(false);
        for now in times {
            prop_assert_eq!(tick(&mut state, Frame::at(now)).unwrap(), TickOutcome::Stopped);
        }
        prop_assert_eq!(state.offset(), Vec2::ZERO);
        prop_assert_eq!(state.velocity(), 0.0);
    }

    #[test]
    fn path_endpoints_are_sorted(seed in any::<u64>(), count in 1usize..40) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let points = generate_points_data(count, 0..=1000, 0..=500, &mut rng).unwrap();
        let path = generate_path(&points).unwrap();

        prop_assert_eq!(path.commands.len(), count + 1);
        prop_assert!(matches!(path.commands[0], PathCommand::MoveTo(_)));

        let ends: Vec<Vec2> = path
            .commands
            .iter()
            .filter_map(|c| match c {
                PathCommand::CubicTo { to, .. } => Some(*to),
                PathCommand::MoveTo(_) => None,
            })
            .collect();
        for pair in ends.windows(2) {
            prop_assert!(pair[0].x < pair[1].x || (pair[0].x == pair[1].x && pair[0].y <= pair[1].y));
        }
    }
}

#[test]
fn one_second_from_rest() {
    let mut state = falling_body(false);
    state.set_running(true, 10_000);
    tick(&mut state, Frame::at(11_000)).unwrap();
    assert!((state.velocity() - 9.80665).abs() < 1e-12);
    assert_eq!(state.offset().y, 5.0);
}

#[test]
fn toggle_resumes_from_stored_velocity() {
    let mut state = falling_body(false);
    state.set_running(true, 0);
    tick(&mut state, Frame::at(500)).unwrap();
    let v = state.velocity();
    let y = state.offset().y;

    state.toggle_running(600);
    assert!(!state.is_running());
    state.toggle_running(5_000);
    assert!(state.is_running());

    assert_eq!(state.v0(), v);
    assert_eq!(state.start_ms(), Some(500));
    assert_eq!(state.offset().y, y);
}

#[test]
fn missing_parent_is_fatal() {
    let mut state = PhysicsState::new(true);
    let result = state.measure(Measurement {
        position: Vec2::ZERO,
        bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
        parent_bounds: None,
    });
    assert!(result.is_err());
    assert!(tick(&mut state, Frame::at(0)).is_err());
}
