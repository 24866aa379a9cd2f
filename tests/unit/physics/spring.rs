use super::*;
use proptest::prelude::*;

#[test]
fn idle_follower_droops_and_stays_on_the_rim() {
    let params = SpringParams::default();
    let mut p = FollowerPhysics::at_rest(14.4);
    for _ in 0..120 {
        p.step(None, 1.0 / 60.0, &params);
    }
    assert!(p.pos.hypot() <= 14.4 + 1e-9);
    assert!((p.pos.y - 14.4).abs() < 1e-6);
}

#[test]
fn held_pointer_converges_to_the_clamped_target() {
    let params = SpringParams::default();
    let mut p = FollowerPhysics::at_rest(72.0 * 0.2);
    let pointer = Vec2::new(200.0, 0.0);
    for _ in 0..60 {
        p.step(Some(pointer), 1.0 / 60.0, &params);
    }
    assert!((p.pos.hypot() - 14.4).abs() < 0.05, "pos = {:?}", p.pos);
    assert!((p.pos.x - 14.4).abs() < 0.05);
    assert!(p.vel.hypot() < 1.0);
}

#[test]
fn pointer_inside_the_disc_is_followed_exactly() {
    let params = SpringParams::default();
    let mut p = FollowerPhysics::at_rest(14.4);
    for _ in 0..240 {
        p.step(Some(Vec2::new(3.0, -4.0)), 1.0 / 60.0, &params);
    }
    assert!((p.pos - Vec2::new(3.0, -4.0)).hypot() < 1e-3);
}

#[test]
fn rim_hits_bounce_inward() {
    let params = SpringParams::default();
    let mut p = FollowerPhysics {
        pos: Vec2::new(10.0, 0.0),
        vel: Vec2::new(500.0, 0.0),
        radius: 10.0,
    };
    p.step(Some(Vec2::new(10.0, 0.0)), 0.016, &params);
    assert!((p.pos.hypot() - 10.0).abs() < 1e-9);
    assert!(p.vel.x < 0.0);
}

#[test]
fn degenerate_steps_are_ignored() {
    let params = SpringParams::default();
    let mut p = FollowerPhysics::at_rest(5.0);
    let before = p;
    p.step(None, 0.0, &params);
    p.step(None, f64::NAN, &params);
    p.step(None, -1.0, &params);
    assert_eq!(p, before);

    assert_eq!(FollowerPhysics::at_rest(-3.0).radius, 0.0);
}

fn pointer_strategy() -> impl Strategy<Value = Option<(f64, f64)>> {
    prop_oneof![
        1 => Just(None),
        4 => (-400.0f64..400.0, -400.0f64..400.0).prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn offset_never_leaves_the_disc(
        size in 0.0f64..200.0,
        trajectory in proptest::collection::vec((pointer_strategy(), 0.0f64..0.05), 1..200),
    ) {
        let params = SpringParams::default();
        let mut p = FollowerPhysics::at_rest(size * 0.2);
        for (pointer, dt) in trajectory {
            let dt = dt.min(params.max_dt_s);
            p.step(pointer.map(|(x, y)| Vec2::new(x, y)), dt, &params);
            prop_assert!(p.pos.hypot() <= p.radius + 1e-9);
        }
    }
}
