use hero_fx::physic_engine::rocket::{ease_in_out_cubic, RocketSequencer, RocketSettingsBuilder};

fn four_second_rocket() -> RocketSequencer {
    RocketSequencer::new(
        RocketSettingsBuilder::default()
            .duration(4.0)
            .build()
            .unwrap(),
    )
}

// ==================================
// 1. Courbe
// ==================================

#[test]
fn test_ease_in_out_cubic_shape() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(0.5), 0.5);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
    assert_eq!(ease_in_out_cubic(0.25), 0.0625);
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = ease_in_out_cubic(i as f32 / 100.0);
        assert!(v >= prev);
        prev = v;
    }
}

// ==================================
// 2. Vol
// ==================================

#[test]
fn test_idle_rocket_ignores_updates() {
    let mut rocket = four_second_rocket();
    assert!(!rocket.is_flying());
    assert!(rocket.update(1.0).is_none());
    assert_eq!(rocket.progress(), 0.0);
}

#[test]
fn test_midflight_pose() {
    let mut rocket = four_second_rocket();
    assert!(rocket.activate());
    rocket.update(0.0);
    rocket.update(2.0);

    assert!((rocket.progress() - 0.5).abs() < 1e-6);
    let pose = rocket.pose();
    assert!(pose.position.x.abs() < 1e-4, "x = {}", pose.position.x);
    assert!((pose.position.y + 0.5).abs() < 1e-4, "y = {}", pose.position.y);
    assert!(pose.position.z.abs() < 1e-4, "z = {}", pose.position.z);
    assert!((pose.scale - 1.4).abs() < 1e-5);
}

#[test]
fn test_flight_completes_exactly_once() {
    let mut rocket = four_second_rocket();
    rocket.activate();

    let mut completions = Vec::new();
    let mut last_progress = 0.0;
    for frame in 0..=600 {
        let t = 10.0 + frame as f32 / 60.0;
        if let Some(done) = rocket.update(t) {
            completions.push(done);
        }
        if rocket.is_flying() {
            assert!(rocket.progress() >= last_progress);
            last_progress = rocket.progress();
        }
    }

    assert_eq!(completions.len(), 1);
    assert!((completions[0].at - 14.0).abs() < 0.02);
    assert_eq!(completions[0].activation, 1);
    assert_eq!(rocket.progress(), 1.0);
    assert!(!rocket.is_flying());
}

#[test]
fn test_activate_while_flying_is_ignored() {
    let mut rocket = four_second_rocket();
    assert!(rocket.activate());
    rocket.update(0.0);
    rocket.update(1.0);
    assert!(!rocket.activate());
    assert_eq!(rocket.activations(), 1);
    assert!((rocket.progress() - 0.25).abs() < 1e-6);
}

#[test]
fn test_progress_never_goes_backwards() {
    let mut rocket = four_second_rocket();
    rocket.activate();
    rocket.update(5.0);
    rocket.update(7.0);
    // horloge qui recule : la progression reste acquise
    rocket.update(6.0);
    assert!((rocket.progress() - 0.5).abs() < 1e-6);
}

#[test]
fn test_reactivation_restarts_from_zero() {
    let mut rocket = four_second_rocket();
    rocket.activate();
    rocket.update(0.0);
    assert!(rocket.update(4.0).is_some());

    assert!(rocket.activate());
    assert_eq!(rocket.progress(), 0.0);
    assert!(rocket.trail().iter().all(|m| !m.visible));
    rocket.update(20.0);
    rocket.update(21.0);
    assert!((rocket.progress() - 0.25).abs() < 1e-6);
    assert_eq!(rocket.activations(), 2);
}

// ==================================
// 3. Traînée
// ==================================

#[test]
fn test_trail_markers_lag_behind() {
    let mut rocket = four_second_rocket();
    rocket.activate();
    rocket.update(0.0);
    rocket.update(0.1); // progress = 0.025

    let trail = rocket.trail();
    assert_eq!(trail.len(), 10);
    assert!(trail[0].visible);
    // 0.025 - 0.05 ≤ 0 : marqueur 1 caché
    assert!(!trail[1].visible);

    rocket.update(2.0); // progress = 0.5
    let trail = rocket.trail();
    assert!(trail.iter().all(|m| m.visible));
    for (k, m) in trail.iter().enumerate() {
        let tp = 0.5 - k as f32 * 0.05;
        assert!((m.position.x - (-15.0 + 30.0 * tp)).abs() < 1e-4);
        assert!((m.scale - 0.3 * (1.0 - k as f32 * 0.1)).abs() < 1e-6);
        assert!((m.opacity - (0.6 - k as f32 * 0.1).max(0.0)).abs() < 1e-6);
    }
}

#[test]
fn test_deactivate_hides_without_completion() {
    let mut rocket = four_second_rocket();
    rocket.activate();
    rocket.update(0.0);
    rocket.update(1.0);
    rocket.deactivate();
    assert!(!rocket.is_flying());
    assert!(rocket.trail().iter().all(|m| !m.visible));
    assert!(rocket.update(10.0).is_none());
}
