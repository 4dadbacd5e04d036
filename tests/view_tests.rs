//! Lifecycle and Animation Tests
//!
//! Tests for:
//! - Mount/tick/dispose state machine and teardown idempotence
//! - No resource leaks across repeated mount/dispose cycles
//! - Floating baseline invariant (initial_y never changes)
//! - Particle array-length invariant across ticks
//! - Guarded asynchronous font delivery (success, failure, late arrival)

use heartfield::assets::AssetServer;
use heartfield::assets::font::Font;
use heartfield::config::HeartSceneConfig;
use heartfield::view::{HeartView, ViewState};

fn test_config() -> HeartSceneConfig {
    HeartSceneConfig {
        heart_count: 10,
        particle_count: 64,
        point_light_count: 2,
        // No network in tests; glyphs are injected through a channel.
        font_url: None,
        ..HeartSceneConfig::default()
    }
}

/// A font carrying bar-shaped B and K glyphs, enough to build "BKB".
fn test_font() -> Font {
    let json = r#"{
      "resolution": 1000,
      "glyphs": {
        "B": { "ha": 600, "o": "m 0 0 l 500 0 l 500 700 l 0 700" },
        "K": { "ha": 600, "o": "m 0 0 l 500 0 l 500 700 l 0 700" }
      }
    }"#;
    Font::parse(json.as_bytes()).unwrap()
}

#[test]
fn mount_builds_scene_and_runs() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 1);

    assert_eq!(view.state(), ViewState::Uninitialized);
    view.mount(&assets, 16.0 / 9.0);

    assert_eq!(view.state(), ViewState::Running);
    assert_eq!(view.entities().len(), 10);
    assert!(view.particle_field().is_some());
    assert!(assets.asset_count() > 0);
    assert!(view.scene().active_camera.is_some());
}

#[test]
fn dispose_releases_all_resources() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 2);

    view.mount(&assets, 1.0);
    assert!(assets.asset_count() > 0);

    view.dispose(&assets);
    assert_eq!(view.state(), ViewState::Disposed);
    assert_eq!(assets.asset_count(), 0);
    assert!(view.entities().is_empty());

    // Dispose is idempotent.
    view.dispose(&assets);
    assert_eq!(assets.asset_count(), 0);
}

#[test]
fn dispose_before_mount_is_safe_and_terminal() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 3);

    view.dispose(&assets);
    assert_eq!(view.state(), ViewState::Disposed);

    // Disposed is terminal: a later mount is refused.
    view.mount(&assets, 1.0);
    assert_eq!(view.state(), ViewState::Disposed);
    assert_eq!(assets.asset_count(), 0);
}

#[test]
fn repeated_cycles_do_not_leak() {
    let assets = AssetServer::new();

    for cycle in 0..5 {
        let mut view = HeartView::with_seed(test_config(), cycle);
        view.mount(&assets, 1.0);
        for _ in 0..3 {
            view.tick(&assets);
        }
        view.dispose(&assets);
        assert_eq!(
            assets.asset_count(),
            0,
            "cycle {cycle} left resources behind"
        );
    }
}

#[test]
fn tick_before_mount_is_a_no_op() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 4);

    view.tick(&assets);
    assert_eq!(view.state(), ViewState::Uninitialized);
    assert!(view.time().abs() < f32::EPSILON);
}

#[test]
fn tick_advances_fixed_step_time() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 5);
    view.mount(&assets, 1.0);

    for _ in 0..10 {
        view.tick(&assets);
    }
    assert!((view.time() - 0.1).abs() < 1e-4);
}

#[test]
fn floating_baseline_never_changes() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 6);
    view.mount(&assets, 1.0);

    let baselines: Vec<f32> = view.entities().iter().map(|e| e.initial_y()).collect();

    for _ in 0..50 {
        view.tick(&assets);
    }

    for (entity, &baseline) in view.entities().iter().zip(&baselines) {
        assert!(
            (entity.initial_y() - baseline).abs() < f32::EPSILON,
            "baseline drifted"
        );

        // The node's Y is the baseline plus the float oscillation.
        let expected = baseline + (view.time() * entity.float_speed).sin() * 0.5;
        let actual = view
            .scene()
            .get_node(entity.node)
            .unwrap()
            .transform
            .position
            .y;
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }
}

#[test]
fn particle_arrays_keep_length_across_ticks() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 7);
    view.mount(&assets, 1.0);

    let field = *view.particle_field().unwrap();

    for _ in 0..10 {
        view.tick(&assets);
    }

    let geometry = assets.geometries.get(field.geometry).unwrap();
    assert_eq!(geometry.get_attribute("position").unwrap().count, field.count);
    assert_eq!(geometry.get_attribute("color").unwrap().count, field.count);
    assert_eq!(geometry.get_attribute("size").unwrap().count, field.count);
}

#[test]
fn particle_sizes_change_between_ticks() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 8);
    view.mount(&assets, 1.0);

    let field = *view.particle_field().unwrap();
    view.tick(&assets);
    let v1 = assets
        .geometries
        .get(field.geometry)
        .unwrap()
        .get_attribute("size")
        .unwrap()
        .version();
    view.tick(&assets);
    let v2 = assets
        .geometries
        .get(field.geometry)
        .unwrap()
        .get_attribute("size")
        .unwrap()
        .version();

    assert!(v2 > v1, "size buffer must be marked dirty every tick");
}

#[test]
fn camera_orbits_while_aimed_at_origin() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 9);
    view.mount(&assets, 1.0);

    for _ in 0..100 {
        view.tick(&assets);
    }

    let camera_node = view.scene().active_camera.unwrap();
    let camera_pos = view
        .scene()
        .get_node(camera_node)
        .unwrap()
        .transform
        .position;
    let t = view.time();
    assert!((camera_pos.x - (t * 0.1).sin() * 2.0).abs() < 1e-4);
    assert!((camera_pos.y - (t * 0.1).cos() * 2.0).abs() < 1e-4);
}

#[test]
fn resize_updates_camera_aspect() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 10);
    view.mount(&assets, 1.0);

    view.resize(2.0);
    assert!((view.scene().active_camera_component().unwrap().aspect - 2.0).abs() < 1e-6);

    // Zero/negative aspect is rejected.
    view.resize(0.0);
    assert!((view.scene().active_camera_component().unwrap().aspect - 2.0).abs() < 1e-6);
}

#[test]
fn font_delivery_adds_letters_once() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 11);
    view.mount(&assets, 1.0);
    let before = view.entities().len();

    let (tx, rx) = flume::bounded(1);
    view.attach_font_channel(rx);

    // Nothing arrives yet; the scene keeps animating letter-less.
    view.tick(&assets);
    assert_eq!(view.entities().len(), before);

    tx.send(Ok(test_font())).unwrap();
    view.tick(&assets);

    // "BKB" resolves to three letter solids at the scene center.
    assert_eq!(view.entities().len(), before + 3);

    let letter_xs: Vec<f32> = view.entities()[before..]
        .iter()
        .map(|e| view.scene().get_node(e.node).unwrap().transform.position.x)
        .collect();
    assert!((letter_xs[0] + 3.0).abs() < 1e-4);
    assert!(letter_xs[1].abs() < 1e-4);
    assert!((letter_xs[2] - 3.0).abs() < 1e-4);
}

#[test]
fn font_failure_leaves_scene_running() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 12);
    view.mount(&assets, 1.0);
    let before = view.entities().len();

    let (tx, rx) = flume::bounded(1);
    view.attach_font_channel(rx);
    tx.send(Err(heartfield::HeartfieldError::FontFetchStatus {
        status: 404,
    }))
    .unwrap();

    view.tick(&assets);
    assert_eq!(view.state(), ViewState::Running);
    assert_eq!(view.entities().len(), before);

    // The channel is consumed; later ticks stay quiet.
    view.tick(&assets);
    assert_eq!(view.entities().len(), before);
}

#[test]
fn late_font_after_dispose_is_discarded() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 13);
    view.mount(&assets, 1.0);

    let (tx, rx) = flume::bounded(1);
    view.attach_font_channel(rx);
    view.dispose(&assets);

    // The receiver is gone; the late completion has nowhere to land.
    assert!(tx.send(Ok(test_font())).is_err());
    assert_eq!(assets.asset_count(), 0);
}

#[test]
fn disconnected_font_channel_is_tolerated() {
    let assets = AssetServer::new();
    let mut view = HeartView::with_seed(test_config(), 14);
    view.mount(&assets, 1.0);
    let before = view.entities().len();

    let (tx, rx) = flume::bounded::<heartfield::errors::Result<Font>>(1);
    view.attach_font_channel(rx);
    drop(tx);

    view.tick(&assets);
    assert_eq!(view.state(), ViewState::Running);
    assert_eq!(view.entities().len(), before);
}

#[test]
fn pixel_ratio_is_clamped_to_ceiling() {
    use heartfield::app::clamp_surface_size;

    // At or below the ceiling the physical size passes through.
    assert_eq!(clamp_surface_size(1280, 720, 2.0, 2.0), (1280, 720));
    assert_eq!(clamp_surface_size(1280, 720, 1.0, 2.0), (1280, 720));

    // A 3x display renders at the 2x backing size.
    assert_eq!(clamp_surface_size(3840, 2160, 3.0, 2.0), (2560, 1440));
}

#[test]
fn seeded_views_build_identical_scenes() {
    let assets_a = AssetServer::new();
    let assets_b = AssetServer::new();
    let mut a = HeartView::with_seed(test_config(), 99);
    let mut b = HeartView::with_seed(test_config(), 99);

    a.mount(&assets_a, 1.0);
    b.mount(&assets_b, 1.0);

    let pos = |view: &HeartView| -> Vec<[f32; 3]> {
        view.entities()
            .iter()
            .map(|e| {
                let p = view.scene().get_node(e.node).unwrap().transform.position;
                [p.x, p.y, p.z]
            })
            .collect()
    };
    assert_eq!(pos(&a), pos(&b));
}
