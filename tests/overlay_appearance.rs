use bevy::prelude::*;
use tile_toner::core::map::MapGeometry;
use tile_toner::rendering::tile_tone::visual::{OVERLAY_Z, SHADOW_OPACITY};
use tile_toner::rendering::tile_tone::{OverlayOpacity, RippleLayer, ShadowLayer, TileToneVisual};
use tile_toner::{OverlaySettings, TileMap, TileTonerPlugin};

fn test_app(show_base_tone: bool, fading_duration: u32) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TileMap::new(1, MapGeometry::default()));
    app.add_plugins(TileTonerPlugin::new(OverlaySettings {
        show_base_tone,
        fading_duration,
    }));
    app
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn base_plate_only_when_enabled() {
    for enabled in [true, false] {
        let mut app = test_app(enabled, 15);
        app.world_mut()
            .resource_mut::<TileMap>()
            .set_tile_tone(0, 0, 255, 0, 0, 255);
        app.update();
        let mut plates = app
            .world_mut()
            .query_filtered::<&Sprite, With<TileToneVisual>>();
        assert_eq!(plates.iter(app.world()).count(), usize::from(enabled));
        let mut shadows = app.world_mut().query_filtered::<&Sprite, With<ShadowLayer>>();
        assert_eq!(shadows.iter(app.world()).count(), 1);
        let mut ripples = app.world_mut().query_filtered::<&Sprite, With<RippleLayer>>();
        assert_eq!(ripples.iter(app.world()).count(), 1);
    }
}

#[test]
fn layers_compose_with_root_opacity() {
    let mut app = test_app(true, 4);
    app.world_mut()
        .resource_mut::<TileMap>()
        .set_tile_tone(2, 3, 255, 51, 0, 200);
    app.update();

    // freshly spawned overlays are invisible
    let mut roots = app
        .world_mut()
        .query::<(&OverlayOpacity, &Sprite, &Transform, &TileToneVisual)>();
    let (opacity, plate, tf, _) = roots.single(app.world()).unwrap();
    assert_eq!(opacity.0, 0.0);
    assert_eq!(plate.color.to_srgba().alpha, 0.0);
    assert_eq!(plate.custom_size, Some(Vec2::new(50.0, 50.0)));
    let center = MapGeometry::default().tile_center_world(2, 3);
    assert_eq!(tf.translation, center.extend(OVERLAY_Z));

    app.update(); // elapsed 1 of 4 -> root 50
    let (opacity, plate, _, _) = roots.single(app.world()).unwrap();
    assert!(approx(opacity.0, 50.0));
    assert!(approx(plate.color.to_srgba().alpha, 50.0 / 255.0));

    let mut shadows = app
        .world_mut()
        .query_filtered::<&Sprite, With<ShadowLayer>>();
    let shadow = shadows.single(app.world()).unwrap().color.to_srgba();
    assert!(approx(shadow.red, 1.0));
    assert!(approx(shadow.green, 0.2));
    assert!(approx(shadow.blue, 0.0));
    assert!(approx(shadow.alpha, SHADOW_OPACITY / 255.0 * 50.0 / 255.0));
}

#[test]
fn ripple_follows_shared_clock() {
    let mut app = test_app(false, 15);
    app.world_mut()
        .resource_mut::<TileMap>()
        .set_tile_tone(0, 0, 0, 0, 255, 255);
    app.update();
    for _ in 0..5 {
        app.update();
    }
    // a second overlay joins later but pulses in step with the first
    app.world_mut()
        .resource_mut::<TileMap>()
        .set_tile_tone(1, 0, 0, 0, 255, 255);
    app.update();
    app.update();

    // the last animate pass read clock == 7
    let mut ripples = app
        .world_mut()
        .query_filtered::<&Transform, With<RippleLayer>>();
    let scales: Vec<f32> = ripples.iter(app.world()).map(|t| t.scale.x).collect();
    assert_eq!(scales.len(), 2);
    for s in &scales {
        assert!(approx(*s, 7.0 / 90.0 * 4.0), "scale {s}");
    }
}

#[test]
fn overlays_follow_scroll() {
    let mut app = test_app(true, 15);
    app.world_mut()
        .resource_mut::<TileMap>()
        .set_tile_tone(5, 5, 0, 0, 0, 255);
    app.update();
    app.world_mut().resource_mut::<TileMap>().geometry.display_x = 2.0;
    app.update();
    let mut roots = app
        .world_mut()
        .query_filtered::<&Transform, With<TileToneVisual>>();
    let tf = roots.single(app.world()).unwrap();
    let mut g = MapGeometry::default();
    g.display_x = 2.0;
    assert_eq!(tf.translation.truncate(), g.tile_center_world(5, 5));
    // scrolled two tiles right: tile 5 now sits where tile 3 was
    assert_eq!(tf.translation.x, MapGeometry::default().tile_center_world(3, 5).x);
}
