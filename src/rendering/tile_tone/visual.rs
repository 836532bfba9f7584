use bevy::prelude::*;

use super::clock::AnimationClock;
use super::color_tone::toned_color;
use super::fade::FadeState;
use super::settings::OverlaySettings;
use crate::core::map::{MapGeometry, TileMap};
use crate::core::tone::ToneSpec;

/// Shadow layer opacity, two thirds of full.
pub const SHADOW_OPACITY: f32 = 255.0 * (2.0 / 3.0);
/// Ripple layer opacity at the start of each pulse, one third of full.
pub const RIPPLE_BASE_OPACITY: f32 = 255.0 * (1.0 / 3.0);
/// Overlays sit just above the tile layer.
pub const OVERLAY_Z: f32 = 0.5;
const SHADOW_LOCAL_Z: f32 = 0.01;
const RIPPLE_LOCAL_Z: f32 = 0.02;

const BASE_PLATE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const LAYER_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// Root of one overlay: bound to exactly one registry spec for its whole life.
#[derive(Component, Debug, Clone)]
pub struct TileToneVisual {
    spec: ToneSpec,
}
impl TileToneVisual {
    pub fn new(spec: ToneSpec) -> Self {
        Self { spec }
    }
    pub fn spec(&self) -> &ToneSpec {
        &self.spec
    }
}

/// Current root opacity in 0..=255 units; children compose against it.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Deref, DerefMut)]
pub struct OverlayOpacity(pub f32);

/// Dark tinted square under the pulse. Constant opacity.
#[derive(Component, Debug, Default)]
pub struct ShadowLayer;

/// Pulsing square driven by the shared [`AnimationClock`].
#[derive(Component, Debug, Default)]
pub struct RippleLayer;

/// Root opacity: spec alpha scaled by fade progress.
#[inline]
pub fn root_opacity(alpha: i32, fade: &FadeState) -> f32 {
    alpha as f32 * fade.rate()
}

#[inline]
pub fn ripple_opacity_rate(clock: &AnimationClock) -> f32 {
    1.0 - (clock.phase() * 3.0).min(1.0)
}

#[inline]
pub fn ripple_opacity(clock: &AnimationClock) -> f32 {
    RIPPLE_BASE_OPACITY * ripple_opacity_rate(clock)
}

#[inline]
pub fn ripple_scale(clock: &AnimationClock) -> f32 {
    (clock.phase() * 4.0).min(1.0)
}

/// Rendered alpha (0..=1) of a child layer: its own opacity times the root's, like
/// nested display objects in the host renderer.
#[inline]
pub fn composed_alpha(local: f32, root: f32) -> f32 {
    (local.clamp(0.0, 255.0) / 255.0) * (root.clamp(0.0, 255.0) / 255.0)
}

pub fn base_plate_size(geometry: &MapGeometry) -> Vec2 {
    Vec2::new(geometry.tile_width + 2.0, geometry.tile_height + 2.0)
}

pub fn layer_size(geometry: &MapGeometry) -> Vec2 {
    Vec2::new(
        (geometry.tile_width - 2.0).max(1.0),
        (geometry.tile_height - 2.0).max(1.0),
    )
}

fn base_plate_color(root: f32) -> Color {
    let [r, g, b] = BASE_PLATE_COLOR;
    Color::srgba(r, g, b, composed_alpha(255.0, root))
}

/// Spawns the root and both layers for `spec`, fading in from zero.
pub fn spawn_overlay_visual(
    commands: &mut Commands,
    spec: &ToneSpec,
    settings: &OverlaySettings,
    geometry: &MapGeometry,
    clock: &AnimationClock,
) -> Entity {
    let fade = FadeState::new(settings.fading_duration);
    let opacity = root_opacity(spec.alpha(), &fade);
    let tone = spec.tone();
    let layer = layer_size(geometry);
    let translation = geometry
        .tile_center_world(spec.x(), spec.y())
        .extend(OVERLAY_Z);

    let mut root = commands.spawn((
        TileToneVisual::new(spec.clone()),
        fade,
        OverlayOpacity(opacity),
        Transform::from_translation(translation),
        Visibility::Visible,
        Name::new(format!("TileTone:{}:{}", spec.x(), spec.y())),
    ));
    if settings.show_base_tone {
        root.insert(Sprite {
            color: base_plate_color(opacity),
            custom_size: Some(base_plate_size(geometry)),
            ..default()
        });
    }
    root.with_children(|p| {
        p.spawn((
            ShadowLayer,
            Sprite {
                color: toned_color(LAYER_COLOR, tone, composed_alpha(SHADOW_OPACITY, opacity)),
                custom_size: Some(layer),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, SHADOW_LOCAL_Z),
        ));
        let scale = ripple_scale(clock);
        p.spawn((
            RippleLayer,
            Sprite {
                color: toned_color(
                    LAYER_COLOR,
                    tone,
                    composed_alpha(ripple_opacity(clock), opacity),
                ),
                custom_size: Some(layer),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, RIPPLE_LOCAL_Z).with_scale(Vec3::new(scale, scale, 1.0)),
        ));
    });
    root.id()
}

type RootItem<'a> = (
    &'a TileToneVisual,
    &'a mut FadeState,
    &'a mut OverlayOpacity,
    &'a mut Transform,
    Option<&'a mut Sprite>,
    Option<&'a Children>,
);

type LayerItem<'a> = (&'a mut Sprite, &'a mut Transform, Has<RippleLayer>);

/// Per tick: advance each overlay's fade, follow scroll, recompute every opacity and
/// the ripple scale from (spec, fade, clock).
pub fn animate_tile_tone_visuals(
    map: Res<TileMap>,
    clock: Res<AnimationClock>,
    mut q_roots: Query<RootItem>,
    mut q_layers: Query<
        LayerItem,
        (
            Without<TileToneVisual>,
            Or<(With<ShadowLayer>, With<RippleLayer>)>,
        ),
    >,
) {
    let ripple_local = ripple_opacity(&clock);
    let scale = ripple_scale(&clock);
    for (visual, mut fade, mut opacity, mut tf, sprite, children) in q_roots.iter_mut() {
        fade.advance();
        let spec = visual.spec();
        opacity.0 = root_opacity(spec.alpha(), &fade);
        let pos = map.geometry.tile_center_world(spec.x(), spec.y());
        tf.translation = pos.extend(OVERLAY_Z);
        if let Some(mut sprite) = sprite {
            sprite.color = base_plate_color(opacity.0);
        }
        let Some(children) = children else { continue };
        let tone = spec.tone();
        for child in children.iter() {
            if let Ok((mut sprite, mut ltf, is_ripple)) = q_layers.get_mut(child) {
                if is_ripple {
                    sprite.color = toned_color(LAYER_COLOR, tone, composed_alpha(ripple_local, opacity.0));
                    ltf.scale = Vec3::new(scale, scale, 1.0);
                } else {
                    sprite.color = toned_color(LAYER_COLOR, tone, composed_alpha(SHADOW_OPACITY, opacity.0));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ripple_starts_full_and_unscaled() {
        let c = AnimationClock::at(0);
        assert_eq!(ripple_scale(&c), 0.0);
        assert_eq!(ripple_opacity(&c), RIPPLE_BASE_OPACITY);
    }

    #[test]
    fn ripple_near_quarter_period() {
        let c = AnimationClock::at(22);
        assert!((ripple_scale(&c) - 88.0 / 90.0).abs() < 1e-5);
        // opacity is still on its way down: 1 - 66/90
        assert!((ripple_opacity_rate(&c) - 24.0 / 90.0).abs() < 1e-5);
        // fully gone from the third of the period onward
        assert_eq!(ripple_opacity(&AnimationClock::at(30)), 0.0);
    }

    #[test]
    fn ripple_mid_period_settled() {
        let c = AnimationClock::at(45);
        assert_eq!(ripple_scale(&c), 1.0);
        assert_eq!(ripple_opacity(&c), 0.0);
        // same phase one period later
        let later = AnimationClock::at(45 + 90 * 3);
        assert_eq!(ripple_scale(&later), 1.0);
        assert_eq!(ripple_opacity(&later), 0.0);
    }

    #[test]
    fn root_opacity_tracks_fade() {
        let mut fade = FadeState::new(10);
        assert_eq!(root_opacity(200, &fade), 0.0);
        for _ in 0..5 {
            fade.advance();
        }
        assert_eq!(root_opacity(200, &fade), 100.0);
        for _ in 0..5 {
            fade.advance();
        }
        assert_eq!(root_opacity(200, &fade), 200.0);
    }

    #[test]
    fn shadow_constant_is_two_thirds() {
        assert!((SHADOW_OPACITY - 170.0).abs() < 1e-4);
        assert!((RIPPLE_BASE_OPACITY - 85.0).abs() < 1e-4);
        assert_eq!(composed_alpha(255.0, 255.0), 1.0);
        assert_eq!(composed_alpha(170.0, 0.0), 0.0);
        assert_eq!(composed_alpha(255.0, 999.0), 1.0);
    }

    #[test]
    fn layer_sizes_follow_tile() {
        let g = MapGeometry::default();
        assert_eq!(base_plate_size(&g), Vec2::new(50.0, 50.0));
        assert_eq!(layer_size(&g), Vec2::new(46.0, 46.0));
    }
}
