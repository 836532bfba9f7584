//! Demo scene: a checkerboard map whose tiles get tinted and cleared by a seeded
//! random script, plus an optional timed exit.
use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::core::config::{DemoConfig, TileTonerConfig};
use crate::core::map::TileMap;
use crate::core::system::system_order::TileToneSet;
use crate::interaction::commands::TileToneCommand;

const TILE_Z: f32 = 0.0;

#[derive(Resource)]
struct DemoScript {
    cfg: DemoConfig,
    rng: StdRng,
    frame: u64,
}

#[derive(Resource, Deref, DerefMut)]
struct AutoCloseTimer(Timer);

pub struct DemoScriptPlugin;

impl Plugin for DemoScriptPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_demo_scene, setup_autoclose))
            .add_systems(
                Update,
                (
                    drive_demo_script.before(TileToneSet::Commands),
                    check_autoclose,
                ),
            );
    }
}

fn setup_demo_scene(mut commands: Commands, cfg: Res<TileTonerConfig>, map: Res<TileMap>) {
    commands.spawn(Camera2d);
    let g = &map.geometry;
    let size = Vec2::new(g.tile_width - 1.0, g.tile_height - 1.0);
    for y in 0..g.height {
        for x in 0..g.width {
            let shade = if (x + y) % 2 == 0 { 0.22 } else { 0.28 };
            commands.spawn((
                Sprite {
                    color: Color::srgb(shade, shade, shade + 0.04),
                    custom_size: Some(size),
                    ..default()
                },
                Transform::from_translation(g.tile_center_world(x, y).extend(TILE_Z)),
            ));
        }
    }
    info!(
        target: "demo",
        "demo map {}x{} tiles, seed={}",
        g.width,
        g.height,
        cfg.demo.seed
    );
    commands.insert_resource(DemoScript {
        cfg: cfg.demo.clone(),
        rng: StdRng::seed_from_u64(cfg.demo.seed),
        frame: 0,
    });
}

#[inline]
fn every(frame: u64, interval: u32) -> bool {
    interval > 0 && frame % interval as u64 == 0
}

fn drive_demo_script(
    script: Option<ResMut<DemoScript>>,
    map: Res<TileMap>,
    mut writer: EventWriter<TileToneCommand>,
) {
    let Some(mut script) = script else { return };
    script.frame += 1;
    let frame = script.frame;
    let DemoScript { cfg, rng, .. } = &mut *script;

    if every(frame, cfg.clear_interval) {
        info!(target: "demo", "frame {frame}: clearing {} tones", map.tile_tones().len());
        writer.write(TileToneCommand::Clear);
        return;
    }
    if every(frame, cfg.remove_interval) && !map.tile_tones().is_empty() {
        let tones = map.tile_tones();
        let victim = &tones[rng.gen_range(0..tones.len())];
        writer.write(TileToneCommand::Remove {
            x: victim.x(),
            y: victim.y(),
        });
    }
    if every(frame, cfg.set_interval) && !cfg.palette.is_empty() {
        let g = &map.geometry;
        let x = rng.gen_range(0..g.width);
        let y = rng.gen_range(0..g.height);
        let c = &cfg.palette[rng.gen_range(0..cfg.palette.len())];
        writer.write(TileToneCommand::set(x, y, c.r, c.g, c.b, c.alpha));
    }
}

fn setup_autoclose(mut commands: Commands, cfg: Res<TileTonerConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(seconds = secs, "AutoClose: will exit after {secs} seconds");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn check_autoclose(
    time: Res<Time>,
    timer: Option<ResMut<AutoCloseTimer>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    if let Some(mut t) = timer {
        if t.tick(time.delta()).just_finished() {
            info!("AutoClose: timer finished, requesting app exit");
            ev_exit.write(AppExit::Success);
        }
    }
}
