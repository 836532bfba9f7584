// This file is part of Tile Toner.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::core::map::TileMap;
use crate::core::system::system_order::TileToneSet;
#[cfg(feature = "debug")]
use crate::debug::DebugPlugin;
use crate::interaction::commands::TileToneCommandsPlugin;
use crate::rendering::tile_tone::{OverlaySettings, TileToneRenderPlugin};

/// Everything a map needs for tinted, animated tiles.
///
/// The settings are fixed for the lifetime of the app. A [`TileMap`] resource is
/// created empty if the app has none.
#[derive(Default)]
pub struct TileTonerPlugin {
    pub settings: OverlaySettings,
}

impl TileTonerPlugin {
    pub fn new(settings: OverlaySettings) -> Self {
        Self { settings }
    }
}

impl Plugin for TileTonerPlugin {
    fn build(&self, app: &mut App) {
        info!(
            target: "tile_tone",
            "TileToner: show_base_tone={} fading_duration={}",
            self.settings.show_base_tone,
            self.settings.fading_duration
        );
        app.insert_resource(self.settings)
            .init_resource::<TileMap>()
            .configure_sets(
                Update,
                (
                    TileToneSet::Commands,
                    TileToneSet::Animate,
                    TileToneSet::Reconcile,
                )
                    .chain(),
            )
            .add_plugins((
                TileToneCommandsPlugin,
                TileToneRenderPlugin,
                #[cfg(feature = "debug")]
                DebugPlugin,
            ));
    }
}
