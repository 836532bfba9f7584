use bevy::prelude::*;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Base layer shipped with the crate.
pub const BASE_CONFIG_FILE: &str = "tile_toner.ron";
/// Optional per-machine overrides, never shipped.
pub const LOCAL_CONFIG_FILE: &str = "tile_toner.local.ron";

use crate::core::map::MapGeometry;

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 816.0,
            height: 624.0,
            title: "Tile Toner".into(),
            auto_close: 0.0,
        }
    }
}

/// `ShowBaseTone` accepts the plugin-style `"ON"` / `"OFF"` strings or a plain bool.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum BaseToneSwitch {
    Flag(bool),
    Text(String),
}
impl Default for BaseToneSwitch {
    fn default() -> Self {
        BaseToneSwitch::Text("ON".into())
    }
}
impl BaseToneSwitch {
    pub fn is_on(&self) -> bool {
        match self {
            BaseToneSwitch::Flag(b) => *b,
            BaseToneSwitch::Text(s) => s == "ON",
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ToneOverlayConfig {
    pub show_base_tone: BaseToneSwitch,
    /// Frames for a full fade; anything below 1 resolves to 1.
    pub fading_duration: i64,
}
impl Default for ToneOverlayConfig {
    fn default() -> Self {
        Self {
            show_base_tone: BaseToneSwitch::default(),
            fading_duration: 15,
        }
    }
}
impl ToneOverlayConfig {
    pub fn fading_duration(&self) -> u32 {
        self.fading_duration.clamp(1, u32::MAX as i64) as u32
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub tile_width: f32,
    pub tile_height: f32,
    pub width: i32,
    pub height: i32,
    pub loop_horizontal: bool,
    pub loop_vertical: bool,
}
impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_width: 48.0,
            tile_height: 48.0,
            width: 17,
            height: 13,
            loop_horizontal: false,
            loop_vertical: false,
        }
    }
}
impl MapConfig {
    /// Geometry for a view of `window` size scrolled to the map origin.
    pub fn geometry(&self, window: &WindowConfig) -> MapGeometry {
        let tw = self.tile_width.max(1.0);
        let th = self.tile_height.max(1.0);
        MapGeometry {
            tile_width: tw,
            tile_height: th,
            width: self.width.max(1),
            height: self.height.max(1),
            display_x: 0.0,
            display_y: 0.0,
            loop_horizontal: self.loop_horizontal,
            loop_vertical: self.loop_vertical,
            screen_tiles_x: window.width.max(1.0) / tw,
            screen_tiles_y: window.height.max(1.0) / th,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ToneColor {
    pub r: i32,
    pub g: i32,
    pub b: i32,
    #[serde(default = "default_alpha")]
    pub alpha: i32,
}
fn default_alpha() -> i32 {
    crate::core::tone::OPAQUE_ALPHA
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub seed: u64,
    /// Frames between random `set` commands (0 disables).
    pub set_interval: u32,
    pub remove_interval: u32,
    pub clear_interval: u32,
    pub palette: Vec<ToneColor>,
}
impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            set_interval: 10,
            remove_interval: 25,
            clear_interval: 600,
            palette: vec![
                ToneColor { r: 255, g: 64, b: 64, alpha: 200 },
                ToneColor { r: 64, g: 160, b: 255, alpha: 200 },
                ToneColor { r: 96, g: 255, b: 96, alpha: 160 },
                ToneColor { r: 255, g: 220, b: 64, alpha: 255 },
            ],
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TileTonerConfig {
    pub window: WindowConfig,
    pub tile_toner: ToneOverlayConfig,
    pub map: MapConfig,
    pub demo: DemoConfig,
}

impl TileTonerConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
    /// Layers read when no `--config` is given: the base file, plus the local override
    /// only when it exists so a missing local file is not reported as an error.
    pub fn default_layers(dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = dir.as_ref();
        let mut layers = vec![dir.join(BASE_CONFIG_FILE)];
        let local = dir.join(LOCAL_CONFIG_FILE);
        if local.exists() {
            layers.push(local);
        }
        layers
    }

    /// Merges every readable RON file in order (later keys win) and deserializes the result.
    /// Returns the config, the paths actually used, and any read/parse problems.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
            use ron::value::Value;
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        if let Some(val) = merged {
            match val.into_rust::<TileTonerConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (TileTonerConfig::default(), used, errors)
                }
            }
        } else {
            (TileTonerConfig::default(), used, errors)
        }
    }
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.tile_toner.fading_duration < 1 {
            w.push(format!(
                "tile_toner.fading_duration {} < 1 -> clamped to 1",
                self.tile_toner.fading_duration
            ));
        }
        if let BaseToneSwitch::Text(s) = &self.tile_toner.show_base_tone {
            if s != "ON" && s != "OFF" {
                w.push(format!(
                    "tile_toner.show_base_tone \"{s}\" is neither \"ON\" nor \"OFF\" -> treated as OFF"
                ));
            }
        }
        if self.map.tile_width < 3.0 || self.map.tile_height < 3.0 {
            w.push(format!(
                "map tile size {}x{} too small; shadow layer needs at least 3px",
                self.map.tile_width, self.map.tile_height
            ));
        }
        if self.map.width <= 0 || self.map.height <= 0 {
            w.push("map dimensions must be > 0".into());
        }
        if self.demo.palette.is_empty() {
            w.push("demo.palette is empty; demo will not set any tones".into());
        }
        w
    }

    /// Geometry the demo map starts with.
    pub fn map_geometry(&self) -> MapGeometry {
        self.map.geometry(&self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plugin_defaults() {
        let cfg = TileTonerConfig::default();
        assert!(cfg.tile_toner.show_base_tone.is_on());
        assert_eq!(cfg.tile_toner.fading_duration(), 15);
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn fading_duration_floor_is_one() {
        let mut o = ToneOverlayConfig::default();
        o.fading_duration = 0;
        assert_eq!(o.fading_duration(), 1);
        o.fading_duration = -30;
        assert_eq!(o.fading_duration(), 1);
        o.fading_duration = 42;
        assert_eq!(o.fading_duration(), 42);
    }

    #[test]
    fn base_tone_switch_accepts_text_and_bool() {
        let on: ToneOverlayConfig = ron::from_str(r#"(show_base_tone: "ON")"#).unwrap();
        assert!(on.show_base_tone.is_on());
        let off: ToneOverlayConfig = ron::from_str(r#"(show_base_tone: "OFF")"#).unwrap();
        assert!(!off.show_base_tone.is_on());
        let lower: ToneOverlayConfig = ron::from_str(r#"(show_base_tone: "on")"#).unwrap();
        assert!(!lower.show_base_tone.is_on());
        let flag: ToneOverlayConfig = ron::from_str("(show_base_tone: true)").unwrap();
        assert!(flag.show_base_tone.is_on());
    }

    #[test]
    fn layered_merge_keeps_untouched_keys_and_adds_new_ones() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join(BASE_CONFIG_FILE);
        let over = dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&base, "(tile_toner: (fading_duration: 20), window: (title: \"Base\"))")
            .expect("write base");
        fs::write(&over, "(window: (width: 640.0), demo: (seed: 99))").expect("write over");
        let (cfg, used, errors) = TileTonerConfig::load_layered([&base, &over]);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.tile_toner.fading_duration, 20);
        assert_eq!(cfg.window.title, "Base");
        assert_eq!(cfg.window.width, 640.0);
        assert_eq!(cfg.demo.seed, 99);
    }

    #[test]
    fn default_layers_skip_missing_local_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layers = TileTonerConfig::default_layers(dir.path());
        assert_eq!(layers, vec![dir.path().join(BASE_CONFIG_FILE)]);
        fs::write(dir.path().join(LOCAL_CONFIG_FILE), "()").expect("write local");
        let layers = TileTonerConfig::default_layers(dir.path());
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[1], dir.path().join(LOCAL_CONFIG_FILE));
    }

    #[test]
    fn map_geometry_uses_window_for_screen_tiles() {
        let cfg = TileTonerConfig::default();
        let g = cfg.map_geometry();
        assert_eq!(g.screen_tiles_x, 17.0);
        assert_eq!(g.screen_tiles_y, 13.0);
    }
}
