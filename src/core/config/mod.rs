pub mod config;

pub use config::{
    BaseToneSwitch, DemoConfig, MapConfig, TileTonerConfig, ToneColor, ToneOverlayConfig,
    WindowConfig, BASE_CONFIG_FILE, LOCAL_CONFIG_FILE,
};
