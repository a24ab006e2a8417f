pub mod clock;
pub mod config;
pub mod database;
pub mod earth;
pub mod error;
pub mod marker;
pub mod mesh_data;
pub mod morph;
pub mod projection;
pub mod record;
pub mod settings;
pub mod vis;

pub use config::{get_config, reload_config};
