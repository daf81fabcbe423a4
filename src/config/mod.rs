pub mod lib;
pub mod models;
pub mod validation;

pub use lib::{load_config, read_config};
pub use models::Config;
