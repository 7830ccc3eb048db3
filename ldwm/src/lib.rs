mod command;
mod config;
pub mod logging;

pub use command::BaseCommand;
pub use config::*;
