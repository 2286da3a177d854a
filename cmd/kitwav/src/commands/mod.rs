//! CLI commands module.

mod config;
mod flat;
mod info;
mod kit;
mod util;

pub use config::ConfigCommand;
pub use flat::FlatCommand;
pub use info::InfoCommand;
pub use kit::KitCommand;

pub(crate) use util::*;
