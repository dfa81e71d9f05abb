//! Command implementations

mod config;
mod replay;
#[cfg(feature = "server")]
mod serve;

pub use config::show_config;
pub use replay::replay;
#[cfg(feature = "server")]
pub use serve::serve;
