pub mod config;
pub mod config_loader;
pub mod constants;
pub mod token;

pub use config::{ExecutorConfig, RoutingConfig, SwapExecutorConfig};
pub use config_loader::*;
pub use constants::*;
pub use token::Token;
