//! Infrastructure configuration modules.

pub mod logging;
pub mod market;
pub mod settings;

pub use logging::LoggingConfig;
pub use market::{MarketSettings, MAX_FEE_BPS};
pub use settings::Config;
