//! Infrastructure configuration modules.

pub mod logging;
pub mod matching;
pub mod poller;
pub mod settings;
pub mod telegram;

pub use settings::Config;
