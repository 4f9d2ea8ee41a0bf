pub mod client;
pub mod collection;
pub mod constants;
pub mod error;
pub mod logging;
pub mod types;
pub mod updater;
