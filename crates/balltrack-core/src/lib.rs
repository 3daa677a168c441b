pub mod config;
pub mod distlog;
pub mod frame;
pub mod processor;
pub mod sensor;
pub mod streaming;
