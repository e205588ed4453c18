pub mod config;
pub mod logging;

pub mod batch;
pub mod boundary;
pub mod catalog;
pub mod ids;
pub mod probe;
pub mod progress;
pub mod retry;
