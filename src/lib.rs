#![warn(rust_2018_idioms)]

pub mod config;
mod error;
pub mod message;

pub use config::Config;
pub use error::{Error, Result};
