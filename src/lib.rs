pub mod cli;
pub mod composer;
pub mod config;
pub mod error;
pub mod export;
pub mod intake;
