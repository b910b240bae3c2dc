//! Action-value network with owned optimizer, loss and checkpointing.
mod base;
mod config;
pub use base::QNet;
pub use config::QNetConfig;
