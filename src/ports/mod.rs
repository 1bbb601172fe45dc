//! Port traits decoupling the core pipeline from its collaborators.

pub mod data_port;
pub mod news_port;
pub mod config_port;
