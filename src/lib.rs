pub mod config;
pub mod error;
pub mod event;
pub mod payload;
pub mod reader;
pub mod reconcile;
pub mod session;
