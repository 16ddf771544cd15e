// todo - to-do list manager persisted to a local JSON file

pub mod commands;
pub mod config;
pub mod filter;
pub mod models;
pub mod store;
pub mod table;

// Re-export main types for convenience
pub use config::{Action, Cli, Config};
pub use filter::StatusFilter;
pub use models::Task;
pub use store::TaskStore;
