pub mod fixtures;
pub mod handlers;
pub mod store;
pub mod sweeper;
