pub mod chat;
pub mod inventory;
pub mod query;

pub use chat::*;
pub use inventory::*;
pub use query::*;
