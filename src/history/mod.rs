pub mod manager;

pub use manager::{DEFAULT_CAPACITY, History, HistoryManager};
