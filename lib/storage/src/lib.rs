pub mod history;
pub mod manager;
pub mod persistence;
pub mod rows;
pub mod seed;
pub mod store;

pub use history::{HistoryEntry, NewHistoryEntry, SearchHistory};
pub use manager::StorageManager;
pub use persistence::JsonPersistence;
pub use rows::{rows_to_samples, SampleRow};
pub use seed::{reference_dataset, reference_samples};
pub use store::SampleStore;
