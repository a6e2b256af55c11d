pub mod dataset;
pub mod normalize;
pub mod types;

pub use dataset::{load, summarize_wins, Dataset};
pub use normalize::{extract_records, normalize_country, select_finals_table, CanonicalColumn};
pub use types::{FinalRecord, WinCount};
