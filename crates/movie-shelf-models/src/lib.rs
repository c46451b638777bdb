pub mod detail;
pub mod stats;
pub mod summary;
pub mod watched;

pub use detail::MovieDetail;
pub use stats::WatchedStats;
pub use summary::MovieSummary;
pub use watched::WatchedEntry;
