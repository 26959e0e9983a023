pub mod adjustments;
pub mod exclusions;
pub mod initialize;
pub mod justifications;
pub mod log;
pub mod meta;
pub mod migrate;
pub mod pool;
pub mod reports;
pub mod sessions;
pub mod stats;
pub mod users;
