pub mod adjust;
pub mod backup;
pub mod calculator;
pub mod exclusion;
pub mod identity;
pub mod justify;
pub mod log;
pub mod notify;
pub mod permissions;
pub mod report;
pub mod reset;
pub mod session;
pub mod weekly;
