pub mod adjustment;
pub mod checkpoint;
pub mod justification;
pub mod notification;
pub mod session;
pub mod user;
pub mod weekly;
