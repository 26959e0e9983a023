pub mod goal;
pub mod status;
pub mod totals;
