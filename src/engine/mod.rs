pub mod combo;
pub mod stats;
