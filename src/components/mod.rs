pub mod match_table;
pub mod stats;
