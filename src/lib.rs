pub mod aggregate;
pub mod parser;
pub mod period;
pub mod report;
pub mod stats;
