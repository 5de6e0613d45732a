pub mod aggregator;
pub mod period;
pub mod record;
pub mod series;
pub mod statistics;
pub mod timestamp;
