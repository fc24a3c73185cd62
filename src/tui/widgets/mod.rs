pub mod stat_bars;

pub use stat_bars::StatBars;
