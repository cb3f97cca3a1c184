mod chart;
mod observation;

pub use chart::{CategorySlice, ChartDataset, ChartType, PairPoint, RawContext, YearRow};
pub use observation::{Indicator, Observation};
