// Chart data model: snapshots of labelled metric points per series

mod granularity;
mod metric;
mod snapshot;

pub use granularity::Granularity;
pub use metric::{MetricKind, MetricPoint, SeriesMetric};
pub use snapshot::{TimeSeriesSnapshot, TimestampError};
