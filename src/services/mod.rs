pub mod extract;
pub mod progress;
pub mod result_sink;

pub use extract::{extract_identifier, extract_score};
pub use progress::ProgressEstimator;
pub use result_sink::{CsvResultSink, OutputPaths, ResultSink};
