pub mod analytics;
pub mod pipeline;

pub use analytics::generate_analytics;
pub use pipeline::{analyze_profile, run_analysis, AnalysisPipeline};
