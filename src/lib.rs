pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod analysis;

pub use config::{ClientConfig, Config};
pub use error::{Error, Result};
pub use github::{GitHubClient, ProfileSource};
pub use analysis::{analyze_profile, generate_analytics, AnalysisPipeline};
pub use models::{AnalyticsReport, ProfileAnalysis};
