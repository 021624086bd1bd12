pub mod cleanup;
pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod report;
pub mod scanner;
pub mod storage;

pub use config::AppConfig;
pub use engine::{ComparisonResult, Doctor, RunSummary};
pub use error::Error;
pub use normalize::{NormalizedPath, SkipReason};
pub use report::{PlainReporter, Reporter, SilentReporter};
