pub mod analysis;
pub mod catalog;
pub mod findings;
pub mod models;
pub mod render;
pub mod report;
pub mod session;
pub mod viewer;

pub use analysis::{AnalysisPipeline, ImageAnalysis};
pub use catalog::ClassCatalog;
pub use findings::{Finding, SummaryCounts, normalize_detections, summarize};
pub use models::{BoundingBox, DetectorOutput, RawDetection};
pub use session::SessionState;
