pub mod params;

pub use params::{AnalyzeParams, ApiMessage, ExportParams};
