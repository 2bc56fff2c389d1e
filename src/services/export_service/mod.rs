pub mod markdown;
pub mod pdf;
pub mod toon;

pub use markdown::export_markdown;
pub use pdf::export_pdf;
pub use toon::export_toon;
