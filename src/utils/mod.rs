pub mod file_utils;
pub mod url_utils;

pub use file_utils::export_filename;
pub use url_utils::ensure_scheme;
