pub mod export_service;
pub mod psi_service;

pub use export_service::{export_markdown, export_pdf, export_toon};
pub use psi_service::{fallback_report, fetch_pagespeed_report, normalize_lighthouse};
