//! PDF rendering for competitor analyses.

mod pdf;

pub use pdf::render_analysis_pdf;
