// Résumé text extraction: PDF → text, contact details, section segmentation.
// Everything here degrades to sentinel values instead of failing.

pub mod contact;
pub mod pdf;
pub mod sections;

/// Sentinel for any field the heuristics could not locate.
pub const NOT_FOUND: &str = "Not found";

pub use contact::extract_contact_info;
pub use pdf::{PdfExtractor, TextExtractor};
pub use sections::{extract_sections, segment_by_headers};
