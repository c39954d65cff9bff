pub mod resume;

pub use resume::{AnalysisReport, ExtractedResume, ResumeUpload, ScoreBar};
