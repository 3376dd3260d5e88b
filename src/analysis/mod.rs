mod dto;
mod services;

pub use dto::{
    AnalysisProgress, AnalysisReport, FixLevel, ResumeFile, ResumeFix, ScoreLabel, ScoreTone,
    SummaryChip,
};
pub use services::{sample_report, AnalysisStep, Analyzer, ANALYSIS_STEPS};
