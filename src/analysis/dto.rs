use serde::Serialize;

/// Metadata for a picked resume file. The picker itself lives on the UI
/// side; analysis only needs what it reported.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeFile {
    pub name: String,
    pub size: Option<u64>,
    pub mime: Option<String>,
    pub uri: String,
}

impl ResumeFile {
    /// Human-readable size: two decimals of megabytes from 1 MB up, whole
    /// kilobytes below that. `None` when the picker reported no size.
    pub fn pretty_size(&self) -> Option<String> {
        let bytes = self.size?;
        let kb = bytes as f64 / 1024.0;
        let mb = kb / 1024.0;
        if mb >= 1.0 {
            Some(format!("{:.2} MB", mb))
        } else {
            Some(format!("{} KB", kb.round() as u64))
        }
    }
}

/// Severity tag on a suggested fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FixLevel {
    High,
    Medium,
    Low,
}

/// One suggested improvement in the results list.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeFix {
    pub title: String,
    pub note: String,
    pub level: FixLevel,
}

/// Short label/value pair summarizing one checked dimension.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryChip {
    pub label: String,
    pub value: String,
}

/// Tone bucket for presenting the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreTone {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreLabel {
    pub text: &'static str,
    pub tone: ScoreTone,
}

/// Outcome of an analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Overall score out of 100.
    pub score: u8,
    pub summary: Vec<SummaryChip>,
    pub fixes: Vec<ResumeFix>,
    /// Name of the analyzed file, when one was supplied.
    pub analyzed_file: Option<String>,
}

impl AnalysisReport {
    pub fn score_label(&self) -> ScoreLabel {
        if self.score >= 85 {
            ScoreLabel {
                text: "Excellent",
                tone: ScoreTone::Success,
            }
        } else if self.score >= 70 {
            ScoreLabel {
                text: "Good",
                tone: ScoreTone::Warning,
            }
        } else {
            ScoreLabel {
                text: "Needs work",
                tone: ScoreTone::Danger,
            }
        }
    }

    /// Score clamped to 0..=100 for bar-style consumers.
    pub fn clamped_score(&self) -> u8 {
        self.score.min(100)
    }

    pub fn headline(&self) -> String {
        match &self.analyzed_file {
            Some(name) => format!("Analyzed: {}", name),
            None => "Your resume analysis is ready.".to_string(),
        }
    }
}

/// Progress notification from a running analysis. `step` indexes into
/// [`super::ANALYSIS_STEPS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisProgress {
    pub step: usize,
    pub percent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_of(size: Option<u64>) -> ResumeFile {
        ResumeFile {
            name: "resume.pdf".into(),
            size,
            mime: Some("application/pdf".into()),
            uri: "file:///tmp/resume.pdf".into(),
        }
    }

    #[test]
    fn pretty_size_switches_units_at_one_megabyte() {
        assert_eq!(file_of(Some(1_048_576)).pretty_size().as_deref(), Some("1.00 MB"));
        assert_eq!(file_of(Some(2_458_000)).pretty_size().as_deref(), Some("2.34 MB"));
        assert_eq!(file_of(Some(491_520)).pretty_size().as_deref(), Some("480 KB"));
        assert_eq!(file_of(Some(0)).pretty_size().as_deref(), Some("0 KB"));
        assert_eq!(file_of(None).pretty_size(), None);
    }

    #[test]
    fn score_label_bands_at_70_and_85() {
        let report = |score| AnalysisReport {
            score,
            summary: Vec::new(),
            fixes: Vec::new(),
            analyzed_file: None,
        };

        assert_eq!(report(85).score_label().text, "Excellent");
        assert_eq!(report(85).score_label().tone, ScoreTone::Success);
        assert_eq!(report(84).score_label().text, "Good");
        assert_eq!(report(70).score_label().tone, ScoreTone::Warning);
        assert_eq!(report(69).score_label().text, "Needs work");
        assert_eq!(report(0).score_label().tone, ScoreTone::Danger);
    }

    #[test]
    fn headline_names_the_file_when_present() {
        let mut report = AnalysisReport {
            score: 78,
            summary: Vec::new(),
            fixes: Vec::new(),
            analyzed_file: Some("resume.pdf".into()),
        };
        assert_eq!(report.headline(), "Analyzed: resume.pdf");

        report.analyzed_file = None;
        assert_eq!(report.headline(), "Your resume analysis is ready.");
    }
}
