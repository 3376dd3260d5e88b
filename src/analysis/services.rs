use std::time::Duration;

use tracing::{info, instrument};

use crate::analysis::dto::{
    AnalysisProgress, AnalysisReport, FixLevel, ResumeFile, ResumeFix, SummaryChip,
};

/// One stage of the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisStep {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// The fixed pipeline, in execution order.
pub const ANALYSIS_STEPS: [AnalysisStep; 4] = [
    AnalysisStep {
        key: "ats",
        label: "ATS Scan",
        description: "Checking structure, sections & parsing…",
    },
    AnalysisStep {
        key: "grammar",
        label: "Grammar",
        description: "Fixing clarity, tense & errors…",
    },
    AnalysisStep {
        key: "keywords",
        label: "Keywords",
        description: "Matching role keywords & impact…",
    },
    AnalysisStep {
        key: "format",
        label: "Formatting",
        description: "Consistency, spacing & readability…",
    },
];

const DEFAULT_STEP_MILLIS: [u64; 4] = [1500, 1700, 1600, 1400];

/// Walks the fixed steps on a timer and hands back the canned report. There
/// is no real parsing or scoring behind it yet.
#[derive(Debug, Clone)]
pub struct Analyzer {
    step_durations: [Duration; 4],
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            step_durations: DEFAULT_STEP_MILLIS.map(Duration::from_millis),
        }
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the per-step pacing.
    pub fn with_step_durations(step_durations: [Duration; 4]) -> Self {
        Self { step_durations }
    }

    /// Run the pipeline, reporting each step transition and the overall
    /// percent through `on_progress`, then produce the report.
    #[instrument(skip_all)]
    pub async fn run(
        &self,
        file: Option<&ResumeFile>,
        mut on_progress: impl FnMut(AnalysisProgress),
    ) -> AnalysisReport {
        match file {
            Some(file) => info!(file = %file.name, "analysis started"),
            None => info!("analysis started"),
        }

        let total: Duration = self.step_durations.iter().sum();
        let mut elapsed = Duration::ZERO;

        for (index, duration) in self.step_durations.iter().enumerate() {
            on_progress(AnalysisProgress {
                step: index,
                percent: percent_of(elapsed, total),
            });
            info!(step = ANALYSIS_STEPS[index].key, "analysis step started");
            tokio::time::sleep(*duration).await;
            elapsed += *duration;
        }
        on_progress(AnalysisProgress {
            step: ANALYSIS_STEPS.len() - 1,
            percent: 100,
        });

        info!("analysis finished");
        sample_report(file)
    }
}

fn percent_of(elapsed: Duration, total: Duration) -> u8 {
    if total.is_zero() {
        return 100;
    }
    ((elapsed.as_millis() * 100) / total.as_millis()) as u8
}

/// The canned results the app ships while scoring stays client-side only.
pub fn sample_report(file: Option<&ResumeFile>) -> AnalysisReport {
    AnalysisReport {
        score: 78,
        summary: vec![
            SummaryChip {
                label: "Grammar".into(),
                value: "Good".into(),
            },
            SummaryChip {
                label: "Keywords".into(),
                value: "Medium".into(),
            },
            SummaryChip {
                label: "Formatting".into(),
                value: "Strong".into(),
            },
        ],
        fixes: vec![
            ResumeFix {
                title: "Add stronger section headings".into(),
                note: "Use: Summary, Experience, Projects, Skills.".into(),
                level: FixLevel::High,
            },
            ResumeFix {
                title: "Add measurable impact".into(),
                note: "Include numbers: +20%, 10k users, ₹5L saved.".into(),
                level: FixLevel::High,
            },
            ResumeFix {
                title: "Improve keyword match".into(),
                note: "Add role keywords in skills + bullets naturally.".into(),
                level: FixLevel::Medium,
            },
            ResumeFix {
                title: "Shorten long bullet points".into(),
                note: "Aim 1–2 lines per bullet for readability.".into(),
                level: FixLevel::Low,
            },
        ],
        analyzed_file: file.map(|f| f.name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::dto::ScoreTone;

    #[tokio::test(start_paused = true)]
    async fn walks_every_step_in_order_and_finishes_at_100() {
        let analyzer = Analyzer::new();
        let mut seen = Vec::new();
        let report = analyzer.run(None, |p| seen.push(p)).await;

        assert_eq!(seen.len(), ANALYSIS_STEPS.len() + 1);
        assert_eq!(seen[0], AnalysisProgress { step: 0, percent: 0 });
        let steps: Vec<usize> = seen.iter().map(|p| p.step).collect();
        assert_eq!(steps, vec![0, 1, 2, 3, 3]);
        assert!(seen.windows(2).all(|w| w[0].percent <= w[1].percent));
        assert_eq!(seen.last().expect("progress seen").percent, 100);
        assert_eq!(report.score, 78);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_pacing_is_respected_in_percentages() {
        let analyzer = Analyzer::with_step_durations([
            Duration::from_millis(10),
            Duration::from_millis(10),
            Duration::from_millis(10),
            Duration::from_millis(10),
        ]);
        let mut percents = Vec::new();
        analyzer.run(None, |p| percents.push(p.percent)).await;
        assert_eq!(percents, vec![0, 25, 50, 75, 100]);
    }

    #[tokio::test(start_paused = true)]
    async fn report_carries_the_analyzed_file_name() {
        let file = ResumeFile {
            name: "resume.pdf".into(),
            size: Some(1024),
            mime: Some("application/pdf".into()),
            uri: "file:///tmp/resume.pdf".into(),
        };
        let analyzer = Analyzer::with_step_durations([Duration::ZERO; 4]);
        let report = analyzer.run(Some(&file), |_| {}).await;
        assert_eq!(report.analyzed_file.as_deref(), Some("resume.pdf"));
    }

    #[test]
    fn sample_report_matches_the_shipped_data() {
        let report = sample_report(None);
        assert_eq!(report.score, 78);
        assert_eq!(report.score_label().text, "Good");
        assert_eq!(report.score_label().tone, ScoreTone::Warning);
        assert_eq!(report.summary.len(), 3);
        assert_eq!(report.fixes.len(), 4);
        assert_eq!(report.fixes[0].level, FixLevel::High);
        assert_eq!(report.fixes[3].level, FixLevel::Low);
        assert!(report.analyzed_file.is_none());
    }

    #[test]
    fn steps_describe_the_four_checks() {
        let keys: Vec<&str> = ANALYSIS_STEPS.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["ats", "grammar", "keywords", "format"]);
    }
}
