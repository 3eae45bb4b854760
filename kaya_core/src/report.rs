//! Analysis Report
//!
//! Read-only report model shown on the results screen. The only dataset is
//! the built-in sample; nothing here is derived from a submitted resume.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================
// SCORES
// ============================================================

/// Colour band for a score out of 10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Success,
    Warning,
    Destructive,
}

impl ScoreBand {
    pub fn for_score(score: f32) -> Self {
        if score >= 8.0 {
            ScoreBand::Success
        } else if score >= 6.0 {
            ScoreBand::Warning
        } else {
            ScoreBand::Destructive
        }
    }
}

/// One evaluator in the (mock) ensemble, 0-100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    pub model: String,
    pub score: u8,
}

impl ModelScore {
    pub fn new(model: &str, score: u8) -> Self {
        Self {
            model: model.to_string(),
            score: score.min(100),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleAnalysis {
    pub scores: Vec<ModelScore>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl EnsembleAnalysis {
    /// Mean of the model scores rounded to one decimal, 0.0 when empty
    pub fn average_score(&self) -> f32 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let total: u32 = self.scores.iter().map(|s| u32::from(s.score)).sum();
        let mean = total as f32 / self.scores.len() as f32;
        (mean * 10.0).round() / 10.0
    }
}

// ============================================================
// IDEAL RESUME
// ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealResume {
    pub summary: String,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
}

// ============================================================
// GAPS & RECOMMENDATIONS
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// Supporting detail attached to a gap. Each gap carries exactly one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum GapDetail {
    Examples(Vec<String>),
    MissingKeywords(Vec<String>),
    Suggestions(Vec<String>),
}

impl GapDetail {
    pub fn heading(&self) -> &'static str {
        match self {
            GapDetail::Examples(_) => "Examples needed:",
            GapDetail::MissingKeywords(_) => "Missing keywords:",
            GapDetail::Suggestions(_) => "Suggestions:",
        }
    }

    pub fn items(&self) -> &[String] {
        match self {
            GapDetail::Examples(items)
            | GapDetail::MissingKeywords(items)
            | GapDetail::Suggestions(items) => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub category: String,
    pub severity: Level,
    pub description: String,
    pub detail: GapDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub priority: Level,
    pub action_items: Vec<String>,
}

// ============================================================
// REPORT
// ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Out of 10
    pub overall_score: f32,
    pub analysis: EnsembleAnalysis,
    pub ideal_resume: IdealResume,
    pub gaps: Vec<Gap>,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::for_score(self.overall_score)
    }

    /// The built-in demo report
    pub fn sample() -> Self {
        Self {
            overall_score: 7.2,
            analysis: EnsembleAnalysis {
                scores: vec![
                    ModelScore::new("Gemini", 78),
                    ModelScore::new("ChatGPT", 73),
                    ModelScore::new("Grok", 75),
                ],
                strengths: strings(&[
                    "Strong technical skills listed",
                    "Clear work experience timeline",
                    "Relevant certifications included",
                ]),
                weaknesses: strings(&[
                    "Missing quantifiable achievements",
                    "Lacks industry-specific keywords",
                    "Education section could be more detailed",
                ]),
            },
            ideal_resume: IdealResume {
                summary: "Senior Software Engineer with 5+ years of experience in cloud \
                          architecture, leading teams of 10+ engineers, and delivering scalable \
                          solutions that serve 10M+ users. Expert in AWS, React, and microservices."
                    .to_string(),
                experience: strings(&[
                    "Led development of core platform features serving 10M+ users",
                    "Architected microservices infrastructure reducing latency by 40%",
                    "Mentored team of 5 junior engineers, improving code quality by 30%",
                ]),
                skills: strings(&[
                    "React",
                    "TypeScript",
                    "AWS",
                    "Docker",
                    "Kubernetes",
                    "Python",
                    "System Design",
                ]),
            },
            gaps: vec![
                Gap {
                    category: "Quantifiable Achievements".to_string(),
                    severity: Level::High,
                    description:
                        "Your resume lacks specific metrics and numbers that demonstrate impact"
                            .to_string(),
                    detail: GapDetail::Examples(strings(&[
                        "Users impacted",
                        "Performance improvements",
                        "Team size managed",
                    ])),
                },
                Gap {
                    category: "Keywords".to_string(),
                    severity: Level::Medium,
                    description: "Missing industry-standard keywords for your target role"
                        .to_string(),
                    detail: GapDetail::MissingKeywords(strings(&[
                        "Cloud Architecture",
                        "CI/CD",
                        "Agile/Scrum",
                        "System Design",
                    ])),
                },
                Gap {
                    category: "Leadership".to_string(),
                    severity: Level::Medium,
                    description: "Limited evidence of leadership experience".to_string(),
                    detail: GapDetail::Suggestions(strings(&[
                        "Mention team leadership",
                        "Cross-functional collaboration",
                        "Mentorship",
                    ])),
                },
            ],
            recommendations: vec![
                Recommendation {
                    title: "Add Quantifiable Metrics".to_string(),
                    description: "Include specific numbers showing your impact (users, \
                                  performance, revenue)"
                        .to_string(),
                    priority: Level::High,
                    action_items: strings(&[
                        "Review each bullet point and add metrics",
                        "Use the STAR method (Situation, Task, Action, Result)",
                        "Focus on business impact, not just tasks",
                    ]),
                },
                Recommendation {
                    title: "Include Missing Keywords".to_string(),
                    description: "Add industry-standard terms to pass ATS screening".to_string(),
                    priority: Level::High,
                    action_items: strings(&[
                        "Research job descriptions for target role",
                        "Naturally incorporate keywords into experience",
                        "Add a technical skills section",
                    ]),
                },
                Recommendation {
                    title: "Highlight Leadership".to_string(),
                    description: "Emphasize team leadership and mentorship experiences"
                        .to_string(),
                    priority: Level::Medium,
                    action_items: strings(&[
                        "Mention team sizes and cross-functional work",
                        "Include mentorship and training activities",
                        "Describe project ownership and decision-making",
                    ]),
                },
            ],
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_average_score() {
        let report = AnalysisReport::sample();
        assert_eq!(report.analysis.average_score(), 75.3);
    }

    #[test]
    fn test_empty_ensemble_average_is_zero() {
        let analysis = EnsembleAnalysis {
            scores: vec![],
            strengths: vec![],
            weaknesses: vec![],
        };
        assert_eq!(analysis.average_score(), 0.0);
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::for_score(8.0), ScoreBand::Success);
        assert_eq!(ScoreBand::for_score(7.2), ScoreBand::Warning);
        assert_eq!(ScoreBand::for_score(6.0), ScoreBand::Warning);
        assert_eq!(ScoreBand::for_score(5.9), ScoreBand::Destructive);
        assert_eq!(AnalysisReport::sample().score_band(), ScoreBand::Warning);
    }

    #[test]
    fn test_sample_gaps_cover_each_detail_shape() {
        let report = AnalysisReport::sample();
        assert_eq!(report.gaps.len(), 3);
        assert!(matches!(report.gaps[0].detail, GapDetail::Examples(_)));
        assert!(matches!(report.gaps[1].detail, GapDetail::MissingKeywords(_)));
        assert!(matches!(report.gaps[2].detail, GapDetail::Suggestions(_)));
        assert_eq!(report.gaps[1].detail.items().len(), 4);
    }

    #[test]
    fn test_model_score_is_capped() {
        assert_eq!(ModelScore::new("X", 140).score, 100);
    }

    #[test]
    fn test_level_display_is_uppercase() {
        assert_eq!(Level::High.to_string(), "HIGH");
        assert!(Level::High > Level::Medium);
    }

    #[test]
    fn test_report_json_shape() {
        let json = serde_json::to_value(AnalysisReport::sample()).unwrap();
        assert_eq!(json["gaps"][1]["severity"], "medium");
        assert_eq!(json["gaps"][1]["detail"]["kind"], "missing_keywords");
        assert_eq!(json["recommendations"][0]["priority"], "high");
    }
}
