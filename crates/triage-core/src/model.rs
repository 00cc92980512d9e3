use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    IncidentResponse,
    ThreatIntelSummary,
    ComplianceMapping,
    PhishingTriage,
    MalwareAnalysis,
}

impl Scenario {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "incident_response" => Some(Scenario::IncidentResponse),
            "threat_intel_summary" => Some(Scenario::ThreatIntelSummary),
            "compliance_mapping" => Some(Scenario::ComplianceMapping),
            "phishing_triage" => Some(Scenario::PhishingTriage),
            "malware_analysis" => Some(Scenario::MalwareAnalysis),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::IncidentResponse => "incident_response",
            Scenario::ThreatIntelSummary => "threat_intel_summary",
            Scenario::ComplianceMapping => "compliance_mapping",
            Scenario::PhishingTriage => "phishing_triage",
            Scenario::MalwareAnalysis => "malware_analysis",
        }
    }
}

/// Prompt/response length class. Canonical comparison order is
/// Short < Medium < Long; the legacy extended bins and any label we have
/// never seen are preserved verbatim and rank after the canonical three.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum LengthBin {
    ExtraShort,
    Short,
    Medium,
    Long,
    ExtraLong,
    Other(String),
}

impl LengthBin {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "xs" | "extra_short" | "extra-short" => LengthBin::ExtraShort,
            "s" | "short" => LengthBin::Short,
            "m" | "medium" => LengthBin::Medium,
            "l" | "long" => LengthBin::Long,
            "xl" | "extra_long" | "extra-long" => LengthBin::ExtraLong,
            _ => LengthBin::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LengthBin::ExtraShort => "extra_short",
            LengthBin::Short => "short",
            LengthBin::Medium => "medium",
            LengthBin::Long => "long",
            LengthBin::ExtraLong => "extra_long",
            LengthBin::Other(s) => s,
        }
    }

    /// Short display code for tables.
    pub fn code(&self) -> &str {
        match self {
            LengthBin::ExtraShort => "XS",
            LengthBin::Short => "S",
            LengthBin::Medium => "M",
            LengthBin::Long => "L",
            LengthBin::ExtraLong => "XL",
            LengthBin::Other(s) => s,
        }
    }

    /// Position in the canonical S < M < L order. `None` for the legacy
    /// extended bins and unknown labels, which sort after the canonical
    /// three in first-seen order.
    pub fn canonical_rank(&self) -> Option<u8> {
        match self {
            LengthBin::Short => Some(0),
            LengthBin::Medium => Some(1),
            LengthBin::Long => Some(2),
            _ => None,
        }
    }

    /// A bin label that names no population at all (empty or whitespace).
    pub fn is_unlabeled(&self) -> bool {
        matches!(self, LengthBin::Other(s) if s.trim().is_empty())
    }
}

impl From<String> for LengthBin {
    fn from(s: String) -> Self {
        LengthBin::parse(&s)
    }
}

impl From<LengthBin> for String {
    fn from(b: LengthBin) -> Self {
        b.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub scenario: Scenario,
    pub length_bin: LengthBin,
    /// Back-reference to the base prompt this one was generated from.
    /// Absent on base prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_of: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Prompt {
    pub fn is_base(&self) -> bool {
        self.variant_of.is_none()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    Running,
    Succeeded,
    Failed,
}

impl RunStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "queued" => RunStatus::Queued,
            "running" => RunStatus::Running,
            "succeeded" => RunStatus::Succeeded,
            "failed" => RunStatus::Failed,
            _ => RunStatus::Failed, // Default fallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::Running => "running",
            RunStatus::Succeeded => "succeeded",
            RunStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Economics {
    pub aud_cost: f64,
    /// Upstream economics fields (unit prices, latency) pass through
    /// untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Scores {
    pub composite: f64,
    /// Per-dimension scores, opaque to the core.
    #[serde(flatten)]
    pub dimensions: serde_json::Map<String, serde_json::Value>,
}

/// Embedded reference to the prompt that produced a run, carrying the
/// prompt's own token length when the backend provided it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
}

/// One benchmark execution. Created by the external execution pipeline and
/// immutable here: the core only reads and aggregates run records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub prompt_id: String,
    pub model: String,
    pub status: RunStatus,
    /// Copied from the prompt at execution time, not derived, because the
    /// prompt may change afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_length_bin: Option<LengthBin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptRef>,
    #[serde(default)]
    pub tokens: TokenUsage,
    #[serde(default)]
    pub economics: Economics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Scores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiment: Option<String>,
    pub scenario: Scenario,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_parse_accepts_codes_and_names() {
        assert_eq!(LengthBin::parse("S"), LengthBin::Short);
        assert_eq!(LengthBin::parse("medium"), LengthBin::Medium);
        assert_eq!(LengthBin::parse("XL"), LengthBin::ExtraLong);
        assert_eq!(LengthBin::parse("extra-short"), LengthBin::ExtraShort);
        assert_eq!(
            LengthBin::parse("verbose"),
            LengthBin::Other("verbose".to_string())
        );
    }

    #[test]
    fn bin_roundtrips_unknown_labels_verbatim() {
        let bin = LengthBin::parse("verbose");
        let json = serde_json::to_string(&bin).unwrap();
        assert_eq!(json, "\"verbose\"");
        let back: LengthBin = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bin);
    }

    #[test]
    fn canonical_rank_covers_only_s_m_l() {
        assert_eq!(LengthBin::Short.canonical_rank(), Some(0));
        assert_eq!(LengthBin::Medium.canonical_rank(), Some(1));
        assert_eq!(LengthBin::Long.canonical_rank(), Some(2));
        assert_eq!(LengthBin::ExtraShort.canonical_rank(), None);
        assert_eq!(LengthBin::ExtraLong.canonical_rank(), None);
        assert_eq!(LengthBin::Other("huge".into()).canonical_rank(), None);
    }

    #[test]
    fn unlabeled_bins_are_detected() {
        assert!(LengthBin::Other("".into()).is_unlabeled());
        assert!(LengthBin::Other("  ".into()).is_unlabeled());
        assert!(!LengthBin::Short.is_unlabeled());
    }

    #[test]
    fn run_status_parse_is_lenient() {
        assert_eq!(RunStatus::parse("succeeded"), RunStatus::Succeeded);
        assert_eq!(RunStatus::parse("bogus"), RunStatus::Failed);
    }
}
