//! Comparison reports
//!
//! A [`ComparisonReport`] is an immutable record of one sweep: one
//! [`ComparisonOutcome`] per value in capture order, the tallies, and any
//! diagnostics. Rendering and filtering never mutate it.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use regkit_format::value_line;
use regkit_value::Diagnostic;
use serde::Serialize;

/// Classification of one compared value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Trimmed literals are identical
    Match,
    /// Value exists with a different literal
    Different,
    /// Value absent from the store
    Missing,
    /// Store read failed for this value
    Error,
    /// Store cannot be queried on this host
    NotApplicable,
}

impl Display for OutcomeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Match => "match",
            Self::Different => "different",
            Self::Missing => "missing",
            Self::Error => "error",
            Self::NotApplicable => "not applicable",
        })
    }
}

/// Result of comparing one `(section, name)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonOutcome {
    /// Section path
    pub section: String,
    /// Value name
    pub value_name: String,
    /// Classification
    pub kind: OutcomeKind,
    /// File-side display text
    pub file_display: String,
    /// Live-side display text
    pub live_display: String,
}

/// Subset of outcomes to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFilter {
    /// Every outcome
    #[default]
    All,
    /// Only [`OutcomeKind::Match`]
    Matches,
    /// Only [`OutcomeKind::Different`]
    Differences,
    /// Only [`OutcomeKind::Missing`]
    Missing,
}

impl ReportFilter {
    /// Accepted spellings, in display order
    pub const NAMES: [&'static str; 4] = ["all", "matches", "differences", "missing"];

    /// Whether an outcome of `kind` passes this filter
    #[inline]
    #[must_use]
    pub fn accepts(self, kind: OutcomeKind) -> bool {
        match self {
            Self::All => true,
            Self::Matches => kind == OutcomeKind::Match,
            Self::Differences => kind == OutcomeKind::Different,
            Self::Missing => kind == OutcomeKind::Missing,
        }
    }
}

impl FromStr for ReportFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "matches" => Ok(Self::Matches),
            "differences" => Ok(Self::Differences),
            "missing" => Ok(Self::Missing),
            other => Err(format!(
                "unknown filter '{other}', expected one of: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// Counts per outcome kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Values compared
    pub total: usize,
    /// Matches
    pub matches: usize,
    /// Differences
    pub differences: usize,
    /// Missing from the store
    pub missing: usize,
    /// Read failures
    pub errors: usize,
    /// Not comparable on this host
    pub not_applicable: usize,
}

impl ReportSummary {
    /// Count one outcome
    pub fn record(&mut self, kind: OutcomeKind) {
        self.total += 1;
        match kind {
            OutcomeKind::Match => self.matches += 1,
            OutcomeKind::Different => self.differences += 1,
            OutcomeKind::Missing => self.missing += 1,
            OutcomeKind::Error => self.errors += 1,
            OutcomeKind::NotApplicable => self.not_applicable += 1,
        }
    }

    /// Whether every compared value matched
    #[inline]
    #[must_use]
    pub fn all_match(&self) -> bool {
        self.matches == self.total
    }
}

impl Display for ReportSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total keys compared: {}", self.total)?;
        writeln!(f, "  Matches: {}", self.matches)?;
        writeln!(f, "  Differences: {}", self.differences)?;
        writeln!(f, "  Missing from system: {}", self.missing)?;
        write!(f, "  Errors: {}", self.errors)?;
        if self.not_applicable > 0 {
            write!(f, "\n  Not applicable: {}", self.not_applicable)?;
        }
        Ok(())
    }
}

/// File-side and live-side text columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedColumns {
    /// Values as declared in the file
    pub file: String,
    /// Values as read from the store
    pub live: String,
}

/// Outcome list with tallies and diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    /// Outcomes in capture order
    pub outcomes: Vec<ComparisonOutcome>,
    /// Counts per kind
    pub summary: ReportSummary,
    /// Non-fatal findings
    pub diagnostics: Vec<Diagnostic>,
}

impl FromIterator<ComparisonOutcome> for ComparisonReport {
    fn from_iter<I: IntoIterator<Item = ComparisonOutcome>>(iter: I) -> Self {
        let mut report = Self::default();
        for outcome in iter {
            report.push(outcome);
        }
        report
    }
}

impl ComparisonReport {
    /// Append an outcome and count it
    pub fn push(&mut self, outcome: ComparisonOutcome) {
        self.summary.record(outcome.kind);
        self.outcomes.push(outcome);
    }

    /// Outcomes passing `filter`, in capture order
    pub fn filtered(&self, filter: ReportFilter) -> impl Iterator<Item = &ComparisonOutcome> {
        self.outcomes
            .iter()
            .filter(move |outcome| filter.accepts(outcome.kind))
    }

    /// Render both columns, grouping consecutive outcomes under `[section]`
    #[must_use]
    pub fn render(&self, filter: ReportFilter) -> RenderedColumns {
        let mut file = Vec::new();
        let mut live = Vec::new();
        let mut current: Option<&str> = None;

        for outcome in self.filtered(filter) {
            if current != Some(outcome.section.as_str()) {
                if current.is_some() {
                    file.push(String::new());
                    live.push(String::new());
                }
                file.push(format!("[{}]", outcome.section));
                live.push(format!("[{}]", outcome.section));
                current = Some(outcome.section.as_str());
            }
            file.push(format!("  {}", value_line(&outcome.value_name, &outcome.file_display)));
            live.push(format!("  {}", value_line(&outcome.value_name, &outcome.live_display)));
        }

        RenderedColumns {
            file: file.join("\n"),
            live: live.join("\n"),
        }
    }

    /// Report as pretty-printed JSON
    ///
    /// # Errors
    /// Returns the serializer error, which cannot occur for well-formed reports
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outcome(section: &str, name: &str, kind: OutcomeKind) -> ComparisonOutcome {
        ComparisonOutcome {
            section: section.to_string(),
            value_name: name.to_string(),
            kind,
            file_display: format!("f-{name}"),
            live_display: format!("l-{name}"),
        }
    }

    fn sample() -> ComparisonReport {
        [
            outcome("HKEY_USERS\\A", "one", OutcomeKind::Match),
            outcome("HKEY_USERS\\A", "two", OutcomeKind::Missing),
            outcome("HKEY_USERS\\B", "three", OutcomeKind::Different),
            outcome("HKEY_USERS\\B", "four", OutcomeKind::Error),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn summary_counts_each_kind() {
        let report = sample();
        assert_eq!(
            report.summary,
            ReportSummary {
                total: 4,
                matches: 1,
                differences: 1,
                missing: 1,
                errors: 1,
                not_applicable: 0,
            }
        );
        assert!(!report.summary.all_match());
    }

    #[test]
    fn render_all_groups_sections() {
        let columns = sample().render(ReportFilter::All);
        assert_eq!(
            columns.file,
            "[HKEY_USERS\\A]\n  \"one\"=f-one\n  \"two\"=f-two\n\n\
             [HKEY_USERS\\B]\n  \"three\"=f-three\n  \"four\"=f-four"
        );
        assert!(columns.live.starts_with("[HKEY_USERS\\A]\n  \"one\"=l-one"));
    }

    #[test]
    fn render_filtered_skips_empty_sections() {
        let columns = sample().render(ReportFilter::Differences);
        assert_eq!(columns.file, "[HKEY_USERS\\B]\n  \"three\"=f-three");
        assert_eq!(sample().render(ReportFilter::Matches).live, "[HKEY_USERS\\A]\n  \"one\"=l-one");
    }

    #[test]
    fn render_default_value_as_bare_at() {
        let report: ComparisonReport = [
            outcome("HKEY_USERS\\A", "", OutcomeKind::Match),
            outcome("HKEY_USERS\\A", "@", OutcomeKind::Match),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            report.render(ReportFilter::All).file,
            "[HKEY_USERS\\A]\n  @=f-\n  \"@\"=f-@"
        );
    }

    #[test]
    fn filter_parsing() {
        assert_eq!("Missing".parse::<ReportFilter>(), Ok(ReportFilter::Missing));
        assert_eq!("all".parse::<ReportFilter>(), Ok(ReportFilter::All));
        assert!("errors".parse::<ReportFilter>().is_err());
    }

    #[test]
    fn summary_display() {
        let text = sample().summary.to_string();
        assert!(text.starts_with("Total keys compared: 4\n"));
        assert!(text.contains("Missing from system: 1"));
        assert!(!text.contains("Not applicable"));
    }

    #[test]
    fn json_uses_snake_case_kinds() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"kind\": \"match\""));
        let report: ComparisonReport =
            std::iter::once(outcome("HKEY_USERS\\A", "x", OutcomeKind::NotApplicable)).collect();
        assert!(report.to_json().unwrap().contains("\"not_applicable\""));
    }
}
