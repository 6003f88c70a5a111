use crate::core::board::{WeightBoard, WeightSource};
use crate::core::score::{CompositeResult, SusceptibilityClass};
use crate::core::table::FactorTable;
use colored::{ColoredString, Colorize};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }

    fn colored(self) -> String {
        match self {
            Self::Error => self.as_str().red().bold().to_string(),
            Self::Warning => self.as_str().yellow().bold().to_string(),
            Self::Info => self.as_str().blue().bold().to_string(),
        }
    }
}

/// A table authoring finding.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub hint: String,
}

impl Issue {
    pub fn new(severity: Severity, title: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            factor: None,
            label: None,
            hint: hint.into(),
        }
    }

    pub fn with_factor(mut self, factor: impl Into<String>) -> Self {
        self.factor = Some(factor.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

pub fn print_issues(issues: &[Issue]) {
    if issues.is_empty() {
        println!("factor table OK");
        return;
    }

    for severity in [Severity::Error, Severity::Warning, Severity::Info] {
        let grouped: Vec<&Issue> = issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .collect();

        if grouped.is_empty() {
            continue;
        }

        println!("{} ({})", severity.colored(), grouped.len());
        for issue in grouped {
            let location = match (&issue.factor, &issue.label) {
                (Some(factor), Some(label)) => format!(" - {} \"{}\"", factor, label),
                (Some(factor), None) => format!(" - {}", factor),
                _ => String::new(),
            };

            println!("[{}] {}{}", issue.severity.as_str(), issue.title, location);
            println!("-> hint: {}", issue.hint);
        }
        println!();
    }
}

pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(|issue| issue.severity == Severity::Error)
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorRow {
    pub index: usize,
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub weight: u8,
    pub source: WeightSource,
}

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub factors: Vec<FactorRow>,
    pub weights: Vec<u8>,
    #[serde(flatten)]
    pub result: CompositeResult,
    #[serde(skip)]
    pub exit: ExitStatus,
}

impl EvaluationReport {
    pub fn from_board(
        board: &WeightBoard<'_>,
        result: CompositeResult,
        fail_at: Option<SusceptibilityClass>,
    ) -> Self {
        let factors = board
            .table()
            .factors()
            .iter()
            .zip(board.states())
            .enumerate()
            .map(|(index, (factor, state))| FactorRow {
                index,
                key: factor.key.clone(),
                name: factor.name.clone(),
                input: state.input.as_ref().map(ToString::to_string),
                weight: state.weight,
                source: state.source,
            })
            .collect();

        Self {
            factors,
            weights: board.weights(),
            result,
            exit: evaluate_exit(result.class, fail_at),
        }
    }
}

pub fn evaluate_exit(class: SusceptibilityClass, fail_at: Option<SusceptibilityClass>) -> ExitStatus {
    match fail_at {
        Some(threshold) if class >= threshold => ExitStatus {
            ok: false,
            reason: Some(format!("class {} is at or above fail_at {}", class, threshold)),
        },
        _ => ExitStatus {
            ok: true,
            reason: None,
        },
    }
}

/// Display colours used by the assessment form for each class.
pub fn paint_class(class: SusceptibilityClass) -> ColoredString {
    let label = class.as_str();
    match class {
        SusceptibilityClass::VeryHigh => label.truecolor(211, 47, 47).bold(),
        SusceptibilityClass::High => label.truecolor(255, 140, 0).bold(),
        SusceptibilityClass::Moderate => label.truecolor(255, 215, 0).bold(),
        SusceptibilityClass::Low => label.truecolor(0, 128, 0).bold(),
        SusceptibilityClass::VeryLow => label.truecolor(0, 100, 0).bold(),
    }
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

pub fn print_composite(result: &CompositeResult) {
    println!(
        "Susceptibility Score: {}/100 ({})",
        format_score(result.score),
        paint_class(result.class)
    );
    if result.degenerate {
        println!("note: every weight was zero; score reported as 0");
    }
}

pub fn print_human(report: &EvaluationReport) {
    for row in &report.factors {
        let source = match row.source {
            WeightSource::Default => "default".dimmed().to_string(),
            WeightSource::Derived => "derived".to_string(),
            WeightSource::Override => "override".cyan().to_string(),
        };
        let input = row.input.as_deref().unwrap_or("-");
        println!(
            "{:>2}. {:<34} {:<28} w={} ({})",
            row.index, row.name, input, row.weight, source
        );
    }

    println!();
    print_composite(&report.result);

    if let Some(reason) = &report.exit.reason {
        println!();
        println!("exit: FAILED ({})", reason);
    }
}

pub fn print_factor_table(table: &FactorTable) {
    for (index, factor) in table.factors().iter().enumerate() {
        let kind = if factor.categorical {
            "category"
        } else {
            "numeric"
        };
        println!(
            "{:>2}. {} [{}] ({})",
            index,
            factor.name.bold(),
            factor.key,
            kind
        );
        println!("    mapping: {}", factor.mapping_hint());
    }
}
