pub mod board;
pub mod lint;
pub mod range;
pub mod report;
pub mod resolver;
pub mod score;
pub mod table;

use crate::core::board::WeightBoard;
use crate::core::report::EvaluationReport;
use crate::core::resolver::RawValue;
use crate::core::score::SusceptibilityClass;
use crate::core::table::FactorTable;
use crate::utils::assign::Assignment;
use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, Copy)]
pub struct EvaluationOptions {
    pub default_weight: u8,
    pub fail_at: Option<SusceptibilityClass>,
}

/// Applies measured inputs, then weight overrides, and scores the result.
pub fn evaluate(
    table: &FactorTable,
    inputs: &[Assignment],
    overrides: &[Assignment],
    options: EvaluationOptions,
) -> Result<EvaluationReport> {
    let mut board = WeightBoard::new(table, options.default_weight);

    for input in inputs {
        let index = factor_index(table, &input.key)
            .with_context(|| format!("bad input from {}", input.origin()))?;
        board.set_input(index, RawValue::from_input(&input.value))?;
    }

    for weight in overrides {
        let index = factor_index(table, &weight.key)
            .with_context(|| format!("bad override from {}", weight.origin()))?;
        let value = weight.value.trim().parse::<u8>().with_context(|| {
            format!(
                "invalid weight override {}={} (expected an integer 0-5)",
                weight.key, weight.value
            )
        })?;
        board.set_override(index, value)?;
    }

    let result = score::aggregate(&board.weights());
    Ok(EvaluationReport::from_board(&board, result, options.fail_at))
}

pub fn factor_index(table: &FactorTable, selector: &str) -> Result<usize> {
    table
        .lookup(selector)
        .map(|(index, _)| index)
        .ok_or_else(|| anyhow!("unknown factor '{}' (use an index, key or name)", selector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::WeightSource;

    fn assign(key: &str, value: &str) -> Assignment {
        Assignment {
            key: key.to_string(),
            value: value.to_string(),
            line: 0,
        }
    }

    fn options() -> EvaluationOptions {
        EvaluationOptions {
            default_weight: 3,
            fail_at: None,
        }
    }

    #[test]
    fn untouched_form_uses_default_weights() {
        let report = evaluate(FactorTable::landslide(), &[], &[], options()).unwrap();
        assert_eq!(report.weights, vec![3; 10]);
        assert_eq!(report.result.score, 60.0);
        assert_eq!(report.result.class, SusceptibilityClass::Moderate);
    }

    #[test]
    fn evaluates_a_full_site() {
        let inputs = [
            assign("slope", "32"),
            assign("rainfall", "85"),
            assign("stream_distance", "40"),
            assign("curvature", "-0.8"),
            assign("aspect", "250"),
            assign("elevation", "1200"),
            assign("twi", "13"),
            assign("land_use", "bare or sparse vegetation"),
            assign("Rock Types", "Embrechites"),
            assign("9", "Gneiss-Embrechite Gneiss-migmatitic"),
        ];
        let report = evaluate(FactorTable::landslide(), &inputs, &[], options()).unwrap();
        assert_eq!(report.weights, vec![4, 5, 5, 5, 5, 5, 5, 5, 5, 5]);
        assert_eq!(report.result.class, SusceptibilityClass::VeryHigh);
        assert!(
            report
                .factors
                .iter()
                .all(|row| row.source == WeightSource::Derived)
        );
    }

    #[test]
    fn overrides_apply_after_inputs() {
        let report = evaluate(
            FactorTable::landslide(),
            &[assign("slope", "5")],
            &[assign("slope", "5")],
            options(),
        )
        .unwrap();
        assert_eq!(report.weights[0], 5);
        assert_eq!(report.factors[0].source, WeightSource::Override);
    }

    #[test]
    fn all_zero_overrides_are_degenerate() {
        let overrides: Vec<Assignment> = (0..10).map(|i| assign(&i.to_string(), "0")).collect();
        let report = evaluate(FactorTable::landslide(), &[], &overrides, options()).unwrap();
        assert!(report.result.degenerate);
        assert_eq!(report.result.class, SusceptibilityClass::VeryLow);
    }

    #[test]
    fn rejects_unknown_factor_and_bad_override() {
        assert!(evaluate(FactorTable::landslide(), &[assign("soil", "1")], &[], options()).is_err());
        assert!(
            evaluate(FactorTable::landslide(), &[], &[assign("slope", "high")], options()).is_err()
        );
        assert!(evaluate(FactorTable::landslide(), &[], &[assign("slope", "9")], options()).is_err());
    }

    #[test]
    fn fail_at_marks_exit() {
        let with_fail_at = |fail_at| EvaluationOptions {
            default_weight: 3,
            fail_at: Some(fail_at),
        };

        let report = evaluate(
            FactorTable::landslide(),
            &[],
            &[],
            with_fail_at(SusceptibilityClass::VeryHigh),
        )
        .unwrap();
        assert!(report.exit.ok);

        let report = evaluate(
            FactorTable::landslide(),
            &[],
            &[],
            with_fail_at(SusceptibilityClass::VeryLow),
        )
        .unwrap();
        assert!(!report.exit.ok);
    }
}
