use crate::core::range::RangeSpec;
use crate::core::report::{Issue, Severity};
use crate::core::score::MAX_WEIGHT;
use crate::core::table::{Factor, FactorTable};
use std::collections::HashSet;

/// Reports authoring defects in a factor table. Resolution never calls this;
/// a defective subclass simply stays unresolvable at runtime.
pub fn check_table(table: &FactorTable) -> Vec<Issue> {
    let mut issues = Vec::new();

    if table.is_empty() {
        issues.push(Issue::new(
            Severity::Error,
            "factor table is empty",
            "define at least one [[factors]] entry or remove the list to use the built-in table",
        ));
        return issues;
    }

    let mut seen_keys = HashSet::new();
    for factor in table.factors() {
        if !seen_keys.insert(factor.key.to_lowercase()) {
            issues.push(
                Issue::new(
                    Severity::Error,
                    format!("duplicate factor key {}", factor.key),
                    "give every factor a unique key",
                )
                .with_factor(&factor.key),
            );
        }
        issues.extend(check_factor(factor));
    }

    issues
}

fn check_factor(factor: &Factor) -> Vec<Issue> {
    let mut issues = Vec::new();

    if factor.subclasses.is_empty() {
        issues.push(
            Issue::new(
                Severity::Error,
                "factor has no subclasses",
                "every input for this factor will fall back to the default weight",
            )
            .with_factor(&factor.key),
        );
        return issues;
    }

    let mut intervals: Vec<(&str, f64, f64)> = Vec::new();
    for subclass in &factor.subclasses {
        if !(1..=MAX_WEIGHT).contains(&subclass.weight) {
            issues.push(
                Issue::new(
                    Severity::Error,
                    format!("weight {} outside 1..={}", subclass.weight, MAX_WEIGHT),
                    "subclass weights are ordinal severities from 1 to 5",
                )
                .with_factor(&factor.key)
                .with_label(&subclass.label),
            );
        }

        let spec = RangeSpec::parse(&subclass.label);
        match (factor.categorical, spec.is_numeric()) {
            (false, false) => issues.push(
                Issue::new(
                    Severity::Warning,
                    "label does not parse as a numeric range",
                    "use `min-max`, `<max` or `>min`, or mark the factor categorical",
                )
                .with_factor(&factor.key)
                .with_label(&subclass.label),
            ),
            (true, true) => issues.push(
                Issue::new(
                    Severity::Warning,
                    "categorical factor has a numeric range label",
                    "numeric input will match this interval before any category",
                )
                .with_factor(&factor.key)
                .with_label(&subclass.label),
            ),
            _ => {}
        }

        if let Some((min, max)) = spec.bounds() {
            if min > max {
                issues.push(
                    Issue::new(
                        Severity::Warning,
                        "range lower bound exceeds upper bound",
                        "swap the bounds; this range can never match",
                    )
                    .with_factor(&factor.key)
                    .with_label(&subclass.label),
                );
            }
            intervals.push((subclass.label.as_str(), min, max));
        }
    }

    for (i, (label, min, max)) in intervals.iter().enumerate() {
        for (earlier, earlier_min, earlier_max) in &intervals[..i] {
            // shared endpoints like 0-10 / 10-20 are the normal table layout
            if min < earlier_max && earlier_min < max {
                issues.push(
                    Issue::new(
                        Severity::Info,
                        format!("range overlaps earlier range {}", earlier),
                        "values in the overlap resolve to the earlier subclass",
                    )
                    .with_factor(&factor.key)
                    .with_label(*label),
                );
            }
        }
    }

    issues
}
