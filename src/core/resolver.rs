use crate::core::range::RangeSpec;
use crate::core::table::{FactorTable, Subclass};
use anyhow::{Result, anyhow};
use std::fmt;
use tracing::debug;

/// Raw user input for one factor.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Interprets form input. Blank input is absent and yields `None`.
    pub fn from_input(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        match input.parse::<f64>() {
            Ok(number) if number.is_finite() => Some(Self::Number(number)),
            _ => Some(Self::Text(input.to_string())),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{}", number),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Returns the weight of the first subclass matching `value`, or `None` when
/// nothing matches.
///
/// Numeric values are tested against every interval in table order first.
/// When no interval contains the value, the value's text form is compared
/// case-insensitively against each label.
pub fn resolve(subclasses: &[Subclass], value: &RawValue) -> Option<u8> {
    if let Some(number) = value.as_number() {
        for subclass in subclasses {
            if RangeSpec::parse(&subclass.label).contains(number) {
                return Some(subclass.weight);
            }
        }
    }

    let wanted = value.to_string().to_lowercase();
    subclasses
        .iter()
        .find(|subclass| subclass.label.trim().to_lowercase() == wanted)
        .map(|subclass| subclass.weight)
}

/// Resolves `value` against the factor at `index`.
pub fn resolve_weight(table: &FactorTable, index: usize, value: &RawValue) -> Result<Option<u8>> {
    let factor = table.get(index).ok_or_else(|| {
        anyhow!(
            "factor index {} out of range (table has {} factors)",
            index,
            table.len()
        )
    })?;

    let weight = resolve(&factor.subclasses, value);
    debug!(factor = %factor.key, %value, ?weight, "resolved factor input");
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landslide(index: usize, value: RawValue) -> Option<u8> {
        resolve_weight(FactorTable::landslide(), index, &value).unwrap()
    }

    #[test]
    fn interprets_form_input() {
        assert_eq!(RawValue::from_input("  "), None);
        assert_eq!(RawValue::from_input("32.5"), Some(RawValue::Number(32.5)));
        assert_eq!(RawValue::from_input("-0.25"), Some(RawValue::Number(-0.25)));
        assert_eq!(
            RawValue::from_input(" Cropland "),
            Some(RawValue::Text("Cropland".to_string()))
        );
        assert_eq!(
            RawValue::from_input("inf"),
            Some(RawValue::Text("inf".to_string()))
        );
    }

    #[test]
    fn shared_boundary_goes_to_first_listed_range() {
        assert_eq!(landslide(0, RawValue::Number(10.0)), Some(1));
        assert_eq!(landslide(0, RawValue::Number(20.0)), Some(2));
        assert_eq!(landslide(0, RawValue::Number(15.0)), Some(2));
        assert_eq!(landslide(0, RawValue::Number(0.0)), Some(1));
    }

    #[test]
    fn resolves_open_ended_ranges() {
        assert_eq!(landslide(0, RawValue::Number(46.0)), Some(5));
        assert_eq!(landslide(0, RawValue::Number(1000.0)), Some(5));
        assert_eq!(landslide(3, RawValue::Number(-5.0)), Some(5));
        assert_eq!(landslide(2, RawValue::Number(2500.0)), Some(1));
    }

    #[test]
    fn resolves_negative_bounded_interval() {
        assert_eq!(landslide(3, RawValue::Number(-0.25)), Some(4));
        assert_eq!(landslide(3, RawValue::Number(0.25)), Some(2));
        assert_eq!(landslide(3, RawValue::Number(-0.5)), Some(5));
        assert_eq!(landslide(3, RawValue::Number(0.0)), Some(4));
    }

    #[test]
    fn categorical_match_ignores_case() {
        for input in ["forest / tree cover", "FOREST / TREE COVER", "Forest / Tree cover"] {
            assert_eq!(landslide(7, RawValue::Text(input.to_string())), Some(1));
        }
        assert_eq!(
            landslide(8, RawValue::Text("embrechites".to_string())),
            Some(5)
        );
    }

    #[test]
    fn unmatched_input_is_unresolved() {
        assert_eq!(landslide(7, RawValue::Text("Glacier".to_string())), None);
        assert_eq!(landslide(0, RawValue::Number(-3.0)), None);
        assert_eq!(landslide(7, RawValue::Number(3.0)), None);
        assert_eq!(landslide(0, RawValue::Text("steep".to_string())), None);

        let bounded = vec![Subclass::new("0-10", 1), Subclass::new("10-45", 4)];
        assert_eq!(resolve(&bounded, &RawValue::Number(1000.0)), None);
    }

    #[test]
    fn numeric_text_falls_back_to_label_comparison() {
        let subclasses = vec![Subclass::new("1", 2), Subclass::new("Other", 4)];
        assert_eq!(resolve(&subclasses, &RawValue::Number(1.0)), Some(2));
    }

    #[test]
    fn input_must_be_a_whole_number_to_be_numeric() {
        assert_eq!(
            RawValue::from_input("12abc"),
            Some(RawValue::Text("12abc".to_string()))
        );

        // a range label typed as input matches that subclass by text
        let typed_range = RawValue::from_input("10-20").unwrap();
        assert_eq!(typed_range, RawValue::Text("10-20".to_string()));
        assert_eq!(landslide(0, typed_range), Some(2));
    }

    #[test]
    fn rejects_unknown_factor_index() {
        let err = resolve_weight(FactorTable::landslide(), 10, &RawValue::Number(1.0))
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
