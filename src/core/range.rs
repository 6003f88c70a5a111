use once_cell::sync::Lazy;
use regex::Regex;

// anchored on a full signed-decimal grammar so "-0.5-0" splits on the second dash.
static BETWEEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)-(-?\d+(?:\.\d+)?)$").expect("valid between range regex")
});
static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("valid leading number regex")
});

/// Matchable form of a subclass label.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeSpec {
    /// `min-max`, inclusive on both ends.
    Between { min: f64, max: f64 },
    /// `<max`, inclusive upper bound.
    AtMost { max: f64 },
    /// `>min`, inclusive lower bound.
    AtLeast { min: f64 },
    /// Lowercased category token.
    Category(String),
}

impl RangeSpec {
    pub fn parse(label: &str) -> Self {
        let label = label.trim();

        if let Some(caps) = BETWEEN_RE.captures(label) {
            if let (Ok(min), Ok(max)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
                return Self::Between { min, max };
            }
        }

        if let Some(rest) = label.strip_prefix('>') {
            if let Some(min) = parse_bound(rest) {
                return Self::AtLeast { min };
            }
        } else if let Some(rest) = label.strip_prefix('<') {
            if let Some(max) = parse_bound(rest) {
                return Self::AtMost { max };
            }
        }

        Self::Category(label.to_lowercase())
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Category(_))
    }

    pub fn contains(&self, value: f64) -> bool {
        match self {
            Self::Between { min, max } => *min <= value && value <= *max,
            Self::AtMost { max } => value <= *max,
            Self::AtLeast { min } => value >= *min,
            Self::Category(_) => false,
        }
    }

    /// Lower and upper bounds as a closed interval, infinite on the open side.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            Self::Between { min, max } => Some((*min, *max)),
            Self::AtMost { max } => Some((f64::NEG_INFINITY, *max)),
            Self::AtLeast { min } => Some((*min, f64::INFINITY)),
            Self::Category(_) => None,
        }
    }
}

// reads the longest numeric prefix, so ">45 m" bounds at 45
fn parse_bound(raw: &str) -> Option<f64> {
    let found = LEADING_NUMBER_RE.find(raw.trim())?;
    found
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|bound| bound.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bounded_interval() {
        assert_eq!(
            RangeSpec::parse("10-20"),
            RangeSpec::Between {
                min: 10.0,
                max: 20.0
            }
        );
        assert_eq!(
            RangeSpec::parse("  135-225 "),
            RangeSpec::Between {
                min: 135.0,
                max: 225.0
            }
        );
    }

    #[test]
    fn parses_negative_bounds() {
        assert_eq!(
            RangeSpec::parse("-0.5-0"),
            RangeSpec::Between { min: -0.5, max: 0.0 }
        );
        assert_eq!(RangeSpec::parse("<-0.5"), RangeSpec::AtMost { max: -0.5 });
        assert_eq!(
            RangeSpec::parse("-3--1"),
            RangeSpec::Between {
                min: -3.0,
                max: -1.0
            }
        );
    }

    #[test]
    fn parses_open_ended_ranges() {
        assert_eq!(RangeSpec::parse(">45"), RangeSpec::AtLeast { min: 45.0 });
        assert_eq!(RangeSpec::parse("<5"), RangeSpec::AtMost { max: 5.0 });
        assert_eq!(RangeSpec::parse("> 1100"), RangeSpec::AtLeast { min: 1100.0 });
    }

    #[test]
    fn open_bounds_ignore_trailing_text() {
        assert_eq!(RangeSpec::parse(">45m"), RangeSpec::AtLeast { min: 45.0 });
        assert_eq!(RangeSpec::parse("<-0.5 (concave)"), RangeSpec::AtMost { max: -0.5 });
        assert_eq!(RangeSpec::parse(">1e3 m"), RangeSpec::AtLeast { min: 1000.0 });
        assert!(RangeSpec::parse(">45m").contains(46.0));
    }

    #[test]
    fn falls_back_to_category() {
        assert_eq!(
            RangeSpec::parse("Forest / Tree cover"),
            RangeSpec::Category("forest / tree cover".to_string())
        );
        assert_eq!(
            RangeSpec::parse("Gneiss-Embrechite Gneiss-migmatitic"),
            RangeSpec::Category("gneiss-embrechite gneiss-migmatitic".to_string())
        );
        // malformed numeric labels never become intervals
        assert!(!RangeSpec::parse("10-").is_numeric());
        assert!(!RangeSpec::parse(">abc").is_numeric());
    }

    #[test]
    fn containment_is_inclusive() {
        let spec = RangeSpec::parse("10-20");
        assert!(spec.contains(10.0));
        assert!(spec.contains(20.0));
        assert!(!spec.contains(20.0001));

        assert!(RangeSpec::parse(">45").contains(45.0));
        assert!(RangeSpec::parse("<-0.5").contains(-0.5));
        assert!(!RangeSpec::parse("<-0.5").contains(-0.25));
        assert!(!RangeSpec::parse("grassland").contains(1.0));
    }
}
