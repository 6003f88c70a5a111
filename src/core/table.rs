use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static LANDSLIDE: Lazy<FactorTable> = Lazy::new(landslide_table);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subclass {
    pub label: String,
    pub weight: u8,
}

impl Subclass {
    pub fn new(label: impl Into<String>, weight: u8) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factor {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub categorical: bool,
    pub subclasses: Vec<Subclass>,
}

impl Factor {
    fn numeric(key: &str, name: &str, subclasses: &[(&str, u8)]) -> Self {
        Self::build(key, name, false, subclasses)
    }

    fn categorical(key: &str, name: &str, subclasses: &[(&str, u8)]) -> Self {
        Self::build(key, name, true, subclasses)
    }

    fn build(key: &str, name: &str, categorical: bool, subclasses: &[(&str, u8)]) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            categorical,
            subclasses: subclasses
                .iter()
                .map(|(label, weight)| Subclass::new(*label, *weight))
                .collect(),
        }
    }

    /// Renders `label→weight` pairs in table order, e.g. `0-10→1, 10-20→2`.
    pub fn mapping_hint(&self) -> String {
        self.subclasses
            .iter()
            .map(|subclass| format!("{}→{}", subclass.label, subclass.weight))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Ordered, read-only set of factors. Position is the factor's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FactorTable {
    factors: Vec<Factor>,
}

impl FactorTable {
    pub fn new(factors: Vec<Factor>) -> Self {
        Self { factors }
    }

    /// Built-in landslide susceptibility table.
    pub fn landslide() -> &'static FactorTable {
        &LANDSLIDE
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Factor> {
        self.factors.get(index)
    }

    /// Finds a factor by index, key or display name. Keys and names compare
    /// case-insensitively.
    pub fn lookup(&self, selector: &str) -> Option<(usize, &Factor)> {
        let selector = selector.trim();
        if let Ok(index) = selector.parse::<usize>() {
            return self.get(index).map(|factor| (index, factor));
        }

        let wanted = selector.to_lowercase();
        self.factors
            .iter()
            .enumerate()
            .find(|(_, factor)| factor.key.to_lowercase() == wanted)
            .or_else(|| {
                self.factors
                    .iter()
                    .enumerate()
                    .find(|(_, factor)| factor.name.to_lowercase() == wanted)
            })
    }
}

// weights as published in the annex workbook.
fn landslide_table() -> FactorTable {
    FactorTable::new(vec![
        Factor::numeric(
            "slope",
            "Slope (°)",
            &[("0-10", 1), ("10-20", 2), ("20-30", 3), ("30-45", 4), (">45", 5)],
        ),
        Factor::numeric(
            "rainfall",
            "Rainfall Intensity (mm/hr)",
            &[("0-20", 1), ("20-40", 2), ("40-60", 3), ("60-80", 4), (">80", 5)],
        ),
        Factor::numeric(
            "stream_distance",
            "Distance to Streams (m)",
            &[
                ("0-50", 5),
                ("50-100", 4),
                ("100-500", 3),
                ("500-1000", 2),
                (">1000", 1),
            ],
        ),
        Factor::numeric(
            "curvature",
            "Curvature",
            &[("<-0.5", 5), ("-0.5-0", 4), ("0-0.5", 2), (">0.5", 1)],
        ),
        Factor::numeric(
            "aspect",
            "Aspect (° from North)",
            &[
                ("0-45", 3),
                ("45-135", 2),
                ("135-225", 4),
                ("225-315", 5),
                ("315-360", 3),
            ],
        ),
        Factor::numeric(
            "elevation",
            "Elevation (m)",
            &[
                ("0-500", 1),
                ("500-700", 2),
                ("700-900", 3),
                ("900-1100", 4),
                (">1100", 5),
            ],
        ),
        Factor::numeric(
            "twi",
            "Topographic Wetness Index (TWI)",
            &[("<5", 1), ("5-8", 2), ("8-10", 3), ("10-12", 4), (">12", 5)],
        ),
        Factor::categorical(
            "land_use",
            "Land Use / Cover",
            &[
                ("Forest / Tree cover", 1),
                ("Grassland", 2),
                ("Cropland", 3),
                ("Built-up / Urban", 4),
                ("Bare or sparse vegetation", 5),
                ("Wetland", 2),
                ("Water body", 1),
            ],
        ),
        Factor::categorical(
            "rock_type",
            "Rock Types",
            &[("Ectinites, migmatites", 2), ("Embrechites", 5)],
        ),
        Factor::categorical(
            "geology",
            "Geology",
            &[
                ("Upper gneisses: garnetiferous with two micas", 2),
                ("Gneiss-Embrechite Gneiss-migmatitic", 5),
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landslide_table_has_ten_factors_in_order() {
        let table = FactorTable::landslide();
        assert_eq!(table.len(), 10);
        assert_eq!(table.factors()[0].key, "slope");
        assert_eq!(table.factors()[3].name, "Curvature");
        assert_eq!(table.factors()[9].key, "geology");
        assert_eq!(
            table.factors().iter().filter(|f| f.categorical).count(),
            3
        );
    }

    #[test]
    fn looks_up_by_index_key_and_name() {
        let table = FactorTable::landslide();
        assert_eq!(table.lookup("3").map(|(i, _)| i), Some(3));
        assert_eq!(table.lookup("TWI").map(|(i, _)| i), Some(6));
        assert_eq!(table.lookup("land use / cover").map(|(i, _)| i), Some(7));
        assert!(table.lookup("10").is_none());
        assert!(table.lookup("soil moisture").is_none());
    }

    #[test]
    fn renders_mapping_hint() {
        let table = FactorTable::landslide();
        assert_eq!(
            table.factors()[3].mapping_hint(),
            "<-0.5→5, -0.5-0→4, 0-0.5→2, >0.5→1"
        );
    }
}
