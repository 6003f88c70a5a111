use crate::core::resolver::{RawValue, resolve};
use crate::core::score::MAX_WEIGHT;
use crate::core::table::FactorTable;
use anyhow::{Result, bail};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    /// No input yet, or the input matched no subclass.
    Default,
    /// Resolved from the factor's subclass table.
    Derived,
    /// Set directly by the user.
    Override,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorState {
    pub input: Option<RawValue>,
    pub weight: u8,
    pub source: WeightSource,
}

/// Current per-factor weights for one evaluation session.
pub struct WeightBoard<'a> {
    table: &'a FactorTable,
    default_weight: u8,
    states: Vec<FactorState>,
}

impl<'a> WeightBoard<'a> {
    pub fn new(table: &'a FactorTable, default_weight: u8) -> Self {
        let states = table
            .factors()
            .iter()
            .map(|_| FactorState {
                input: None,
                weight: default_weight,
                source: WeightSource::Default,
            })
            .collect();

        Self {
            table,
            default_weight,
            states,
        }
    }

    pub fn table(&self) -> &'a FactorTable {
        self.table
    }

    pub fn states(&self) -> &[FactorState] {
        &self.states
    }

    /// Records new input for a factor and re-derives its weight. Clears any
    /// earlier override on that factor.
    pub fn set_input(&mut self, index: usize, input: Option<RawValue>) -> Result<&FactorState> {
        let default_weight = self.default_weight;
        let table = self.table;
        let Some(factor) = table.get(index) else {
            bail!("factor index {} out of range", index);
        };

        let (weight, source) = match &input {
            None => (default_weight, WeightSource::Default),
            Some(value) => match resolve(&factor.subclasses, value) {
                Some(weight) => (weight, WeightSource::Derived),
                None => {
                    warn!(
                        factor = %factor.key,
                        %value,
                        default_weight,
                        "input matched no subclass; using default weight"
                    );
                    (default_weight, WeightSource::Default)
                }
            },
        };
        debug!(factor = %factor.key, weight, ?source, "updated factor weight");

        self.states[index] = FactorState {
            input,
            weight,
            source,
        };
        Ok(&self.states[index])
    }

    pub fn set_override(&mut self, index: usize, weight: u8) -> Result<&FactorState> {
        if weight > MAX_WEIGHT {
            bail!("weight override {} exceeds maximum {}", weight, MAX_WEIGHT);
        }
        let Some(state) = self.states.get_mut(index) else {
            bail!("factor index {} out of range", index);
        };

        state.weight = weight;
        state.source = WeightSource::Override;
        Ok(&*state)
    }

    pub fn weights(&self) -> Vec<u8> {
        self.states.iter().map(|state| state.weight).collect()
    }
}
