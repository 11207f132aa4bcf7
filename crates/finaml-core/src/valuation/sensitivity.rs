use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinamlError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinamlResult;

use super::cash_flow::calculate_npv;

/// NPV observed at one discount rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub discount_rate: Rate,
    pub npv: Money,
}

/// Mapping from discount rate to NPV.
///
/// Rates are unique (compared numerically, so 0.1 and 0.10 are the same
/// key) and iterate in the order they were first inserted. Re-inserting a
/// rate replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensitivityTable {
    points: Vec<SensitivityPoint>,
}

impl SensitivityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the NPV for `discount_rate`. Returns the previous value.
    pub fn insert(&mut self, discount_rate: Rate, npv: Money) -> Option<Money> {
        match self
            .points
            .iter_mut()
            .find(|p| p.discount_rate == discount_rate)
        {
            Some(existing) => Some(std::mem::replace(&mut existing.npv, npv)),
            None => {
                self.points.push(SensitivityPoint { discount_rate, npv });
                None
            }
        }
    }

    pub fn get(&self, discount_rate: Rate) -> Option<Money> {
        self.points
            .iter()
            .find(|p| p.discount_rate == discount_rate)
            .map(|p| p.npv)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SensitivityPoint> {
        self.points.iter()
    }

    pub fn rates(&self) -> impl Iterator<Item = Rate> + '_ {
        self.points.iter().map(|p| p.discount_rate)
    }
}

impl<'a> IntoIterator for &'a SensitivityTable {
    type Item = &'a SensitivityPoint;
    type IntoIter = std::slice::Iter<'a, SensitivityPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// NPV of `cash_flow` at each rate in `discount_rates`.
///
/// One entry per distinct rate, ordered by first appearance. Any degenerate
/// rate fails the whole sweep.
pub fn sensitivity_analysis(
    cash_flow: &[Money],
    discount_rates: &[Rate],
) -> FinamlResult<SensitivityTable> {
    let mut table = SensitivityTable::new();
    for &rate in discount_rates {
        let npv = calculate_npv(cash_flow, rate)?;
        table.insert(rate, npv);
    }
    Ok(table)
}

/// Upper bound on the number of rates a single sweep may expand to.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// An evenly stepped range of discount rates, min and max inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSweep {
    pub min: Rate,
    pub max: Rate,
    pub step: Rate,
}

impl RateSweep {
    /// Expand the sweep into its rates. `max` is always included.
    pub fn rates(&self) -> FinamlResult<Vec<Rate>> {
        if self.step <= Decimal::ZERO {
            return Err(FinamlError::InvalidInput {
                field: "sweep.step".into(),
                reason: "Step must be positive".into(),
            });
        }
        if self.min > self.max {
            return Err(FinamlError::InvalidInput {
                field: "sweep.min".into(),
                reason: "Min must be <= max".into(),
            });
        }

        let mut values = Vec::new();
        let mut current = Some(self.min);
        while let Some(rate) = current.filter(|rate| *rate <= self.max) {
            push_capped(&mut values, rate)?;
            current = rate.checked_add(self.step);
        }
        if let Some(&last) = values.last() {
            if last < self.max {
                push_capped(&mut values, self.max)?;
            }
        }

        Ok(values)
    }
}

fn push_capped(values: &mut Vec<Rate>, rate: Rate) -> FinamlResult<()> {
    if values.len() >= MAX_SWEEP_POINTS {
        return Err(FinamlError::InvalidInput {
            field: "sweep.step".into(),
            reason: format!("Sweep expands to more than {MAX_SWEEP_POINTS} rates"),
        });
    }
    values.push(rate);
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityInput {
    pub cash_flows: Vec<Money>,
    /// Explicit rates, evaluated in order
    #[serde(default)]
    pub discount_rates: Vec<Rate>,
    /// Stepped range appended after the explicit rates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<RateSweep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub table: SensitivityTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest: Option<SensitivityPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest: Option<SensitivityPoint>,
    /// Adjacent rates (in table order) between which NPV changes sign
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_change_between: Option<(Rate, Rate)>,
}

/// Sweep NPV across the requested discount rates.
pub fn analyse_sensitivity(
    input: &SensitivityInput,
) -> FinamlResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut rates = input.discount_rates.clone();
    if let Some(sweep) = &input.sweep {
        rates.extend(sweep.rates()?);
    }
    if rates.is_empty() {
        return Err(FinamlError::InvalidInput {
            field: "discount_rates".into(),
            reason: "At least one discount rate or a sweep is required".into(),
        });
    }
    tracing::debug!(rates = rates.len(), "running NPV sensitivity");

    let table = sensitivity_analysis(&input.cash_flows, &rates)?;
    if table.len() < rates.len() {
        warnings.push(format!(
            "{} duplicate rate(s) collapsed; the last evaluation of each rate is kept",
            rates.len() - table.len()
        ));
    }

    let highest = table.iter().copied().max_by_key(|p| p.npv);
    let lowest = table.iter().copied().min_by_key(|p| p.npv);
    let sign_change_between = table
        .iter()
        .zip(table.iter().skip(1))
        .find(|(a, b)| a.npv.is_sign_negative() != b.npv.is_sign_negative())
        .map(|(a, b)| (a.discount_rate, b.discount_rate));

    let output = SensitivityOutput {
        table,
        highest,
        lowest,
        sign_change_between,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "NPV discount-rate sensitivity",
        &serde_json::json!({ "rates": rates.len(), "cash_flows": input.cash_flows.len() }),
        warnings,
        elapsed,
        output,
    ))
}
