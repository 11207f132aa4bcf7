use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::FinamlError;
use crate::types::{Money, Periods, Rate};
use crate::FinamlResult;

/// (1 + rate)^periods, computed exactly by repeated multiplication.
pub fn growth_factor(rate: Rate, periods: Periods) -> FinamlResult<Decimal> {
    let one_plus_r = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| FinamlError::NumericOverflow {
            context: "1 + rate".into(),
        })?;
    one_plus_r
        .checked_powu(u64::from(periods))
        .ok_or_else(|| FinamlError::NumericOverflow {
            context: format!("growth factor (1 + {rate})^{periods}"),
        })
}

/// Grow `amount` at `rate` for `periods` compounding periods.
pub fn compound(amount: Money, rate: Rate, periods: Periods) -> FinamlResult<Money> {
    let factor = growth_factor(rate, periods)?;
    amount
        .checked_mul(factor)
        .ok_or_else(|| FinamlError::NumericOverflow {
            context: format!("compounding {amount} over {periods} periods"),
        })
}

/// Discount `amount` back `periods` periods at `rate`.
pub fn discount(amount: Money, rate: Rate, periods: Periods) -> FinamlResult<Money> {
    let factor = growth_factor(rate, periods)?;
    if factor.is_zero() {
        return Err(FinamlError::DivisionByZero {
            context: format!("discount factor (1 + {rate})^{periods}"),
        });
    }
    amount
        .checked_div(factor)
        .ok_or_else(|| FinamlError::NumericOverflow {
            context: format!("discounting {amount} over {periods} periods"),
        })
}

/// Each cash flow discounted to period 0: cf[t] / (1 + rate)^t.
///
/// Rates at or below -100% are rejected before any term is computed. Once
/// (1 + rate)^t leaves the decimal range the remaining terms are computed
/// against its reciprocal, which shrinks towards zero instead of overflowing.
pub fn discounted_cash_flows(rate: Rate, cash_flows: &[Money]) -> FinamlResult<Vec<Money>> {
    if rate <= dec!(-1) {
        return Err(FinamlError::DegenerateDiscountRate { rate });
    }

    let one_plus_r = Decimal::ONE + rate;
    // (1 + r)^t while representable
    let mut discount = Some(Decimal::ONE);
    // 1 / (1 + r)^t once `discount` has overflowed
    let mut inverse = Decimal::ZERO;
    let mut terms = Vec::with_capacity(cash_flows.len());

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount = match discount {
                Some(d) => match d.checked_mul(one_plus_r) {
                    Some(next) => Some(next),
                    None => {
                        inverse = reciprocal_step(Decimal::ONE / d, one_plus_r, t)?;
                        None
                    }
                },
                None => {
                    inverse = reciprocal_step(inverse, one_plus_r, t)?;
                    None
                }
            };
        }

        let term = match discount {
            Some(d) if d.is_zero() => None,
            Some(d) => cf.checked_div(d),
            None => cf.checked_mul(inverse),
        }
        .ok_or_else(|| FinamlError::NumericOverflow {
            context: format!("NPV term at period {t}"),
        })?;
        terms.push(term);
    }

    Ok(terms)
}

fn reciprocal_step(inverse: Decimal, one_plus_r: Decimal, t: usize) -> FinamlResult<Decimal> {
    inverse
        .checked_div(one_plus_r)
        .ok_or_else(|| FinamlError::NumericOverflow {
            context: format!("NPV discount factor at period {t}"),
        })
}

/// Left-to-right sum that reports overflow instead of panicking.
pub fn checked_sum<I>(values: I, context: &str) -> FinamlResult<Money>
where
    I: IntoIterator<Item = Money>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value)
            .ok_or_else(|| FinamlError::NumericOverflow {
                context: context.to_string(),
            })
    })
}

/// Net Present Value of a series of cash flows, summed left to right.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> FinamlResult<Money> {
    checked_sum(discounted_cash_flows(rate, cash_flows)?, "NPV summation")
}
