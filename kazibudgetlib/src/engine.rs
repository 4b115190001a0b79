//! Расчёт распределения: буфер растёт при падении уверенности прогноза,
//! сбережения и обязательные траты берутся из пользовательских процентов
//! или значений по умолчанию, свободные траты получают остаток.

use crate::{
    error::{BudgetError, Result},
    model::{Allocation, Allocations, Overrides, Prediction},
};
use rust_decimal::Decimal;

pub const BUFFER_BASE_PCT: Decimal = Decimal::from_parts(8, 0, 0, false, 0);
pub const BUFFER_MAX_PCT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
/// Сколько пунктов уверенности «стоит» один процент буфера.
pub const BUFFER_STEP: Decimal = Decimal::from_parts(6, 0, 0, false, 0);
pub const DEFAULT_SAVINGS_PCT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
pub const DEFAULT_ESSENTIALS_PCT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
pub const DISCRETIONARY_FLOOR_PCT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Процент буфера для данной уверенности: `min(20, 8 + round((100 - c) / 6))`,
/// где `c` зажата в [0, 100].
pub fn buffer_pct(confidence: Decimal) -> Decimal {
    let conf = confidence.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let steps = round_half_up((Decimal::ONE_HUNDRED - conf) / BUFFER_STEP);
    (BUFFER_BASE_PCT + steps).min(BUFFER_MAX_PCT)
}

pub fn compute_allocations(
    pred: &Prediction,
    overrides: Option<&Overrides>,
) -> Result<Allocations> {
    if pred.amount.is_sign_negative() && !pred.amount.is_zero() {
        return Err(BudgetError::InvalidInput(format!(
            "amount must be non-negative, got {}",
            pred.amount
        )));
    }

    let buffer = buffer_pct(pred.confidence);
    let savings = overrides
        .and_then(|o| o.savings)
        .unwrap_or(DEFAULT_SAVINGS_PCT);
    let essentials = overrides
        .and_then(|o| o.essentials)
        .unwrap_or(DEFAULT_ESSENTIALS_PCT);

    let discretionary = match overrides.and_then(|o| o.discretionary) {
        Some(pct) => pct,
        None => {
            let reserved = checked(buffer.checked_add(savings))?;
            let reserved = checked(reserved.checked_add(essentials))?;
            let rest = checked(Decimal::ONE_HUNDRED.checked_sub(reserved))?;
            rest.max(DISCRETIONARY_FLOOR_PCT)
        }
    };

    let amount = pred.amount;
    let alloc = |pct: Decimal| -> Result<Allocation> {
        // делим последним
        let scaled = checked(pct.checked_mul(amount))?;
        Ok(Allocation {
            pct,
            amt: round_half_up(scaled / Decimal::ONE_HUNDRED),
        })
    };

    let out = Allocations {
        buffer: alloc(buffer)?,
        savings: alloc(savings)?,
        essentials: alloc(essentials)?,
        discretionary: alloc(discretionary)?,
    };

    let total = out.total_pct()?;
    if total != Decimal::ONE_HUNDRED {
        tracing::warn!(
            total_pct = %total,
            overridden = overrides.is_some_and(|o| !o.is_empty()),
            "allocation percentages do not sum to 100"
        );
    }
    tracing::debug!(
        amount = %amount,
        confidence = %pred.confidence,
        buffer = %out.buffer.pct,
        savings = %out.savings.pct,
        essentials = %out.essentials.pct,
        discretionary = %out.discretionary.pct,
        "computed allocations"
    );

    Ok(out)
}

/// Округление как в JS `Math.round`: половина всегда вверх (-2.5 -> -2).
fn round_half_up(x: Decimal) -> Decimal {
    let half = Decimal::new(5, 1);
    match x.checked_add(half) {
        Some(v) => v.floor(),
        None => x.round(),
    }
}

pub(crate) fn checked(v: Option<Decimal>) -> Result<Decimal> {
    v.ok_or_else(|| BudgetError::InvalidInput("value out of representable range".into()))
}
