//! Человекочитаемая таблица с полосой заполнения для каждой корзины.
//! Только запись.

use crate::{
    error::{BudgetError, Result},
    model::{Allocations, Overrides},
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone)]
pub struct TableOptions<'a> {
    pub currency: &'a str,
    pub factors: &'a [String],
}

impl Default for TableOptions<'_> {
    fn default() -> Self {
        Self {
            currency: "KSh",
            factors: &[],
        }
    }
}

pub struct Table;

impl Table {
    pub fn write_with<W: Write>(
        mut w: W,
        allocs: &Allocations,
        opts: &TableOptions<'_>,
    ) -> Result<()> {
        let total_pct = allocs.total_pct()?;
        let total_amt = allocs.total_amt()?;
        for (bucket, a) in allocs.iter() {
            writeln!(
                w,
                "{:<14} {:>6}%  {} {:>12}  [{}]",
                bucket.as_str(),
                a.pct.normalize().to_string(),
                opts.currency,
                a.amt.normalize().to_string(),
                bar(a.pct)
            )?;
        }
        writeln!(
            w,
            "{:<14} {:>6}%  {} {:>12}",
            "total",
            total_pct.normalize().to_string(),
            opts.currency,
            total_amt.normalize().to_string()
        )?;

        if !opts.factors.is_empty() {
            writeln!(w)?;
            writeln!(w, "factors:")?;
            for f in opts.factors {
                writeln!(w, "  - {f}")?;
            }
        }
        Ok(())
    }
}

/// Заполнение полосы, зажатое в [0, BAR_WIDTH]: проценты могут быть
/// отрицательными или больше 100, если их так задал пользователь.
fn bar(pct: Decimal) -> String {
    let pct = pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let cells = (pct * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!("{}{}", "#".repeat(cells), ".".repeat(BAR_WIDTH - cells))
}

impl crate::traits::ReadFormat for Table {
    fn read<R: BufRead>(_r: R) -> Result<Overrides> {
        Err(BudgetError::Unsupported("table format is write-only"))
    }
}

impl crate::traits::WriteFormat for Table {
    fn write<W: Write>(w: W, allocs: &Allocations) -> Result<()> {
        Self::write_with(w, allocs, &TableOptions::default())
    }
}
