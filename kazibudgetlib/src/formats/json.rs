//! JSON: на входе `{"savings":10,"essentials":40}`, на выходе
//! `{"buffer":{"pct":..,"amt":..},...}`.

use crate::{
    error::{BudgetError, Result},
    model::{Allocations, Overrides},
};
use std::io::{BufRead, Write};

pub struct Json;

impl crate::traits::ReadFormat for Json {
    fn read<R: BufRead>(r: R) -> Result<Overrides> {
        serde_json::from_reader(r).map_err(|e| {
            if e.is_data() || e.is_syntax() {
                BudgetError::InvalidInput(format!("overrides: {e}"))
            } else {
                BudgetError::Json(e)
            }
        })
    }
}

impl crate::traits::WriteFormat for Json {
    fn write<W: Write>(mut w: W, allocs: &Allocations) -> Result<()> {
        serde_json::to_writer_pretty(&mut w, allocs)?;
        writeln!(w)?;
        Ok(())
    }
}
