//! Простой CSV.
//! Вход (проценты пользователя): `bucket,pct`, по строке на корзину.
//! Выход (распределение): `bucket,pct,amt`, четыре строки в каноническом порядке.

use crate::{
    error::{BudgetError, Result},
    model::{Allocations, Bucket, Overrides},
};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

#[derive(serde::Deserialize)]
struct CsvRow {
    bucket: String,
    pct: String,
}

#[derive(serde::Serialize)]
struct CsvOutRow {
    bucket: &'static str,
    pct: String,
    amt: String,
}

pub struct Csv;

impl crate::traits::ReadFormat for Csv {
    fn read<R: BufRead>(r: R) -> Result<Overrides> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(r);
        let mut overrides = Overrides::default();

        for rec in rdr.deserialize::<CsvRow>() {
            let row = rec?;
            let bucket: Bucket = row.bucket.parse()?;
            let pct = row
                .pct
                .parse::<Decimal>()
                .map_err(|e| BudgetError::InvalidInput(format!("{bucket} pct: {e}")))?;
            overrides.set(bucket, pct)?;
        }

        Ok(overrides)
    }
}

impl crate::traits::WriteFormat for Csv {
    fn write<W: Write>(mut w: W, allocs: &Allocations) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);

        for (bucket, a) in allocs.iter() {
            wrt.serialize(CsvOutRow {
                bucket: bucket.as_str(),
                pct: a.pct.normalize().to_string(),
                amt: a.amt.normalize().to_string(),
            })?;
        }
        wrt.flush()?;
        Ok(())
    }
}
