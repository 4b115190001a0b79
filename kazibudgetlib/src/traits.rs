//! Унифицированные трэйты чтения/записи на основе std::io::{BufRead, Write}.
//!
//! Читаем пользовательские проценты, пишем результат расчёта.

use crate::{
    error::Result,
    model::{Allocations, Overrides},
};
use std::io::{BufRead, Write};

pub trait ReadFormat {
    fn read<R: BufRead>(r: R) -> Result<Overrides>;
}

pub trait WriteFormat {
    fn write<W: Write>(w: W, allocs: &Allocations) -> Result<()>;
}

pub trait Format: ReadFormat + WriteFormat {}
impl<T: ReadFormat + WriteFormat> Format for T {}
