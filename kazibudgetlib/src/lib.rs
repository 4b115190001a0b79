//! kazibudgetlib — распределение прогнозируемого дохода по корзинам
//! (буфер, сбережения, обязательные и свободные траты), форматы ввода/вывода
//! и файловое хранилище пользовательских процентов.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;
pub mod traits;

pub mod formats {
    pub mod csv;
    pub mod json;
    pub mod table;
}

pub use engine::compute_allocations;
