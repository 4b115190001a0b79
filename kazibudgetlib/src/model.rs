//! Доменные модели: прогноз дохода, пользовательские проценты и итоговое распределение.

use crate::{
    engine::checked,
    error::{BudgetError, Result},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Прогноз дохода на период (приходит от внешнего предиктора).
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub amount: Decimal,
    /// Процент уверенности; может выходить за [0, 100], движок сам его зажимает.
    pub confidence: Decimal,
    pub factors: Vec<String>,
}

impl Prediction {
    pub fn new(amount: Decimal, confidence: Decimal) -> Self {
        Self {
            amount,
            confidence,
            factors: Vec::new(),
        }
    }
}

/// Пользовательские проценты для трёх корзин. Буфер пользователь не задаёт.
/// Неизвестные ключи (в том числе `buffer`) при чтении отвергаются.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Overrides {
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub savings: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub essentials: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discretionary: Option<Decimal>,
}

impl Overrides {
    pub fn is_empty(&self) -> bool {
        self.savings.is_none() && self.essentials.is_none() && self.discretionary.is_none()
    }

    /// Поля, заданные в `other`, побеждают.
    pub fn merge(&self, other: &Overrides) -> Overrides {
        Overrides {
            savings: other.savings.or(self.savings),
            essentials: other.essentials.or(self.essentials),
            discretionary: other.discretionary.or(self.discretionary),
        }
    }

    /// Установить процент для корзины; буфер не переопределяется.
    pub fn set(&mut self, bucket: Bucket, pct: Decimal) -> Result<()> {
        match bucket {
            Bucket::Buffer => {
                return Err(BudgetError::InvalidInput(
                    "buffer percentage cannot be overridden".into(),
                ))
            }
            Bucket::Savings => self.savings = Some(pct),
            Bucket::Essentials => self.essentials = Some(pct),
            Bucket::Discretionary => self.discretionary = Some(pct),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Buffer,
    Savings,
    Essentials,
    Discretionary,
}

impl Bucket {
    /// Канонический порядок вывода.
    pub const ALL: [Bucket; 4] = [
        Bucket::Buffer,
        Bucket::Savings,
        Bucket::Essentials,
        Bucket::Discretionary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Buffer => "buffer",
            Bucket::Savings => "savings",
            Bucket::Essentials => "essentials",
            Bucket::Discretionary => "discretionary",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buffer" => Ok(Bucket::Buffer),
            "savings" => Ok(Bucket::Savings),
            "essentials" => Ok(Bucket::Essentials),
            "discretionary" => Ok(Bucket::Discretionary),
            other => Err(BudgetError::Parse(format!("unknown bucket: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Allocation {
    #[serde(with = "rust_decimal::serde::float")]
    pub pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amt: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Allocations {
    pub buffer: Allocation,
    pub savings: Allocation,
    pub essentials: Allocation,
    pub discretionary: Allocation,
}

impl Allocations {
    pub fn get(&self, bucket: Bucket) -> &Allocation {
        match bucket {
            Bucket::Buffer => &self.buffer,
            Bucket::Savings => &self.savings,
            Bucket::Essentials => &self.essentials,
            Bucket::Discretionary => &self.discretionary,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &Allocation)> + '_ {
        Bucket::ALL.into_iter().map(move |b| (b, self.get(b)))
    }

    /// Пользовательские проценты не ограничены, поэтому сумма может не влезть в `Decimal`.
    pub fn total_pct(&self) -> Result<Decimal> {
        checked_sum(self.iter().map(|(_, a)| a.pct))
    }

    pub fn total_amt(&self) -> Result<Decimal> {
        checked_sum(self.iter().map(|(_, a)| a.amt))
    }
}

fn checked_sum(mut it: impl Iterator<Item = Decimal>) -> Result<Decimal> {
    checked(it.try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v)))
}
