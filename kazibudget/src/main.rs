use clap::{Args, Parser, Subcommand, ValueEnum};
use kazibudgetlib::{
    config::Config,
    engine::compute_allocations,
    error::{BudgetError, Result},
    formats::{
        csv::Csv,
        json::Json,
        table::{Table, TableOptions},
    },
    model::{Overrides, Prediction},
    store::OverridesStore,
    traits::{ReadFormat, WriteFormat},
};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum InFmt {
    Json,
    Csv,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutFmt {
    Table,
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "kazibudget", version, about = "Распределение прогнозируемого дохода по корзинам")]
struct Cli {
    /// Файл настроек (TOML)
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Путь к хранилищу процентов (перекрывает настройки)
    #[arg(long = "store", global = true)]
    store: Option<PathBuf>,

    /// Подробный лог в stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Рассчитать распределение
    Compute {
        /// Прогнозируемый доход за период
        #[arg(long = "amount", allow_hyphen_values = true)]
        amount: String,

        /// Уверенность прогноза, 0..100
        #[arg(long = "confidence", allow_hyphen_values = true)]
        confidence: String,

        /// Подмешать сохранённые проценты пользователя. В отличие от save/show/forget,
        /// без флага сохранённые проценты не подмешиваются (default_user не используется)
        #[arg(long = "user")]
        user: Option<String>,

        /// Формат выхода
        #[arg(long = "out-format", value_enum, default_value = "table")]
        out_format: OutFmt,

        /// Факторы прогноза (выводятся в таблице)
        #[arg(long = "factor")]
        factors: Vec<String>,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Сохранить проценты пользователя
    Save {
        #[arg(long = "user")]
        user: Option<String>,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Показать сохранённые проценты
    Show {
        #[arg(long = "user")]
        user: Option<String>,
    },
    /// Удалить сохранённые проценты
    Forget {
        #[arg(long = "user")]
        user: Option<String>,
    },
}

#[derive(Args, Debug)]
struct OverrideArgs {
    #[arg(long = "savings", allow_hyphen_values = true)]
    savings: Option<String>,

    #[arg(long = "essentials", allow_hyphen_values = true)]
    essentials: Option<String>,

    #[arg(long = "discretionary", allow_hyphen_values = true)]
    discretionary: Option<String>,

    /// Файл с процентами
    #[arg(long = "overrides")]
    file: Option<PathBuf>,

    /// Формат файла с процентами
    #[arg(long = "in-format", value_enum, default_value = "json")]
    in_format: InFmt,
}

impl OverrideArgs {
    /// Файл, затем флаги поверх него.
    fn resolve(&self) -> Result<Overrides> {
        let from_file = match &self.file {
            Some(path) => {
                let br = BufReader::new(File::open(path)?);
                match self.in_format {
                    InFmt::Json => Json::read(br),
                    InFmt::Csv => Csv::read(br),
                }?
            }
            None => Overrides::default(),
        };

        let from_flags = Overrides {
            savings: self.savings.as_deref().map(|s| parse_decimal("savings", s)).transpose()?,
            essentials: self
                .essentials
                .as_deref()
                .map(|s| parse_decimal("essentials", s))
                .transpose()?,
            discretionary: self
                .discretionary
                .as_deref()
                .map(|s| parse_decimal("discretionary", s))
                .transpose()?,
        };

        Ok(from_file.merge(&from_flags))
    }
}

fn parse_decimal(name: &str, s: &str) -> Result<Decimal> {
    s.trim()
        .parse()
        .map_err(|e| BudgetError::InvalidInput(format!("{name}: {s:?} is not a number ({e})")))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let store_path = cli.store.clone().unwrap_or_else(|| cfg.store_path.clone());
    let user_or_default =
        |u: &Option<String>| u.clone().unwrap_or_else(|| cfg.default_user.clone());

    let mut out = io::stdout().lock();

    match cli.cmd {
        Cmd::Compute {
            amount,
            confidence,
            user,
            out_format,
            factors,
            overrides,
        } => {
            let mut pred = Prediction::new(
                parse_decimal("amount", &amount)?,
                parse_decimal("confidence", &confidence)?,
            );
            pred.factors = factors;

            // сохранённые < файл < флаги
            let stored = match &user {
                Some(u) => OverridesStore::open(&store_path)?
                    .get(u)?
                    .map(|s| s.overrides)
                    .unwrap_or_default(),
                None => Overrides::default(),
            };
            let ov = stored.merge(&overrides.resolve()?);
            tracing::debug!(?ov, user = user.as_deref(), "resolved overrides");

            let allocs = compute_allocations(&pred, Some(&ov).filter(|o| !o.is_empty()))?;

            match out_format {
                OutFmt::Table => Table::write_with(
                    &mut out,
                    &allocs,
                    &TableOptions {
                        currency: &cfg.currency,
                        factors: &pred.factors,
                    },
                ),
                OutFmt::Json => Json::write(&mut out, &allocs),
                OutFmt::Csv => Csv::write(&mut out, &allocs),
            }?;
        }
        Cmd::Save { user, overrides } => {
            let user = user_or_default(&user);
            let ov = overrides.resolve()?;
            if ov.is_empty() {
                return Err(BudgetError::InvalidInput(
                    "nothing to save: no overrides given".into(),
                ));
            }
            let updated_at = OverridesStore::open(&store_path)?.save(&user, &ov)?;
            writeln!(out, "saved overrides for {user} at {}", updated_at.to_rfc3339())?;
        }
        Cmd::Show { user } => {
            let user = user_or_default(&user);
            match OverridesStore::open(&store_path)?.get(&user)? {
                Some(stored) => {
                    serde_json::to_writer_pretty(&mut out, &stored)?;
                    writeln!(out)?;
                }
                None => writeln!(out, "no overrides stored for {user}")?,
            }
        }
        Cmd::Forget { user } => {
            let user = user_or_default(&user);
            if OverridesStore::open(&store_path)?.remove(&user)? {
                writeln!(out, "removed overrides for {user}")?;
            } else {
                writeln!(out, "no overrides stored for {user}")?;
            }
        }
    }

    out.flush().map_err(BudgetError::from)
}
