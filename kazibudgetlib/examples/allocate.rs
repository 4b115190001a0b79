use kazibudgetlib::{
    engine::compute_allocations,
    formats::{json::Json, table::Table},
    model::Prediction,
    traits::{ReadFormat, WriteFormat},
};
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: проценты из JSON (stdin) -> таблица (stdout) для дохода 45 280 при уверенности 82
    let ov = Json::read(std::io::BufReader::new(std::io::stdin()))?;
    let pred = Prediction::new(Decimal::from(45_280), Decimal::from(82));
    let allocs = compute_allocations(&pred, Some(&ov))?;
    Table::write(std::io::stdout(), &allocs)?;
    Ok(())
}
