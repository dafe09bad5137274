use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::ShoppingListResult;
use crate::shopping::aggregate::AggregatedItem;

const HEADER: [&str; 8] = [
    "category",
    "name",
    "quantity",
    "unit",
    "price_per_unit",
    "estimated_price",
    "reason",
    "coverage",
];

/// Write the aggregated shopping list as CSV to any writer.
pub fn write_shopping_csv<W: Write>(writer: W, items: &[AggregatedItem]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for entry in items {
        let item = &entry.item;
        wtr.write_record([
            item.category.to_string(),
            item.name.clone(),
            format!("{:.2}", item.quantity),
            item.unit.to_string(),
            format!("{:.2}", item.price_per_unit),
            format!("{:.2}", item.line_price()),
            item.reason.clone().unwrap_or_default(),
            entry.coverage.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the aggregated view of `list` to a CSV file.
pub fn export_shopping_csv(list: &ShoppingListResult, path: &Path) -> Result<()> {
    let items = crate::shopping::aggregate(&list.items);
    let file = std::fs::File::create(path)?;
    write_shopping_csv(file, &items)
}
