//! Plain text rendering of shopping lists

use std::fs;
use std::path::Path;

use larder_shopping::{ShoppingItem, ShoppingList};

use crate::error::AppResult;

pub const EMPTY_LIST_MESSAGE: &str = "You have all ingredients needed!";

/// Format an amount with precision that depends on its size
pub fn format_quantity(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else if amount < 0.1 {
        format!("{amount:.3}")
    } else if amount < 1.0 {
        format!("{amount:.2}")
    } else {
        format!("{amount:.1}")
    }
}

pub fn title_case(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_item(item: &ShoppingItem) -> String {
    let quantity = format_quantity(item.quantity);
    let unit = item.unit.trim();
    if unit.is_empty() {
        format!("  [ ] {} {}", quantity, item.name)
    } else {
        format!("  [ ] {} {} {}", quantity, unit, item.name)
    }
}

pub fn format_shopping_list(list: &ShoppingList) -> String {
    if list.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }

    let mut lines = vec!["SHOPPING LIST".to_string(), "=".repeat(50)];

    for (category, items) in list.iter() {
        lines.push(String::new());
        lines.push(format!("{}:", title_case(category)));
        lines.extend(items.iter().map(format_item));
    }

    lines.join("\n")
}

pub fn export_shopping_list(list: &ShoppingList, path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format_shopping_list(list))?;

    tracing::info!(path = %path.display(), items = list.len(), "Shopping list exported");

    Ok(())
}
