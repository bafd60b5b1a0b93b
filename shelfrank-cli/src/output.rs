/// Output formatting: terminal table and JSON.
use serde::Serialize;
use shelfrank_core::{ComparisonResult, RankedItem};

#[derive(Serialize)]
struct JsonRankedItem {
    rank: usize,
    id: i64,
    name: String,
    rating: i64,
}

#[derive(Serialize)]
struct JsonOutput {
    items: Vec<JsonRankedItem>,
}

/// Print the ranked working set as a formatted terminal table, best first.
pub fn print_table(items: &[RankedItem]) {
    // Find the widest item name for padding
    let name_width = items
        .iter()
        .map(|i| i.name.len())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Item"

    // Header
    println!(" # | {:<name_width$} | Rating", "Item");
    println!("---|-{}-|-------", "-".repeat(name_width));

    // Rows
    for (i, item) in items.iter().enumerate() {
        println!(
            "{:>2} | {:<name_width$} | {:>6}",
            i + 1,
            item.name,
            item.rating.unwrap_or_default(),
        );
    }

    println!("\n{} items ranked", items.len());
}

/// Print the ranked working set as JSON, best first.
pub fn print_json(items: &[RankedItem]) {
    let items: Vec<JsonRankedItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| JsonRankedItem {
            rank: i + 1,
            id: item.id,
            name: item.name.clone(),
            rating: item.rating.unwrap_or_default(),
        })
        .collect();

    let output = JsonOutput { items };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

/// Print the reconciled outcome of one comparison.
pub fn print_result(result: &ComparisonResult) {
    println!(
        "  {} {:+}  |  {} {:+}",
        result.winner_name, result.winner_delta, result.loser_name, result.loser_delta,
    );
}
