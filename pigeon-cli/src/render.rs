//! Tables and bars standing in for the charts.

use comfy_table::{CellAlignment, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use pigeon_core::Transaction;
use pigeon_finance::{CategoryTotal, DailyPoint};

/// `-$1,234.50` style currency.
pub fn money(value: f64, symbol: &str) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}{}{}.{:02}",
        sign,
        symbol,
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `[######--------------]` for a 0..=100 percentage.
pub fn bar(pct: u32, width: usize) -> String {
    let filled = (pct.min(100) as usize * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn create_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn align_right(table: &mut Table, column: usize) {
    if let Some(col) = table.column_mut(column) {
        col.set_cell_alignment(CellAlignment::Right);
    }
}

pub fn transactions_table(txs: &[&Transaction], symbol: &str) -> Table {
    let mut table = create_table(vec!["ID", "Date", "Merchant", "Category", "Amount"]);
    for t in txs {
        table.add_row(vec![
            t.id.clone(),
            t.date.format("%Y-%m-%d").to_string(),
            t.merchant.clone(),
            t.category.to_string(),
            money(t.amount, symbol),
        ]);
    }
    align_right(&mut table, 4);
    table
}

pub fn series_table(points: &[DailyPoint], symbol: &str) -> Table {
    let mut table = create_table(vec!["Date", "Amount"]);
    for p in points {
        table.add_row(vec![p.date.format("%Y-%m-%d").to_string(), money(p.value, symbol)]);
    }
    align_right(&mut table, 1);
    table
}

/// Category rows with each share of the total as a bar.
pub fn breakdown_table(totals: &[CategoryTotal], symbol: &str) -> Table {
    let sum: f64 = totals.iter().map(|c| c.value).sum();
    let mut table = create_table(vec!["Category", "Amount", "Share"]);
    for c in totals {
        let pct = if sum > 0.0 { (c.value / sum * 100.0).round() as u32 } else { 0 };
        table.add_row(vec![
            c.category.to_string(),
            money(c.value, symbol),
            format!("{} {:>3}%", bar(pct, 20), pct),
        ]);
    }
    align_right(&mut table, 1);
    table
}

pub fn print_transactions(txs: &[&Transaction], symbol: &str) {
    if txs.is_empty() {
        println!("(no transactions)");
        return;
    }
    println!("{}", transactions_table(txs, symbol));
}

pub fn print_series(title: &str, points: &[DailyPoint], symbol: &str) {
    println!("{title}");
    if points.is_empty() {
        println!("  (nothing yet)");
        return;
    }
    println!("{}", series_table(points, symbol));
}

pub fn print_breakdown(title: &str, totals: &[CategoryTotal], symbol: &str) {
    println!("{title}");
    if totals.is_empty() {
        println!("  (no expenses)");
        return;
    }
    println!("{}", breakdown_table(totals, symbol));
}
