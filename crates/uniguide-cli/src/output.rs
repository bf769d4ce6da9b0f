//! Terminal output formatting.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use uniguide_core::chart::{BarChart, PieChart};
use uniguide_core::model::Institution;
use uniguide_core::{ReconcileReport, Table};

/// Gap between table columns.
const COLUMN_SEPARATOR: &str = "  ";
const COLUMN_GAP: usize = COLUMN_SEPARATOR.len();
/// Columns are never squeezed below this width.
const MIN_COLUMN_WIDTH: usize = 6;
/// Width of the longest bar in a bar chart.
const BAR_WIDTH: usize = 40;

/// Print a table with colored headers, fitted to the terminal.
pub fn print_table(table: &Table) {
    if table.columns().is_empty() || table.is_empty() {
        println!("{}", "No rows.".dimmed());
        return;
    }

    let display = table.to_display();
    let widths = column_widths(&display.columns, &display.rows, term_width());

    let header: Vec<String> = display
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, &w)| pad_right(&truncate_visual(name, w), w))
        .collect();
    println!("{}", header.join(COLUMN_SEPARATOR).cyan().bold());

    let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP * widths.len().saturating_sub(1);
    println!("{}", "─".repeat(rule_width).dimmed());

    for row in &display.rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| pad_right(&truncate_visual(cell, w), w))
            .collect();
        println!("{}", cells.join(COLUMN_SEPARATOR).trim_end());
    }

    println!();
    println!("{} row(s)", display.rows.len());
}

/// Print a list of names, one per line.
pub fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        println!("{}", format!("No {} found.", title.to_lowercase()).dimmed());
        return;
    }
    println!("{}", title.bold());
    for item in items {
        println!("  {} {}", "●".cyan(), item);
    }
}

pub fn print_institution(institution: &Institution) {
    println!("{}", institution.name.cyan().bold());
    match &institution.photo_url {
        Some(url) => println!("{}: {}", "Logo".bold(), url),
        None => println!("{}", "No logo on record.".dimmed()),
    }
    println!();
}

/// Print a reconciliation summary.
pub fn print_report(report: &ReconcileReport) {
    println!(
        "{} updated, {} unchanged",
        report.updated.to_string().green().bold(),
        report.unchanged
    );
    if report.unmatched > 0 {
        println!("  {} row(s) had no matching record", report.unmatched.to_string().yellow());
    }
    if report.ambiguous > 0 {
        println!("  {} row(s) skipped: key is not unique", report.ambiguous.to_string().yellow());
    }
    if report.failed > 0 {
        println!("  {} write(s) failed, see log", report.failed.to_string().red().bold());
    }
}

/// Print pie slices with their share of the total.
pub fn print_pie(chart: &PieChart) {
    println!("{}", chart.title.bold());
    if chart.slices.is_empty() {
        println!("{}", "No collaborators found.".dimmed());
        return;
    }

    let total: f64 = chart.slices.iter().map(|s| s.value).sum();
    let label_width = chart
        .slices
        .iter()
        .map(|s| UnicodeWidthStr::width(s.label.as_str()))
        .max()
        .unwrap_or(0);

    for slice in &chart.slices {
        let share = if total > 0.0 { slice.value / total * 100.0 } else { 0.0 };
        println!(
            "  {}  {:>4}  {}",
            pad_right(&slice.label, label_width),
            slice.value,
            format!("{:.1}%", share).dimmed()
        );
    }
}

/// Print a horizontal bar chart scaled to the chart's y range.
pub fn print_bars(chart: &BarChart) {
    println!("{} by {}", chart.y_label.bold(), chart.x_label.bold());

    let label_width = chart
        .bars
        .iter()
        .map(|b| UnicodeWidthStr::width(b.category.as_str()))
        .max()
        .unwrap_or(0);
    let (_, max) = chart.y_range;

    for bar in &chart.bars {
        let len = if max > 0.0 {
            ((bar.value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        println!(
            "  {}  {} {}",
            pad_right(&bar.category, label_width),
            "█".repeat(len).green(),
            bar.value
        );
    }
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Natural width of each column, shrunk evenly when the total would not
/// fit in `available`.
fn column_widths(columns: &[String], rows: &[Vec<String>], available: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|c| UnicodeWidthStr::width(c.as_str()))
        .collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let gaps = COLUMN_GAP * widths.len().saturating_sub(1);
    let total: usize = widths.iter().sum::<usize>() + gaps;
    if total > available && !widths.is_empty() {
        let cap = (available.saturating_sub(gaps) / widths.len()).max(MIN_COLUMN_WIDTH);
        for w in &mut widths {
            *w = (*w).min(cap);
        }
    }
    widths
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
