//! Free-text row filters for the searchable tables.

use crate::table::{Table, Value};

/// Keep rows where any of `columns` contains `needle`, case-insensitively.
///
/// The needle is matched literally, surrounding whitespace included. An
/// empty needle keeps every row; null cells and absent columns never match.
pub fn filter_contains(table: &mut Table, columns: &[&str], needle: Option<&str>) {
    let Some(needle) = needle.filter(|n| !n.is_empty()) else {
        return;
    };
    let needle = needle.to_lowercase();

    table.retain(|row| {
        columns.iter().any(|column| match row.get(column) {
            None | Some(Value::Null) => false,
            Some(value) => value.to_string().to_lowercase().contains(&needle),
        })
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publications() -> Table {
        let mut table = Table::with_columns(["title", "venue"]);
        table.push_row(vec![Value::from("Graph Databases"), Value::from("VLDB")]);
        table.push_row(vec![Value::from("Query (Re)writing"), Value::from("SIGMOD")]);
        table.push_row(vec![Value::from("Untitled"), Value::Null]);
        table
    }

    #[test]
    fn test_matches_any_column_case_insensitive() {
        let mut table = publications();
        filter_contains(&mut table, &["title", "venue"], Some("sigmod"));
        assert_eq!(table.len(), 1);

        let mut table = publications();
        filter_contains(&mut table, &["title", "venue"], Some("GRAPH"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_needle_is_literal() {
        let mut table = publications();
        filter_contains(&mut table, &["title"], Some("(re)"));
        assert_eq!(table.len(), 1);

        let mut table = publications();
        filter_contains(&mut table, &["title"], Some(".*"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_blank_needle_keeps_everything() {
        let mut table = publications();
        filter_contains(&mut table, &["title"], None);
        filter_contains(&mut table, &["title"], Some(""));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_whitespace_in_needle_is_significant() {
        let mut table = Table::with_columns(["name"]);
        table.push_row(vec![Value::from("Ann Lee")]);
        table.push_row(vec![Value::from("Leeann Ray")]);

        filter_contains(&mut table, &["name"], Some(" Lee"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.row(0).unwrap().text("name").as_deref(), Some("Ann Lee"));
    }

    #[test]
    fn test_nulls_and_missing_columns_never_match() {
        let mut table = publications();
        filter_contains(&mut table, &["venue", "missing"], Some("u"));
        assert!(table.is_empty());
    }
}
