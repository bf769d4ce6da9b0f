//! Typed records read out of tabular results.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::table::{Row, Table};

/// A university, as stored in the relational `university` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    pub photo_url: Option<String>,
}

impl Institution {
    pub fn from_row(row: Row<'_>) -> Option<Self> {
        let name = row.get("name")?.as_str()?.to_string();
        let photo_url = row
            .get("photo_url")
            .filter(|v| !v.is_null())
            .map(ToString::to_string);
        Some(Self { name, photo_url })
    }

    /// First institution in `table` with the given name.
    pub fn find(table: &Table, name: &str) -> Option<Self> {
        table
            .rows()
            .filter_map(Self::from_row)
            .find(|institution| institution.name == name)
    }
}

/// Another institution and how many distinct faculty of the selected one
/// co-published with its faculty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorCount {
    pub university_name: String,
    pub faculty_count: i64,
}

impl CollaboratorCount {
    pub fn from_row(row: Row<'_>) -> Option<Self> {
        Some(Self {
            university_name: row.text("university_name")?,
            faculty_count: row.get("faculty_count")?.as_i64()?,
        })
    }

    pub fn from_table(table: &Table) -> Vec<Self> {
        table.rows().filter_map(Self::from_row).collect()
    }
}

/// A faculty member's keyword-weighted citation score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyCitationScore {
    pub name: String,
    pub accumulated_citations: f64,
}

impl FacultyCitationScore {
    /// `None` when the score does not parse as a number.
    pub fn from_row(row: Row<'_>) -> Option<Self> {
        let score = row
            .get("accumulated_citations")?
            .as_f64()
            .filter(|s| !s.is_nan());
        let Some(accumulated_citations) = score else {
            debug!(row = ?row.text("name"), "Dropping faculty row with non-numeric score");
            return None;
        };
        Some(Self {
            name: row.text("name")?,
            accumulated_citations,
        })
    }

    pub fn from_table(table: &Table) -> Vec<Self> {
        table.rows().filter_map(Self::from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    #[test]
    fn test_find_institution_by_name() {
        let mut table = Table::with_columns(["id", "name", "photo_url"]);
        table.push_row(vec![Value::Int(1), Value::from("MIT"), Value::from("http://logo/mit.png")]);
        table.push_row(vec![Value::Int(2), Value::from("Rice"), Value::Null]);

        let mit = Institution::find(&table, "MIT").unwrap();
        assert_eq!(mit.photo_url.as_deref(), Some("http://logo/mit.png"));

        let rice = Institution::find(&table, "Rice").unwrap();
        assert_eq!(rice.photo_url, None);

        assert!(Institution::find(&table, "Yale").is_none());
    }

    #[test]
    fn test_scores_that_fail_to_parse_are_dropped() {
        let mut table = Table::with_columns(["name", "accumulated_citations"]);
        table.push_row(vec![Value::from("Ann"), Value::Float(9.0)]);
        table.push_row(vec![Value::from("Bob"), Value::Null]);
        table.push_row(vec![Value::from("Cid"), Value::from("12.5")]);
        table.push_row(vec![Value::from("Dee"), Value::from("NaN")]);
        table.push_row(vec![Value::from("Eve"), Value::from("lots")]);

        let scores = FacultyCitationScore::from_table(&table);
        let names: Vec<_> = scores.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Cid"]);
        assert_eq!(scores[1].accumulated_citations, 12.5);
    }

    #[test]
    fn test_collaborator_counts() {
        let mut table = Table::with_columns(["university_name", "faculty_count"]);
        table.push_row(vec![Value::from("C"), Value::Int(5)]);
        table.push_row(vec![Value::from("B"), Value::from("2")]);

        let counts = CollaboratorCount::from_table(&table);
        assert_eq!(counts[0].faculty_count, 5);
        assert_eq!(counts[1].faculty_count, 2);
    }
}
