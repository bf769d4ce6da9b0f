//! Chart specifications for the analytics panels.
//!
//! These are plain data; the client decides how to draw them.

use serde::Serialize;

use crate::model::{CollaboratorCount, FacultyCitationScore};

/// Headroom added above the tallest bar.
const BAR_HEADROOM: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
    /// Y axis starts at zero.
    pub y_range: (f64, f64),
}

/// Pie of top collaborating institutions.
pub fn collaborators_pie(counts: &[CollaboratorCount]) -> PieChart {
    PieChart {
        title: "Top Faculty Collaborators".to_string(),
        slices: counts
            .iter()
            .map(|c| PieSlice {
                label: c.university_name.clone(),
                value: c.faculty_count as f64,
            })
            .collect(),
    }
}

/// Bar chart of top faculty by keyword-weighted citations. `None` when
/// there is nothing to plot.
pub fn top_faculty_bars(scores: &[FacultyCitationScore]) -> Option<BarChart> {
    let max = scores
        .iter()
        .map(|s| s.accumulated_citations)
        .reduce(f64::max)?;

    Some(BarChart {
        x_label: "Faculty Member Name".to_string(),
        y_label: "Accumulated Citations".to_string(),
        bars: scores
            .iter()
            .map(|s| Bar {
                category: s.name.clone(),
                value: s.accumulated_citations,
            })
            .collect(),
        y_range: (0.0, max + BAR_HEADROOM),
    })
}
