//! Query assemblers for the dashboard views.
//!
//! Every user-supplied value is bound as a parameter; nothing is spliced
//! into statement text.

use serde_json::json;

use crate::store::{GraphStatement, Pipeline, SqlStatement};

/// Document collection holding faculty members.
pub const FACULTY_COLLECTION: &str = "faculty";
/// Document collection holding publications.
pub const PUBLICATIONS_COLLECTION: &str = "publications";

/// Maximum rows returned by the analytics queries.
pub const TOP_LIMIT: i64 = 10;

/// All institutions.
pub fn all_institutions() -> SqlStatement {
    SqlStatement::new("SELECT * FROM university")
}

/// Distinct keyword names reachable from an institution through its
/// faculty.
pub fn keywords_for_institution(institution: &str) -> SqlStatement {
    SqlStatement::new(
        "SELECT DISTINCT keyword
         FROM university_keywords_view
         WHERE university_name = ?",
    )
    .bind(institution)
}

/// Faculty affiliated with an institution, sorted by name.
pub fn faculty_by_institution(institution: &str) -> Pipeline {
    vec![
        json!({ "$match": { "affiliation.name": institution } }),
        json!({ "$project": { "_id": 0, "name": 1, "phone": 1, "email": 1 } }),
        json!({ "$sort": { "name": 1 } }),
    ]
}

/// Publications tagged with a keyword, keyword objects reduced to names.
pub fn publications_by_keyword(keyword: &str) -> Pipeline {
    vec![
        json!({ "$match": { "keywords.name": keyword } }),
        json!({
            "$project": {
                "_id": 0,
                "title": 1,
                "venue": 1,
                "year": 1,
                "numCitations": 1,
                "keywords": {
                    "$map": { "input": "$keywords", "as": "keyword", "in": "$$keyword.name" }
                }
            }
        }),
    ]
}

/// Institutions whose faculty co-published with faculty of `institution`,
/// ranked by the number of distinct co-authoring faculty.
pub fn top_collaborators(institution: &str) -> GraphStatement {
    GraphStatement::new(
        "MATCH (selected:INSTITUTE {name: $institution})<-[:AFFILIATION_WITH]-(selected_faculty:FACULTY)
               -[:PUBLISH]->(:PUBLICATION)<-[:PUBLISH]-(faculty:FACULTY)
               -[:AFFILIATION_WITH]->(university:INSTITUTE)
         WHERE selected <> university
         RETURN university.name AS university_name,
                COUNT(DISTINCT selected_faculty) AS faculty_count
         ORDER BY faculty_count DESC
         LIMIT $limit",
        &["university_name", "faculty_count"],
    )
    .param("institution", institution)
    .param("limit", TOP_LIMIT)
}

/// Faculty of `institution` ranked by keyword-weighted citations: the sum
/// of `LABEL_BY.score * numCitations` over their publications tagged with
/// `keyword`.
pub fn top_faculty_by_keyword(institution: &str, keyword: &str) -> GraphStatement {
    GraphStatement::new(
        "MATCH (university:INSTITUTE {name: $institution})<-[:AFFILIATION_WITH]-(faculty:FACULTY)
               -[:PUBLISH]->(publication:PUBLICATION)
               -[label_by:LABEL_BY]->(:KEYWORD {name: $keyword})
         WITH faculty, label_by.score AS score, publication.numCitations AS citations
         WITH faculty, SUM(score * citations) AS accumulated_citations
         ORDER BY accumulated_citations DESC
         LIMIT $limit
         RETURN faculty.name AS name, accumulated_citations",
        &["name", "accumulated_citations"],
    )
    .param("institution", institution)
    .param("keyword", keyword)
    .param("limit", TOP_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    #[test]
    fn test_values_are_bound_not_interpolated() {
        let hostile = "MIT'}) DETACH DELETE (n) //";
        let stmt = top_faculty_by_keyword(hostile, "graphs");
        assert!(!stmt.cypher.contains(hostile));
        assert!(stmt.params.contains(&("institution".to_string(), Value::from(hostile))));
        assert!(stmt.params.contains(&("keyword".to_string(), Value::from("graphs"))));

        let sql = keywords_for_institution(hostile);
        assert!(!sql.sql.contains(hostile));
        assert_eq!(sql.params, vec![Value::from(hostile)]);
    }

    #[test]
    fn test_graph_statements_declare_columns() {
        assert_eq!(top_collaborators("MIT").columns, vec!["university_name", "faculty_count"]);
        assert_eq!(
            top_faculty_by_keyword("MIT", "graphs").columns,
            vec!["name", "accumulated_citations"]
        );
    }

    #[test]
    fn test_faculty_pipeline_filters_on_affiliation() {
        let pipeline = faculty_by_institution("Stanford");
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline[0]["$match"]["affiliation.name"], "Stanford");
        assert_eq!(pipeline[1]["$project"]["_id"], 0);
    }

    #[test]
    fn test_publications_pipeline_maps_keyword_names() {
        let pipeline = publications_by_keyword("graphs");
        assert_eq!(pipeline[0]["$match"]["keywords.name"], "graphs");
        assert_eq!(pipeline[1]["$project"]["keywords"]["$map"]["in"], "$$keyword.name");
    }
}
