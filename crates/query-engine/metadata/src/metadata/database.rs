//! The schema snapshot: what the catalog said about the database when the process started.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One row of catalog introspection: a (table, column, constraint) combination.
///
/// A table without columns, or a column without key constraints, still produces a row, with the
/// missing parts left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub table_schema: String,
    pub table_name: String,
    /// `BASE TABLE` or `VIEW`.
    pub table_type: String,
    pub column_name: Option<String>,
    pub data_type: Option<String>,
    /// `YES` or `NO`, as the catalog reports it.
    pub is_nullable: Option<String>,
    pub column_default: Option<String>,
    /// `PRIMARY KEY`, `FOREIGN KEY` or `UNIQUE`.
    pub constraint_type: Option<String>,
    pub constraint_name: Option<String>,
}

/// The schema description interpolated into every prompt.
///
/// Built once per process from the catalog and never modified afterwards; the rendered text is
/// computed at construction so every request sees exactly the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescription {
    records: Vec<CatalogRecord>,
    text: String,
}

impl SchemaDescription {
    /// Build a description from catalog records, in the order the catalog returned them.
    pub fn from_records(records: Vec<CatalogRecord>) -> Result<Self, serde_json::Error> {
        let text = serde_json::to_string(&records)?;
        Ok(SchemaDescription { records, text })
    }

    /// The serialized snapshot.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The schema-qualified names of every table in the snapshot.
    pub fn tables(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|record| format!("{}.{}", record.table_schema, record.table_name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn record(table: &str, column: &str, constraint: Option<(&str, &str)>) -> CatalogRecord {
        CatalogRecord {
            table_schema: "academics".to_string(),
            table_name: table.to_string(),
            table_type: "BASE TABLE".to_string(),
            column_name: Some(column.to_string()),
            data_type: Some("integer".to_string()),
            is_nullable: Some("NO".to_string()),
            column_default: None,
            constraint_type: constraint.map(|(kind, _)| kind.to_string()),
            constraint_name: constraint.map(|(_, name)| name.to_string()),
        }
    }

    #[test]
    fn renders_records_as_json_in_catalog_order() {
        let schema = SchemaDescription::from_records(vec![
            record(
                "departments",
                "department_id",
                Some(("PRIMARY KEY", "departments_pkey")),
            ),
            record("courses", "credits", None),
        ])
        .unwrap();

        let expected = concat!(
            r#"[{"table_schema":"academics","table_name":"departments","table_type":"BASE TABLE","#,
            r#""column_name":"department_id","data_type":"integer","is_nullable":"NO","#,
            r#""column_default":null,"constraint_type":"PRIMARY KEY","constraint_name":"departments_pkey"},"#,
            r#"{"table_schema":"academics","table_name":"courses","table_type":"BASE TABLE","#,
            r#""column_name":"credits","data_type":"integer","is_nullable":"NO","#,
            r#""column_default":null,"constraint_type":null,"constraint_name":null}]"#,
        );
        assert_eq!(schema.text(), expected);
    }

    #[test]
    fn rendering_is_deterministic() {
        let records = vec![
            record(
                "students",
                "student_id",
                Some(("PRIMARY KEY", "students_pkey")),
            ),
            record(
                "students",
                "major_department_id",
                Some(("FOREIGN KEY", "students_major_department_id_fkey")),
            ),
        ];

        let first = SchemaDescription::from_records(records.clone()).unwrap();
        let second = SchemaDescription::from_records(records).unwrap();

        assert_eq!(first.text(), second.text());
    }

    #[test]
    fn lists_each_table_once() {
        let schema = SchemaDescription::from_records(vec![
            record("students", "student_id", None),
            record("students", "first_name", None),
            record("departments", "name", None),
        ])
        .unwrap();

        assert_eq!(
            schema.tables().into_iter().collect::<Vec<_>>(),
            vec!["academics.departments", "academics.students"]
        );
        assert!(!schema.is_empty());
    }

    #[test]
    fn records_deserialize_from_catalog_rows() {
        let row = serde_json::json!({
            "table_schema": "research",
            "table_name": "projects",
            "table_type": "BASE TABLE",
            "column_name": "funding_amount",
            "data_type": "numeric",
            "is_nullable": "YES",
            "column_default": null,
            "constraint_type": null,
            "constraint_name": null
        });

        let record: CatalogRecord = serde_json::from_value(row).unwrap();

        assert_eq!(record.column_name.as_deref(), Some("funding_amount"));
        assert_eq!(record.constraint_type, None);
    }
}
