//! A small university database: the catalog rows describing it, and the rows it holds.

use serde_json::{json, Value};

use sql_agent::action::{ActionEvent, Property};

pub const GENERATOR_ACTION_GROUP: &str = "QueryGenerator";
pub const EXECUTOR_ACTION_GROUP: &str = "QueryExecutor";

/// (table, column, data type, nullable, default, constraint type, constraint name)
type Column = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
);

#[rustfmt::skip]
const ACADEMICS_COLUMNS: [Column; 17] = [
    ("courses", "course_id", "integer", "NO", Some("nextval('academics.courses_course_id_seq'::regclass)"), Some("PRIMARY KEY"), Some("courses_pkey")),
    ("courses", "department_id", "integer", "NO", None, Some("FOREIGN KEY"), Some("courses_department_id_fkey")),
    ("courses", "title", "character varying", "NO", None, None, None),
    ("courses", "credits", "integer", "NO", Some("3"), None, None),
    ("departments", "department_id", "integer", "NO", Some("nextval('academics.departments_department_id_seq'::regclass)"), Some("PRIMARY KEY"), Some("departments_pkey")),
    ("departments", "name", "character varying", "NO", None, Some("UNIQUE"), Some("departments_name_key")),
    ("departments", "building", "character varying", "YES", None, None, None),
    ("enrollments", "enrollment_id", "integer", "NO", Some("nextval('academics.enrollments_enrollment_id_seq'::regclass)"), Some("PRIMARY KEY"), Some("enrollments_pkey")),
    ("enrollments", "student_id", "integer", "NO", None, Some("FOREIGN KEY"), Some("enrollments_student_id_fkey")),
    ("enrollments", "course_id", "integer", "NO", None, Some("FOREIGN KEY"), Some("enrollments_course_id_fkey")),
    ("enrollments", "semester", "character varying", "NO", None, None, None),
    ("enrollments", "grade", "character", "YES", None, None, None),
    ("students", "student_id", "integer", "NO", Some("nextval('academics.students_student_id_seq'::regclass)"), Some("PRIMARY KEY"), Some("students_pkey")),
    ("students", "first_name", "character varying", "NO", None, None, None),
    ("students", "last_name", "character varying", "NO", None, None, None),
    ("students", "major_department_id", "integer", "YES", None, Some("FOREIGN KEY"), Some("students_major_department_id_fkey")),
    ("students", "enrolled_on", "date", "NO", Some("CURRENT_DATE"), None, None),
];

/// The catalog query's rows for the `academics` schema, in catalog order.
pub fn academics_catalog_rows() -> Vec<Value> {
    ACADEMICS_COLUMNS
        .iter()
        .map(
            |(table, column, data_type, nullable, default, constraint_type, constraint_name)| {
                json!({
                    "table_schema": "academics",
                    "table_name": table,
                    "table_type": "BASE TABLE",
                    "column_name": column,
                    "data_type": data_type,
                    "is_nullable": nullable,
                    "column_default": default,
                    "constraint_type": constraint_type,
                    "constraint_name": constraint_name,
                })
            },
        )
        .collect()
}

pub fn department_rows() -> Vec<Value> {
    vec![
        json!({ "department_id": 1, "name": "Mathematics" }),
        json!({ "department_id": 2, "name": "Physics" }),
        json!({ "department_id": 3, "name": "History" }),
    ]
}

pub fn generate_event(prompt: &str) -> ActionEvent {
    ActionEvent::new(
        GENERATOR_ACTION_GROUP,
        "/generate",
        vec![Property::string("prompt", prompt)],
    )
}

pub fn execute_event(query: &str) -> ActionEvent {
    ActionEvent::new(
        EXECUTOR_ACTION_GROUP,
        "/execute",
        vec![Property::string("query", query)],
    )
}
