//! Statements the agent writes itself, and the wrapping applied to the ones it is given.

/// Introspects every table, column and key constraint outside the system schemas.
pub const CATALOG_QUERY: &str = include_str!("catalog.sql");

/// Checks that the database answers at all.
pub const HEALTH_CHECK_QUERY: &str = "select 1 as ok";

/// Alias of the wrapped statement inside `wrap_as_json_rows`.
const ROWS_ALIAS: &str = "agent_rows";

/// Wrap a row-producing statement so Postgres returns its whole result as a single JSON array of
/// row objects, with columns in select-list order.
///
/// Trailing semicolons are dropped, including ones followed only by line comments. The statement
/// is placed on its own lines so a trailing line comment cannot swallow the closing parenthesis.
/// Anything that is not a single row-producing statement fails in the database.
pub fn wrap_as_json_rows(sql: &str) -> String {
    let statement = strip_trailing_semicolons(sql);
    format!(
        "select coalesce(json_agg(row_to_json({ROWS_ALIAS})), '[]'::json) from (\n{statement}\n) as {ROWS_ALIAS}"
    )
}

fn strip_trailing_semicolons(sql: &str) -> String {
    let mut statement = sql.trim().to_string();
    loop {
        let code = statement[..end_of_code(&statement)].trim_end();
        match code.strip_suffix(';') {
            Some(rest) => statement = format!("{rest}{}", &statement[code.len()..]),
            None => return statement.trim_end().to_string(),
        }
    }
}

/// Where the statement ends once trailing line comments and whitespace are set aside.
fn end_of_code(sql: &str) -> usize {
    let mut end = sql.len();
    loop {
        let code = sql[..end].trim_end();
        let line_start = code.rfind('\n').map_or(0, |newline| newline + 1);
        match line_comment_start(&code[line_start..]) {
            Some(offset) => end = line_start + offset,
            None => return code.len(),
        }
    }
}

/// The offset of a `--` comment in one line, ignoring dashes inside string literals.
fn line_comment_start(line: &str) -> Option<usize> {
    line.match_indices("--")
        .map(|(offset, _)| offset)
        .find(|offset| line[..*offset].matches('\'').count() % 2 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_statement_in_json_aggregation() {
        assert_eq!(
            wrap_as_json_rows("SELECT department_id, name FROM academics.departments"),
            "select coalesce(json_agg(row_to_json(agent_rows)), '[]'::json) from (\n\
             SELECT department_id, name FROM academics.departments\n\
             ) as agent_rows"
        );
    }

    #[test]
    fn drops_trailing_semicolons() {
        let wrapped = wrap_as_json_rows("  select 1 ;; \n");
        assert!(wrapped.contains("(\nselect 1\n)"));
    }

    #[test]
    fn drops_semicolons_before_trailing_comments() {
        let statement = strip_trailing_semicolons("SELECT 1; -- done");
        assert_eq!(statement, "SELECT 1 -- done");
        assert_eq!(
            strip_trailing_semicolons("SELECT 1;\n-- note\n  -- another"),
            "SELECT 1\n-- note\n  -- another"
        );
        let wrapped = wrap_as_json_rows("SELECT 1; -- done");
        assert!(wrapped.contains("(\nSELECT 1 -- done\n)"));
    }

    #[test]
    fn keeps_semicolons_inside_string_literals() {
        assert_eq!(
            strip_trailing_semicolons("select 'a;--' as s"),
            "select 'a;--' as s"
        );
        assert_eq!(strip_trailing_semicolons("select ';'"), "select ';'");
    }

    #[test]
    fn catalog_query_orders_by_table_then_column_position() {
        let order_by = CATALOG_QUERY
            .lines()
            .find(|line| line.starts_with("order by"))
            .unwrap();
        assert_eq!(
            order_by,
            "order by t.table_name, t.table_schema, c.ordinal_position, kcu.constraint_name"
        );
    }

    #[test]
    fn catalog_query_survives_wrapping() {
        // the query ends in an order by without a semicolon, which is valid inside a subquery
        let wrapped = wrap_as_json_rows(CATALOG_QUERY);
        assert!(wrapped.ends_with("kcu.constraint_name\n) as agent_rows"));
    }
}
