//! The prompt sent to the language model.

/// No system instruction is sent; everything lives in the user turn.
pub const SYSTEM_PROMPT: &str = "";

const INSTRUCTIONS: &str = "\
Read the database schema inside the <database_schema></database_schema> tags. \
Every record names a table, one of its columns, the column type and nullability, \
and any key constraint the column takes part in. Then:
1. Write one syntactically valid SQL statement that answers the question.
2. Put the whole statement on a single line, replacing newlines with spaces.
3. Select only the columns the question needs, never every column of a table.
4. Use only tables and columns present in the schema, qualified with their schema name.
5. Prefix column names with their table when a name appears in more than one joined table.
6. Answer with the statement alone, without explanation, tags, or markdown.";

const EXAMPLES: &str = "\
<question>How many students are enrolled?</question>
<sql>SELECT COUNT(*) FROM academics.students</sql>
<question>How many students major in Mathematics?</question>
<sql>SELECT COUNT(*) FROM academics.students s JOIN academics.departments d ON s.major_department_id = d.department_id WHERE d.name = 'Mathematics'</sql>
<question>List the three departments with the most courses.</question>
<sql>SELECT d.name, COUNT(c.course_id) AS courses FROM academics.departments d JOIN academics.courses c ON c.department_id = d.department_id GROUP BY d.name ORDER BY courses DESC LIMIT 3</sql>";

/// Build the user prompt for a question: instructions, the schema embedded verbatim, a few
/// question/SQL examples, then the question itself.
pub fn build_prompt(schema_text: &str, question: &str) -> String {
    format!(
        "Answer the question at the end with a single SQL statement.\n\
         <instructions>\n{INSTRUCTIONS}\n</instructions>\n\
         <database_schema>{schema_text}</database_schema>\n\
         <examples>\n{EXAMPLES}\n</examples>\n\
         <question>{question}</question>"
    )
}
