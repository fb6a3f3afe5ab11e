use crate::model::Recipe;

mod markdown;
mod plain_text;

pub use self::markdown::MarkdownParser;
pub use self::plain_text::PlainTextParser;

/// Turns raw recipe text into a [`Recipe`].
///
/// Parsing never fails: text without recognizable structure yields a recipe
/// whose sections are empty.
pub trait RecipeParser: Send + Sync {
    fn parser_name(&self) -> &str;
    fn parse(&self, input: &str) -> Recipe;
}

/// Strip a leading `- ` or `* ` list marker.
fn strip_list_marker(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}

/// Append a line to a newline-joined text field.
fn push_line(field: &mut String, line: &str) {
    if !field.is_empty() {
        field.push('\n');
    }
    field.push_str(line);
}
