//! Markdown table helpers

/// Escape free text for a table cell: pipes would split the cell, newlines the row
pub fn escape_cell(text: &str) -> String {
    text.replace('|', r"\|").replace('\n', "<br>")
}

/// Wrap an identifier in backticks, escaping it for a table cell
pub fn code_cell(text: &str) -> String {
    format!("`{}`", escape_cell(text))
}

/// A pipe table built row by row. Cells are inserted as given; callers escape.
#[derive(Debug, Clone)]
pub struct Table {
    header: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: &[&'static str]) -> Self {
        Self {
            header: header.to_vec(),
            rows: Vec::new(),
        }
    }

    /// The four-column layout used for every field listing
    pub fn fields() -> Self {
        Self::new(&["Field", "Type", "Required", "Description"])
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header, separator and one line per row
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format!("| {} |", self.header.join(" | ")));
        lines.push(format!("|{}", "---|".repeat(self.header.len())));
        for row in &self.rows {
            lines.push(format!("| {} |", row.join(" | ")));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a | b"), r"a \| b");
        assert_eq!(escape_cell("line one\nline two"), "line one<br>line two");
        assert_eq!(escape_cell("plain"), "plain");
    }

    #[test]
    fn test_code_cell() {
        assert_eq!(code_cell("x|y"), r"`x\|y`");
    }

    #[test]
    fn test_table_lines() {
        let mut table = Table::fields();
        table.row(["`title`", "string", "Yes", "Title of the data sets."]);
        table.row(["`notes`", "string", "", ""]);

        assert_eq!(
            table.lines(),
            vec![
                "| Field | Type | Required | Description |",
                "|---|---|---|---|",
                "| `title` | string | Yes | Title of the data sets. |",
                "| `notes` | string |  |  |",
            ]
        );
        assert_eq!(table.len(), 2);
    }
}
