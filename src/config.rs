use alloc::string::String;

/// Separators used by [`Grid::render`](crate::Grid::render).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub cell_separator: String,
    pub row_separator: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_separator: String::from(" "),
            row_separator: String::from("\n"),
        }
    }
}

impl RenderConfig {
    pub fn new(cell_separator: impl Into<String>, row_separator: impl Into<String>) -> Self {
        Self {
            cell_separator: cell_separator.into(),
            row_separator: row_separator.into(),
        }
    }
}
