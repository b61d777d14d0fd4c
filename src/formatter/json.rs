//! Indented JSON rendering of query results

use colored_json::{ColorMode, ColoredFormatter, Output, PrettyFormatter};
use serde_json::Value;

use crate::error::Result;

/// JSON formatter with configurable indentation
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    /// Spaces per indentation level
    indent: usize,

    /// Enable colored output
    use_colors: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    ///
    /// # Arguments
    /// * `indent` - Spaces per indentation level
    /// * `use_colors` - Enable colored output (only applied on a terminal)
    pub fn new(indent: usize, use_colors: bool) -> Self {
        Self { indent, use_colors }
    }

    /// Render a value as indented JSON
    pub fn format_value(&self, value: &Value) -> Result<String> {
        let mode = if self.use_colors {
            ColorMode::Auto(Output::StdOut)
        } else {
            ColorMode::Off
        };
        self.render(value, mode)
    }

    /// Serialize with the configured indent, coloring tokens when `mode` allows
    fn render(&self, value: &Value, mode: ColorMode) -> Result<String> {
        let indent = " ".repeat(self.indent);
        let formatter = ColoredFormatter::new(PrettyFormatter::with_indent(indent.as_bytes()));
        Ok(formatter.to_colored_json(value, mode)?)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(4, false)
    }
}
