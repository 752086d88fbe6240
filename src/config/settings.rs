/// Playground settings that can be customized via the Rhai init script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    // Display
    pub theme: String,
    pub show_line_numbers: bool,
    pub tab_width: usize,
    pub output_height: u16, // Rows reserved for the output pane

    // Engine limits, shared by analysis and runs
    pub max_operations: u64, // 0 = unlimited
    pub max_expr_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "gruvbox-dark".to_string(),
            show_line_numbers: true,
            tab_width: 4,
            output_height: 10,

            max_operations: 5_000_000,
            max_expr_depth: 64,
        }
    }
}
