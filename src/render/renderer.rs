use std::io::{self, Write, stdout};

use crossterm::{
    cursor::{Hide, MoveTo, SetCursorStyle, Show},
    execute, queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use tracing::warn;

use crate::analysis::Analyzer;
use crate::app::Playground;
use crate::execution::{OutputKind, OutputSink};
use crate::theme::Theme;

pub struct Renderer {
    pub width: u16,
    pub height: u16,
}

/// Keeps the terminal in playground mode until dropped, unwinding included
pub struct TerminalGuard(());

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        Renderer::setup()?;
        Ok(Self(()))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = Renderer::teardown() {
            warn!(error = %err, "failed to restore terminal");
        }
    }
}

/// Vertical split of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    editor_height: u16,
    separator_row: u16,
    output_top: u16,
    output_height: u16,
    status_row: u16,
}

impl Layout {
    fn compute(height: u16, requested_output: u16) -> Self {
        // status + separator + at least one editor row
        let output_height = requested_output.min(height.saturating_sub(3));
        let editor_height = height.saturating_sub(output_height + 2).max(1);
        Self {
            editor_height,
            separator_row: editor_height,
            output_top: editor_height + 1,
            output_height,
            status_row: height.saturating_sub(1),
        }
    }
}

impl Renderer {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self { width, height })
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn setup() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    pub fn teardown() -> io::Result<()> {
        execute!(
            stdout(),
            SetCursorStyle::DefaultUserShape,
            Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Rows available to the editor pane, for scroll adjustment
    pub fn text_height<A: Analyzer>(&self, app: &Playground<A>) -> usize {
        Layout::compute(self.height, app.settings.output_height).editor_height as usize
    }

    pub fn render<A: Analyzer>(&self, app: &Playground<A>) -> io::Result<()> {
        let mut stdout = stdout();
        let layout = Layout::compute(self.height, app.settings.output_height);
        let theme = &app.theme;

        // Hide cursor during redraw to prevent flicker
        queue!(stdout, Hide)?;
        queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;

        self.render_editor(&mut stdout, app, &layout)?;
        self.render_separator(&mut stdout, app, &layout)?;
        self.render_output(&mut stdout, app.execution.output(), &layout, theme)?;
        self.render_status_line(&mut stdout, app, &layout)?;

        // Position cursor in the editor
        let pane = app.pane();
        let row = pane.cursor.line.saturating_sub(pane.scroll_offset) as u16;
        let col = gutter_width(app.settings.show_line_numbers) as usize + pane.cursor.col;
        queue!(
            stdout,
            MoveTo(col.min(self.width.saturating_sub(1) as usize) as u16, row),
            SetCursorStyle::SteadyBar,
            Show
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn render_editor<A: Analyzer>(
        &self,
        stdout: &mut impl Write,
        app: &Playground<A>,
        layout: &Layout,
    ) -> io::Result<()> {
        let pane = app.pane();
        let theme = &app.theme;
        let line_numbers = app.settings.show_line_numbers;
        let gutter = gutter_width(line_numbers);
        let text_width = self.width.saturating_sub(gutter) as usize;
        let line_count = pane.buffer.line_count();

        for row in 0..layout.editor_height {
            let line_idx = row as usize + pane.scroll_offset;
            queue!(stdout, MoveTo(0, row))?;
            queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;

            if line_idx >= line_count {
                // Empty line indicator
                queue!(stdout, SetForegroundColor(theme.line_number.to_crossterm()))?;
                let filler = format!("{:<width$}", "~", width = self.width as usize);
                queue!(stdout, Print(filler))?;
                continue;
            }

            // Marker sign
            match pane.marker_at(line_idx) {
                Some(marker) => {
                    queue!(
                        stdout,
                        SetForegroundColor(theme.severity(marker.severity).to_crossterm()),
                        Print(marker.severity.sign())
                    )?;
                }
                None => queue!(stdout, Print(' '))?,
            }

            // Line number
            if line_numbers {
                let color = if line_idx == pane.cursor.line {
                    theme.line_number_active
                } else {
                    theme.line_number
                };
                queue!(
                    stdout,
                    SetForegroundColor(color.to_crossterm()),
                    Print(format!("{:>4}", line_idx + 1))
                )?;
            }
            queue!(stdout, Print(' '))?;

            // Line content, coloured token by token
            let line = pane.buffer.line(line_idx).to_string();
            let content = line.trim_end_matches(['\n', '\r']);
            let mut remaining = text_width;
            let tokens = pane.tokens(content);
            if tokens.is_empty() {
                // No language registered
                let text: String = content.chars().take(remaining).collect();
                remaining -= text.chars().count();
                queue!(
                    stdout,
                    SetForegroundColor(theme.foreground.to_crossterm()),
                    Print(text)
                )?;
            }
            for token in tokens {
                if remaining == 0 {
                    break;
                }
                let text: String = content[token.start..token.end]
                    .chars()
                    .map(|c| if c == '\t' { ' ' } else { c })
                    .take(remaining)
                    .collect();
                remaining -= text.chars().count();
                queue!(
                    stdout,
                    SetForegroundColor(theme.token(token.kind).to_crossterm()),
                    Print(text)
                )?;
            }
            queue!(stdout, Print(" ".repeat(remaining)))?;
        }

        Ok(())
    }

    fn render_separator<A: Analyzer>(
        &self,
        stdout: &mut impl Write,
        app: &Playground<A>,
        layout: &Layout,
    ) -> io::Result<()> {
        let theme = &app.theme;
        let title = format!("── Output [{}] ", app.execution.state().display());
        let fill = (self.width as usize).saturating_sub(title.chars().count());

        queue!(
            stdout,
            MoveTo(0, layout.separator_row),
            SetBackgroundColor(theme.background.to_crossterm()),
            SetForegroundColor(theme.separator.to_crossterm()),
            Print(&title),
            Print("─".repeat(fill))
        )?;
        Ok(())
    }

    fn render_output(
        &self,
        stdout: &mut impl Write,
        output: &OutputSink,
        layout: &Layout,
        theme: &Theme,
    ) -> io::Result<()> {
        let rows = output_rows(output);
        let visible = layout.output_height as usize;
        let skip = rows.len().saturating_sub(visible);
        let width = self.width as usize;

        for row in 0..layout.output_height {
            queue!(
                stdout,
                MoveTo(0, layout.output_top + row),
                SetBackgroundColor(theme.background.to_crossterm())
            )?;
            match rows.get(skip + row as usize) {
                Some((kind, text)) => {
                    let clipped: String = text.chars().take(width).collect();
                    let pad = width.saturating_sub(clipped.chars().count());
                    queue!(
                        stdout,
                        SetForegroundColor(theme.output(*kind).to_crossterm()),
                        Print(clipped),
                        Print(" ".repeat(pad))
                    )?;
                }
                None => queue!(stdout, Print(" ".repeat(width)))?,
            }
        }
        Ok(())
    }

    fn render_status_line<A: Analyzer>(
        &self,
        stdout: &mut impl Write,
        app: &Playground<A>,
        layout: &Layout,
    ) -> io::Result<()> {
        let theme = &app.theme;
        let pane = app.pane();
        let (errors, warnings) = pane.marker_counts();

        let detail = app
            .message
            .clone()
            .or_else(|| pane.marker_at(pane.cursor.line).map(|m| m.message.clone()))
            .unwrap_or_default();

        let left = format!(
            " {} | {} | {} error(s) {} warning(s) | {}",
            pane.language().unwrap_or("text").to_uppercase(),
            app.execution.state().display(),
            errors,
            warnings,
            detail
        );
        let right = "Ctrl-R run  Ctrl-Q quit ";
        let width = self.width as usize;
        let left_width = width.saturating_sub(right.len());
        let left: String = left.chars().take(left_width).collect();
        let line = format!("{:<left_width$}{}", left, right);
        let line: String = line.chars().take(width).collect();

        queue!(
            stdout,
            MoveTo(0, layout.status_row),
            SetBackgroundColor(theme.status_bar_bg.to_crossterm()),
            SetForegroundColor(theme.status_bar_fg.to_crossterm()),
            SetAttribute(Attribute::Bold),
            Print(line),
            SetAttribute(Attribute::Reset)
        )?;
        Ok(())
    }
}

fn gutter_width(line_numbers: bool) -> u16 {
    if line_numbers { 6 } else { 2 }
}

/// Flatten output lines into screen rows, keeping each line's class
fn output_rows(output: &OutputSink) -> Vec<(OutputKind, &str)> {
    output
        .classified()
        .flat_map(|(kind, line)| line.split('\n').map(move |row| (kind, row)))
        .collect()
}
