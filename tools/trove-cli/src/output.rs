//! Terminal rendering for the trove CLI.

use std::time::Duration;

use console::{measure_text_width, style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use trove_screens::{Notice, NoticeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Success,
    Warn,
    Error,
    Debug,
}

impl Tone {
    fn marker(self) -> StyledObject<&'static str> {
        match self {
            Tone::Info => style("ℹ").blue(),
            Tone::Success => style("✓").green(),
            Tone::Warn => style("⚠").yellow(),
            Tone::Error => style("✗").red(),
            Tone::Debug => style("→").dim(),
        }
    }

    fn is_diagnostic(self) -> bool {
        matches!(self, Tone::Warn | Tone::Error | Tone::Debug)
    }
}

/// Human or JSON output, chosen once per invocation.
///
/// In JSON mode only [`Output::json`] and errors are written; everything
/// else is suppressed so stdout stays machine-readable.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn say(&self, tone: Tone, msg: &str) {
        if self.json {
            return;
        }
        let line = format!("{} {}", tone.marker(), msg);
        if tone.is_diagnostic() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    pub fn info(&self, msg: &str) {
        self.say(Tone::Info, msg);
    }

    pub fn success(&self, msg: &str) {
        self.say(Tone::Success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.say(Tone::Warn, msg);
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            self.say(Tone::Error, &style(msg).red().to_string());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.say(Tone::Debug, &style(msg).dim().to_string());
        }
    }

    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn json<T: Serialize>(&self, value: &T) {
        if let Ok(text) = serde_json::to_string_pretty(value) {
            println!("{text}");
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    pub fn table(&self, table: &Table) {
        if self.json {
            return;
        }
        for line in table.render() {
            println!("  {line}");
        }
    }

    /// A screen's dialog: title and message, styled by kind.
    pub fn notice(&self, notice: &Notice) {
        let text = format!("{}: {}", notice.title(), notice.message);
        match notice.kind {
            NoticeKind::Success => self.success(&text),
            NoticeKind::Error => self.error(&text),
        }
    }

    /// Spinner shown while a request is in flight; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner().with_message(msg.to_string());
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(template);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Left-aligned columns, each as wide as its widest cell.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    // Styled cells carry escape codes; measure what the terminal shows.
    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let width = measure_text_width(cell);
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(width),
                    None => widths.push(width),
                }
            }
        }
        widths
    }

    /// Header line followed by one line per row, without trailing padding.
    pub fn render(&self) -> Vec<String> {
        let widths = self.widths();
        let line = |cells: &[String]| {
            let padded: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let pad = widths[i].saturating_sub(measure_text_width(cell));
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect();
            padded.join("  ").trim_end().to_string()
        };

        std::iter::once(style(line(&self.headers)).bold().to_string())
            .chain(self.rows.iter().map(|row| line(row)))
            .collect()
    }
}

/// Marker for a product that is already in the cart.
pub fn cart_badge(in_cart: bool) -> String {
    if in_cart {
        style("in cart").green().to_string()
    } else {
        style("-").dim().to_string()
    }
}

/// Filled or empty heart.
pub fn favorite_badge(favorite: bool) -> String {
    if favorite {
        style("♥").red().to_string()
    } else {
        style("♡").dim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use console::strip_ansi_codes;

    use super::*;

    fn plain(table: &Table) -> Vec<String> {
        table
            .render()
            .iter()
            .map(|line| strip_ansi_codes(line).to_string())
            .collect()
    }

    #[test]
    fn test_table_columns_fit_widest_cell() {
        let mut table = Table::new(&["SKU", "NAME", "PRICE"]);
        table.row(["1", "Galaxy S24 Ultra", "$1299.99"]);
        table.row(["12", "TV", "$500"]);

        assert_eq!(
            plain(&table),
            [
                "SKU  NAME              PRICE",
                "1    Galaxy S24 Ultra  $1299.99",
                "12   TV                $500",
            ]
        );
    }

    #[test]
    fn test_table_ignores_escape_codes_when_measuring() {
        let badge = style("in cart").green().force_styling(true).to_string();
        let mut table = Table::new(&["CART", "SKU"]);
        table.row([badge, "3".to_string()]);

        assert_eq!(plain(&table)[1], "in cart  3");
    }
}
