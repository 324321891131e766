use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Sign-derived colour of a numeric cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Gain,
    Loss,
    Plain,
}

/// Text plus the styling an output writer should apply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledValue {
    pub text: String,
    pub tint: Tint,
    pub emphasis: bool,
}

impl StyledValue {
    pub fn plain(text: impl Into<String>) -> Self {
        StyledValue {
            text: text.into(),
            tint: Tint::Plain,
            emphasis: false,
        }
    }
}

/// Formats a signed value with a tint that follows its sign; bold only when
/// `alert` is set.
pub fn style_value(value: f64, alert: bool) -> StyledValue {
    let tint = if value > 0.0 {
        Tint::Gain
    } else if value < 0.0 {
        Tint::Loss
    } else {
        Tint::Plain
    };
    StyledValue {
        text: format_decimal(value),
        tint,
        emphasis: alert,
    }
}

/// Two-decimal fixed-point text, rounding half away from zero on the
/// shortest decimal form of `value`. Small negatives keep their sign.
pub fn format_decimal(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    match Decimal::from_str(&magnitude.to_string()) {
        Ok(d) => {
            let mut rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            format!("{sign}{rounded}")
        }
        Err(_) => format!("{sign}{magnitude:.2}"),
    }
}

/// Creates a new `comfy_table::Table` with standard styling. Columns keep
/// their natural width and are never wrapped to the terminal.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Disabled);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

/// Converts a styled value into a right-aligned table cell.
pub fn styled_cell(value: &StyledValue) -> Cell {
    let mut cell = Cell::new(&value.text).set_alignment(CellAlignment::Right);
    cell = match value.tint {
        Tint::Gain => cell.fg(Color::Green),
        Tint::Loss => cell.fg(Color::Red),
        Tint::Plain => cell,
    };
    if value.emphasis {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

/// Creates a cell for values that could not be computed.
pub fn na_cell() -> Cell {
    Cell::new("N/A")
        .fg(Color::DarkGrey)
        .set_alignment(CellAlignment::Right)
}

/// Creates a spinner shown on stderr while a request is in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.tick();
    pb
}
