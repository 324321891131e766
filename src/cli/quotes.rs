use super::ui::{self, StyledValue};
use crate::core::QuoteRecord;
use crate::core::config::DEFAULT_ALERT_THRESHOLD;
use chrono::{Local, TimeZone, Utc};
use chrono_tz::Tz;
use comfy_table::Cell;
use std::fmt::Display;
use tracing::{debug, warn};

const TIME_FORMAT: &str = "%m-%d %H:%M:%S %Z";
const ALERT_MARKER: &str = "!";
const HEADERS: [&str; 9] = [
    "!", "Sym", "Latest", "Open", "Close", "Chg", "%Chg", "VolM", "Time",
];

/// Zone used for the time column. `Local` prints a numeric offset and is
/// only used when the system zone has no IANA name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayZone {
    Local,
    Named(Tz),
}

impl DisplayZone {
    /// Resolves a configured IANA zone name. Without one, the system zone is
    /// used.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            None => DisplayZone::system(),
            Some(name) => match name.parse::<Tz>() {
                Ok(tz) => DisplayZone::Named(tz),
                Err(e) => {
                    warn!("Unknown timezone '{}': {}, using system zone", name, e);
                    DisplayZone::system()
                }
            },
        }
    }

    /// The system zone, looked up by name so abbreviations like `EST` render.
    pub fn system() -> Self {
        DisplayZone::from_system_name(iana_time_zone::get_timezone())
    }

    fn from_system_name<E: Display>(lookup: Result<String, E>) -> Self {
        match lookup {
            Ok(name) => match name.parse::<Tz>() {
                Ok(tz) => DisplayZone::Named(tz),
                Err(e) => {
                    debug!("System timezone '{}' not recognised: {}", name, e);
                    DisplayZone::Local
                }
            },
            Err(e) => {
                debug!("Could not determine system timezone: {}", e);
                DisplayZone::Local
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Fractional move that flags a row, `0.05` is 5%.
    pub alert_threshold: f64,
    pub zone: DisplayZone,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            zone: DisplayZone::system(),
        }
    }
}

/// All display columns of one quote, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRow {
    pub alert: bool,
    pub marker: &'static str,
    pub symbol: String,
    pub latest: StyledValue,
    pub open: StyledValue,
    pub close: StyledValue,
    pub change: StyledValue,
    pub change_pct: StyledValue,
    pub volume_millions: String,
    pub time: Option<String>,
}

pub fn is_alert(record: &QuoteRecord, threshold: f64) -> bool {
    record.change_pct.abs() > threshold
}

fn price_value(value: f64, alert: bool) -> StyledValue {
    StyledValue {
        emphasis: alert,
        ..StyledValue::plain(ui::format_decimal(value))
    }
}

pub fn format_timestamp(millis: i64, zone: DisplayZone) -> Option<String> {
    match zone {
        DisplayZone::Local => Local
            .timestamp_millis_opt(millis)
            .single()
            .map(|ts| ts.format(TIME_FORMAT).to_string()),
        DisplayZone::Named(tz) => Utc
            .timestamp_millis_opt(millis)
            .single()
            .map(|ts| ts.with_timezone(&tz).format(TIME_FORMAT).to_string()),
    }
}

pub fn quote_row(record: &QuoteRecord, options: &RenderOptions) -> QuoteRow {
    let alert = is_alert(record, options.alert_threshold);
    QuoteRow {
        alert,
        marker: if alert { ALERT_MARKER } else { " " },
        symbol: record.symbol.clone(),
        latest: price_value(record.latest, alert),
        open: price_value(record.open, alert),
        close: price_value(record.close, alert),
        change: ui::style_value(record.change, alert),
        change_pct: ui::style_value(record.change_pct * 100.0, alert),
        volume_millions: ui::format_decimal(record.volume as f64 / 1_000_000.0),
        time: format_timestamp(record.as_of, options.zone),
    }
}

impl QuoteRow {
    fn cells(&self) -> Vec<Cell> {
        let right = comfy_table::CellAlignment::Right;
        vec![
            Cell::new(self.marker).set_alignment(right),
            Cell::new(&self.symbol).set_alignment(right),
            ui::styled_cell(&self.latest),
            ui::styled_cell(&self.open),
            ui::styled_cell(&self.close),
            ui::styled_cell(&self.change),
            ui::styled_cell(&self.change_pct),
            Cell::new(&self.volume_millions).set_alignment(right),
            self.time
                .as_ref()
                .map_or_else(ui::na_cell, |t| Cell::new(t).set_alignment(right)),
        ]
    }
}

/// Renders already-ordered quotes as a table. Empty input gives a header-only
/// table.
pub fn quotes_table(records: &[QuoteRecord], options: &RenderOptions) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(HEADERS.iter().map(|h| ui::header_cell(h)).collect::<Vec<_>>());

    for record in records {
        table.add_row(quote_row(record, options).cells());
    }

    table.to_string()
}

pub fn display_quotes(records: &[QuoteRecord], options: &RenderOptions) {
    println!("{}", quotes_table(records, options));
}
