//! Display lookup for statuses and period dates.
//!
//! Kept apart from the classifier: rendering code reads these tables, the
//! engine never does.

use chrono::{Datelike, Days, NaiveDate};

use crate::growth::Growth;
use crate::period::Period;
use crate::status::OutbreakStatus;

/// How a status is shown in a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub status: OutbreakStatus,
    /// Style class for the cell.
    pub class: &'static str,
    /// Fixed text; `None` means show the growth percentage.
    pub text: Option<&'static str>,
}

/// One entry per status, in [`OutbreakStatus::ALL`] order.
pub const STATUS_STYLES: [StatusStyle; 7] = [
    StatusStyle {
        status: OutbreakStatus::None,
        class: "none",
        text: Some("No Outbreak"),
    },
    StatusStyle {
        status: OutbreakStatus::Starting,
        class: "starting",
        text: Some("Outbreak Starting"),
    },
    StatusStyle {
        status: OutbreakStatus::Losing,
        class: "losing",
        text: None,
    },
    StatusStyle {
        status: OutbreakStatus::Flattening,
        class: "flattening",
        text: None,
    },
    StatusStyle {
        status: OutbreakStatus::Crushing,
        class: "crushing",
        text: None,
    },
    StatusStyle {
        status: OutbreakStatus::Winning,
        class: "winning",
        text: None,
    },
    StatusStyle {
        status: OutbreakStatus::Won,
        class: "won",
        text: Some("Outbreak Defeated"),
    },
];

pub fn style_for(status: OutbreakStatus) -> &'static StatusStyle {
    &STATUS_STYLES[status as usize]
}

/// Cell text for a period: fixed text or the signed growth (`"-40%"`).
pub fn cell_text(period: &Period) -> String {
    match (style_for(period.status).text, period.growth) {
        (Some(text), _) => text.to_string(),
        (None, Growth::EmergingFromZero) => "new".to_string(),
        (None, growth) => format!("{}%", growth.rate().unwrap_or(0)),
    }
}

/// Last day of period `index` when period 0 ends on `reference`.
pub fn period_end_date(
    reference: NaiveDate,
    index: usize,
    period_length: usize,
) -> Option<NaiveDate> {
    let offset = (index as u64).checked_mul(period_length as u64)?;
    reference.checked_sub_days(Days::new(offset))
}

/// `day/month` label for the last day of period `index`.
pub fn period_label(reference: NaiveDate, index: usize, period_length: usize) -> String {
    match period_end_date(reference, index, period_length) {
        Some(date) => format!("{}/{}", date.day(), date.month()),
        None => format!("period {}", index),
    }
}
