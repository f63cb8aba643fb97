//! Stream status and progress projection.
//!
//! Turns a [`StreamRecord`] plus the current time plus optional
//! [`TokenMetadata`] into display-ready fields. Pure: no I/O, no mutation of
//! the input, never fails.
//!
//! Status is derived in fixed priority order, first match wins:
//! 1. `canceled_at > 0` -> [`StreamStatus::Canceled`]
//! 2. `now >= end` -> [`StreamStatus::Completed`]
//! 3. `now < start` -> [`StreamStatus::Scheduled`]
//! 4. otherwise -> [`StreamStatus::InProgress`]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::amount::{to_display, DEFAULT_DECIMALS};
use crate::tokens::TokenDirectory;
use crate::types::{StreamRecord, TokenMetadata};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamStatus {
    Canceled,
    Completed,
    Scheduled,
    InProgress,
}

impl StreamStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamStatus::Canceled => "canceled",
            StreamStatus::Completed => "completed",
            StreamStatus::Scheduled => "scheduled",
            StreamStatus::InProgress => "in progress",
        }
    }
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the status of a record at `now` (unix seconds).
pub fn status_of(record: &StreamRecord, now: u64) -> StreamStatus {
    if record.canceled_at > 0 {
        StreamStatus::Canceled
    } else if now >= record.end {
        StreamStatus::Completed
    } else if now < record.start {
        StreamStatus::Scheduled
    } else {
        StreamStatus::InProgress
    }
}

/// Withdrawn share of the deposit, clamped to `[0, 1]`.
///
/// A zero deposit has no meaningful ratio and yields `0.0`.
pub fn progress_ratio(withdrawn: f64, deposited: f64) -> f64 {
    if deposited <= 0.0 {
        return 0.0;
    }
    let ratio = withdrawn / deposited;
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Display-ready view of one stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub status: StreamStatus,
    pub decimals: u32,
    pub deposited_display: f64,
    pub withdrawn_display: f64,
    pub progress_ratio: f64,
    pub symbol: String,
    #[serde(rename = "logoURI")]
    pub logo_uri: String,
    pub display_name: String,
}

impl Projection {
    pub fn progress_percent(&self) -> f64 {
        self.progress_ratio * 100.0
    }
}

/// Project a single record.
pub fn project(record: &StreamRecord, now: u64, metadata: Option<&TokenMetadata>) -> Projection {
    let decimals = metadata.map_or(DEFAULT_DECIMALS, |m| m.decimals);
    let deposited_display = to_display(record.deposited_amount, decimals);
    let withdrawn_display = to_display(record.withdrawn_amount, decimals);

    Projection {
        status: status_of(record, now),
        decimals,
        deposited_display,
        withdrawn_display,
        progress_ratio: progress_ratio(withdrawn_display, deposited_display),
        symbol: metadata.map(|m| m.symbol.clone()).unwrap_or_default(),
        logo_uri: metadata.map(|m| m.logo_uri.clone()).unwrap_or_default(),
        display_name: metadata.map(|m| m.name.clone()).unwrap_or_default(),
    }
}

/// A stream id, its record, and the record's projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamRow {
    pub id: String,
    pub record: StreamRecord,
    pub projection: Projection,
}

/// Sort `(id, record)` pairs by `start`, most recent first.
///
/// Stable: records with equal `start` keep their input order.
pub fn sort_by_start_desc(streams: &mut [(String, StreamRecord)]) {
    streams.sort_by(|a, b| b.1.start.cmp(&a.1.start));
}

/// Sort and project a collection for display.
pub fn project_all(
    mut streams: Vec<(String, StreamRecord)>,
    now: u64,
    directory: &TokenDirectory,
) -> Vec<StreamRow> {
    sort_by_start_desc(&mut streams);
    streams
        .into_iter()
        .map(|(id, record)| {
            let projection = project(&record, now, directory.resolve(&record.mint));
            StreamRow {
                id,
                record,
                projection,
            }
        })
        .collect()
}
