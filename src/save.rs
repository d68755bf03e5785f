//! Save endpoint
//!
//! Accepts the JSON payloads the web front end posts and writes them through
//! a [`Store`]. Every outcome, including bad input, is reported in a
//! [`SaveResponse`] rather than as an error.

use crate::db::{DataKind, DbError, FeedbackRecord, Store, TagTable, append_feedback};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

/// Reply to a save request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    /// Feedback records after an append
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl SaveResponse {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            count: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            count: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SaveRequest {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

fn parse_kind(kind: &str) -> Option<DataKind> {
    match kind {
        "tags" => Some(DataKind::Tags),
        "feedback" => Some(DataKind::Feedback),
        _ => None,
    }
}

/// Replace a whole document: `{"type": "tags" | "feedback", "data": ...}`
#[must_use]
pub fn handle_save<S: Store + ?Sized>(store: &S, body: &str) -> SaveResponse {
    let request: SaveRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "malformed save request");
            return SaveResponse::failed("Failed to save data");
        }
    };
    let Some(kind) = parse_kind(&request.kind) else {
        warn!(kind = %request.kind, "save request for unknown data type");
        return SaveResponse::failed("Invalid data type");
    };

    let written = match kind {
        DataKind::Tags => serde_json::from_value::<TagTable>(request.data)
            .map_err(DbError::from)
            .and_then(|tags| store.save_tags(&tags)),
        DataKind::Feedback => serde_json::from_value::<Vec<FeedbackRecord>>(request.data)
            .map_err(DbError::from)
            .and_then(|records| store.save_feedback(&records)),
    };

    match written {
        Ok(()) => {
            info!(%kind, "saved data");
            SaveResponse::ok(format!("{kind} data saved successfully"))
        }
        Err(e) => {
            error!(%kind, error = %e, "failed to save data");
            SaveResponse::failed("Failed to save data")
        }
    }
}

/// Append one feedback record; a missing timestamp is set to now
#[must_use]
pub fn handle_feedback<S: Store + ?Sized>(store: &S, body: &str) -> SaveResponse {
    let appended = serde_json::from_str::<FeedbackRecord>(body)
        .map_err(DbError::from)
        .and_then(|record| append_feedback(store, record));

    match appended {
        Ok(count) => SaveResponse {
            count: Some(count),
            ..SaveResponse::ok("Feedback saved successfully")
        },
        Err(e) => {
            error!(error = %e, "failed to save feedback");
            SaveResponse::failed("Failed to save feedback")
        }
    }
}
