//! Message definitions for the broker
//!
//! `Update` is a topic-scoped event before delivery. `ServerEvent` is the
//! outbound wire representation: a JSON object tagged by `type`, with
//! camelCase field names.
//!
//! Ids and payloads (`eventId`, `studentId`, `event`, `club`) are passed
//! through as raw JSON values; the broker never interprets them.
//!
//! Broadcast events carry `timestamp`, milliseconds since the UNIX epoch,
//! set by the broker when the event is fanned out. The two unicast
//! acknowledgements (`connection`, `subscribed`) carry no timestamp.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::Result;

pub const CONNECTED_MESSAGE: &str = "Connected to Events & Clubs live updates";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    Connection {
        message: String,
    },
    Subscribed {
        message: String,
    },
    EventCreated {
        event: Value,
        timestamp: i64,
    },
    EventUpdated {
        event: Value,
        timestamp: i64,
    },
    ClubApproved {
        club: Value,
        timestamp: i64,
    },
    Registration {
        event_id: Value,
        student_id: Value,
        timestamp: i64,
    },
    AttendanceMarked {
        event_id: Value,
        student_id: Value,
        timestamp: i64,
    },
}

impl ServerEvent {
    pub fn connected() -> Self {
        Self::Connection {
            message: CONNECTED_MESSAGE.to_string(),
        }
    }

    pub fn subscribed(faculty_id: &str) -> Self {
        Self::Subscribed {
            message: format!("Subscribed to live updates for faculty: {faculty_id}"),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn timestamp(&self) -> Option<i64> {
        match self {
            Self::Connection { .. } | Self::Subscribed { .. } => None,
            Self::EventCreated { timestamp, .. }
            | Self::EventUpdated { timestamp, .. }
            | Self::ClubApproved { timestamp, .. }
            | Self::Registration { timestamp, .. }
            | Self::AttendanceMarked { timestamp, .. } => Some(*timestamp),
        }
    }
}

/// A topic-scoped event waiting to be stamped and broadcast.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    EventCreated { event: Value },
    EventUpdated { event: Value },
    ClubApproved { club: Value },
    Registration { event_id: Value, student_id: Value },
    AttendanceMarked { event_id: Value, student_id: Value },
}

impl Update {
    /// The wire `type` this update is sent as.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EventCreated { .. } => "event_created",
            Self::EventUpdated { .. } => "event_updated",
            Self::ClubApproved { .. } => "club_approved",
            Self::Registration { .. } => "registration",
            Self::AttendanceMarked { .. } => "attendance_marked",
        }
    }

    pub fn stamp(self, timestamp: i64) -> ServerEvent {
        match self {
            Self::EventCreated { event } => ServerEvent::EventCreated { event, timestamp },
            Self::EventUpdated { event } => ServerEvent::EventUpdated { event, timestamp },
            Self::ClubApproved { club } => ServerEvent::ClubApproved { club, timestamp },
            Self::Registration {
                event_id,
                student_id,
            } => ServerEvent::Registration {
                event_id,
                student_id,
                timestamp,
            },
            Self::AttendanceMarked {
                event_id,
                student_id,
            } => ServerEvent::AttendanceMarked {
                event_id,
                student_id,
                timestamp,
            },
        }
    }
}
