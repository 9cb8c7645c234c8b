use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::broker::Update;

/// A message sent by a client, or posted by a backend collaborator to the
/// internal notify hook. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    Subscribe {
        faculty_id: String,
    },
    EventCreated {
        faculty_id: String,
        event: Value,
    },
    EventUpdated {
        faculty_id: String,
        event: Value,
    },
    ClubApproved {
        faculty_id: String,
        club: Value,
    },
    Registration {
        faculty_id: String,
        event_id: Value,
        student_id: Value,
    },
    AttendanceMarked {
        faculty_id: String,
        event_id: Value,
        student_id: Value,
    },
}

/// What a decoded `ClientMessage` asks the broker to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Subscribe { faculty_id: String },
    Broadcast { faculty_id: String, update: Update },
}

impl From<ClientMessage> for Command {
    fn from(message: ClientMessage) -> Self {
        match message {
            ClientMessage::Subscribe { faculty_id } => Command::Subscribe { faculty_id },
            ClientMessage::EventCreated { faculty_id, event } => Command::Broadcast {
                faculty_id,
                update: Update::EventCreated { event },
            },
            ClientMessage::EventUpdated { faculty_id, event } => Command::Broadcast {
                faculty_id,
                update: Update::EventUpdated { event },
            },
            ClientMessage::ClubApproved { faculty_id, club } => Command::Broadcast {
                faculty_id,
                update: Update::ClubApproved { club },
            },
            ClientMessage::Registration {
                faculty_id,
                event_id,
                student_id,
            } => Command::Broadcast {
                faculty_id,
                update: Update::Registration {
                    event_id,
                    student_id,
                },
            },
            ClientMessage::AttendanceMarked {
                faculty_id,
                event_id,
                student_id,
            } => Command::Broadcast {
                faculty_id,
                update: Update::AttendanceMarked {
                    event_id,
                    student_id,
                },
            },
        }
    }
}
