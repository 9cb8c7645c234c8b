//! Server-initiated notifications.
//!
//! Backend components that change events or clubs (for example a REST
//! handler after committing a write) push the change to live clients through
//! a `Notifier`. Each call takes the same broadcast path as a client-sent
//! event and returns the number of connections it reached.

use std::sync::Arc;

use serde_json::Value;

use crate::broker::engine::Broker;
use crate::broker::message::Update;

#[derive(Debug, Clone)]
pub struct Notifier {
    broker: Arc<Broker>,
}

impl Notifier {
    pub fn new(broker: Arc<Broker>) -> Self {
        Self { broker }
    }

    pub fn notify_event_created(&self, faculty_id: &str, event: Value) -> usize {
        self.broker
            .broadcast(faculty_id, Update::EventCreated { event })
    }

    pub fn notify_event_updated(&self, faculty_id: &str, event: Value) -> usize {
        self.broker
            .broadcast(faculty_id, Update::EventUpdated { event })
    }

    pub fn notify_club_approved(&self, faculty_id: &str, club: Value) -> usize {
        self.broker
            .broadcast(faculty_id, Update::ClubApproved { club })
    }

    pub fn notify_registration(
        &self,
        faculty_id: &str,
        event_id: impl Into<Value>,
        student_id: impl Into<Value>,
    ) -> usize {
        self.broker.broadcast(
            faculty_id,
            Update::Registration {
                event_id: event_id.into(),
                student_id: student_id.into(),
            },
        )
    }

    pub fn notify_attendance_marked(
        &self,
        faculty_id: &str,
        event_id: impl Into<Value>,
        student_id: impl Into<Value>,
    ) -> usize {
        self.broker.broadcast(
            faculty_id,
            Update::AttendanceMarked {
                event_id: event_id.into(),
                student_id: student_id.into(),
            },
        )
    }
}
