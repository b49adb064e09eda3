//! Event status and the upcoming/past split of the events page

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Reverse;

use crate::api::Event;
use crate::formatting::parse_api_datetime;
use crate::utils::PAST_EVENTS_LIMIT;

/// Registration state of an event relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Completed,
    RegistrationClosed,
    RegistrationOpen,
    Upcoming,
}

impl EventStatus {
    /// Status of `event` at `now`
    ///
    /// The booking window closes at `booking_end_date`, or at the event
    /// itself when no booking end is set. Unparseable dates compare as
    /// neither before nor after, which lands on `Upcoming`.
    #[must_use]
    pub fn for_event(event: &Event, now: DateTime<Utc>) -> Self {
        let event_date = event.event_date.as_deref().and_then(parse_api_datetime);
        let booking_end = match event.booking_end_date.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_api_datetime(raw),
            _ => event_date,
        };

        if event_date.is_some_and(|date| date < now) {
            EventStatus::Completed
        } else if booking_end.is_some_and(|end| end < now) {
            EventStatus::RegistrationClosed
        } else if booking_end.is_some_and(|end| end > now) {
            EventStatus::RegistrationOpen
        } else {
            EventStatus::Upcoming
        }
    }

    /// Badge text on event cards
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Completed => "Completed",
            EventStatus::RegistrationClosed => "Registration Closed",
            EventStatus::RegistrationOpen => "Registration Open",
            EventStatus::Upcoming => "Upcoming",
        }
    }

    /// Badge text on the event detail page
    #[must_use]
    pub fn detail_label(self) -> &'static str {
        match self {
            EventStatus::Completed => "Event Completed",
            EventStatus::Upcoming => "Upcoming Event",
            other => other.label(),
        }
    }

    #[must_use]
    pub fn can_register(self) -> bool {
        self == EventStatus::RegistrationOpen
    }
}

/// Events grouped for the events page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSchedule {
    /// First upcoming event in API order
    pub featured: Option<Event>,
    /// Remaining upcoming events, soonest first
    pub upcoming: Vec<Event>,
    /// Most recent past events, newest first
    pub past: Vec<Event>,
}

impl EventSchedule {
    /// Split events around `now`
    ///
    /// Events without a parseable date are treated as past.
    #[must_use]
    pub fn partition(events: Vec<Event>, now: DateTime<Utc>) -> Self {
        let mut upcoming: Vec<(DateTime<Utc>, Event)> = Vec::new();
        let mut past: Vec<(Option<DateTime<Utc>>, Event)> = Vec::new();

        for event in events {
            match event.event_date.as_deref().and_then(parse_api_datetime) {
                Some(date) if date >= now => upcoming.push((date, event)),
                date => past.push((date, event)),
            }
        }

        let featured = if upcoming.is_empty() {
            None
        } else {
            Some(upcoming.remove(0).1)
        };

        upcoming.sort_by_key(|(date, _)| *date);
        past.sort_by_key(|(date, _)| Reverse(*date));
        past.truncate(PAST_EVENTS_LIMIT);

        Self {
            featured,
            upcoming: upcoming.into_iter().map(|(_, event)| event).collect(),
            past: past.into_iter().map(|(_, event)| event).collect(),
        }
    }
}
