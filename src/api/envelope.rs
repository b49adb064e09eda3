//! Ordered unwrapping of API response envelopes
//!
//! The API has wrapped payloads in several shapes over time: `{"data": {"blogs": [..]}}`,
//! `{"data": [..]}`, or the bare array/object. Each endpoint declares an
//! ordered list of [`ExtractionRule`]s. For detail payloads the first rule
//! whose value deserializes into the expected type wins; list payloads are
//! decoded item by item (see [`unwrap_list`]).

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{trace, warn};

/// Where to look for the payload inside a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionRule {
    /// Follow object keys from the root
    KeyPath(&'static [&'static str]),
    /// The body itself is the payload
    Bare,
}

impl ExtractionRule {
    /// Value this rule points at, if present
    #[must_use]
    pub fn select<'v>(&self, body: &'v Value) -> Option<&'v Value> {
        match self {
            ExtractionRule::KeyPath(path) => path.iter().try_fold(body, |value, key| value.get(key)),
            ExtractionRule::Bare => Some(body),
        }
    }
}

pub const BLOG_LIST_RULES: &[ExtractionRule] = &[
    ExtractionRule::KeyPath(&["data", "blogs"]),
    ExtractionRule::KeyPath(&["data"]),
    ExtractionRule::Bare,
];

pub const BLOG_DETAIL_RULES: &[ExtractionRule] = &[
    ExtractionRule::KeyPath(&["data", "blog"]),
    ExtractionRule::KeyPath(&["data"]),
    ExtractionRule::Bare,
];

pub const EVENT_LIST_RULES: &[ExtractionRule] = &[
    ExtractionRule::KeyPath(&["data", "events"]),
    ExtractionRule::KeyPath(&["data"]),
    ExtractionRule::Bare,
];

pub const EVENT_DETAIL_RULES: &[ExtractionRule] = &[
    ExtractionRule::KeyPath(&["data", "event"]),
    ExtractionRule::KeyPath(&["data"]),
    ExtractionRule::Bare,
];

/// Evaluate `rules` in order against `body`
///
/// Returns `None` when no rule yields a value of type `T`.
pub fn unwrap_payload<T: DeserializeOwned>(body: &Value, rules: &[ExtractionRule]) -> Option<T> {
    rules.iter().find_map(|rule| {
        let candidate = rule.select(body)?;
        match T::deserialize(candidate) {
            Ok(payload) => Some(payload),
            Err(error) => {
                trace!(?rule, %error, "extraction rule did not match");
                None
            }
        }
    })
}

/// Evaluate `rules` in order against `body` for a list payload
///
/// The first rule pointing at an array wins. Items that do not deserialize
/// into `T` are skipped, so one malformed record leaves the rest intact.
/// Returns `None` when no rule points at an array.
pub fn unwrap_list<T: DeserializeOwned>(body: &Value, rules: &[ExtractionRule]) -> Option<Vec<T>> {
    let items = rules
        .iter()
        .find_map(|rule| rule.select(body).and_then(Value::as_array))?;

    let records = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(index, %error, "skipping malformed list item");
                None
            }
        })
        .collect();
    Some(records)
}
