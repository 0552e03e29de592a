use std::fmt::Display;

use serde::{Deserialize, Serialize, Serializer};
use time::OffsetDateTime;

use crate::time_expr::{from_timestamp, to_timestamp};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Reminder {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub start: f64, // seconds since epoch
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_timestamp"
    )]
    pub end: Option<f64>,
}

impl Reminder {
    pub fn new(message: String, start: OffsetDateTime) -> Self {
        Reminder {
            message,
            start: to_timestamp(start),
            end: None,
        }
    }

    pub fn with_end(mut self, end: OffsetDateTime) -> Self {
        self.end = Some(to_timestamp(end));
        self
    }

    pub fn start_time(&self) -> Option<OffsetDateTime> {
        from_timestamp(self.start)
    }
}

// whole seconds are written as integers, so `1000` stays `1000` and not `1000.0`
fn serialize_timestamp<S: Serializer>(secs: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if secs.fract() == 0.0 && secs.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*secs as i64)
    } else {
        serializer.serialize_f64(*secs)
    }
}

fn serialize_optional_timestamp<S: Serializer>(
    secs: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secs {
        Some(secs) => serialize_timestamp(secs, serializer),
        None => serializer.serialize_none(),
    }
}

impl Display for Reminder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = if self.message.is_empty() {
            "<no message>"
        } else {
            self.message.as_str()
        };
        match self.start_time() {
            Some(start) => write!(f, "{: <15} {}", message, start),
            None => write!(f, "{: <15} {}", message, self.start),
        }
    }
}
