//! Wire timestamp encoding used by the document service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in time as the document service encodes it.
///
/// The service stores timestamps as `{ "seconds": i64, "nanos": u32 }`:
/// whole seconds since the Unix epoch plus a sub-second component. The sync
/// layer converts these to [`DateTime<Utc>`] exactly once at the fetch/create
/// boundary; everything downstream only ever sees normalized date-time
/// values, never this encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch.
    pub seconds: i64,
    /// Sub-second component in nanoseconds.
    pub nanos: u32,
}

impl Timestamp {
    /// Encode a normalized date-time for the wire.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos(),
        }
    }

    /// Decode to a normalized date-time.
    ///
    /// Returns `None` when the encoded value falls outside the representable
    /// date-time range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanos)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

/// Serde adapter for `DateTime<Utc>` fields stored as wire timestamps.
///
/// Apply with `#[serde(with = "opsdeck_core::timestamp::wire_datetime")]` to
/// a draft field whose document representation is the `{seconds, nanos}`
/// encoding rather than an RFC 3339 string.
pub mod wire_datetime {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Timestamp;

    /// Serialize the date-time in wire encoding.
    ///
    /// # Errors
    ///
    /// Returns any error produced by the underlying serializer.
    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        Timestamp::from_datetime(*dt).serialize(serializer)
    }

    /// Deserialize a wire-encoded date-time.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a `{seconds, nanos}` map or the
    /// encoded value is out of range.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let ts = Timestamp::deserialize(deserializer)?;
        ts.to_datetime()
            .ok_or_else(|| serde::de::Error::custom("timestamp out of range"))
    }
}
