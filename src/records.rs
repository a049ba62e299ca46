//! Input records for movement analysis.
//!
//! A [`VisitRecord`] is one check-in: a user stamped a waypoint at a point in
//! time. The analysis pipeline consumes an ordered slice of these records;
//! parsing, validation, and any file I/O belong to the hosting layer. The
//! core assumes every record already carries a usable point label, user id,
//! and timestamp.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use stampgraph::records::VisitRecord;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//! let record = VisitRecord::new("user-1", "Gate A", ts);
//! assert_eq!(record.point, "Gate A");
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single check-in event at a waypoint.
///
/// Records are immutable input rows. Equality compares all three fields,
/// which makes fixtures and round-trip assertions straightforward in tests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Opaque stable identifier of the visitor.
    pub user_id: String,
    /// Label of the visited waypoint.
    pub point: String,
    /// When the check-in happened. Naive on purpose: rally logs carry local
    /// wall-clock timestamps without zone information.
    pub timestamp: NaiveDateTime,
}

impl VisitRecord {
    /// Creates a record from anything string-like.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use stampgraph::records::VisitRecord;
    ///
    /// let ts = NaiveDate::from_ymd_opt(2023, 1, 1)
    ///     .unwrap()
    ///     .and_hms_opt(9, 30, 0)
    ///     .unwrap();
    /// let r = VisitRecord::new(42.to_string(), "Plaza", ts);
    /// assert_eq!(r.user_id, "42");
    /// ```
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        point: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            point: point.into(),
            timestamp,
        }
    }
}
