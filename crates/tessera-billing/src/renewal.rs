//! Renewal-date computation
//!
//! Renewal arithmetic is calendar-aware, not fixed-length: one month from
//! Jan 15 is Feb 15, and overflow days clamp to the end of the shorter
//! month (Jan 31 plus one month is Feb 28, or Feb 29 in a leap year).

use chrono::{DateTime, Months, Utc};

use crate::plan::Term;

/// Compute the next renewal date for a term, anchored at `now`.
///
/// Monthly terms advance one calendar month, annual terms twelve. The
/// time of day is preserved.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tessera_billing::{compute_renewal, Term};
///
/// let jan_31 = Utc.with_ymd_and_hms(2025, 1, 31, 9, 30, 0).unwrap();
/// let renewal = compute_renewal(Term::Monthly, jan_31);
/// assert_eq!(renewal, Utc.with_ymd_and_hms(2025, 2, 28, 9, 30, 0).unwrap());
/// ```
pub fn compute_renewal(term: Term, now: DateTime<Utc>) -> DateTime<Utc> {
    match term {
        Term::Monthly => now + Months::new(1),
        Term::Annually => now + Months::new(12),
    }
}
