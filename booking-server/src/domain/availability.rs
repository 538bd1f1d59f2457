//! Seat availability states.
//!
//! The availability table stores a free-text status per train, date and
//! class (e.g. `"AVAILABLE-42"`, `"waitlist-12"`, `"REGRET"`). This module
//! turns that text into a closed set of variants exactly once, so nothing
//! downstream has to re-parse strings.

use std::fmt;

const AVAILABLE: &str = "available";
const WAITLIST: &str = "waitlist";
const REGRET: &str = "regret";

/// Structured seat availability for one train/date/class.
///
/// # Examples
///
/// ```
/// use booking_server::domain::AvailabilityState;
///
/// assert_eq!(AvailabilityState::decode("AVAILABLE-7"), AvailabilityState::Available(7));
/// assert_eq!(AvailabilityState::decode("waitlist-3").to_string(), "Waitlist (3)");
/// assert_eq!(AvailabilityState::decode("Regret"), AvailabilityState::Regret);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AvailabilityState {
    /// Seats are open; the count may be zero when the status omits it.
    Available(u32),

    /// No seats; the next booking joins the waitlist at this position.
    Waitlisted(u32),

    /// No seats and no waitlist.
    Regret,

    /// Any status text we don't recognise, kept verbatim.
    Unrecognized(String),
}

impl AvailabilityState {
    /// Decode a raw status string.
    ///
    /// Matching is ASCII case-insensitive and checks `available`, then
    /// `waitlist`, then `regret`; the first token found wins. This never
    /// fails: unknown text becomes [`AvailabilityState::Unrecognized`].
    pub fn decode(raw: &str) -> Self {
        // ASCII folding keeps byte offsets aligned with `raw`.
        let folded = raw.to_ascii_lowercase();

        if let Some(pos) = folded.find(AVAILABLE) {
            return Self::Available(count_after(&folded[pos + AVAILABLE.len()..]));
        }
        if let Some(pos) = folded.find(WAITLIST) {
            return Self::Waitlisted(count_after(&folded[pos + WAITLIST.len()..]));
        }
        if folded.contains(REGRET) {
            return Self::Regret;
        }

        Self::Unrecognized(raw.to_string())
    }

    /// Text shown to the user for this state.
    pub fn display_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AvailabilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(seats) => write!(f, "Available ({seats} seats)"),
            Self::Waitlisted(position) => write!(f, "Waitlist ({position})"),
            Self::Regret => f.write_str("Regret/No Seats"),
            Self::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// Extract the number in the dash-separated segment that follows a token.
///
/// `"-12"`, `" - 12 seats"` and `"-12-extra"` all give 12. Anything else
/// (no dash, no digits, overflow) gives 0.
fn count_after(rest: &str) -> u32 {
    let Some(segment) = rest.trim_start().strip_prefix('-') else {
        return 0;
    };
    let segment = segment.trim_start();
    let digits_len = segment
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();

    segment[..digits_len].parse().unwrap_or(0)
}
