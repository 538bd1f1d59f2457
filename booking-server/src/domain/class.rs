//! Travel class filtering.

use std::fmt;

/// Wire value meaning "every class".
pub const ALL_CLASSES: &str = "All";

/// Which class types a train search should return.
///
/// # Examples
///
/// ```
/// use booking_server::domain::ClassFilter;
///
/// assert_eq!(ClassFilter::parse("All"), ClassFilter::All);
/// assert_eq!(ClassFilter::parse("3A"), ClassFilter::Only("3A".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassFilter {
    /// One row per class the train runs on that date.
    All,

    /// Only rows whose class type equals this exactly.
    Only(String),
}

impl ClassFilter {
    /// Interpret a present `class` query value.
    ///
    /// `"All"` in any ASCII case means no filter. Anything else is an exact
    /// class type.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case(ALL_CLASSES) {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// The class to filter on, if any.
    pub fn class_type(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(class) => Some(class),
        }
    }

    /// Whether a row of `class_type` passes this filter.
    pub fn matches(&self, class_type: &str) -> bool {
        self.class_type().is_none_or(|c| c == class_type)
    }
}

impl fmt::Display for ClassFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_type().unwrap_or(ALL_CLASSES))
    }
}
