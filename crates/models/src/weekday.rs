use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// Day of the week a recurring schedule slot occurs on, Monday-based.
///
/// Parsing accepts both the short form used on the wire ("Mon") and the
/// full English name; display always produces the short form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Weekday {
    #[strum(to_string = "Mon", serialize = "Monday")]
    Monday = 0,
    #[strum(to_string = "Tue", serialize = "Tuesday")]
    Tuesday = 1,
    #[strum(to_string = "Wed", serialize = "Wednesday")]
    Wednesday = 2,
    #[strum(to_string = "Thu", serialize = "Thursday")]
    Thursday = 3,
    #[strum(to_string = "Fri", serialize = "Friday")]
    Friday = 4,
    #[strum(to_string = "Sat", serialize = "Saturday")]
    Saturday = 5,
    #[strum(to_string = "Sun", serialize = "Sunday")]
    Sunday = 6,
}

impl Weekday {
    /// Canonical persisted representation: 0 = Monday .. 6 = Sunday.
    pub fn to_index(self) -> i16 {
        self as i16
    }

    pub fn from_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(Self::Monday),
            1 => Some(Self::Tuesday),
            2 => Some(Self::Wednesday),
            3 => Some(Self::Thursday),
            4 => Some(Self::Friday),
            5 => Some(Self::Saturday),
            6 => Some(Self::Sunday),
            _ => None,
        }
    }
}
