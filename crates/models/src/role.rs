use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// Account role stored on a user record and attached to every session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Parent,
}
