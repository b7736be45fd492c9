//! Account Data

use crate::domain::accounts::records::UserUuid;

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// UUID to assign to the user row.
    pub uuid: UserUuid,

    /// Login name; must be unique.
    pub username: String,

    /// Contact email address.
    pub email: String,
}
