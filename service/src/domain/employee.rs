//! Building [`Employee`] definitions.

use std::str::FromStr;

use common::{define_kind, Money, Rate};
use derive_more::{AsRef, Display, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

/// Staff member of the building paid out of the building revenue.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Employee {
    /// ID of this [`Employee`].
    pub id: Id,

    /// [`FullName`] of this [`Employee`].
    pub full_name: FullName,

    /// [`Role`] of this [`Employee`].
    pub role: Role,

    /// Monthly base salary of this [`Employee`].
    pub base_salary: Money,

    /// Fraction of the building service revenue paid as a bonus.
    pub bonus_rate: Rate,

    /// [`Status`] of this [`Employee`].
    pub status: Status,
}

impl Employee {
    /// Indicates whether this [`Employee`] is paid for a month.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == Status::Working
    }
}

/// ID of an [`Employee`].
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Id(i32);

impl Id {
    /// Creates a new [`Id`] if the provided `id` is positive.
    #[must_use]
    pub fn new(id: i32) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }
}

/// Full name of an [`Employee`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct FullName(String);

impl FullName {
    /// Creates a new [`FullName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`FullName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 255
    }
}

impl FromStr for FullName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `FullName`")
    }
}

/// Position of an [`Employee`] in the building staff.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Role(String);

impl Role {
    /// Creates a new [`Role`] if the given `role` is valid.
    #[must_use]
    pub fn new(role: impl Into<String>) -> Option<Self> {
        let role = role.into();
        Self::check(&role).then_some(Self(role))
    }

    /// Checks whether the given `role` is a valid [`Role`].
    fn check(role: impl AsRef<str>) -> bool {
        let role = role.as_ref();
        role.trim() == role && !role.is_empty() && role.len() <= 128
    }
}

impl FromStr for Role {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Role`")
    }
}

define_kind! {
    #[doc = "Employment status of an [`Employee`]."]
    enum Status {
        #[doc = "[`Employee`] works in the building."]
        Working = 1,

        #[doc = "[`Employee`] has resigned."]
        Resigned = 2,
    }
}
