//! [`Office`] definitions.

use std::str::FromStr;

use common::Money;
use derive_more::{AsRef, Display, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Rentable office of the building.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Office {
    /// ID of this [`Office`].
    pub id: Id,

    /// [`Name`] of this [`Office`].
    pub name: Name,

    /// [`Floor`] this [`Office`] is located on.
    pub floor: Floor,

    /// [`Area`] of this [`Office`].
    pub area: Area,

    /// Base monthly rent price of this [`Office`].
    ///
    /// A rent contract may agree on a different price.
    pub base_price: Money,
}

/// ID of an [`Office`].
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

/// Name of an [`Office`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 255
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Floor of an [`Office`].
pub type Floor = i16;

/// Area of an [`Office`] in square meters.
pub type Area = Decimal;
