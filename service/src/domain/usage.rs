//! Shared-service usage [`Record`] definitions.

use std::str::FromStr;

use common::{define_kind, Money, Period};
use derive_more::{AsRef, Display, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

use crate::domain::{company, office};
#[cfg(doc)]
use crate::domain::{Company, Office};

/// Usage of a shared building service by a [`Company`] during a [`Period`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// ID of this [`Record`].
    pub id: Id,

    /// ID of the [`Company`] consumed the service.
    pub company_id: company::Id,

    /// ID of the [`Office`] the service was consumed in, if known.
    pub office_id: Option<office::Id>,

    /// [`Period`] the service was consumed during.
    pub period: Period,

    /// [`ServiceName`] of the consumed service.
    pub service_name: ServiceName,

    /// [`Kind`] of billing the consumed service.
    pub kind: Kind,

    /// Consumed [`Quantity`] of the service.
    pub quantity: Quantity,

    /// Price of a single unit of the service.
    pub unit_price: Money,
}

/// ID of a [`Record`].
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

/// Name of a shared building service.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct ServiceName(String);

impl ServiceName {
    /// Creates a new [`ServiceName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`ServiceName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 255
    }
}

impl FromStr for ServiceName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ServiceName`")
    }
}

/// Consumed quantity of a service.
///
/// Conventionally `1` for [`Kind::Monthly`] services.
pub type Quantity = Decimal;

define_kind! {
    #[doc = "Kind of billing a shared service."]
    enum Kind {
        #[doc = "Flat charge once per month regardless of the quantity."]
        Monthly = 1,

        #[doc = "Metered charge of the quantity multiplied by the unit price."]
        Daily = 2,
    }
}

#[cfg(test)]
mod spec {
    use super::Kind;

    #[test]
    fn kind_decodes_stored_values() {
        assert_eq!(Kind::try_from(1), Ok(Kind::Monthly));
        assert_eq!(Kind::try_from(2), Ok(Kind::Daily));
        assert_eq!(Kind::try_from(0), Err(0));
        assert_eq!(Kind::try_from(7), Err(7));
    }

    #[test]
    fn kind_has_screaming_snake_case_name() {
        assert_eq!(Kind::Daily.to_string(), "DAILY");
        assert_eq!("MONTHLY".parse::<Kind>(), Ok(Kind::Monthly));
        assert!("monthly".parse::<Kind>().is_err());
    }
}
