//! [`Invoice`] definitions.

use common::{define_kind, Money, Period};
use derive_more::{Display, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use crate::domain::{company, contract};
#[cfg(doc)]
use crate::domain::{Company, Contract};

/// Monthly invoice issued to a [`Company`] by the external invoicing.
///
/// Only its payment [`Status`] is surfaced in reports, the amounts are always
/// recomputed from the underlying facts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invoice {
    /// ID of this [`Invoice`].
    pub id: Id,

    /// ID of the invoiced [`Company`].
    pub company_id: company::Id,

    /// ID of the invoiced [`Contract`].
    ///
    /// [`None`] means this [`Invoice`] bills the shared services.
    pub contract_id: Option<contract::Id>,

    /// [`Period`] this [`Invoice`] is issued for.
    pub period: Period,

    /// Total amount of this [`Invoice`].
    pub total: Money,

    /// Payment [`Status`] of this [`Invoice`].
    pub status: Status,
}

/// ID of an [`Invoice`].
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

define_kind! {
    #[doc = "Payment status of an [`Invoice`]."]
    enum Status {
        #[doc = "[`Invoice`] is paid."]
        Paid = 1,

        #[doc = "[`Invoice`] is not paid yet."]
        Unpaid = 2,

        #[doc = "[`Invoice`] is not paid after its due date."]
        Overdue = 3,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Unpaid
    }
}
