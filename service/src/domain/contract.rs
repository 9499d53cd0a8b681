//! Rent [`Contract`] definitions.

use common::{define_kind, Date, Money, Period};
use derive_more::{Display, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use crate::domain::{company, office};
#[cfg(doc)]
use crate::domain::{Company, Office};

/// Lease of an [`Office`] by a [`Company`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contract {
    /// ID of this [`Contract`].
    pub id: Id,

    /// ID of the [`Company`] renting the [`Office`].
    pub company_id: company::Id,

    /// ID of the rented [`Office`].
    pub office_id: office::Id,

    /// First day this [`Contract`] is in force.
    pub from_date: Date,

    /// Last day this [`Contract`] is in force, if it's not open-ended.
    pub end_date: Option<Date>,

    /// Monthly rent price agreed by this [`Contract`].
    pub rent_price: Money,

    /// [`Date`] this [`Contract`] was administratively terminated at, if it
    /// was.
    pub terminated_at: Option<Date>,
}

impl Contract {
    /// Indicates whether this [`Contract`] is in force during any day of the
    /// provided [`Period`].
    ///
    /// Both `from_date` and `end_date` are inclusive.
    #[must_use]
    pub fn is_in_effect(&self, period: Period) -> bool {
        period.intersects(self.from_date, self.end_date)
    }

    /// Returns the number of days of the provided [`Period`] this
    /// [`Contract`] is in force.
    #[must_use]
    pub fn days_in_effect(&self, period: Period) -> u8 {
        period.overlap_days(self.from_date, self.end_date)
    }

    /// Returns [`Status`] of this [`Contract`] as seen for the provided
    /// [`Period`] on the provided `today` [`Date`].
    #[must_use]
    pub fn status(&self, period: Period, today: Date) -> Status {
        if self.terminated_at.is_some() {
            return Status::Terminated;
        }

        match self.end_date {
            None => Status::Active,
            Some(end) if end >= period.last_day() => Status::Active,
            Some(end) if end < today => Status::Expired,
            Some(_) => Status::Active,
        }
    }
}

/// ID of a [`Contract`].
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
    #[doc = "Status of a [`Contract`]."]
    enum Status {
        #[doc = "[`Contract`] is in force."]
        Active = 1,

        #[doc = "[`Contract`] has ended before today."]
        Expired = 2,

        #[doc = "[`Contract`] was administratively terminated."]
        Terminated = 3,
    }
}

#[cfg(test)]
mod spec {
    use common::{Money, Period};
    use time::macros::date;

    use crate::domain::{company, office};

    use super::{Contract, Id, Status};

    fn contract(from: time::Date, end: Option<time::Date>) -> Contract {
        Contract {
            id: Id::new(1).unwrap(),
            company_id: company::Id::new(1).unwrap(),
            office_id: office::Id::new(1).unwrap(),
            from_date: from,
            end_date: end,
            rent_price: Money::from(5_000_000),
            terminated_at: None,
        }
    }

    #[test]
    fn inclusion_boundaries() {
        let march = Period::new(2024, 3).unwrap();

        assert!(contract(date!(2024 - 03 - 31), None).is_in_effect(march));
        assert!(contract(date!(2023 - 06 - 01), Some(date!(2024 - 03 - 01)))
            .is_in_effect(march));
        assert!(contract(date!(2024 - 01 - 01), None).is_in_effect(march));

        assert!(!contract(date!(2024 - 04 - 01), None).is_in_effect(march));
        assert!(!contract(date!(2023 - 06 - 01), Some(date!(2024 - 02 - 29)))
            .is_in_effect(march));
    }

    #[test]
    fn counts_days_in_effect() {
        let march = Period::new(2024, 3).unwrap();

        assert_eq!(contract(date!(2024 - 01 - 01), None).days_in_effect(march), 31);
        assert_eq!(
            contract(date!(2024 - 03 - 17), None).days_in_effect(march),
            15,
        );
    }

    #[test]
    fn classifies_status() {
        let march = Period::new(2024, 3).unwrap();
        let today = date!(2024 - 03 - 20);

        assert_eq!(
            contract(date!(2024 - 01 - 01), None).status(march, today),
            Status::Active,
        );
        assert_eq!(
            contract(date!(2024 - 01 - 01), Some(date!(2024 - 12 - 31)))
                .status(march, today),
            Status::Active,
        );
        assert_eq!(
            contract(date!(2024 - 01 - 01), Some(date!(2024 - 03 - 10)))
                .status(march, today),
            Status::Expired,
        );
        assert_eq!(
            contract(date!(2024 - 01 - 01), Some(date!(2024 - 03 - 25)))
                .status(march, today),
            Status::Active,
        );

        let mut terminated = contract(date!(2024 - 01 - 01), None);
        terminated.terminated_at = Some(date!(2024 - 03 - 05));
        assert_eq!(terminated.status(march, today), Status::Terminated);
    }

    #[test]
    fn status_of_past_period() {
        let january = Period::new(2024, 1).unwrap();
        let today = date!(2024 - 10 - 01);

        assert_eq!(
            contract(date!(2023 - 01 - 01), Some(date!(2024 - 06 - 30)))
                .status(january, today),
            Status::Active,
        );
    }
}
