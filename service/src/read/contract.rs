//! [`Contract`] read model definitions.

use common::{Date, Money, Period};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    domain::{contract, office, Contract},
    read::ComputationError,
};
#[cfg(doc)]
use crate::domain::Office;

/// [`Contract`] in force during a [`Period`], as resolved for a company.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InEffect {
    /// Resolved [`Contract`].
    pub contract: Contract,

    /// [`office::Name`] of the rented [`Office`].
    pub office_name: office::Name,

    /// [`contract::Status`] of the [`Contract`] for the [`Period`].
    pub status: contract::Status,

    /// Rent charged for the [`Period`] according to the configured
    /// [`Proration`].
    pub charge: Result<Money, ComputationError>,
}

impl InEffect {
    /// Returns ID of the resolved [`Contract`].
    #[must_use]
    pub fn id(&self) -> contract::Id {
        self.contract.id
    }

    /// Returns the first day of the resolved [`Contract`].
    #[must_use]
    pub fn from_date(&self) -> Date {
        self.contract.from_date
    }
}

/// Policy of charging rent for a [`Contract`] in force during only a part of
/// a [`Period`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Proration {
    /// Full monthly rent price is charged if the [`Contract`] is in force at
    /// least one day of the [`Period`].
    #[default]
    WholeMonth,

    /// Monthly rent price is charged proportionally to the days the
    /// [`Contract`] is in force, rounded to minor units once.
    Daily,
}

impl Proration {
    /// Computes the rent charged for the provided [`Contract`] during the
    /// provided [`Period`].
    ///
    /// # Errors
    ///
    /// If the [`Contract`] has a negative rent price, or the computation
    /// overflows.
    pub fn charge(
        self,
        contract: &Contract,
        period: Period,
    ) -> Result<Money, ComputationError> {
        if contract.rent_price.is_negative() {
            return Err(ComputationError::NegativeRentPrice(contract.id));
        }
        if !contract.is_in_effect(period) {
            return Ok(Money::ZERO);
        }

        match self {
            Self::WholeMonth => Ok(contract.rent_price),
            Self::Daily => {
                let days = Decimal::from(contract.days_in_effect(period));
                contract
                    .rent_price
                    .amount()
                    .checked_mul(days)
                    .and_then(|a| a.checked_div(Decimal::from(period.days())))
                    .map(|a| Money::new(a).round())
                    .ok_or(ComputationError::Overflow)
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{Money, Period};
    use time::macros::date;

    use crate::{
        domain::{company, contract, office, Contract},
        read::ComputationError,
    };

    use super::Proration;

    fn contract(from: time::Date, rent: &str) -> Contract {
        Contract {
            id: contract::Id::new(3).unwrap(),
            company_id: company::Id::new(1).unwrap(),
            office_id: office::Id::new(1).unwrap(),
            from_date: from,
            end_date: None,
            rent_price: Money::from_str(rent).unwrap(),
            terminated_at: None,
        }
    }

    #[test]
    fn whole_month_charges_full_rent() {
        let march = Period::new(2024, 3).unwrap();

        assert_eq!(
            Proration::WholeMonth.charge(&contract(date!(2024 - 03 - 31), "5000000"), march),
            Ok(Money::from(5_000_000)),
        );
        assert_eq!(
            Proration::WholeMonth.charge(&contract(date!(2024 - 04 - 01), "5000000"), march),
            Ok(Money::ZERO),
        );
    }

    #[test]
    fn daily_charges_overlapping_days() {
        let march = Period::new(2024, 3).unwrap();

        assert_eq!(
            Proration::Daily.charge(&contract(date!(2024 - 03 - 17), "3100000"), march),
            Ok(Money::from(1_500_000)),
        );
        assert_eq!(
            Proration::Daily.charge(&contract(date!(2024 - 03 - 31), "100"), march),
            Ok(Money::from_str("3.23").unwrap()),
        );
        assert_eq!(
            Proration::Daily.charge(&contract(date!(2024 - 01 - 01), "5000000"), march),
            Ok(Money::from(5_000_000)),
        );
    }

    #[test]
    fn rejects_negative_rent() {
        let march = Period::new(2024, 3).unwrap();

        assert_eq!(
            Proration::WholeMonth.charge(&contract(date!(2024 - 01 - 01), "-1"), march),
            Err(ComputationError::NegativeRentPrice(contract::Id::new(3).unwrap())),
        );
    }
}
