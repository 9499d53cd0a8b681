//! Shared-service usage read model definitions.

use common::Money;

use crate::{
    domain::usage::{self, Kind, Quantity, Record, ServiceName},
    read::ComputationError,
};

/// Single billed line of a service usage [`Record`].
///
/// Lines are never merged, even for the same [`ServiceName`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Line {
    /// ID of the [`Record`] this [`Line`] bills.
    pub record_id: usage::Id,

    /// [`ServiceName`] of the billed service.
    pub service_name: ServiceName,

    /// [`Kind`] of billing the service.
    pub kind: Kind,

    /// Billed [`Quantity`].
    pub quantity: Quantity,

    /// Price of a single unit of the service.
    pub unit_price: Money,

    /// Total of this [`Line`], if it could be computed.
    pub total: Result<Money, ComputationError>,
}

impl Line {
    /// Computes a [`Line`] billing the provided [`Record`].
    ///
    /// [`Kind::Monthly`] is billed by its unit price regardless of the
    /// quantity, while [`Kind::Daily`] is billed by the unit price multiplied
    /// by the quantity. The total is exact and never rounded.
    #[must_use]
    pub fn compute(record: Record) -> Self {
        let total = if record.quantity.is_sign_negative()
            && !record.quantity.is_zero()
        {
            Err(ComputationError::NegativeQuantity(record.id))
        } else if record.unit_price.is_negative() {
            Err(ComputationError::NegativeUnitPrice(record.id))
        } else {
            match record.kind {
                Kind::Monthly => Ok(record.unit_price),
                Kind::Daily => record
                    .unit_price
                    .checked_mul(record.quantity)
                    .ok_or(ComputationError::Overflow),
            }
        };

        Self {
            record_id: record.id,
            service_name: record.service_name,
            kind: record.kind,
            quantity: record.quantity,
            unit_price: record.unit_price,
            total,
        }
    }
}

/// Services consumed by a company during a month.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// [`Kind::Monthly`] [`Line`]s ordered by their [`Record`] IDs.
    pub monthly: Vec<Line>,

    /// [`Kind::Daily`] [`Line`]s ordered by their [`Record`] IDs.
    pub daily: Vec<Line>,

    /// Sum of all the [`Line`]s totals, excluding the failed ones.
    ///
    /// A [`Line`] whose total would overflow this sum is failed with
    /// [`ComputationError::Overflow`].
    pub total: Money,
}

impl Summary {
    /// Aggregates the provided [`Record`]s into a [`Summary`].
    #[must_use]
    pub fn aggregate(records: impl IntoIterator<Item = Record>) -> Self {
        let mut records = records.into_iter().collect::<Vec<_>>();
        records.sort_by_key(|r| r.id);

        let (mut monthly, mut daily): (Vec<_>, Vec<_>) = records
            .into_iter()
            .map(Line::compute)
            .partition(|l| l.kind == Kind::Monthly);

        let mut total = Money::ZERO;
        for line in monthly.iter_mut().chain(&mut daily) {
            let Ok(amount) = line.total else { continue };
            match total.checked_add(amount) {
                Some(sum) => total = sum,
                None => line.total = Err(ComputationError::Overflow),
            }
        }

        Self {
            monthly,
            daily,
            total,
        }
    }

    /// Returns all the [`Line`]s of this [`Summary`], [`Kind::Monthly`] ones
    /// first.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.monthly.iter().chain(&self.daily)
    }

    /// Indicates whether this [`Summary`] has at least one [`Line`] with a
    /// computed total.
    #[must_use]
    pub fn has_valid_lines(&self) -> bool {
        self.lines().any(|l| l.total.is_ok())
    }
}
