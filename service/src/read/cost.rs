//! Company monthly cost read model definitions.

use common::{Money, Period};

use crate::{
    domain::{company, Company},
    read::{contract::InEffect, usage::Summary, ComputationError},
};

/// Monthly cost of a [`Company`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Monthly {
    /// ID of the [`Company`] this cost is computed for.
    pub company_id: company::Id,

    /// [`Period`] this cost is computed for.
    pub period: Period,

    /// Sum of the rent charges of the [`Company`] contracts.
    pub rent_cost: Money,

    /// Sum of the services consumed by the [`Company`].
    pub total_service_cost: Money,

    /// Sum of the `rent_cost` and the `total_service_cost`.
    pub total_cost: Money,
}

impl Monthly {
    /// Creates a new [`Monthly`] cost out of its parts.
    ///
    /// # Errors
    ///
    /// With [`ComputationError::Overflow`] if the parts cannot be summed up.
    pub fn new(
        company_id: company::Id,
        period: Period,
        rent_cost: Money,
        total_service_cost: Money,
    ) -> Result<Self, ComputationError> {
        Ok(Self {
            company_id,
            period,
            rent_cost,
            total_service_cost,
            total_cost: rent_cost
                .checked_add(total_service_cost)
                .ok_or(ComputationError::Overflow)?,
        })
    }
}

/// [`Monthly`] cost of a [`Company`] along with its line items.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Breakdown {
    /// Contracts of the [`Company`] in force during the [`Period`].
    pub contracts: Vec<InEffect>,

    /// Services consumed by the [`Company`] during the [`Period`].
    pub services: Summary,

    /// Resulting [`Monthly`] cost.
    pub cost: Monthly,
}

impl Breakdown {
    /// Computes a [`Breakdown`] out of the resolved contracts and the
    /// aggregated services.
    ///
    /// Contracts with a failed charge are excluded from the rent cost. A
    /// charge overflowing the rent cost is failed with
    /// [`ComputationError::Overflow`].
    ///
    /// # Errors
    ///
    /// With [`ComputationError::Overflow`] if the rent cost and the services
    /// cost cannot be summed up.
    pub fn new(
        company_id: company::Id,
        period: Period,
        mut contracts: Vec<InEffect>,
        services: Summary,
    ) -> Result<Self, ComputationError> {
        let mut rent_cost = Money::ZERO;
        for c in &mut contracts {
            let Ok(charge) = c.charge else { continue };
            match rent_cost.checked_add(charge) {
                Some(sum) => rent_cost = sum,
                None => c.charge = Err(ComputationError::Overflow),
            }
        }

        let cost =
            Monthly::new(company_id, period, rent_cost, services.total)?;
        Ok(Self {
            contracts,
            services,
            cost,
        })
    }
}

/// [`Breakdown`] of a [`Company`] along with the [`Company`] itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Detail {
    /// [`Company`] the [`Breakdown`] is computed for.
    pub company: Company,

    /// Computed [`Breakdown`].
    pub breakdown: Breakdown,
}
