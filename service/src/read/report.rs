//! Building finance report read model definitions.

use std::fmt;

use common::{Date, Money, Period};
use derive_more::{Display, From};

use crate::{
    domain::{company, contract, employee, invoice, office, usage},
    read::{salary, ComputationError},
};
#[cfg(doc)]
use crate::domain::{Company, Contract, Employee, Invoice};

/// Revenue, expense and profit of the building for a month.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Finance {
    /// [`Period`] this report is built for.
    pub period: Period,

    /// Sum of all the companies' monthly costs.
    pub total_revenue: Money,

    /// Sum of all the employees' monthly salaries.
    pub total_expense: Money,

    /// `total_revenue` minus `total_expense`, negative on a loss.
    pub net_profit: Money,

    /// Sum of all the companies' service costs, used as the bonus base.
    pub building_service_revenue: Money,

    /// [`RevenueRow`]s ordered by [`Company`] IDs, then contracts resolution
    /// order, with the services row last.
    pub revenue_details: Vec<RevenueRow>,

    /// Salaries ordered by [`Employee`] IDs.
    pub expense_details: Vec<salary::Monthly>,

    /// Items omitted from the totals due to failures.
    pub omissions: Vec<Omission>,
}

/// Single line of the building revenue.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevenueRow {
    /// ID of the paying [`Company`].
    pub company_id: company::Id,

    /// [`company::Name`] of the paying [`Company`].
    pub company_name: company::Name,

    /// [`company::TaxCode`] of the paying [`Company`].
    pub tax_code: company::TaxCode,

    /// What the [`Company`] pays for.
    pub item: RevenueItem,

    /// Paid amount.
    pub amount: Money,

    /// [`invoice::Status`] reported by the invoicing.
    ///
    /// [`None`] if the invoicing failed to report it.
    pub payment: Option<invoice::Status>,
}

/// Item of a [`RevenueRow`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RevenueItem {
    /// Rent of an office.
    Rent {
        /// ID of the [`Contract`] the rent is charged by.
        contract_id: contract::Id,

        /// [`office::Name`] of the rented office.
        office_name: office::Name,

        /// First day the [`Contract`] is in force.
        from_date: Date,

        /// Last day the [`Contract`] is in force, if any.
        end_date: Option<Date>,
    },

    /// Shared services consumed during the month.
    Services,
}

/// Item omitted from a report due to a failure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Omission {
    /// [`Subject`] that was omitted.
    pub subject: Subject,

    /// [`FailureKind`] caused the omission.
    pub failure: FailureKind,

    /// Human-readable reason of the failure.
    pub reason: String,
}

impl Omission {
    /// Creates a new [`Omission`] of the provided `subject`.
    #[must_use]
    pub fn new(
        subject: impl Into<Subject>,
        failure: FailureKind,
        reason: impl fmt::Display,
    ) -> Self {
        Self {
            subject: subject.into(),
            failure,
            reason: reason.to_string(),
        }
    }

    /// Creates a new [`FailureKind::Computation`] [`Omission`] of the
    /// provided `subject`.
    #[must_use]
    pub fn computation(
        subject: impl Into<Subject>,
        err: &ComputationError,
    ) -> Self {
        Self::new(subject, FailureKind::Computation, err)
    }
}

/// Subject of an [`Omission`].
#[derive(Clone, Copy, Debug, Display, Eq, From, PartialEq)]
pub enum Subject {
    /// Whole [`Company`].
    #[display("Company(id: {_0})")]
    Company(company::Id),

    /// Single [`Contract`].
    #[display("Contract(id: {_0})")]
    Contract(contract::Id),

    /// Single [`Employee`].
    #[display("Employee(id: {_0})")]
    Employee(employee::Id),

    /// Single service usage line.
    #[display("ServiceUsage(id: {_0})")]
    ServiceUsage(usage::Id),
}

/// Kind of a failure caused an [`Omission`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum FailureKind {
    /// Referenced entity does not exist.
    #[display("NOT_FOUND")]
    NotFound,

    /// Persistence failed to provide the facts.
    #[display("UPSTREAM_FETCH")]
    UpstreamFetch,

    /// Facts violate an invariant.
    #[display("COMPUTATION")]
    Computation,
}
