//! Building finance report definitions.

use common::{Date, Money};
use derive_more::From;
use juniper::{graphql_object, GraphQLEnum};
use service::{domain, read};

use crate::{
    api::{
        self,
        company::{Name, OfficeName, TaxCode},
        salary::Salary,
    },
    Context,
};

/// Revenue, expense and profit of the building for a month.
#[derive(Clone, Debug, From)]
pub struct Finance(read::report::Finance);

/// Revenue, expense and profit of the building for a month.
#[graphql_object(name = "BuildingFinanceReport", context = Context)]
impl Finance {
    /// Month this report is built for (`1` is January).
    #[must_use]
    pub fn month(&self) -> i32 {
        self.0.period.month().into()
    }

    /// Year this report is built for.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.period.year()
    }

    /// Sum of all the companies' monthly costs.
    #[must_use]
    pub fn total_revenue(&self) -> Money {
        self.0.total_revenue
    }

    /// Sum of all the employees' monthly salaries.
    #[must_use]
    pub fn total_expense(&self) -> Money {
        self.0.total_expense
    }

    /// `totalRevenue` minus `totalExpense`, negative on a loss.
    #[must_use]
    pub fn net_profit(&self) -> Money {
        self.0.net_profit
    }

    /// Sum of all the companies' service costs, the bonuses are computed out
    /// of.
    #[must_use]
    pub fn building_service_revenue(&self) -> Money {
        self.0.building_service_revenue
    }

    /// Items omitted from the totals due to failures.
    #[must_use]
    pub fn omissions(&self) -> Vec<Omission> {
        self.0.omissions.iter().cloned().map(Into::into).collect()
    }
}

/// Line items of a [`Finance`] report.
#[derive(Clone, Debug, From)]
pub struct Details(read::report::Finance);

/// Line items of a `BuildingFinanceReport`.
#[graphql_object(name = "BuildingFinanceReportDetails", context = Context)]
impl Details {
    /// Revenue rows ordered by company IDs, with the services row of a
    /// company following its contracts rows.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BuildingFinanceReportDetails.revenueDetails",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn revenue_details(&self) -> Vec<RevenueRow> {
        self.0.revenue_details.iter().cloned().map(Into::into).collect()
    }

    /// Salaries ordered by employee IDs.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BuildingFinanceReportDetails.expenseDetails",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn expense_details(&self) -> Vec<Salary> {
        self.0.expense_details.iter().cloned().map(Into::into).collect()
    }

    /// Items omitted from the report due to failures.
    #[must_use]
    pub fn omissions(&self) -> Vec<Omission> {
        self.0.omissions.iter().cloned().map(Into::into).collect()
    }
}

/// Single line of the building revenue.
#[derive(Clone, Debug, From)]
pub struct RevenueRow(read::report::RevenueRow);

/// Single line of the building revenue.
#[graphql_object(context = Context)]
impl RevenueRow {
    /// ID of the paying company.
    #[must_use]
    pub fn company_id(&self) -> i32 {
        self.0.company_id.into()
    }

    /// Name of the paying company.
    #[must_use]
    pub fn company_name(&self) -> Name {
        self.0.company_name.clone().into()
    }

    /// Tax identification code of the paying company.
    #[must_use]
    pub fn tax_code(&self) -> TaxCode {
        self.0.tax_code.clone().into()
    }

    /// Kind of the paid item.
    #[must_use]
    pub fn kind(&self) -> RevenueKind {
        match self.0.item {
            read::report::RevenueItem::Rent { .. } => RevenueKind::Rent,
            read::report::RevenueItem::Services => RevenueKind::Services,
        }
    }

    /// ID of the contract the rent is charged by.
    ///
    /// `null` for services.
    #[must_use]
    pub fn contract_id(&self) -> Option<i32> {
        self.rent().map(|r| r.0.into())
    }

    /// Name of the rented office.
    ///
    /// `null` for services.
    #[must_use]
    pub fn office_name(&self) -> Option<OfficeName> {
        self.rent().map(|r| r.1.clone().into())
    }

    /// First day the contract is in force.
    ///
    /// `null` for services.
    #[must_use]
    pub fn from_date(&self) -> Option<Date> {
        self.rent().map(|r| r.2)
    }

    /// Last day the contract is in force.
    ///
    /// `null` for services and open-ended contracts.
    #[must_use]
    pub fn end_date(&self) -> Option<Date> {
        self.rent().and_then(|r| r.3)
    }

    /// Paid amount.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.0.amount
    }

    /// Payment status reported by the invoicing.
    ///
    /// `null` if the invoicing failed to report it.
    #[must_use]
    pub fn payment_status(&self) -> Option<PaymentStatus> {
        self.0.payment.map(Into::into)
    }
}

impl RevenueRow {
    /// Returns the rent details of this [`RevenueRow`], if it's a rent one.
    fn rent(
        &self,
    ) -> Option<(
        domain::contract::Id,
        &domain::office::Name,
        Date,
        Option<Date>,
    )> {
        match &self.0.item {
            read::report::RevenueItem::Rent {
                contract_id,
                office_name,
                from_date,
                end_date,
            } => Some((*contract_id, office_name, *from_date, *end_date)),
            read::report::RevenueItem::Services => None,
        }
    }
}

/// Kind of a [`RevenueRow`].
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum RevenueKind {
    /// Rent of an office.
    Rent,

    /// Shared services consumed during the month.
    Services,
}

/// Payment status of an invoice.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum PaymentStatus {
    /// Invoice is paid.
    Paid,

    /// Invoice is not paid yet.
    Unpaid,

    /// Invoice is not paid in time.
    Overdue,
}

impl From<domain::invoice::Status> for PaymentStatus {
    fn from(status: domain::invoice::Status) -> Self {
        use domain::invoice::Status as S;
        match status {
            S::Paid => Self::Paid,
            S::Unpaid => Self::Unpaid,
            S::Overdue => Self::Overdue,
        }
    }
}

/// Item omitted from a report due to a failure.
#[derive(Clone, Debug, From)]
pub struct Omission(read::report::Omission);

/// Item omitted from a report due to a failure.
#[graphql_object(context = Context)]
impl Omission {
    /// Kind of the omitted item.
    #[must_use]
    pub fn subject(&self) -> OmissionSubject {
        use read::report::Subject as S;
        match self.0.subject {
            S::Company(_) => OmissionSubject::Company,
            S::Contract(_) => OmissionSubject::Contract,
            S::Employee(_) => OmissionSubject::Employee,
            S::ServiceUsage(_) => OmissionSubject::ServiceUsage,
        }
    }

    /// ID of the omitted item.
    #[must_use]
    pub fn subject_id(&self) -> i32 {
        use read::report::Subject as S;
        match self.0.subject {
            S::Company(id) => id.into(),
            S::Contract(id) => id.into(),
            S::Employee(id) => id.into(),
            S::ServiceUsage(id) => id.into(),
        }
    }

    /// Kind of the failure caused the omission.
    #[must_use]
    pub fn failure(&self) -> FailureKind {
        use read::report::FailureKind as K;
        match self.0.failure {
            K::NotFound => FailureKind::NotFound,
            K::UpstreamFetch => FailureKind::UpstreamFetch,
            K::Computation => FailureKind::Computation,
        }
    }

    /// Human-readable reason of the failure.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.0.reason
    }
}

/// Kind of an [`Omission`] subject.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum OmissionSubject {
    /// Whole company.
    Company,

    /// Single contract.
    Contract,

    /// Single employee.
    Employee,

    /// Single service usage record.
    ServiceUsage,
}

/// Kind of a failure caused an [`Omission`].
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum FailureKind {
    /// Referenced entity does not exist.
    NotFound,

    /// Persistence failed to provide the facts.
    UpstreamFetch,

    /// Facts violate an invariant.
    Computation,
}
