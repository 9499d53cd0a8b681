//! [`Company`] cost definitions.

use common::{Date, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, read};

use crate::{api, api::scalar, Context};

/// Tenant company of the building.
#[derive(Clone, Debug, From)]
pub struct Company(domain::Company);

/// Tenant company of the building.
#[graphql_object(context = Context)]
impl Company {
    /// Unique identifier of this `Company`.
    #[must_use]
    pub fn id(&self) -> i32 {
        self.0.id.into()
    }

    /// Name of this `Company`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Tax identification code of this `Company`.
    #[must_use]
    pub fn tax_code(&self) -> TaxCode {
        self.0.tax_code.clone().into()
    }

    /// Contact email of this `Company`, if any.
    #[must_use]
    pub fn email(&self) -> Option<String> {
        self.0.email.as_ref().map(ToString::to_string)
    }

    /// Postal address of this `Company`, if any.
    #[must_use]
    pub fn address(&self) -> Option<String> {
        self.0.address.as_ref().map(ToString::to_string)
    }
}

/// Name of a `Company`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CompanyName",
    with = scalar::Via::<domain::company::Name>,
)]
pub struct Name(domain::company::Name);

/// Tax identification code of a `Company`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CompanyTaxCode",
    with = scalar::Via::<domain::company::TaxCode>,
)]
pub struct TaxCode(domain::company::TaxCode);

/// Name of an office.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OfficeName",
    with = scalar::Via::<domain::office::Name>,
)]
pub struct OfficeName(domain::office::Name);

/// Name of a shared service.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ServiceName",
    with = scalar::Via::<domain::usage::ServiceName>,
)]
pub struct ServiceName(domain::usage::ServiceName);

/// Monthly cost of a [`Company`].
#[derive(Clone, Copy, Debug, From)]
pub struct MonthlyCost(read::cost::Monthly);

/// Monthly cost of a `Company`.
#[graphql_object(name = "MonthlyCompanyCost", context = Context)]
impl MonthlyCost {
    /// ID of the `Company` this cost is computed for.
    #[must_use]
    pub fn company_id(&self) -> i32 {
        self.0.company_id.into()
    }

    /// Month this cost is computed for (`1` is January).
    #[must_use]
    pub fn month(&self) -> i32 {
        self.0.period.month().into()
    }

    /// Year this cost is computed for.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.period.year()
    }

    /// Sum of the rent charges of the `Company` contracts.
    #[must_use]
    pub fn rent_cost(&self) -> Money {
        self.0.rent_cost
    }

    /// Sum of the services consumed by the `Company`.
    #[must_use]
    pub fn total_service_cost(&self) -> Money {
        self.0.total_service_cost
    }

    /// Sum of the `rentCost` and the `totalServiceCost`.
    #[must_use]
    pub fn total_cost(&self) -> Money {
        self.0.total_cost
    }
}

/// [`MonthlyCost`] of a [`Company`] along with its line items.
#[derive(Clone, Debug, From)]
pub struct CostDetail(read::cost::Detail);

/// Monthly cost of a `Company` along with its line items.
#[graphql_object(name = "CompanyCostDetail", context = Context)]
impl CostDetail {
    /// `Company` this cost is computed for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "CompanyCostDetail.company",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn company(&self) -> Company {
        self.0.company.clone().into()
    }

    /// Contracts of the `Company` in force during the month, ordered by their
    /// start dates.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "CompanyCostDetail.contracts",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn contracts(&self) -> Vec<ContractPeriod> {
        self.0
            .breakdown
            .contracts
            .iter()
            .cloned()
            .map(Into::into)
            .collect()
    }

    /// Services consumed by the `Company` during the month.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "CompanyCostDetail.serviceDetails",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn service_details(&self) -> ServiceDetails {
        self.0.breakdown.services.clone().into()
    }

    /// Resulting monthly cost.
    #[must_use]
    pub fn cost(&self) -> MonthlyCost {
        self.0.breakdown.cost.into()
    }
}

/// Contract in force during a month.
#[derive(Clone, Debug, From)]
pub struct ContractPeriod(read::contract::InEffect);

/// Contract in force during a month.
#[graphql_object(context = Context)]
impl ContractPeriod {
    /// Unique identifier of this contract.
    #[must_use]
    pub fn contract_id(&self) -> i32 {
        self.0.id().into()
    }

    /// Name of the rented office.
    #[must_use]
    pub fn office_name(&self) -> OfficeName {
        self.0.office_name.clone().into()
    }

    /// First day this contract is in force.
    #[must_use]
    pub fn from_date(&self) -> Date {
        self.0.from_date()
    }

    /// Last day this contract is in force, if any.
    #[must_use]
    pub fn end_date(&self) -> Option<Date> {
        self.0.contract.end_date
    }

    /// Monthly rent price of this contract.
    #[must_use]
    pub fn rent_price(&self) -> Money {
        self.0.contract.rent_price
    }

    /// Status of this contract.
    #[must_use]
    pub fn status(&self) -> ContractStatus {
        self.0.status.into()
    }

    /// Rent charged for the month.
    ///
    /// `null` if the charge cannot be computed, see `chargeError`.
    #[must_use]
    pub fn charge(&self) -> Option<Money> {
        self.0.charge.ok()
    }

    /// Reason the rent charge cannot be computed, if any.
    #[must_use]
    pub fn charge_error(&self) -> Option<String> {
        self.0.charge.err().map(|e| e.to_string())
    }
}

/// Status of a contract.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum ContractStatus {
    /// Contract is in force.
    Active,

    /// Contract has ended.
    Expired,

    /// Contract was terminated.
    Terminated,
}

impl From<domain::contract::Status> for ContractStatus {
    fn from(status: domain::contract::Status) -> Self {
        use domain::contract::Status as S;
        match status {
            S::Active => Self::Active,
            S::Expired => Self::Expired,
            S::Terminated => Self::Terminated,
        }
    }
}

/// Services consumed by a [`Company`] during a month.
#[derive(Clone, Debug, From)]
pub struct ServiceDetails(read::usage::Summary);

/// Services consumed by a `Company` during a month.
#[graphql_object(context = Context)]
impl ServiceDetails {
    /// Services billed at a flat monthly price.
    #[must_use]
    pub fn monthly_services(&self) -> Vec<ServiceLine> {
        self.0.monthly.iter().cloned().map(Into::into).collect()
    }

    /// Services billed per consumed unit.
    #[must_use]
    pub fn daily_services(&self) -> Vec<ServiceLine> {
        self.0.daily.iter().cloned().map(Into::into).collect()
    }

    /// Sum of all the computed service lines.
    #[must_use]
    pub fn total(&self) -> Money {
        self.0.total
    }
}

/// Single service consumed by a [`Company`].
#[derive(Clone, Debug, From)]
pub struct ServiceLine(read::usage::Line);

/// Single service consumed by a `Company`.
#[graphql_object(context = Context)]
impl ServiceLine {
    /// Unique identifier of the service usage record.
    #[must_use]
    pub fn id(&self) -> i32 {
        self.0.record_id.into()
    }

    /// Name of the consumed service.
    #[must_use]
    pub fn service_name(&self) -> ServiceName {
        self.0.service_name.clone().into()
    }

    /// Billing kind of the consumed service.
    #[must_use]
    pub fn kind(&self) -> ServiceKind {
        self.0.kind.into()
    }

    /// Consumed quantity as an exact decimal string.
    #[must_use]
    pub fn quantity(&self) -> String {
        self.0.quantity.normalize().to_string()
    }

    /// Price of a single consumed unit.
    #[must_use]
    pub fn unit_price(&self) -> Money {
        self.0.unit_price
    }

    /// Billed amount.
    ///
    /// `null` if the amount cannot be computed, see `totalError`.
    #[must_use]
    pub fn total(&self) -> Option<Money> {
        self.0.total.ok()
    }

    /// Reason the billed amount cannot be computed, if any.
    #[must_use]
    pub fn total_error(&self) -> Option<String> {
        self.0.total.err().map(|e| e.to_string())
    }
}

/// Billing kind of a service.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum ServiceKind {
    /// Billed at a flat monthly price.
    Monthly,

    /// Billed per consumed unit.
    Daily,
}

impl From<domain::usage::Kind> for ServiceKind {
    fn from(kind: domain::usage::Kind) -> Self {
        use domain::usage::Kind as K;
        match kind {
            K::Monthly => Self::Monthly,
            K::Daily => Self::Daily,
        }
    }
}
