//! [`Query`] collection related to [`Company`] costs.

use common::{
    operations::{By, Select},
    Date, Period,
};
use derive_more::{Display, Error, From};
use futures::{future, TryFutureExt as _};
use tracerr::Traced;

use crate::{
    domain::{company, office, Company},
    infra::{database, Database},
    query::{contract, usage},
    read::{self, report::FailureKind, ComputationError},
    Query, Service,
};

/// [`Query`] computing a [`read::cost::Breakdown`] of a [`Company`] for a
/// [`Period`].
///
/// Doesn't check the [`Company`] exists: an unknown one costs nothing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cost {
    /// ID of the [`Company`] to compute the cost of.
    pub company_id: company::Id,

    /// [`Period`] to compute the cost for.
    pub period: Period,

    /// Current [`Date`] to classify contracts relative to.
    pub today: Date,
}

impl<Db> Query<Cost> for Service<Db>
where
    Self: Query<
            contract::InEffect,
            Ok = Vec<read::contract::InEffect>,
            Err = Traced<contract::ExecutionError>,
        > + Query<
            usage::Aggregate,
            Ok = read::usage::Summary,
            Err = Traced<database::Error>,
        >,
{
    type Ok = read::cost::Breakdown;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Cost) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Cost {
            company_id,
            period,
            today,
        } = query;

        let (contracts, services) = future::try_join(
            self.execute(contract::InEffect {
                company_id,
                period,
                today,
            })
            .map_err(tracerr::map_from_and_wrap!(=> E)),
            self.execute(usage::Aggregate { company_id, period })
                .map_err(tracerr::map_from_and_wrap!(=> E)),
        )
        .await?;

        read::cost::Breakdown::new(company_id, period, contracts, services)
            .map_err(E::Computation)
            .map_err(tracerr::wrap!())
    }
}

/// [`Query`] computing a [`read::cost::Monthly`] cost of an existing
/// [`Company`] for a [`Period`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MonthlyCost {
    /// ID of the [`Company`] to compute the cost of.
    pub company_id: company::Id,

    /// [`Period`] to compute the cost for.
    pub period: Period,

    /// Current [`Date`] to classify contracts relative to.
    pub today: Date,
}

impl<Db> Query<MonthlyCost> for Service<Db>
where
    Self: Query<
        CostDetail,
        Ok = read::cost::Detail,
        Err = Traced<ExecutionError>,
    >,
{
    type Ok = read::cost::Monthly;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: MonthlyCost,
    ) -> Result<Self::Ok, Self::Err> {
        let MonthlyCost {
            company_id,
            period,
            today,
        } = query;

        let detail = self
            .execute(CostDetail {
                company_id,
                period,
                today,
            })
            .await
            .map_err(tracerr::wrap!())?;
        Ok(detail.breakdown.cost)
    }
}

/// [`Query`] computing a [`read::cost::Detail`] of an existing [`Company`]
/// for a [`Period`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CostDetail {
    /// ID of the [`Company`] to compute the cost of.
    pub company_id: company::Id,

    /// [`Period`] to compute the cost for.
    pub period: Period,

    /// Current [`Date`] to classify contracts relative to.
    pub today: Date,
}

impl<Db> Query<CostDetail> for Service<Db>
where
    Db: Database<
        Select<By<Option<Company>, company::Id>>,
        Ok = Option<Company>,
        Err = Traced<database::Error>,
    >,
    Self: Query<Cost, Ok = read::cost::Breakdown, Err = Traced<ExecutionError>>,
{
    type Ok = read::cost::Detail;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: CostDetail) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CostDetail {
            company_id,
            period,
            today,
        } = query;

        let company = self
            .database()
            .execute(Select(By::<Option<Company>, _>::new(company_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CompanyNotExists(company_id))
            .map_err(tracerr::wrap!())?;

        let breakdown = self
            .execute(Cost {
                company_id,
                period,
                today,
            })
            .await
            .map_err(tracerr::wrap!())?;

        Ok(read::cost::Detail { company, breakdown })
    }
}

/// Error of [`Company`] cost [`Query`]s execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Company`] with the provided ID does not exist.
    #[display("`Company(id: {_0})` does not exist")]
    CompanyNotExists(#[error(not(source))] company::Id),

    /// Cost cannot be computed out of the stored facts.
    #[display("Failed to compute cost: {_0}")]
    Computation(ComputationError),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Office referenced by a contract does not exist.
    #[display("`Office(id: {_0})` does not exist")]
    OfficeNotExists(#[error(not(source))] office::Id),
}

impl ExecutionError {
    /// Returns [`FailureKind`] of this [`ExecutionError`].
    #[must_use]
    pub fn failure(&self) -> FailureKind {
        match self {
            Self::CompanyNotExists(_) | Self::OfficeNotExists(_) => {
                FailureKind::NotFound
            }
            Self::Db(_) => FailureKind::UpstreamFetch,
            Self::Computation(_) => FailureKind::Computation,
        }
    }
}

impl From<contract::ExecutionError> for ExecutionError {
    fn from(err: contract::ExecutionError) -> Self {
        match err {
            contract::ExecutionError::Db(e) => Self::Db(e),
            contract::ExecutionError::OfficeNotExists(id) => {
                Self::OfficeNotExists(id)
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{Money, Period};
    use time::macros::date;

    use crate::{
        domain::usage::Kind,
        infra::database::memory::Facts,
        query::fixture::{self, company_id, march},
        read::report::FailureKind,
        Query as _,
    };

    use super::{Cost, CostDetail, ExecutionError, MonthlyCost};

    fn company_a() -> Facts {
        let mut facts = fixture::building();
        facts.contracts = vec![fixture::contract(
            1,
            1,
            1,
            date!(2024 - 01 - 01),
            Some(date!(2024 - 12 - 31)),
            5_000_000,
        )];
        facts.usages =
            vec![fixture::usage(1, 1, Kind::Monthly, "1", "300000")];
        facts
    }

    #[tokio::test]
    async fn computes_rent_and_services() {
        let svc = fixture::service(company_a());

        let cost = svc
            .execute(MonthlyCost {
                company_id: company_id(1),
                period: march(),
                today: date!(2024 - 03 - 20),
            })
            .await
            .unwrap();

        assert_eq!(cost.rent_cost, Money::from(5_000_000));
        assert_eq!(cost.total_service_cost, Money::from(300_000));
        assert_eq!(cost.total_cost, Money::from(5_300_000));
        assert_eq!(
            Some(cost.total_cost),
            cost.rent_cost.checked_add(cost.total_service_cost),
        );
    }

    #[tokio::test]
    async fn no_contracts_cost_nothing() {
        let svc = fixture::service(company_a());

        let cost = svc
            .execute(MonthlyCost {
                company_id: company_id(2),
                period: Period::new(2024, 4).unwrap(),
                today: date!(2024 - 04 - 20),
            })
            .await
            .unwrap();

        assert_eq!(cost.rent_cost, Money::ZERO);
        assert_eq!(cost.total_service_cost, Money::ZERO);
        assert_eq!(cost.total_cost, Money::ZERO);
    }

    #[tokio::test]
    async fn sums_concurrent_contracts() {
        let mut facts = company_a();
        facts.contracts.push(fixture::contract(
            2,
            1,
            2,
            date!(2024 - 03 - 15),
            None,
            2_000_000,
        ));
        let svc = fixture::service(facts);

        let cost = svc
            .execute(Cost {
                company_id: company_id(1),
                period: march(),
                today: date!(2024 - 03 - 20),
            })
            .await
            .unwrap();

        assert_eq!(cost.contracts.len(), 2);
        assert_eq!(cost.cost.rent_cost, Money::from(7_000_000));
        assert_eq!(cost.cost.total_cost, Money::from(7_300_000));
    }

    #[tokio::test]
    async fn excludes_negative_rent_from_total() {
        let mut facts = company_a();
        facts.contracts.push(fixture::contract(
            2,
            1,
            2,
            date!(2024 - 03 - 15),
            None,
            -2_000_000,
        ));
        let svc = fixture::service(facts);

        let cost = svc
            .execute(Cost {
                company_id: company_id(1),
                period: march(),
                today: date!(2024 - 03 - 20),
            })
            .await
            .unwrap();

        assert_eq!(cost.contracts.len(), 2);
        assert!(cost.contracts[1].charge.is_err());
        assert_eq!(cost.cost.rent_cost, Money::from(5_000_000));
    }

    #[tokio::test]
    async fn details_include_company() {
        let svc = fixture::service(company_a());

        let detail = svc
            .execute(CostDetail {
                company_id: company_id(1),
                period: march(),
                today: date!(2024 - 03 - 20),
            })
            .await
            .unwrap();

        assert_eq!(detail.company.name.to_string(), "Company 1");
        assert_eq!(detail.breakdown.contracts.len(), 1);
        assert_eq!(detail.breakdown.services.monthly.len(), 1);
    }

    #[tokio::test]
    async fn unknown_company_is_not_found() {
        let svc = fixture::service(company_a());

        let err = svc
            .execute(MonthlyCost {
                company_id: company_id(42),
                period: march(),
                today: date!(2024 - 03 - 20),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::CompanyNotExists(id) if *id == company_id(42),
        ));
        assert_eq!(err.as_ref().failure(), FailureKind::NotFound);
    }

    #[tokio::test]
    async fn upstream_failure_is_flagged() {
        let facts = Facts {
            outages: [fixture::outage(1)].into(),
            ..company_a()
        };
        let svc = fixture::service(facts);

        let err = svc
            .execute(Cost {
                company_id: company_id(1),
                period: march(),
                today: date!(2024 - 03 - 20),
            })
            .await
            .unwrap_err();

        assert_eq!(err.as_ref().failure(), FailureKind::UpstreamFetch);
    }
}
