//! [`Query`] collection related to [`Contract`]s.

use std::collections::HashMap;

use common::{
    operations::{By, Select},
    Date, Period,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Company;
use crate::{
    domain::{company, office, Contract, Office},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] resolving [`Contract`]s of a [`Company`] in force during a
/// [`Period`].
///
/// Resolved [`Contract`]s are ordered by their `from_date`, then by IDs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InEffect {
    /// ID of the [`Company`] to resolve [`Contract`]s of.
    pub company_id: company::Id,

    /// [`Period`] to resolve [`Contract`]s for.
    pub period: Period,

    /// Current [`Date`] to classify [`Contract`]s relative to.
    pub today: Date,
}

impl<Db> Query<InEffect> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Contract>, Option<company::Id>>>,
            Ok = Vec<Contract>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<office::Id, Office>, Vec<office::Id>>>,
            Ok = HashMap<office::Id, Office>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<read::contract::InEffect>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: InEffect) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let InEffect {
            company_id,
            period,
            today,
        } = query;

        let mut contracts = self
            .database()
            .execute(Select(By::<Vec<Contract>, _>::new(Some(company_id))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .into_iter()
            .filter(|c| c.company_id == company_id && c.is_in_effect(period))
            .collect::<Vec<_>>();
        if contracts.is_empty() {
            return Ok(vec![]);
        }
        contracts.sort_by_key(|c| (c.from_date, c.id));

        let offices = self
            .database()
            .execute(Select(By::<HashMap<office::Id, Office>, _>::new(
                contracts.iter().map(|c| c.office_id).collect::<Vec<_>>(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let proration = self.config().proration;
        contracts
            .into_iter()
            .map(|contract| -> Result<_, Self::Err> {
                let office_name = offices
                    .get(&contract.office_id)
                    .map(|o| o.name.clone())
                    .ok_or(E::OfficeNotExists(contract.office_id))
                    .map_err(tracerr::wrap!())?;

                Ok(read::contract::InEffect {
                    status: contract.status(period, today),
                    charge: proration.charge(&contract, period),
                    office_name,
                    contract,
                })
            })
            .collect()
    }
}

/// Error of [`InEffect`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Office`] referenced by a [`Contract`] does not exist.
    #[display("`Office(id: {_0})` does not exist")]
    OfficeNotExists(#[error(not(source))] office::Id),
}

#[cfg(test)]
mod spec {
    use common::Money;
    use time::macros::date;

    use crate::{
        domain::contract::Status,
        infra::database::memory::Facts,
        query::fixture::{self, company_id, march},
        read::{contract::Proration, ComputationError},
        Config, Query as _,
    };

    use super::{ExecutionError, InEffect};

    fn query(company: i32) -> InEffect {
        InEffect {
            company_id: company_id(company),
            period: march(),
            today: date!(2024 - 03 - 20),
        }
    }

    #[tokio::test]
    async fn resolves_in_order_of_start() {
        let mut facts = fixture::building();
        facts.contracts = vec![
            fixture::contract(7, 1, 1, date!(2024 - 02 - 01), None, 100),
            fixture::contract(3, 1, 2, date!(2024 - 03 - 31), None, 200),
            fixture::contract(5, 1, 2, date!(2024 - 02 - 01), None, 300),
            fixture::contract(
                9,
                1,
                1,
                date!(2023 - 01 - 01),
                Some(date!(2024 - 03 - 01)),
                400,
            ),
            fixture::contract(2, 1, 1, date!(2024 - 04 - 01), None, 500),
            fixture::contract(4, 2, 1, date!(2024 - 01 - 01), None, 600),
        ];
        let svc = fixture::service(facts);

        let resolved = svc.execute(query(1)).await.unwrap();

        assert_eq!(
            resolved.iter().map(|c| i32::from(c.id())).collect::<Vec<_>>(),
            vec![9, 5, 7, 3],
        );
        assert_eq!(resolved[0].status, Status::Expired);
        assert_eq!(resolved[1].status, Status::Active);
        assert_eq!(resolved[0].office_name.to_string(), "Office 1");
        assert_eq!(resolved[1].office_name.to_string(), "Office 2");
    }

    #[tokio::test]
    async fn nothing_in_effect_is_empty() {
        let mut facts = fixture::building();
        facts.contracts = vec![fixture::contract(
            1,
            1,
            1,
            date!(2024 - 04 - 01),
            None,
            100,
        )];
        let svc = fixture::service(facts);

        assert!(svc.execute(query(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn flags_negative_rent() {
        let mut facts = fixture::building();
        facts.contracts = vec![fixture::contract(
            1,
            1,
            1,
            date!(2024 - 01 - 01),
            None,
            -100,
        )];
        let svc = fixture::service(facts);

        let resolved = svc.execute(query(1)).await.unwrap();

        assert!(matches!(
            resolved[0].charge,
            Err(ComputationError::NegativeRentPrice(_)),
        ));
    }

    #[tokio::test]
    async fn prorates_daily_when_configured() {
        let mut facts = fixture::building();
        facts.contracts = vec![fixture::contract(
            1,
            1,
            1,
            date!(2024 - 03 - 17),
            None,
            3_100_000,
        )];
        let svc = fixture::service_with(
            Config {
                proration: Proration::Daily,
                ..Config::default()
            },
            facts,
        );

        let resolved = svc.execute(query(1)).await.unwrap();

        assert_eq!(resolved[0].charge, Ok(Money::from(1_500_000)));
    }

    #[tokio::test]
    async fn fails_on_missing_office() {
        let mut facts = fixture::building();
        facts.contracts = vec![fixture::contract(
            1,
            1,
            99,
            date!(2024 - 01 - 01),
            None,
            100,
        )];
        let svc = fixture::service(facts);

        let err = svc.execute(query(1)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::OfficeNotExists(id) if i32::from(*id) == 99,
        ));
    }

    #[tokio::test]
    async fn surfaces_upstream_failure() {
        let facts = Facts {
            outages: [fixture::outage(1)].into(),
            ..fixture::building()
        };
        let svc = fixture::service(facts);

        let err = svc.execute(query(1)).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Db(_)));
    }
}
