//! [`Query`] collection related to shared-service usage.

use common::{
    operations::{By, Select},
    Period,
};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Company;
use crate::{
    domain::{company, usage},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] aggregating services consumed by a [`Company`] during a
/// [`Period`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Aggregate {
    /// ID of the [`Company`] consumed the services.
    pub company_id: company::Id,

    /// [`Period`] the services were consumed during.
    pub period: Period,
}

impl<Db> Query<Aggregate> for Service<Db>
where
    Db: Database<
        Select<By<Vec<usage::Record>, (company::Id, Period)>>,
        Ok = Vec<usage::Record>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = read::usage::Summary;
    type Err = Traced<database::Error>;

    async fn execute(&self, query: Aggregate) -> Result<Self::Ok, Self::Err> {
        let Aggregate { company_id, period } = query;

        let records = self
            .database()
            .execute(Select(By::<Vec<usage::Record>, _>::new((
                company_id, period,
            ))))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(read::usage::Summary::aggregate(
            records
                .into_iter()
                .filter(|r| r.company_id == company_id && r.period == period),
        ))
    }
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        domain::usage::Kind,
        query::fixture::{self, company_id, march},
        Query as _,
    };

    use super::Aggregate;

    #[tokio::test]
    async fn aggregates_company_usage() {
        let mut facts = fixture::building();
        facts.usages = vec![
            fixture::usage(1, 1, Kind::Monthly, "1", "300000"),
            fixture::usage(2, 1, Kind::Daily, "4", "25000"),
            fixture::usage(3, 2, Kind::Monthly, "1", "999"),
        ];
        let svc = fixture::service(facts);

        let summary = svc
            .execute(Aggregate {
                company_id: company_id(1),
                period: march(),
            })
            .await
            .unwrap();

        assert_eq!(summary.monthly.len(), 1);
        assert_eq!(summary.daily.len(), 1);
        assert_eq!(summary.total, Money::from(400_000));
    }

    #[tokio::test]
    async fn no_usage_is_zero() {
        let svc = fixture::service(fixture::building());

        let summary = svc
            .execute(Aggregate {
                company_id: company_id(3),
                period: march(),
            })
            .await
            .unwrap();

        assert_eq!(summary.total, Money::ZERO);
        assert!(summary.monthly.is_empty() && summary.daily.is_empty());
    }
}
