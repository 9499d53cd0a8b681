//! [`Query`] collection related to [`Employee`] salaries.

use common::{
    operations::{By, Select},
    Money, Period,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{employee, Employee},
    infra::{database, Database},
    query::DatabaseQuery,
    read::{self, ComputationError},
    Query, Service,
};

/// Queries all the [`Employee`]s ordered by their IDs.
pub type List = DatabaseQuery<By<Vec<Employee>, ()>>;

/// [`Query`] computing a [`read::salary::Monthly`] salary of an active
/// [`Employee`] for a [`Period`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Salary {
    /// ID of the [`Employee`] to compute the salary of.
    pub employee_id: employee::Id,

    /// [`Period`] to compute the salary for.
    pub period: Period,

    /// Building service revenue of the [`Period`] the bonus is based on.
    pub service_revenue: Money,
}

impl<Db> Query<Salary> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Employee>, ()>>,
        Ok = Vec<Employee>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = read::salary::Monthly;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Salary) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Salary {
            employee_id,
            period,
            service_revenue,
        } = query;

        let active = self
            .execute(List::by(()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .into_iter()
            .filter(Employee::is_active)
            .collect::<Vec<_>>();
        let sharers = active.iter().filter(|e| !e.bonus_rate.is_zero()).count();

        let employee = active
            .iter()
            .find(|e| e.id == employee_id)
            .ok_or(E::EmployeeNotExists(employee_id))
            .map_err(tracerr::wrap!())?;

        read::salary::Monthly::compute(
            employee,
            period,
            service_revenue,
            sharers,
            self.config().bonus_sharing,
        )
        .map_err(E::Computation)
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`Salary`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Salary cannot be computed out of the stored facts.
    #[display("Failed to compute salary: {_0}")]
    Computation(ComputationError),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Active [`Employee`] with the provided ID does not exist.
    #[display("`Employee(id: {_0})` does not exist")]
    EmployeeNotExists(#[error(not(source))] employee::Id),
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        domain::employee::{self, Status},
        query::fixture::{self, march},
        read::salary::BonusSharing,
        Config, Query as _,
    };

    use super::{ExecutionError, Salary};

    #[tokio::test]
    async fn pays_base_and_bonus() {
        let mut facts = fixture::building();
        facts.employees = vec![
            fixture::employee(1, 8_000_000, "0.02"),
            fixture::employee(2, 6_000_000, "0.02"),
        ];

        for (sharing, bonus) in [
            (BonusSharing::PerEmployee, 20_000),
            (BonusSharing::EvenSplit, 10_000),
        ] {
            let svc = fixture::service_with(
                Config {
                    bonus_sharing: sharing,
                    ..Config::default()
                },
                facts.clone(),
            );

            let salary = svc
                .execute(Salary {
                    employee_id: employee::Id::new(1).unwrap(),
                    period: march(),
                    service_revenue: Money::from(1_000_000),
                })
                .await
                .unwrap();

            assert_eq!(salary.bonus, Money::from(bonus));
            assert_eq!(
                Some(salary.total_salary),
                salary.base_salary.checked_add(salary.bonus),
            );
        }
    }

    #[tokio::test]
    async fn resigned_employee_is_not_found() {
        let mut facts = fixture::building();
        let mut resigned = fixture::employee(1, 8_000_000, "0.02");
        resigned.status = Status::Resigned;
        facts.employees = vec![resigned];
        let svc = fixture::service(facts);

        let err = svc
            .execute(Salary {
                employee_id: employee::Id::new(1).unwrap(),
                period: march(),
                service_revenue: Money::ZERO,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::EmployeeNotExists(_)));
    }
}
