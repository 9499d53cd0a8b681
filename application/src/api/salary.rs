//! Employee salary definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, read};

use crate::{
    api::{self, report::Omission, scalar},
    Context,
};

/// Salary of an employee for a month.
#[derive(Clone, Debug, From)]
pub struct Salary(read::salary::Monthly);

/// Salary of an employee for a month.
#[graphql_object(name = "MonthlySalary", context = Context)]
impl Salary {
    /// ID of the paid employee.
    #[must_use]
    pub fn employee_id(&self) -> i32 {
        self.0.employee_id.into()
    }

    /// Full name of the paid employee.
    #[must_use]
    pub fn full_name(&self) -> FullName {
        self.0.full_name.clone().into()
    }

    /// Role of the paid employee.
    #[must_use]
    pub fn role(&self) -> Role {
        self.0.role.clone().into()
    }

    /// Base salary of the employee.
    #[must_use]
    pub fn base_salary(&self) -> Money {
        self.0.base_salary
    }

    /// Bonus of the employee out of the building service revenue.
    #[must_use]
    pub fn bonus(&self) -> Money {
        self.0.bonus
    }

    /// Sum of the `baseSalary` and the `bonus`.
    #[must_use]
    pub fn total_salary(&self) -> Money {
        self.0.total_salary
    }
}

/// Full name of an employee.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "EmployeeFullName",
    with = scalar::Via::<domain::employee::FullName>,
)]
pub struct FullName(domain::employee::FullName);

/// Role of an employee.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "EmployeeRole",
    with = scalar::Via::<domain::employee::Role>,
)]
pub struct Role(domain::employee::Role);

/// Salaries of all the active employees for a month.
#[derive(Clone, Debug, From)]
pub struct Payroll(read::salary::Payroll);

/// Salaries of all the active employees for a month.
#[graphql_object(name = "MonthlySalaries", context = Context)]
impl Payroll {
    /// Building service revenue the bonuses are computed out of.
    #[must_use]
    pub fn service_revenue(&self) -> Money {
        self.0.service_revenue
    }

    /// `MonthlySalary`s ordered by employee IDs.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "MonthlySalaries.salaries",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn salaries(&self) -> Vec<Salary> {
        self.0.salaries.iter().cloned().map(Into::into).collect()
    }

    /// Sum of all the `salaries`.
    #[must_use]
    pub fn total(&self) -> Money {
        self.0.total
    }

    /// Items omitted from the `total` due to failures.
    #[must_use]
    pub fn omissions(&self) -> Vec<Omission> {
        self.0.omissions.iter().cloned().map(Into::into).collect()
    }
}
