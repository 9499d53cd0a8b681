//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{domain, query, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Computes the monthly cost of the `Company` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_ID` - the specified ID is not positive;
    /// - `INVALID_MONTH` - the `month` is out of `1..=12` range;
    /// - `INVALID_YEAR` - the `year` is not a four-digit year;
    /// - `COMPANY_NOT_EXISTS` - the `Company` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            company_id = %company_id,
            gql.name = "monthlyCompanyCost",
            month = %month,
            otel.name = Self::SPAN_NAME,
            year = %year,
        ),
    )]
    pub async fn monthly_company_cost(
        company_id: i32,
        month: i32,
        year: i32,
        ctx: &Context,
    ) -> Result<api::company::MonthlyCost, Error> {
        let company_id = api::id(company_id, domain::company::Id::new, ctx)?;
        let period = api::period(month, year, ctx)?;

        ctx.service()
            .execute(query::company::MonthlyCost {
                company_id,
                period,
                today: ctx.today(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Computes the monthly cost of the `Company` with the specified ID along
    /// with its contracts and services.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_ID` - the specified ID is not positive;
    /// - `INVALID_MONTH` - the `month` is out of `1..=12` range;
    /// - `INVALID_YEAR` - the `year` is not a four-digit year;
    /// - `COMPANY_NOT_EXISTS` - the `Company` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            company_id = %company_id,
            gql.name = "companyCostDetail",
            month = %month,
            otel.name = Self::SPAN_NAME,
            year = %year,
        ),
    )]
    pub async fn company_cost_detail(
        company_id: i32,
        month: i32,
        year: i32,
        ctx: &Context,
    ) -> Result<api::company::CostDetail, Error> {
        let company_id = api::id(company_id, domain::company::Id::new, ctx)?;
        let period = api::period(month, year, ctx)?;

        ctx.service()
            .execute(query::company::CostDetail {
                company_id,
                period,
                today: ctx.today(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Computes the salaries of all the active employees for the specified
    /// month.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_MONTH` - the `month` is out of `1..=12` range;
    /// - `INVALID_YEAR` - the `year` is not a four-digit year.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "monthlySalaries",
            month = %month,
            otel.name = Self::SPAN_NAME,
            year = %year,
        ),
    )]
    pub async fn monthly_salaries(
        month: i32,
        year: i32,
        ctx: &Context,
    ) -> Result<api::salary::Payroll, Error> {
        let period = api::period(month, year, ctx)?;

        ctx.service()
            .execute(query::report::Salaries {
                period,
                today: ctx.today(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Computes the salary of the active employee with the specified ID for
    /// the specified month.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_ID` - the specified ID is not positive;
    /// - `INVALID_MONTH` - the `month` is out of `1..=12` range;
    /// - `INVALID_YEAR` - the `year` is not a four-digit year;
    /// - `EMPLOYEE_NOT_EXISTS` - the active employee with the specified ID
    ///                           does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            employee_id = %employee_id,
            gql.name = "monthlySalary",
            month = %month,
            otel.name = Self::SPAN_NAME,
            year = %year,
        ),
    )]
    pub async fn monthly_salary(
        employee_id: i32,
        month: i32,
        year: i32,
        ctx: &Context,
    ) -> Result<api::salary::Salary, Error> {
        let employee_id =
            api::id(employee_id, domain::employee::Id::new, ctx)?;
        let period = api::period(month, year, ctx)?;

        let payroll = ctx
            .service()
            .execute(query::report::Salaries {
                period,
                today: ctx.today(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.service()
            .execute(query::employee::Salary {
                employee_id,
                period,
                service_revenue: payroll.service_revenue,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Builds the revenue, expense and profit report of the building for the
    /// specified month.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_MONTH` - the `month` is out of `1..=12` range;
    /// - `INVALID_YEAR` - the `year` is not a four-digit year.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "buildingFinanceReport",
            month = %month,
            otel.name = Self::SPAN_NAME,
            year = %year,
        ),
    )]
    pub async fn building_finance_report(
        month: i32,
        year: i32,
        ctx: &Context,
    ) -> Result<api::report::Finance, Error> {
        let period = api::period(month, year, ctx)?;

        ctx.service()
            .execute(query::report::BuildingFinance {
                period,
                today: ctx.today(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Builds the line items of the building finance report for the
    /// specified month.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_MONTH` - the `month` is out of `1..=12` range;
    /// - `INVALID_YEAR` - the `year` is not a four-digit year.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "buildingFinanceReportDetails",
            month = %month,
            otel.name = Self::SPAN_NAME,
            year = %year,
        ),
    )]
    pub async fn building_finance_report_details(
        month: i32,
        year: i32,
        ctx: &Context,
    ) -> Result<api::report::Details, Error> {
        let period = api::period(month, year, ctx)?;

        ctx.service()
            .execute(query::report::BuildingFinance {
                period,
                today: ctx.today(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for query::company::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::CompanyNotExists(_) => {
                Some(CompanyError::NotExists.into())
            }
            Self::Db(e) => e.try_as_error(),
            Self::Computation(_) | Self::OfficeNotExists(_) => None,
        }
    }
}

impl AsError for query::employee::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmployeeNotExists(_) => {
                Some(EmployeeError::NotExists.into())
            }
            Self::Computation(_) => None,
        }
    }
}

impl AsError for query::report::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Computation(_) => None,
        }
    }
}

define_error! {
    enum CompanyError {
        #[code = "COMPANY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Company` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum EmployeeError {
        #[code = "EMPLOYEE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Active employee with the specified ID does not exist"]
        NotExists,
    }
}
