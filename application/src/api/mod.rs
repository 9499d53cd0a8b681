//! GraphQL API definitions.

pub mod company;
mod query;
pub mod report;
pub mod salary;
pub mod scalar;

use common::Period;

use crate::{define_error, AsError, Context, Error};

pub use juniper::{EmptyMutation, EmptySubscription};

pub use self::query::Query;

/// GraphQL schema.
pub type Schema = juniper::RootNode<
    'static,
    Query,
    EmptyMutation<Context>,
    EmptySubscription<Context>,
>;

define_error! {
    enum IdError {
        #[code = "INVALID_ID"]
        #[status = BAD_REQUEST]
        #[message = "ID must be a positive integer"]
        Invalid,
    }
}

/// Parses a [`Period`] out of the provided GraphQL arguments.
///
/// # Errors
///
/// With `INVALID_MONTH` or `INVALID_YEAR` code if the arguments are out of
/// range.
pub(crate) fn period(
    month: i32,
    year: i32,
    ctx: &Context,
) -> Result<Period, Error> {
    Period::new(year, month)
        .map_err(AsError::into_error)
        .map_err(ctx.error())
}

/// Parses an ID out of the provided GraphQL argument with the provided
/// constructor.
///
/// # Errors
///
/// With `INVALID_ID` code if the ID is not positive.
pub(crate) fn id<T>(
    id: i32,
    new: impl FnOnce(i32) -> Option<T>,
    ctx: &Context,
) -> Result<T, Error> {
    new(id)
        .ok_or_else(|| IdError::Invalid.into())
        .map_err(ctx.error())
}

#[cfg(test)]
mod spec {
    use juniper::Variables;
    use service::infra::Postgres;

    use crate::{config, Context, Service};

    use super::{EmptyMutation, EmptySubscription, Query, Schema};

    /// Executes the provided GraphQL `query` expecting it to be rejected
    /// before reaching the database, returning the error code along with the
    /// response status.
    async fn rejection(query: &str) -> (String, http::StatusCode) {
        // The pool connects lazily, so the database is never dialed.
        let postgres =
            Postgres::new(&config::Postgres::default().into()).unwrap();
        let ctx = Context::new(
            Service::new(service::Config::default(), postgres),
            common::period::today(),
        );
        let schema =
            Schema::new(Query, EmptyMutation::new(), EmptySubscription::new());

        let (_, errors) =
            juniper::execute(query, None, &schema, &Variables::new(), &ctx)
                .await
                .unwrap();
        assert_eq!(errors.len(), 1, "unexpected errors: {errors:?}");
        let code = errors[0]
            .error()
            .extensions()
            .as_object_value()
            .and_then(|ext| ext.get_field_value("code"))
            .and_then(|code| code.as_string_value())
            .map(str::to_owned)
            .unwrap_or_default();

        (code, ctx.error_status_code())
    }

    #[tokio::test]
    async fn rejects_out_of_range_month() {
        for month in [0, 13, -1] {
            let (code, status) = rejection(&format!(
                "{{ buildingFinanceReport(month: {month}, year: 2024) \
                   {{ netProfit }} }}",
            ))
            .await;

            assert_eq!(code, "INVALID_MONTH");
            assert_eq!(status, http::StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn rejects_non_four_digit_year() {
        for year in [999, 10_000, 0] {
            let (code, status) = rejection(&format!(
                "{{ monthlySalaries(month: 3, year: {year}) {{ total }} }}",
            ))
            .await;

            assert_eq!(code, "INVALID_YEAR");
            assert_eq!(status, http::StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn rejects_non_positive_ids() {
        let (code, status) = rejection(
            "{ monthlyCompanyCost(companyId: 0, month: 3, year: 2024) \
               { totalCost } }",
        )
        .await;
        assert_eq!(code, "INVALID_ID");
        assert_eq!(status, http::StatusCode::BAD_REQUEST);

        let (code, status) = rejection(
            "{ monthlySalary(employeeId: -4, month: 3, year: 2024) \
               { totalSalary } }",
        )
        .await;
        assert_eq!(code, "INVALID_ID");
        assert_eq!(status, http::StatusCode::BAD_REQUEST);
    }
}
