//! [`Query`] collection building monthly reports of the building.

use common::{
    operations::{By, Select},
    Date, Money, Period,
};
use derive_more::{Display, Error, From};
use futures::future;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{company, contract, invoice, Company, Employee, Invoice},
    infra::{database, Database},
    query,
    read::{
        self,
        report::{Omission, RevenueItem, RevenueRow},
        salary::Payroll,
        ComputationError,
    },
    Query, Service,
};

/// Outcome of computing a single [`Company`] cost.
pub type CompanyCost = (
    Company,
    Result<read::cost::Breakdown, Traced<query::company::ExecutionError>>,
);

/// [`Query`] computing costs of all the [`Company`]s for a [`Period`]
/// concurrently.
///
/// A failure of a single [`Company`] doesn't fail the others.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompanyCosts {
    /// [`Period`] to compute the costs for.
    pub period: Period,

    /// Current [`Date`] to classify contracts relative to.
    pub today: Date,
}

impl<Db> Query<CompanyCosts> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Company>, ()>>,
        Ok = Vec<Company>,
        Err = Traced<database::Error>,
    >,
    Self: Query<
        query::company::Cost,
        Ok = read::cost::Breakdown,
        Err = Traced<query::company::ExecutionError>,
    >,
{
    type Ok = Vec<CompanyCost>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: CompanyCosts,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CompanyCosts { period, today } = query;

        let mut companies = self
            .database()
            .execute(Select(By::<Vec<Company>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        companies.sort_by_key(|c| c.id);

        let costs = future::join_all(companies.iter().map(|c| {
            self.execute(query::company::Cost {
                company_id: c.id,
                period,
                today,
            })
        }))
        .await;

        Ok(companies.into_iter().zip(costs).collect())
    }
}

/// [`Query`] computing salaries of all the active [`Employee`]s for a
/// [`Period`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Salaries {
    /// [`Period`] to compute the salaries for.
    pub period: Period,

    /// Current [`Date`] to classify contracts relative to.
    pub today: Date,
}

impl<Db> Query<Salaries> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Employee>, ()>>,
        Ok = Vec<Employee>,
        Err = Traced<database::Error>,
    >,
    Self: Query<
        CompanyCosts,
        Ok = Vec<CompanyCost>,
        Err = Traced<ExecutionError>,
    >,
{
    type Ok = Payroll;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Salaries) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Salaries { period, today } = query;

        let costs = self
            .execute(CompanyCosts { period, today })
            .await
            .map_err(tracerr::wrap!())?;
        let Revenue {
            service_revenue,
            mut omissions,
            ..
        } = Revenue::collect(period, costs);

        let employees = self
            .database()
            .execute(Select(By::<Vec<Employee>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut payroll = Payroll::compute(
            period,
            service_revenue,
            employees,
            self.config().bonus_sharing,
        );
        log_omissions(period, &payroll.omissions);
        omissions.append(&mut payroll.omissions);
        payroll.omissions = omissions;

        Ok(payroll)
    }
}

/// [`Query`] building a [`read::report::Finance`] report for a [`Period`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BuildingFinance {
    /// [`Period`] to build the report for.
    pub period: Period,

    /// Current [`Date`] to classify contracts relative to.
    pub today: Date,
}

impl<Db> Query<BuildingFinance> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Employee>, ()>>,
            Ok = Vec<Employee>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Invoice>, (company::Id, Period)>>,
            Ok = Vec<Invoice>,
            Err = Traced<database::Error>,
        >,
    Self: Query<
        CompanyCosts,
        Ok = Vec<CompanyCost>,
        Err = Traced<ExecutionError>,
    >,
{
    type Ok = read::report::Finance;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: BuildingFinance,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let BuildingFinance { period, today } = query;

        let costs = self
            .execute(CompanyCosts { period, today })
            .await
            .map_err(tracerr::wrap!())?;
        let Revenue {
            included,
            total_revenue,
            service_revenue,
            mut omissions,
        } = Revenue::collect(period, costs);

        let invoices = future::join_all(included.iter().map(|(c, _)| {
            self.database()
                .execute(Select(By::<Vec<Invoice>, _>::new((c.id, period))))
        }))
        .await;

        let mut revenue_details = vec![];
        for ((company, breakdown), invoices) in included.iter().zip(invoices) {
            let invoices = invoices
                .inspect_err(|e| {
                    log::warn!(
                        "payment status of `Company(id: {})` for `{period}` \
                         is unknown: {e}",
                        company.id,
                    );
                })
                .ok();
            revenue_details.extend(revenue_rows(
                company,
                breakdown,
                invoices.as_deref(),
            ));
        }

        let employees = self
            .database()
            .execute(Select(By::<Vec<Employee>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let payroll = Payroll::compute(
            period,
            service_revenue,
            employees,
            self.config().bonus_sharing,
        );
        log_omissions(period, &payroll.omissions);
        omissions.extend(payroll.omissions);

        let net_profit = total_revenue
            .checked_sub(payroll.total)
            .ok_or(E::Computation(ComputationError::Overflow))
            .map_err(tracerr::wrap!())?;

        Ok(read::report::Finance {
            period,
            total_revenue,
            total_expense: payroll.total,
            net_profit,
            building_service_revenue: service_revenue,
            revenue_details,
            expense_details: payroll.salaries,
            omissions,
        })
    }
}

/// Error of building a report.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Report totals cannot be computed.
    #[display("Failed to compute report totals: {_0}")]
    Computation(ComputationError),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),
}

/// Revenue of the building collected out of [`CompanyCost`]s.
struct Revenue {
    /// Successfully computed [`Company`] costs ordered by [`Company`] IDs.
    included: Vec<(Company, read::cost::Breakdown)>,

    /// Sum of the total costs of the `included` [`Company`]s.
    total_revenue: Money,

    /// Sum of the services costs of the `included` [`Company`]s.
    service_revenue: Money,

    /// Items omitted from the revenue.
    omissions: Vec<Omission>,
}

impl Revenue {
    /// Collects [`Revenue`] out of the provided [`CompanyCost`]s, logging
    /// every omitted item.
    ///
    /// A [`Company`] whose cost would overflow the revenue sums is omitted
    /// as a whole.
    fn collect(period: Period, mut costs: Vec<CompanyCost>) -> Self {
        costs.sort_by_key(|(c, _)| c.id);

        let mut included = Vec::with_capacity(costs.len());
        let mut total_revenue = Money::ZERO;
        let mut service_revenue = Money::ZERO;
        let mut omissions = vec![];
        for (company, cost) in costs {
            let breakdown = match cost {
                Ok(b) => b,
                Err(e) => {
                    let failure = e.as_ref().failure();
                    omissions.push(Omission::new(company.id, failure, &e));
                    continue;
                }
            };

            let Some((total, services)) = total_revenue
                .checked_add(breakdown.cost.total_cost)
                .zip(service_revenue.checked_add(breakdown.services.total))
            else {
                omissions.push(Omission::computation(
                    company.id,
                    &ComputationError::Overflow,
                ));
                continue;
            };
            total_revenue = total;
            service_revenue = services;

            omissions.extend(breakdown.contracts.iter().filter_map(|c| {
                c.charge.err().map(|e| Omission::computation(c.id(), &e))
            }));
            omissions.extend(breakdown.services.lines().filter_map(|l| {
                l.total.err().map(|e| Omission::computation(l.record_id, &e))
            }));
            included.push((company, breakdown));
        }
        log_omissions(period, &omissions);

        Self {
            included,
            total_revenue,
            service_revenue,
            omissions,
        }
    }
}

/// Builds [`RevenueRow`]s of the provided [`Company`]: one per contract with
/// a computed charge, followed by a single services row, if any service was
/// billed.
///
/// [`None`] `invoices` means the payment status is unknown.
fn revenue_rows(
    company: &Company,
    breakdown: &read::cost::Breakdown,
    invoices: Option<&[Invoice]>,
) -> Vec<RevenueRow> {
    let payment = |contract_id: Option<contract::Id>| {
        invoices.map(|is| {
            is.iter()
                .find(|i| i.contract_id == contract_id)
                .map_or(invoice::Status::default(), |i| i.status)
        })
    };
    let row = |item: RevenueItem, amount: Money| RevenueRow {
        company_id: company.id,
        company_name: company.name.clone(),
        tax_code: company.tax_code.clone(),
        item,
        amount,
        payment: None,
    };

    let mut rows = breakdown
        .contracts
        .iter()
        .filter_map(|c| {
            let amount = c.charge.ok()?;
            Some(RevenueRow {
                payment: payment(Some(c.id())),
                ..row(
                    RevenueItem::Rent {
                        contract_id: c.id(),
                        office_name: c.office_name.clone(),
                        from_date: c.contract.from_date,
                        end_date: c.contract.end_date,
                    },
                    amount,
                )
            })
        })
        .collect::<Vec<_>>();
    if breakdown.services.has_valid_lines() {
        rows.push(RevenueRow {
            payment: payment(None),
            ..row(RevenueItem::Services, breakdown.services.total)
        });
    }
    rows
}

/// Logs the provided [`Omission`]s of a report for the provided [`Period`].
fn log_omissions(period: Period, omissions: &[Omission]) {
    for o in omissions {
        log::warn!(
            "`{}` omitted from `{period}` report due to {} failure: {}",
            o.subject,
            o.failure,
            o.reason,
        );
    }
}

#[cfg(test)]
mod spec {
    use common::{Money, Period};
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        domain::{contract, invoice, usage::Kind, Invoice},
        infra::database::memory::{Facts, Outage},
        query::fixture::{self, company_id, march},
        read::{
            report::{FailureKind, RevenueItem, Subject},
            salary::BonusSharing,
        },
        Config, Query as _,
    };

    use super::{BuildingFinance, ExecutionError, Salaries};

    /// Company 1 pays 5,300,000 and company 2 pays 2,000,000, with 300,000 of
    /// service revenue in total.
    fn two_companies(base_salary: i64) -> Facts {
        let mut facts = fixture::building();
        facts.companies.truncate(2);
        facts.contracts = vec![
            fixture::contract(1, 1, 1, date!(2024 - 01 - 01), None, 5_000_000),
            fixture::contract(2, 2, 2, date!(2024 - 03 - 10), None, 2_000_000),
        ];
        facts.usages =
            vec![fixture::usage(1, 1, Kind::Monthly, "1", "300000")];
        facts.employees = vec![fixture::employee(1, base_salary, "0.1")];
        facts
    }

    fn query() -> BuildingFinance {
        BuildingFinance {
            period: march(),
            today: date!(2024 - 03 - 20),
        }
    }

    #[tokio::test]
    async fn reports_loss() {
        let svc = fixture::service(two_companies(8_000_000));

        let report = svc.execute(query()).await.unwrap();

        assert_eq!(report.total_revenue, Money::from(7_300_000));
        assert_eq!(report.building_service_revenue, Money::from(300_000));
        assert_eq!(report.expense_details[0].bonus, Money::from(30_000));
        assert_eq!(report.total_expense, Money::from(8_030_000));
        assert_eq!(report.net_profit, Money::from(-730_000));
        assert_eq!(
            Some(report.net_profit),
            report.total_revenue.checked_sub(report.total_expense),
        );
        assert!(report.omissions.is_empty());
    }

    #[tokio::test]
    async fn reports_profit() {
        let svc = fixture::service(two_companies(5_000_000));

        let report = svc.execute(query()).await.unwrap();

        assert_eq!(report.total_revenue, Money::from(7_300_000));
        assert_eq!(report.total_expense, Money::from(5_030_000));
        assert_eq!(report.net_profit, Money::from(2_270_000));
    }

    #[tokio::test]
    async fn empty_month_is_zero() {
        let svc = fixture::service(fixture::building());

        let report = svc
            .execute(BuildingFinance {
                period: Period::new(2024, 4).unwrap(),
                today: date!(2024 - 04 - 20),
            })
            .await
            .unwrap();

        assert_eq!(report.total_revenue, Money::ZERO);
        assert_eq!(report.total_expense, Money::ZERO);
        assert_eq!(report.net_profit, Money::ZERO);
        assert!(report.revenue_details.is_empty());
        assert!(report.expense_details.is_empty());
        assert!(report.omissions.is_empty());
    }

    #[tokio::test]
    async fn is_idempotent() {
        let svc = fixture::service(two_companies(8_000_000));

        let first = svc.execute(query()).await.unwrap();
        let second = svc.execute(query()).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn orders_detail_rows() {
        let mut facts = two_companies(8_000_000);
        facts.contracts.push(fixture::contract(
            3,
            1,
            2,
            date!(2023 - 06 - 01),
            None,
            1_000_000,
        ));
        facts.employees.insert(0, fixture::employee(2, 1_000_000, "0"));
        let svc = fixture::service(facts);

        let report = svc.execute(query()).await.unwrap();

        let rows = report
            .revenue_details
            .iter()
            .map(|r| {
                let item = match &r.item {
                    RevenueItem::Rent { contract_id, .. } => {
                        Some(i32::from(*contract_id))
                    }
                    RevenueItem::Services => None,
                };
                (i32::from(r.company_id), item)
            })
            .collect::<Vec<_>>();
        assert_eq!(
            rows,
            vec![(1, Some(3)), (1, Some(1)), (1, None), (2, Some(2))],
        );
        assert_eq!(
            report
                .expense_details
                .iter()
                .map(|s| i32::from(s.employee_id))
                .collect::<Vec<_>>(),
            vec![1, 2],
        );
    }

    #[tokio::test]
    async fn tags_payment_status() {
        let mut facts = two_companies(8_000_000);
        facts.invoices = vec![Invoice {
            id: invoice::Id::new(1).unwrap(),
            company_id: company_id(1),
            contract_id: contract::Id::new(1),
            period: march(),
            total: Money::from(5_000_000),
            status: invoice::Status::Paid,
        }];
        facts.outages = [Outage::Invoices(company_id(2))].into();
        let svc = fixture::service(facts);

        let report = svc.execute(query()).await.unwrap();

        let payments = report
            .revenue_details
            .iter()
            .map(|r| r.payment)
            .collect::<Vec<_>>();
        assert_eq!(
            payments,
            vec![
                Some(invoice::Status::Paid),
                Some(invoice::Status::Unpaid),
                None,
            ],
        );
        assert_eq!(report.total_revenue, Money::from(7_300_000));
    }

    #[tokio::test]
    async fn isolates_failed_company() {
        let mut facts = two_companies(8_000_000);
        facts.companies = vec![
            fixture::company(1),
            fixture::company(2),
            fixture::company(3),
        ];
        facts.contracts.push(fixture::contract(
            3,
            3,
            1,
            date!(2024 - 01 - 01),
            None,
            9_000_000,
        ));
        facts.outages = [fixture::outage(3)].into();
        let svc = fixture::service(facts);

        let report = svc.execute(query()).await.unwrap();

        assert_eq!(report.total_revenue, Money::from(7_300_000));
        assert_eq!(report.omissions.len(), 1);
        assert_eq!(
            report.omissions[0].subject,
            Subject::Company(company_id(3)),
        );
        assert_eq!(report.omissions[0].failure, FailureKind::UpstreamFetch);
        assert!(report
            .revenue_details
            .iter()
            .all(|r| r.company_id != company_id(3)));
    }

    #[tokio::test]
    async fn flags_invalid_lines() {
        let mut facts = two_companies(8_000_000);
        facts
            .usages
            .push(fixture::usage(2, 2, Kind::Daily, "-3", "1000"));
        let svc = fixture::service(facts);

        let report = svc.execute(query()).await.unwrap();

        assert_eq!(report.total_revenue, Money::from(7_300_000));
        assert_eq!(report.omissions.len(), 1);
        assert_eq!(report.omissions[0].failure, FailureKind::Computation);
        // Company 2 has no valid service line, so no services row.
        assert_eq!(report.revenue_details.len(), 3);
    }

    #[tokio::test]
    async fn omits_companies_overflowing_totals() {
        let max = Decimal::MAX.to_string();
        let mut facts = two_companies(8_000_000);
        facts.companies.push(fixture::company(3));
        facts.usages.extend([
            fixture::usage(2, 2, Kind::Monthly, "1", &max),
            fixture::usage(3, 3, Kind::Monthly, "1", &max),
        ]);
        let svc = fixture::service(facts);

        let report = svc.execute(query()).await.unwrap();

        assert_eq!(report.total_revenue, Money::from(5_300_000));
        assert_eq!(report.building_service_revenue, Money::from(300_000));
        assert_eq!(report.net_profit, Money::from(-2_730_000));
        assert_eq!(
            report
                .omissions
                .iter()
                .map(|o| (o.subject, o.failure))
                .collect::<Vec<_>>(),
            vec![
                (Subject::Company(company_id(2)), FailureKind::Computation),
                (Subject::Company(company_id(3)), FailureKind::Computation),
            ],
        );
    }

    #[tokio::test]
    async fn fails_when_companies_unavailable() {
        let facts = Facts {
            outages: [Outage::Companies].into(),
            ..two_companies(8_000_000)
        };
        let svc = fixture::service(facts);

        let err = svc.execute(query()).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Db(_)));
    }

    #[tokio::test]
    async fn fails_when_employees_unavailable() {
        let facts = Facts {
            outages: [Outage::Employees].into(),
            ..two_companies(8_000_000)
        };
        let svc = fixture::service(facts);

        assert!(svc.execute(query()).await.is_err());
        assert!(svc
            .execute(Salaries {
                period: march(),
                today: date!(2024 - 03 - 20),
            })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn salaries_share_bonus_evenly() {
        let mut facts = two_companies(8_000_000);
        facts.employees.push(fixture::employee(2, 6_000_000, "0.1"));
        let svc = fixture::service_with(
            Config {
                bonus_sharing: BonusSharing::EvenSplit,
                ..Config::default()
            },
            facts,
        );

        let payroll = svc
            .execute(Salaries {
                period: march(),
                today: date!(2024 - 03 - 20),
            })
            .await
            .unwrap();

        assert_eq!(payroll.service_revenue, Money::from(300_000));
        assert_eq!(payroll.salaries[0].bonus, Money::from(15_000));
        assert_eq!(payroll.salaries[1].bonus, Money::from(15_000));
        assert_eq!(payroll.total, Money::from(14_030_000));
    }
}
