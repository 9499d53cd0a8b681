//! Monthly salary read model definitions.

use common::{Money, Period};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    domain::{employee, Employee},
    read::{report::Omission, ComputationError},
};

/// Policy of sharing the building service revenue among [`Employee`]s
/// bonuses.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum BonusSharing {
    /// Every [`Employee`] receives their bonus rate applied to the whole
    /// service revenue.
    #[default]
    PerEmployee,

    /// Every [`Employee`] receives their bonus rate applied to an even share
    /// of the service revenue, split across all the active [`Employee`]s
    /// having a non-zero bonus rate.
    EvenSplit,
}

/// Salary of an [`Employee`] for a month.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Monthly {
    /// ID of the paid [`Employee`].
    pub employee_id: employee::Id,

    /// [`employee::FullName`] of the paid [`Employee`].
    pub full_name: employee::FullName,

    /// [`employee::Role`] of the paid [`Employee`].
    pub role: employee::Role,

    /// [`Period`] this salary is paid for.
    pub period: Period,

    /// Base salary of the [`Employee`].
    pub base_salary: Money,

    /// Bonus of the [`Employee`] out of the service revenue.
    pub bonus: Money,

    /// Sum of the `base_salary` and the `bonus`.
    pub total_salary: Money,
}

impl Monthly {
    /// Computes the salary of the provided [`Employee`] for the provided
    /// [`Period`].
    ///
    /// `sharers` is the number of [`Employee`]s sharing the `service_revenue`
    /// under the [`BonusSharing::EvenSplit`] policy.
    ///
    /// The bonus is rounded half-up to minor units once, at the end.
    ///
    /// # Errors
    ///
    /// If the [`Employee`] has a negative base salary, the `service_revenue`
    /// is negative, or the computation overflows.
    pub fn compute(
        employee: &Employee,
        period: Period,
        service_revenue: Money,
        sharers: usize,
        sharing: BonusSharing,
    ) -> Result<Self, ComputationError> {
        if employee.base_salary.is_negative() {
            return Err(ComputationError::NegativeBaseSalary(employee.id));
        }
        if service_revenue.is_negative() {
            return Err(ComputationError::NegativeBonusBase);
        }

        let rate = employee.bonus_rate.value();
        let bonus = match sharing {
            BonusSharing::PerEmployee => service_revenue.checked_mul(rate),
            BonusSharing::EvenSplit => {
                if sharers == 0 || employee.bonus_rate.is_zero() {
                    Some(Money::ZERO)
                } else {
                    let sharers = Decimal::from(sharers);
                    service_revenue
                        .checked_mul(rate)
                        .and_then(|m| m.amount().checked_div(sharers))
                        .map(Money::new)
                }
            }
        }
        .ok_or(ComputationError::Overflow)?
        .round();

        Ok(Self {
            employee_id: employee.id,
            full_name: employee.full_name.clone(),
            role: employee.role.clone(),
            period,
            base_salary: employee.base_salary,
            bonus,
            total_salary: employee
                .base_salary
                .checked_add(bonus)
                .ok_or(ComputationError::Overflow)?,
        })
    }
}

/// Salaries of all the active [`Employee`]s for a month.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payroll {
    /// [`Period`] the salaries are paid for.
    pub period: Period,

    /// Building service revenue the bonuses are computed out of.
    pub service_revenue: Money,

    /// Computed salaries ordered by [`Employee`] IDs.
    pub salaries: Vec<Monthly>,

    /// Sum of all the computed salaries.
    pub total: Money,

    /// Items omitted from the `total` due to failures.
    pub omissions: Vec<Omission>,
}

impl Payroll {
    /// Computes the salaries of the active ones among the provided
    /// [`Employee`]s.
    ///
    /// An [`Employee`] whose salary fails to compute, or would overflow the
    /// `total`, is omitted.
    #[must_use]
    pub fn compute(
        period: Period,
        service_revenue: Money,
        employees: impl IntoIterator<Item = Employee>,
        sharing: BonusSharing,
    ) -> Self {
        let mut employees = employees
            .into_iter()
            .filter(Employee::is_active)
            .collect::<Vec<_>>();
        employees.sort_by_key(|e| e.id);
        let sharers =
            employees.iter().filter(|e| !e.bonus_rate.is_zero()).count();

        let mut salaries = Vec::with_capacity(employees.len());
        let mut total = Money::ZERO;
        let mut omissions = vec![];
        for e in &employees {
            let salary =
                Monthly::compute(e, period, service_revenue, sharers, sharing)
                    .and_then(|s| {
                        let sum = total
                            .checked_add(s.total_salary)
                            .ok_or(ComputationError::Overflow)?;
                        Ok((s, sum))
                    });
            match salary {
                Ok((s, sum)) => {
                    salaries.push(s);
                    total = sum;
                }
                Err(err) => omissions.push(Omission::computation(e.id, &err)),
            }
        }

        Self {
            period,
            service_revenue,
            salaries,
            total,
            omissions,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{Money, Period, Rate};

    use crate::{
        domain::{
            employee::{self, FullName, Role, Status},
            Employee,
        },
        read::{report::FailureKind, ComputationError},
    };

    use super::{BonusSharing, Monthly, Payroll};

    fn employee(id: i32, base: &str, rate: &str, status: Status) -> Employee {
        Employee {
            id: employee::Id::new(id).unwrap(),
            full_name: FullName::new(format!("Employee {id}")).unwrap(),
            role: Role::new("Technician").unwrap(),
            base_salary: Money::from_str(base).unwrap(),
            bonus_rate: Rate::from_str(rate).unwrap(),
            status,
        }
    }

    fn march() -> Period {
        Period::new(2024, 3).unwrap()
    }

    #[test]
    fn per_employee_applies_rate_to_whole_revenue() {
        let e = employee(1, "8000000", "0.02", Status::Working);
        let salary = Monthly::compute(
            &e,
            march(),
            Money::from(300_000),
            3,
            BonusSharing::PerEmployee,
        )
        .unwrap();

        assert_eq!(salary.bonus, Money::from(6_000));
        assert_eq!(salary.total_salary, Money::from(8_006_000));
        assert_eq!(
            Some(salary.total_salary),
            salary.base_salary.checked_add(salary.bonus),
        );
    }

    #[test]
    fn even_split_divides_revenue_among_sharers() {
        let e = employee(1, "8000000", "0.02", Status::Working);
        let salary = Monthly::compute(
            &e,
            march(),
            Money::from(300_000),
            3,
            BonusSharing::EvenSplit,
        )
        .unwrap();

        assert_eq!(salary.bonus, Money::from(2_000));
        assert_eq!(salary.total_salary, Money::from(8_002_000));
    }

    #[test]
    fn rounds_bonus_half_up_once() {
        let e = employee(1, "1000", "0.015", Status::Working);
        let salary = Monthly::compute(
            &e,
            march(),
            Money::from_str("100.3").unwrap(),
            1,
            BonusSharing::PerEmployee,
        )
        .unwrap();

        // 100.3 * 0.015 = 1.5045
        assert_eq!(salary.bonus, Money::from_str("1.50").unwrap());

        let salary = Monthly::compute(
            &e,
            march(),
            Money::from(1),
            3,
            BonusSharing::EvenSplit,
        )
        .unwrap();

        // 1 * 0.015 / 3 = 0.005
        assert_eq!(salary.bonus, Money::from_str("0.01").unwrap());
    }

    #[test]
    fn zero_revenue_gives_zero_bonus() {
        let e = employee(1, "8000000", "0.05", Status::Working);
        for sharing in [BonusSharing::PerEmployee, BonusSharing::EvenSplit] {
            let salary =
                Monthly::compute(&e, march(), Money::ZERO, 1, sharing).unwrap();

            assert_eq!(salary.bonus, Money::ZERO);
            assert_eq!(salary.total_salary, Money::from(8_000_000));
        }
    }

    #[test]
    fn rejects_negative_base_salary() {
        let e = employee(7, "-1", "0.05", Status::Working);

        assert_eq!(
            Monthly::compute(
                &e,
                march(),
                Money::ZERO,
                1,
                BonusSharing::PerEmployee,
            ),
            Err(ComputationError::NegativeBaseSalary(e.id)),
        );
    }

    #[test]
    fn payroll_pays_active_employees_in_id_order() {
        let payroll = Payroll::compute(
            march(),
            Money::from(1_000_000),
            vec![
                employee(3, "5000000", "0", Status::Working),
                employee(1, "8000000", "0.02", Status::Working),
                employee(2, "7000000", "0.02", Status::Resigned),
                employee(4, "-5", "0.01", Status::Working),
            ],
            BonusSharing::EvenSplit,
        );

        assert_eq!(
            payroll
                .salaries
                .iter()
                .map(|s| i32::from(s.employee_id))
                .collect::<Vec<_>>(),
            vec![1, 3],
        );
        // Employees 1 and 4 share the bonus, as both have a non-zero rate.
        assert_eq!(payroll.salaries[0].bonus, Money::from(10_000));
        assert_eq!(payroll.salaries[1].bonus, Money::ZERO);
        assert_eq!(payroll.total, Money::from(13_010_000));

        assert_eq!(payroll.omissions.len(), 1);
        assert_eq!(payroll.omissions[0].failure, FailureKind::Computation);
    }

    #[test]
    fn payroll_omits_salary_overflowing_total() {
        let max = rust_decimal::Decimal::MAX.to_string();
        let payroll = Payroll::compute(
            march(),
            Money::ZERO,
            vec![
                employee(1, &max, "0", Status::Working),
                employee(2, "1000", "0", Status::Working),
            ],
            BonusSharing::PerEmployee,
        );

        assert_eq!(payroll.salaries.len(), 1);
        assert_eq!(payroll.total, Money::from_str(&max).unwrap());
        assert_eq!(payroll.omissions.len(), 1);
        assert_eq!(payroll.omissions[0].failure, FailureKind::Computation);
    }
}
