//! [`Employee`]-related [`Database`] implementations.

use common::{
    operations::{By, Select},
    Rate,
};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::Employee,
    infra::{
        database::{self, postgres, postgres::Connection, Postgres},
        Database,
    },
};

use super::decode;

impl<C> Database<Select<By<Vec<Employee>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Employee>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, full_name, role, \
                   base_salary, bonus_rate, \
                   status \
            FROM building_employees \
            ORDER BY id";
        self.query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| -> Result<_, Self::Err> {
                let bonus_rate = decode::<Decimal>(row, "bonus_rate")
                    .map_err(tracerr::wrap!())?;
                let bonus_rate = Rate::new(bonus_rate).ok_or_else(|| {
                    tracerr::new!(database::Error::from(
                        postgres::Error::MalformedRow {
                            table: "building_employees",
                            reason: format!(
                                "`bonus_rate` {bonus_rate} is out of `[0, 1]`",
                            ),
                        }
                    ))
                })?;

                Ok(Employee {
                    id: row.get("id"),
                    full_name: row.get("full_name"),
                    role: row.get("role"),
                    base_salary: decode(row, "base_salary")
                        .map_err(tracerr::wrap!())?,
                    bonus_rate,
                    status: decode(row, "status").map_err(tracerr::wrap!())?,
                })
            })
            .collect()
    }
}
