//! [`Invoice`]-related [`Database`] implementations.

use common::{
    operations::{By, Select},
    Period,
};
use tracerr::Traced;

use crate::{
    domain::{company, Invoice},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

use super::decode;

impl<C> Database<Select<By<Vec<Invoice>, (company::Id, Period)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Invoice>, (company::Id, Period)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (company_id, period) = by.into_inner();
        let (year, month) = (period.year(), i16::from(period.month()));

        const SQL: &str = "\
            SELECT id, company_id, contract_id, total, status \
            FROM invoices \
            WHERE company_id = $1::INT4 \
              AND year = $2::INT4 \
              AND month = $3::INT2 \
            ORDER BY id";
        self.query(SQL, &[&company_id, &year, &month])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| -> Result<_, Self::Err> {
                Ok(Invoice {
                    id: row.get("id"),
                    company_id: row.get("company_id"),
                    contract_id: row.get("contract_id"),
                    period,
                    total: decode(row, "total").map_err(tracerr::wrap!())?,
                    status: decode(row, "status").map_err(tracerr::wrap!())?,
                })
            })
            .collect()
    }
}
