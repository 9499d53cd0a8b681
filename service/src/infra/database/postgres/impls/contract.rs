//! [`Contract`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{company, Contract},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

use super::decode;

impl<C> Database<Select<By<Vec<Contract>, Option<company::Id>>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Contract>, Option<company::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let company_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, company_id, office_id, \
                   from_date, end_date, \
                   rent_price, \
                   terminated_at \
            FROM rent_contracts \
            WHERE $1::INT4 IS NULL OR company_id = $1::INT4 \
            ORDER BY id";
        self.query(SQL, &[&company_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| -> Result<_, Self::Err> {
                Ok(Contract {
                    id: row.get("id"),
                    company_id: row.get("company_id"),
                    office_id: row.get("office_id"),
                    from_date: row.get("from_date"),
                    end_date: row.get("end_date"),
                    rent_price: decode(row, "rent_price")
                        .map_err(tracerr::wrap!())?,
                    terminated_at: row.get("terminated_at"),
                })
            })
            .collect()
    }
}
