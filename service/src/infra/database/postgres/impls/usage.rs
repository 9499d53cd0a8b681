//! Service [`usage::Record`]-related [`Database`] implementations.

use common::{
    operations::{By, Select},
    Period,
};
use tracerr::Traced;

use crate::{
    domain::{company, usage},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

use super::decode;

impl<C> Database<Select<By<Vec<usage::Record>, (company::Id, Period)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<usage::Record>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<usage::Record>, (company::Id, Period)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (company_id, period) = by.into_inner();
        let (year, month) = (period.year(), i16::from(period.month()));

        const SQL: &str = "\
            SELECT id, company_id, office_id, \
                   service_name, kind, \
                   quantity, unit_price \
            FROM service_usages \
            WHERE company_id = $1::INT4 \
              AND year = $2::INT4 \
              AND month = $3::INT2 \
            ORDER BY id";
        self.query(SQL, &[&company_id, &year, &month])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| -> Result<_, Self::Err> {
                Ok(usage::Record {
                    id: row.get("id"),
                    company_id: row.get("company_id"),
                    office_id: row.get("office_id"),
                    period,
                    service_name: row.get("service_name"),
                    kind: decode(row, "kind").map_err(tracerr::wrap!())?,
                    quantity: decode(row, "quantity")
                        .map_err(tracerr::wrap!())?,
                    unit_price: decode(row, "unit_price")
                        .map_err(tracerr::wrap!())?,
                })
            })
            .collect()
    }
}
