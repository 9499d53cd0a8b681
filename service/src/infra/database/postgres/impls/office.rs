//! [`Office`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Select};
use itertools::Itertools as _;
use tracerr::Traced;

use crate::{
    domain::{office, Office},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

use super::decode;

impl<C> Database<Select<By<HashMap<office::Id, Office>, Vec<office::Id>>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = HashMap<office::Id, Office>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<office::Id, Office>, Vec<office::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner().into_iter().unique().collect_vec();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT id, name, floor, area, base_price \
            FROM offices \
            WHERE id = ANY($1::INT4[])";
        self.query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| -> Result<_, Self::Err> {
                let office = Office {
                    id: row.get("id"),
                    name: row.get("name"),
                    floor: row.get("floor"),
                    area: decode(row, "area").map_err(tracerr::wrap!())?,
                    base_price: decode(row, "base_price")
                        .map_err(tracerr::wrap!())?,
                };
                Ok((office.id, office))
            })
            .collect()
    }
}
