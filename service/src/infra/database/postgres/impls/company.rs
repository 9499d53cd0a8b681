//! [`Company`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{company, Company},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Converts the provided `companies` table [`Row`] into a [`Company`].
fn from_row(row: &Row) -> Company {
    Company {
        id: row.get("id"),
        name: row.get("name"),
        tax_code: row.get("tax_code"),
        email: row.get("email"),
        address: row.get("address"),
    }
}

impl<C> Database<Select<By<Vec<Company>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Company>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Company>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, tax_code, email, address \
            FROM companies \
            ORDER BY id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Company>, company::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Company>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Company>, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, tax_code, email, address \
            FROM companies \
            WHERE id = $1::INT4";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}
