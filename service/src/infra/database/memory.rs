//! In-memory [`Database`] implementation.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use common::{
    operations::{By, Select},
    Period,
};
use derive_more::{Display, Error as StdError};
use tracerr::Traced;

use crate::{
    domain::{
        company, office, usage, Company, Contract, Employee, Invoice, Office,
    },
    infra::{database, Database},
};

/// Immutable set of facts served by a [`Memory`] database.
#[derive(Clone, Debug, Default)]
pub struct Facts {
    /// Known [`Office`]s.
    pub offices: Vec<Office>,

    /// Known [`Company`]s.
    pub companies: Vec<Company>,

    /// Known [`Contract`]s.
    pub contracts: Vec<Contract>,

    /// Known service [`usage::Record`]s.
    pub usages: Vec<usage::Record>,

    /// Known [`Employee`]s.
    pub employees: Vec<Employee>,

    /// Known [`Invoice`]s.
    pub invoices: Vec<Invoice>,

    /// Simulated [`Outage`]s.
    pub outages: HashSet<Outage>,
}

/// Simulated unavailability of a part of [`Facts`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Outage {
    /// Facts related to a single [`Company`] are unavailable.
    #[display("Company(id: {_0})")]
    Company(company::Id),

    /// Listing of [`Company`]s is unavailable.
    #[display("Companies")]
    Companies,

    /// Listing of [`Employee`]s is unavailable.
    #[display("Employees")]
    Employees,

    /// [`Invoice`]s of a single [`Company`] are unavailable.
    #[display("Invoices(company_id: {_0})")]
    Invoices(company::Id),
}

/// In-memory [`Database`] serving [`Facts`].
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<Facts>);

impl Memory {
    /// Creates a new [`Memory`] database serving the provided [`Facts`].
    #[must_use]
    pub fn new(facts: Facts) -> Self {
        Self(Arc::new(facts))
    }

    /// Checks the provided [`Outage`] is not simulated.
    fn check(&self, outage: Outage) -> Result<(), Traced<database::Error>> {
        if self.0.outages.contains(&outage) {
            return Err(tracerr::new!(database::Error::from(
                Error::Unavailable(outage)
            )));
        }
        Ok(())
    }
}

/// [`Memory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Requested facts are unavailable.
    #[display("`{_0}` facts are unavailable")]
    Unavailable(#[error(not(source))] Outage),
}

impl Database<Select<By<Vec<Contract>, Option<company::Id>>>> for Memory {
    type Ok = Vec<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Contract>, Option<company::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let company_id = by.into_inner();
        if let Some(id) = company_id {
            self.check(Outage::Company(id))?;
        }

        let mut contracts = self
            .0
            .contracts
            .iter()
            .filter(|c| company_id.map_or(true, |id| c.company_id == id))
            .cloned()
            .collect::<Vec<_>>();
        contracts.sort_by_key(|c| c.id);
        Ok(contracts)
    }
}

impl Database<Select<By<Vec<usage::Record>, (company::Id, Period)>>>
    for Memory
{
    type Ok = Vec<usage::Record>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<usage::Record>, (company::Id, Period)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (company_id, period) = by.into_inner();
        self.check(Outage::Company(company_id))?;

        let mut records = self
            .0
            .usages
            .iter()
            .filter(|r| r.company_id == company_id && r.period == period)
            .cloned()
            .collect::<Vec<_>>();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }
}

impl Database<Select<By<Vec<Company>, ()>>> for Memory {
    type Ok = Vec<Company>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Company>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check(Outage::Companies)?;

        let mut companies = self.0.companies.clone();
        companies.sort_by_key(|c| c.id);
        Ok(companies)
    }
}

impl Database<Select<By<Vec<Employee>, ()>>> for Memory {
    type Ok = Vec<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Employee>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check(Outage::Employees)?;

        let mut employees = self.0.employees.clone();
        employees.sort_by_key(|e| e.id);
        Ok(employees)
    }
}

impl Database<Select<By<Option<Company>, company::Id>>> for Memory {
    type Ok = Option<Company>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Company>, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.check(Outage::Company(id))?;

        Ok(self.0.companies.iter().find(|c| c.id == id).cloned())
    }
}

impl Database<Select<By<HashMap<office::Id, Office>, Vec<office::Id>>>>
    for Memory
{
    type Ok = HashMap<office::Id, Office>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<office::Id, Office>, Vec<office::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();

        Ok(self
            .0
            .offices
            .iter()
            .filter(|o| ids.contains(&o.id))
            .map(|o| (o.id, o.clone()))
            .collect())
    }
}

impl Database<Select<By<Vec<Invoice>, (company::Id, Period)>>> for Memory {
    type Ok = Vec<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Invoice>, (company::Id, Period)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (company_id, period) = by.into_inner();
        self.check(Outage::Invoices(company_id))?;

        let mut invoices = self
            .0
            .invoices
            .iter()
            .filter(|i| i.company_id == company_id && i.period == period)
            .cloned()
            .collect::<Vec<_>>();
        invoices.sort_by_key(|i| i.id);
        Ok(invoices)
    }
}
