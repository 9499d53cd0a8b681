//! Facts shared by [`Query`] tests.

use std::str::FromStr as _;

use common::{Date, Money, Period, Rate};
use rust_decimal::Decimal;

#[cfg(doc)]
use crate::Query;
use crate::{
    domain::{
        company, contract, employee, office, usage, Company, Contract,
        Employee, Office,
    },
    infra::database::{
        memory::{Facts, Outage},
        Memory,
    },
    Config, Service,
};

pub(crate) fn march() -> Period {
    Period::new(2024, 3).unwrap()
}

pub(crate) fn company_id(id: i32) -> company::Id {
    company::Id::new(id).unwrap()
}

pub(crate) fn company(id: i32) -> Company {
    Company {
        id: company_id(id),
        name: company::Name::new(format!("Company {id}")).unwrap(),
        tax_code: company::TaxCode::new(format!("010000000{id}")).unwrap(),
        email: None,
        address: None,
    }
}

pub(crate) fn office(id: i32) -> Office {
    Office {
        id: office::Id::new(id).unwrap(),
        name: office::Name::new(format!("Office {id}")).unwrap(),
        floor: 1,
        area: Decimal::from(120),
        base_price: Money::from(5_000_000),
    }
}

pub(crate) fn contract(
    id: i32,
    company: i32,
    office: i32,
    from_date: Date,
    end_date: Option<Date>,
    rent_price: i64,
) -> Contract {
    Contract {
        id: contract::Id::new(id).unwrap(),
        company_id: company_id(company),
        office_id: office::Id::new(office).unwrap(),
        from_date,
        end_date,
        rent_price: Money::from(rent_price),
        terminated_at: None,
    }
}

pub(crate) fn usage(
    id: i32,
    company: i32,
    kind: usage::Kind,
    quantity: &str,
    unit_price: &str,
) -> usage::Record {
    usage::Record {
        id: usage::Id::new(id).unwrap(),
        company_id: company_id(company),
        office_id: None,
        period: march(),
        service_name: usage::ServiceName::new(format!("Service {id}"))
            .unwrap(),
        kind,
        quantity: Decimal::from_str(quantity).unwrap(),
        unit_price: Money::from_str(unit_price).unwrap(),
    }
}

pub(crate) fn employee(id: i32, base_salary: i64, bonus_rate: &str) -> Employee {
    Employee {
        id: employee::Id::new(id).unwrap(),
        full_name: employee::FullName::new(format!("Employee {id}")).unwrap(),
        role: employee::Role::new("Technician").unwrap(),
        base_salary: Money::from(base_salary),
        bonus_rate: Rate::from_str(bonus_rate).unwrap(),
        status: employee::Status::Working,
    }
}

pub(crate) fn outage(company: i32) -> Outage {
    Outage::Company(company_id(company))
}

/// Building with two offices and three companies, without any contracts.
pub(crate) fn building() -> Facts {
    Facts {
        offices: vec![office(1), office(2)],
        companies: vec![company(1), company(2), company(3)],
        ..Facts::default()
    }
}

pub(crate) fn service(facts: Facts) -> Service<Memory> {
    service_with(Config::default(), facts)
}

pub(crate) fn service_with(config: Config, facts: Facts) -> Service<Memory> {
    Service::new(config, Memory::new(facts))
}
