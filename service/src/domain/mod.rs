//! Domain definitions.

pub mod company;
pub mod contract;
pub mod employee;
pub mod invoice;
pub mod office;
pub mod usage;

pub use self::{
    company::Company, contract::Contract, employee::Employee,
    invoice::Invoice, office::Office,
};
