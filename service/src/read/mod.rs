//! Read entities definitions.

pub mod contract;
pub mod cost;
pub mod report;
pub mod salary;
pub mod usage;

use derive_more::{Display, Error};

use crate::domain;
#[cfg(doc)]
use crate::domain::{usage::Record, Contract, Employee};

/// Error of computing a monetary figure out of invalid facts.
///
/// Never clamped: the affected figure is excluded from totals instead.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ComputationError {
    /// [`Contract`] has a negative rent price.
    #[display("`Contract(id: {_0})` has negative rent price")]
    NegativeRentPrice(#[error(not(source))] domain::contract::Id),

    /// Usage [`Record`] has a negative quantity.
    #[display("`ServiceUsage(id: {_0})` has negative quantity")]
    NegativeQuantity(#[error(not(source))] domain::usage::Id),

    /// Usage [`Record`] has a negative unit price.
    #[display("`ServiceUsage(id: {_0})` has negative unit price")]
    NegativeUnitPrice(#[error(not(source))] domain::usage::Id),

    /// [`Employee`] has a negative base salary.
    #[display("`Employee(id: {_0})` has negative base salary")]
    NegativeBaseSalary(#[error(not(source))] domain::employee::Id),

    /// Revenue used as a bonus base is negative.
    #[display("bonus base revenue is negative")]
    NegativeBonusBase,

    /// Arithmetic overflow.
    #[display("monetary arithmetic overflowed")]
    Overflow,
}
