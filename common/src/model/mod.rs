//! Domain models for the bank

pub mod account;
