//! Domain types for merchant fee and profit projections.
//!
//! Everything here is plain data: money and rate value objects, the merchant
//! setup, the fee configuration and the derived results. The calculations
//! themselves live in the application layer.

pub mod config;
pub mod money;
pub mod result;
pub mod setup;
