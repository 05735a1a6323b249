//! Application layer containing the fee and profit calculations.
//!
//! The functions in `engine` are pure: they read a `MerchantSetup` and the
//! fee configuration and return freshly computed results. `FeeEngine` bundles
//! them with a loaded `CalculatorConfig` for the command-line adapters.

pub mod engine;
