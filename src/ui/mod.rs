//! Terminal presentation for the CLI
//!
//! - `display.rs`: result panels and the censored listing (`console` styles)
//! - `prompts.rs`: overwrite confirmations and the uncensor picker (`inquire`)
//!
//! Download progress lives in [`crate::progress`].

pub mod display;
pub mod prompts;
