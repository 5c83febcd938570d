//! Logic modules: turn search criteria into what the user sees.
//!
//! # Modules
//!
//! - `filter` - the location gate and the catalog filter
//! - `links` - directions and dial links for a resource card

pub mod filter;
pub mod links;
