//! Domain Layer
//!
//! The cascade rules for role permissions, free of I/O.
//!
//! ## Structure
//!
//! - `entities/` - Forest input, the flat permission index, the selection store
//! - `value_objects/` - Resource type, save payload, statistics
//! - `services/` - Tree transformer and cascade selector
//! - `ports/` - Resource loading and selection event interfaces
//!
//! Resource loading is the only side effect and goes through
//! [`ports::ResourceLoader`].

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

#[cfg(test)]
pub(crate) mod fixtures;
