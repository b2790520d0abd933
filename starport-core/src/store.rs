//! Record store abstraction.

use crate::domain::{NewShip, Ship};
use crate::error::Result;

/// Abstraction over durable ship storage.
///
/// The store assigns identifiers on insert and is responsible for
/// serializing conflicting writes to the same identifier. Implementations
/// back onto whatever persistence engine the deployment uses.
#[cfg_attr(test, mockall::automock)]
pub trait ShipStore {
    /// Whether a ship with this identifier exists.
    fn exists(&self, id: i64) -> Result<bool>;
    /// Fetch a ship by identifier.
    fn find(&self, id: i64) -> Result<Option<Ship>>;
    /// Fetch every stored ship.
    fn find_all(&self) -> Result<Vec<Ship>>;
    /// Insert a new ship and return it with its assigned identifier.
    fn insert(&self, ship: NewShip) -> Result<Ship>;
    /// Overwrite an existing ship and return the stored record.
    fn save(&self, ship: Ship) -> Result<Ship>;
    /// Delete a ship by identifier.
    fn delete(&self, id: i64) -> Result<()>;
}
