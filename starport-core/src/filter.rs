//! Criteria filtering over the full record set.

use chrono::{DateTime, Utc};

use crate::domain::{Ship, ShipType};

/// Optional filter criteria for ship listings.
///
/// Every supplied criterion narrows the result; absent criteria impose
/// no constraint. All criteria AND together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipFilter {
    /// Case-sensitive unanchored substring match on the name.
    pub name: Option<String>,
    /// Case-sensitive unanchored substring match on the planet.
    pub planet: Option<String>,
    /// Exact category match.
    pub ship_type: Option<ShipType>,
    /// Production date strictly after this instant.
    pub after: Option<DateTime<Utc>>,
    /// Production date strictly before this instant.
    pub before: Option<DateTime<Utc>>,
    /// Exact used-flag match.
    pub is_used: Option<bool>,
    /// Inclusive lower speed bound.
    pub min_speed: Option<f64>,
    /// Inclusive upper speed bound.
    pub max_speed: Option<f64>,
    /// Inclusive lower crew size bound.
    pub min_crew_size: Option<i32>,
    /// Inclusive upper crew size bound.
    pub max_crew_size: Option<i32>,
    /// Inclusive lower rating bound.
    pub min_rating: Option<f64>,
    /// Inclusive upper rating bound.
    pub max_rating: Option<f64>,
}

impl ShipFilter {
    /// Whether a ship satisfies every supplied criterion.
    pub fn matches(&self, ship: &Ship) -> bool {
        if let Some(name) = self.name.as_deref() {
            if !ship.name.contains(name) {
                return false;
            }
        }
        if let Some(planet) = self.planet.as_deref() {
            if !ship.planet.contains(planet) {
                return false;
            }
        }
        if let Some(ship_type) = self.ship_type {
            if ship.ship_type != ship_type {
                return false;
            }
        }
        if let Some(after) = self.after {
            if ship.prod_date <= after {
                return false;
            }
        }
        if let Some(before) = self.before {
            if ship.prod_date >= before {
                return false;
            }
        }
        if let Some(is_used) = self.is_used {
            if ship.is_used != is_used {
                return false;
            }
        }
        if let Some(min_speed) = self.min_speed {
            if ship.speed < min_speed {
                return false;
            }
        }
        if let Some(max_speed) = self.max_speed {
            if ship.speed > max_speed {
                return false;
            }
        }
        if let Some(min_crew_size) = self.min_crew_size {
            if ship.crew_size < min_crew_size {
                return false;
            }
        }
        if let Some(max_crew_size) = self.max_crew_size {
            if ship.crew_size > max_crew_size {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            if ship.rating < min_rating {
                return false;
            }
        }
        if let Some(max_rating) = self.max_rating {
            if ship.rating > max_rating {
                return false;
            }
        }
        true
    }
}

/// Apply a filter to a record set, preserving relative order.
///
/// The input is never mutated; an empty filter returns all records.
pub fn apply(ships: &[Ship], filter: &ShipFilter) -> Vec<Ship> {
    ships
        .iter()
        .filter(|ship| filter.matches(ship))
        .cloned()
        .collect()
}
