//! Database models for the Starport server.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use starport_core::{NewShip, Result, Ship, ShipType, StarportError};

use crate::schema::ships;

/// Ship database record.
///
/// `ship_type` is stored as its wire literal; `prod_date` as a naive UTC
/// timestamp.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, AsChangeset)]
#[diesel(table_name = ships)]
pub struct ShipRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship category literal.
    pub ship_type: String,
    /// Production timestamp in UTC.
    pub prod_date: NaiveDateTime,
    /// Whether the ship is second-hand.
    pub is_used: bool,
    /// Speed.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ships)]
/// Insertable ship record.
pub struct NewShipRow {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship category literal.
    pub ship_type: String,
    /// Production timestamp in UTC.
    pub prod_date: NaiveDateTime,
    /// Whether the ship is second-hand.
    pub is_used: bool,
    /// Speed.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

impl ShipRow {
    /// Convert a database row into the domain record.
    ///
    /// An unparseable category literal means the row was written outside
    /// this service; it surfaces as a store error, not a client error.
    pub fn into_ship(self) -> Result<Ship> {
        let ship_type: ShipType = self
            .ship_type
            .parse()
            .map_err(|_| StarportError::Store(format!("corrupt ship_type: {}", self.ship_type)))?;
        Ok(Ship {
            id: self.id,
            name: self.name,
            planet: self.planet,
            ship_type,
            prod_date: DateTime::<Utc>::from_naive_utc_and_offset(self.prod_date, Utc),
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
            rating: self.rating,
        })
    }

    /// Convert a domain record into a database row.
    pub fn from_ship(ship: &Ship) -> Self {
        Self {
            id: ship.id,
            name: ship.name.clone(),
            planet: ship.planet.clone(),
            ship_type: ship.ship_type.as_str().to_string(),
            prod_date: ship.prod_date.naive_utc(),
            is_used: ship.is_used,
            speed: ship.speed,
            crew_size: ship.crew_size,
            rating: ship.rating,
        }
    }
}

impl NewShipRow {
    /// Convert a validated new ship into an insertable row.
    pub fn from_new_ship(ship: &NewShip) -> Self {
        Self {
            name: ship.name.clone(),
            planet: ship.planet.clone(),
            ship_type: ship.ship_type.as_str().to_string(),
            prod_date: ship.prod_date.naive_utc(),
            is_used: ship.is_used,
            speed: ship.speed,
            crew_size: ship.crew_size,
            rating: ship.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ShipRow;
    use chrono::{TimeZone, Utc};
    use starport_core::{Ship, ShipType};

    #[test]
    fn row_round_trips_through_domain() {
        let ship = Ship {
            id: 5,
            name: "Bellona".to_string(),
            planet: "Venus".to_string(),
            ship_type: ShipType::Merchant,
            prod_date: Utc.with_ymd_and_hms(3000, 6, 15, 12, 0, 0).unwrap(),
            is_used: true,
            speed: 0.44,
            crew_size: 120,
            rating: 1.76,
        };

        let row = ShipRow::from_ship(&ship);
        assert_eq!(row.ship_type, "MERCHANT");

        let back = row.into_ship().expect("convert row");
        assert_eq!(back, ship);
    }

    #[test]
    fn corrupt_category_is_a_store_error() {
        let ship = Ship {
            id: 5,
            name: "Bellona".to_string(),
            planet: "Venus".to_string(),
            ship_type: ShipType::Merchant,
            prod_date: Utc.with_ymd_and_hms(3000, 6, 15, 12, 0, 0).unwrap(),
            is_used: false,
            speed: 0.44,
            crew_size: 120,
            rating: 3.52,
        };
        let mut row = ShipRow::from_ship(&ship);
        row.ship_type = "GALLEON".to_string();

        let err = row.into_ship().unwrap_err();
        assert!(matches!(err, starport_core::StarportError::Store(_)));
    }
}
