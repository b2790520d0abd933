//! Domain entities for Starport.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::StarportError;

/// Categories a ship can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipType {
    /// Cargo and passenger haulers.
    Transport,
    /// Combat and escort vessels.
    Military,
    /// Trading vessels.
    Merchant,
}

impl ShipType {
    /// Wire literal for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipType::Transport => "TRANSPORT",
            ShipType::Military => "MILITARY",
            ShipType::Merchant => "MERCHANT",
        }
    }
}

impl FromStr for ShipType {
    type Err = StarportError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "TRANSPORT" => Ok(ShipType::Transport),
            "MILITARY" => Ok(ShipType::Military),
            "MERCHANT" => Ok(ShipType::Merchant),
            other => Err(StarportError::InvalidRequest(format!(
                "unknown ship type: {other}"
            ))),
        }
    }
}

/// A stored ship record.
///
/// `prodDate` travels as epoch milliseconds on the wire; `rating` is always
/// derived from `speed`, `isUsed`, and the production year, never accepted
/// from clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    /// Store-assigned identifier, positive and immutable.
    pub id: i64,
    /// Ship name, 1-50 characters.
    pub name: String,
    /// Home planet, 1-50 characters.
    pub planet: String,
    /// Ship category.
    pub ship_type: ShipType,
    /// Production timestamp.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub prod_date: DateTime<Utc>,
    /// Whether the ship is second-hand.
    pub is_used: bool,
    /// Speed in [0.01, 0.99], rounded to 2 decimals.
    pub speed: f64,
    /// Crew size in [1, 9999].
    pub crew_size: i32,
    /// Derived rating, rounded to 2 decimals.
    pub rating: f64,
}

/// A validated ship ready for insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShip {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship category.
    pub ship_type: ShipType,
    /// Production timestamp.
    pub prod_date: DateTime<Utc>,
    /// Whether the ship is second-hand.
    pub is_used: bool,
    /// Speed, already rounded to 2 decimals.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating for the fields above.
    pub rating: f64,
}

/// Creation payload as received from clients.
///
/// Every field is optional at the wire level so the validator owns the
/// "all fields mandatory" rule and can report a proper invalid-request
/// error instead of a deserializer failure. `isUsed` genuinely is
/// optional and defaults to `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipDraft {
    /// Ship name.
    pub name: Option<String>,
    /// Home planet.
    pub planet: Option<String>,
    /// Ship category.
    pub ship_type: Option<ShipType>,
    /// Production timestamp in epoch milliseconds.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    #[schema(value_type = Option<i64>)]
    pub prod_date: Option<DateTime<Utc>>,
    /// Whether the ship is second-hand; defaults to `false`.
    pub is_used: Option<bool>,
    /// Speed in [0.01, 0.99].
    pub speed: Option<f64>,
    /// Crew size in [1, 9999].
    pub crew_size: Option<i32>,
}

/// Partial update payload.
///
/// Absent fields leave the stored record untouched; present fields are
/// validated against the same constraints as creation. Distinct from
/// [`ShipDraft`] because here absence is legal rather than an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement planet.
    pub planet: Option<String>,
    /// Replacement category.
    pub ship_type: Option<ShipType>,
    /// Replacement production timestamp in epoch milliseconds.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    #[schema(value_type = Option<i64>)]
    pub prod_date: Option<DateTime<Utc>>,
    /// Replacement used flag.
    pub is_used: Option<bool>,
    /// Replacement speed.
    pub speed: Option<f64>,
    /// Replacement crew size.
    pub crew_size: Option<i32>,
}

impl ShipPatch {
    /// Whether the patch carries no fields at all.
    ///
    /// An empty patch is still a legal update; it only recomputes the
    /// rating (to the same value).
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.planet.is_none()
            && self.ship_type.is_none()
            && self.prod_date.is_none()
            && self.is_used.is_none()
            && self.speed.is_none()
            && self.crew_size.is_none()
    }
}
