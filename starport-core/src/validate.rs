//! Candidate record and identifier validation.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::{ShipDraft, ShipPatch, ShipType};
use crate::error::{Result, StarportError};

/// Maximum length for `name` and `planet`.
pub const NAME_MAX_LEN: usize = 50;
/// Earliest legal production year.
pub const PROD_YEAR_MIN: i32 = 2800;
/// Latest legal production year.
pub const PROD_YEAR_MAX: i32 = 3019;
/// Minimum legal speed.
pub const SPEED_MIN: f64 = 0.01;
/// Maximum legal speed.
pub const SPEED_MAX: f64 = 0.99;
/// Minimum legal crew size.
pub const CREW_SIZE_MIN: i32 = 1;
/// Maximum legal crew size.
pub const CREW_SIZE_MAX: i32 = 9999;

/// Creation fields with presence and constraints checked and the used
/// flag defaulted.
///
/// Speed is carried as supplied; rounding and rating derivation happen
/// in the service, which owns the write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship category.
    pub ship_type: ShipType,
    /// Production timestamp.
    pub prod_date: DateTime<Utc>,
    /// Used flag, defaulted to `false` when absent.
    pub is_used: bool,
    /// Speed as supplied by the client.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
}

/// Validate a creation payload.
///
/// Every field except `isUsed` is mandatory; each present value must
/// satisfy its constraint. Fails on the first violation.
pub fn validate_draft(draft: &ShipDraft) -> Result<ValidatedDraft> {
    let Some(name) = draft.name.clone() else {
        return Err(missing("name"));
    };
    check_label(&name, "name")?;
    let Some(planet) = draft.planet.clone() else {
        return Err(missing("planet"));
    };
    check_label(&planet, "planet")?;
    let Some(ship_type) = draft.ship_type else {
        return Err(missing("shipType"));
    };
    let Some(prod_date) = draft.prod_date else {
        return Err(missing("prodDate"));
    };
    check_prod_date(prod_date)?;
    let Some(speed) = draft.speed else {
        return Err(missing("speed"));
    };
    check_speed(speed)?;
    let Some(crew_size) = draft.crew_size else {
        return Err(missing("crewSize"));
    };
    check_crew_size(crew_size)?;

    Ok(ValidatedDraft {
        name,
        planet,
        ship_type,
        prod_date,
        is_used: draft.is_used.unwrap_or(false),
        speed,
        crew_size,
    })
}

/// Validate an update payload.
///
/// Absent fields are legal and skipped; each present field must satisfy
/// the same constraint as on creation. Fails on the first violation.
pub fn validate_patch(patch: &ShipPatch) -> Result<()> {
    if let Some(name) = patch.name.as_deref() {
        check_label(name, "name")?;
    }
    if let Some(planet) = patch.planet.as_deref() {
        check_label(planet, "planet")?;
    }
    if let Some(prod_date) = patch.prod_date {
        check_prod_date(prod_date)?;
    }
    if let Some(speed) = patch.speed {
        check_speed(speed)?;
    }
    if let Some(crew_size) = patch.crew_size {
        check_crew_size(crew_size)?;
    }
    Ok(())
}

/// Parse a path-supplied ship identifier.
///
/// Valid identifiers are whole, strictly positive decimal numbers;
/// anything else fails before the store is consulted.
pub fn parse_id(raw: &str) -> Result<i64> {
    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid(format!("ship id must be a positive whole number, got '{raw}'")))?;
    if id <= 0 {
        return Err(invalid(format!("ship id must be positive, got {id}")));
    }
    Ok(id)
}

fn missing(field: &str) -> StarportError {
    StarportError::InvalidRequest(format!("{field} is required"))
}

fn invalid(message: impl Into<String>) -> StarportError {
    StarportError::InvalidRequest(message.into())
}

fn check_label(value: &str, field: &str) -> Result<()> {
    if value.is_empty() || value.chars().count() > NAME_MAX_LEN {
        return Err(invalid(format!(
            "{field} must be 1-{NAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn check_prod_date(prod_date: DateTime<Utc>) -> Result<()> {
    if prod_date.timestamp_millis() < 0 {
        return Err(invalid("prodDate must not be a negative timestamp"));
    }
    let year = prod_date.year();
    if !(PROD_YEAR_MIN..=PROD_YEAR_MAX).contains(&year) {
        return Err(invalid(format!(
            "prodDate year must be within {PROD_YEAR_MIN}-{PROD_YEAR_MAX}, got {year}"
        )));
    }
    Ok(())
}

fn check_speed(speed: f64) -> Result<()> {
    if !(SPEED_MIN..=SPEED_MAX).contains(&speed) {
        return Err(invalid(format!(
            "speed must be within {SPEED_MIN}-{SPEED_MAX}"
        )));
    }
    Ok(())
}

fn check_crew_size(crew_size: i32) -> Result<()> {
    if !(CREW_SIZE_MIN..=CREW_SIZE_MAX).contains(&crew_size) {
        return Err(invalid(format!(
            "crewSize must be within {CREW_SIZE_MIN}-{CREW_SIZE_MAX}"
        )));
    }
    Ok(())
}
