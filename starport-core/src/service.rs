//! Ship operations composed from the validation, rating, filter, and
//! pagination primitives over a [`ShipStore`].

use chrono::Datelike;

use crate::domain::{NewShip, Ship, ShipDraft, ShipPatch};
use crate::error::{Result, StarportError};
use crate::filter::{self, ShipFilter};
use crate::page::{self, SortKey};
use crate::rating::{compute_rating, round2};
use crate::store::ShipStore;
use crate::validate;

/// Inventory operations over a record store.
///
/// Stateless apart from the store handle; safe to build per request.
pub struct ShipService<S: ShipStore> {
    store: S,
}

impl<S: ShipStore> ShipService<S> {
    /// Create a service over a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// List ships matching a filter, sorted and sliced into one page.
    pub fn list(
        &self,
        filter: &ShipFilter,
        sort: SortKey,
        page_number: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Vec<Ship>> {
        let ships = self.store.find_all()?;
        let filtered = filter::apply(&ships, filter);
        Ok(page::paginate(filtered, sort, page_number, page_size))
    }

    /// Count ships matching a filter, ignoring pagination.
    pub fn count(&self, filter: &ShipFilter) -> Result<usize> {
        let ships = self.store.find_all()?;
        Ok(ships.iter().filter(|ship| filter.matches(ship)).count())
    }

    /// Validate a creation payload, derive its rating, and insert it.
    pub fn create(&self, draft: &ShipDraft) -> Result<Ship> {
        let checked = validate::validate_draft(draft)?;
        let speed = round2(checked.speed);
        let rating = compute_rating(speed, checked.is_used, checked.prod_date.year());
        self.store.insert(NewShip {
            name: checked.name,
            planet: checked.planet,
            ship_type: checked.ship_type,
            prod_date: checked.prod_date,
            is_used: checked.is_used,
            speed,
            crew_size: checked.crew_size,
            rating,
        })
    }

    /// Fetch a ship by identifier.
    pub fn get(&self, id: i64) -> Result<Ship> {
        self.store.find(id)?.ok_or(StarportError::NotFound)
    }

    /// Apply a partial update and recompute the rating.
    ///
    /// The target is fetched before the patch is validated, so a missing
    /// identifier reports not-found even when the payload is also bad.
    /// Validation failures leave the stored record untouched.
    pub fn update(&self, id: i64, patch: &ShipPatch) -> Result<Ship> {
        let mut ship = self.get(id)?;
        validate::validate_patch(patch)?;

        if let Some(name) = patch.name.clone() {
            ship.name = name;
        }
        if let Some(planet) = patch.planet.clone() {
            ship.planet = planet;
        }
        if let Some(ship_type) = patch.ship_type {
            ship.ship_type = ship_type;
        }
        if let Some(prod_date) = patch.prod_date {
            ship.prod_date = prod_date;
        }
        if let Some(is_used) = patch.is_used {
            ship.is_used = is_used;
        }
        if let Some(speed) = patch.speed {
            ship.speed = round2(speed);
        }
        if let Some(crew_size) = patch.crew_size {
            ship.crew_size = crew_size;
        }
        ship.rating = compute_rating(ship.speed, ship.is_used, ship.prod_date.year());

        self.store.save(ship)
    }

    /// Delete a ship by identifier.
    pub fn delete(&self, id: i64) -> Result<()> {
        if !self.store.exists(id)? {
            return Err(StarportError::NotFound);
        }
        self.store.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::ShipService;
    use crate::domain::{NewShip, Ship, ShipDraft, ShipPatch, ShipType};
    use crate::error::StarportError;
    use crate::filter::ShipFilter;
    use crate::page::SortKey;
    use crate::store::MockShipStore;
    use chrono::{DateTime, TimeZone, Utc};
    use mockall::predicate::eq;

    fn mid_year(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 6, 15, 12, 0, 0).unwrap()
    }

    fn stored_ship(id: i64) -> Ship {
        Ship {
            id,
            name: "Bellona".to_string(),
            planet: "Venus".to_string(),
            ship_type: ShipType::Transport,
            prod_date: mid_year(3000),
            is_used: false,
            speed: 0.5,
            crew_size: 50,
            rating: 2.0,
        }
    }

    fn bellona_draft() -> ShipDraft {
        ShipDraft {
            name: Some("Bellona".to_string()),
            planet: Some("Venus".to_string()),
            ship_type: Some(ShipType::Transport),
            prod_date: Some(mid_year(3000)),
            is_used: Some(false),
            speed: Some(0.5),
            crew_size: Some(50),
        }
    }

    #[test]
    fn create_derives_rating_from_checked_fields() {
        let mut store = MockShipStore::new();
        store
            .expect_insert()
            .withf(|ship: &NewShip| {
                ship.name == "Bellona" && ship.rating == 2.0 && !ship.is_used
            })
            .returning(|ship| {
                Ok(Ship {
                    id: 1,
                    name: ship.name,
                    planet: ship.planet,
                    ship_type: ship.ship_type,
                    prod_date: ship.prod_date,
                    is_used: ship.is_used,
                    speed: ship.speed,
                    crew_size: ship.crew_size,
                    rating: ship.rating,
                })
            });

        let service = ShipService::new(store);
        let created = service.create(&bellona_draft()).expect("create ship");

        assert_eq!(created.id, 1);
        assert_eq!(created.rating, 2.0);
    }

    #[test]
    fn create_rounds_speed_before_rating() {
        let mut store = MockShipStore::new();
        store
            .expect_insert()
            .withf(|ship: &NewShip| ship.speed == 0.35)
            .returning(|ship| {
                Ok(Ship {
                    id: 2,
                    name: ship.name,
                    planet: ship.planet,
                    ship_type: ship.ship_type,
                    prod_date: ship.prod_date,
                    is_used: ship.is_used,
                    speed: ship.speed,
                    crew_size: ship.crew_size,
                    rating: ship.rating,
                })
            });

        let service = ShipService::new(store);
        let mut draft = bellona_draft();
        draft.speed = Some(0.3456);
        service.create(&draft).expect("create ship");
    }

    #[test]
    fn create_defaults_used_flag() {
        let mut store = MockShipStore::new();
        store
            .expect_insert()
            .withf(|ship: &NewShip| !ship.is_used)
            .returning(|ship| {
                Ok(Ship {
                    id: 3,
                    name: ship.name,
                    planet: ship.planet,
                    ship_type: ship.ship_type,
                    prod_date: ship.prod_date,
                    is_used: ship.is_used,
                    speed: ship.speed,
                    crew_size: ship.crew_size,
                    rating: ship.rating,
                })
            });

        let service = ShipService::new(store);
        let mut draft = bellona_draft();
        draft.is_used = None;
        service.create(&draft).expect("create ship");
    }

    #[test]
    fn create_rejects_invalid_draft_without_store_access() {
        // No expectations set: any store call would panic.
        let service = ShipService::new(MockShipStore::new());
        let mut draft = bellona_draft();
        draft.speed = Some(1.5);

        let err = service.create(&draft).unwrap_err();
        assert!(matches!(err, StarportError::InvalidRequest(_)));
    }

    #[test]
    fn get_reports_not_found() {
        let mut store = MockShipStore::new();
        store.expect_find().with(eq(9)).returning(|_| Ok(None));

        let service = ShipService::new(store);
        assert_eq!(service.get(9).unwrap_err(), StarportError::NotFound);
    }

    #[test]
    fn update_overlays_present_fields_and_recomputes_rating() {
        let mut store = MockShipStore::new();
        store
            .expect_find()
            .with(eq(1))
            .returning(|_| Ok(Some(stored_ship(1))));
        store
            .expect_save()
            .withf(|ship: &Ship| {
                // speed 0.8, used, year 3010 -> 3.2
                ship.name == "Bellona"
                    && ship.speed == 0.8
                    && ship.is_used
                    && ship.rating == 3.2
            })
            .returning(|ship| Ok(ship));

        let service = ShipService::new(store);
        let patch = ShipPatch {
            prod_date: Some(mid_year(3010)),
            is_used: Some(true),
            speed: Some(0.8),
            ..ShipPatch::default()
        };
        let updated = service.update(1, &patch).expect("update ship");
        assert_eq!(updated.rating, 3.2);
    }

    #[test]
    fn empty_patch_is_idempotent() {
        let mut store = MockShipStore::new();
        store
            .expect_find()
            .with(eq(1))
            .returning(|_| Ok(Some(stored_ship(1))));
        store
            .expect_save()
            .withf(|ship: &Ship| *ship == stored_ship(1))
            .returning(|ship| Ok(ship));

        let service = ShipService::new(store);
        let updated = service.update(1, &ShipPatch::default()).expect("update");
        assert_eq!(updated, stored_ship(1));
    }

    #[test]
    fn update_missing_ship_reports_not_found_before_validation() {
        let mut store = MockShipStore::new();
        store.expect_find().with(eq(9)).returning(|_| Ok(None));

        let service = ShipService::new(store);
        let patch = ShipPatch {
            speed: Some(42.0),
            ..ShipPatch::default()
        };
        assert_eq!(
            service.update(9, &patch).unwrap_err(),
            StarportError::NotFound
        );
    }

    #[test]
    fn update_invalid_patch_never_saves() {
        let mut store = MockShipStore::new();
        store
            .expect_find()
            .with(eq(1))
            .returning(|_| Ok(Some(stored_ship(1))));
        // expect_save intentionally absent.

        let service = ShipService::new(store);
        let patch = ShipPatch {
            crew_size: Some(0),
            ..ShipPatch::default()
        };
        let err = service.update(1, &patch).unwrap_err();
        assert!(matches!(err, StarportError::InvalidRequest(_)));
    }

    #[test]
    fn delete_requires_existence() {
        let mut store = MockShipStore::new();
        store.expect_exists().with(eq(1)).returning(|_| Ok(true));
        store.expect_delete().with(eq(1)).returning(|_| Ok(()));

        let service = ShipService::new(store);
        service.delete(1).expect("delete ship");
    }

    #[test]
    fn delete_missing_ship_reports_not_found() {
        let mut store = MockShipStore::new();
        store.expect_exists().with(eq(9)).returning(|_| Ok(false));

        let service = ShipService::new(store);
        assert_eq!(service.delete(9).unwrap_err(), StarportError::NotFound);
    }

    #[test]
    fn list_filters_sorts_and_pages() {
        let mut store = MockShipStore::new();
        store.expect_find_all().returning(|| {
            Ok((1..=5)
                .map(|id| {
                    let mut ship = stored_ship(id);
                    ship.planet = if id % 2 == 0 { "Mars" } else { "Venus" }.to_string();
                    ship.rating = id as f64;
                    ship
                })
                .collect())
        });

        let service = ShipService::new(store);
        let filter = ShipFilter {
            planet: Some("Venus".to_string()),
            ..ShipFilter::default()
        };
        let page = service
            .list(&filter, SortKey::Rating, Some(0), Some(2))
            .expect("list ships");

        assert_eq!(page.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn count_ignores_pagination() {
        let mut store = MockShipStore::new();
        store
            .expect_find_all()
            .returning(|| Ok((1..=7).map(stored_ship).collect()));

        let service = ShipService::new(store);
        let count = service.count(&ShipFilter::default()).expect("count ships");
        assert_eq!(count, 7);
    }
}
