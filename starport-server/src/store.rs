//! Diesel-backed record store.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::OptionalExtension;

use starport_core::{NewShip, Result, Ship, ShipStore, StarportError};

use crate::db::DbPool;
use crate::models::{NewShipRow, ShipRow};
use crate::schema::ships;

type PooledPg = PooledConnection<ConnectionManager<PgConnection>>;

/// PostgreSQL ship store over a connection pool.
#[derive(Clone)]
pub struct PgShipStore {
    pool: DbPool,
}

impl PgShipStore {
    /// Create a store over a pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledPg> {
        self.pool
            .get()
            .map_err(|err| StarportError::Store(err.to_string()))
    }
}

fn store_error(err: diesel::result::Error) -> StarportError {
    StarportError::Store(err.to_string())
}

impl ShipStore for PgShipStore {
    fn exists(&self, id: i64) -> Result<bool> {
        let mut conn = self.conn()?;
        let found = ships::table
            .find(id)
            .select(ships::id)
            .first::<i64>(&mut conn)
            .optional()
            .map_err(store_error)?;
        Ok(found.is_some())
    }

    fn find(&self, id: i64) -> Result<Option<Ship>> {
        let mut conn = self.conn()?;
        let row = ships::table
            .find(id)
            .first::<ShipRow>(&mut conn)
            .optional()
            .map_err(store_error)?;
        row.map(ShipRow::into_ship).transpose()
    }

    fn find_all(&self) -> Result<Vec<Ship>> {
        let mut conn = self.conn()?;
        // Ascending id keeps the unfiltered scan order deterministic.
        let rows = ships::table
            .order(ships::id.asc())
            .load::<ShipRow>(&mut conn)
            .map_err(store_error)?;
        rows.into_iter().map(ShipRow::into_ship).collect()
    }

    fn insert(&self, ship: NewShip) -> Result<Ship> {
        let mut conn = self.conn()?;
        let row = diesel::insert_into(ships::table)
            .values(NewShipRow::from_new_ship(&ship))
            .get_result::<ShipRow>(&mut conn)
            .map_err(store_error)?;
        row.into_ship()
    }

    fn save(&self, ship: Ship) -> Result<Ship> {
        let mut conn = self.conn()?;
        let row = diesel::update(ships::table.find(ship.id))
            .set(ShipRow::from_ship(&ship))
            .get_result::<ShipRow>(&mut conn)
            .map_err(store_error)?;
        row.into_ship()
    }

    fn delete(&self, id: i64) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::delete(ships::table.find(id))
            .execute(&mut conn)
            .map_err(store_error)?;
        Ok(())
    }
}
