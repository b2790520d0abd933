//! REST client for the Starport HTTP API.

use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use starport_core::{Ship, ShipDraft, ShipPatch, ShipType, parse_id};

use crate::{CliResult, CreateArgs, FilterArgs, ListArgs, UpdateArgs};

/// Default server URL when none is configured.
pub(crate) const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Error payload returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// HTTP client bound to one Starport server.
pub(crate) struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for a server base URL.
    pub(crate) fn new(server_url: &str) -> CliResult<Self> {
        let base_url = normalize_server_url(server_url)?;
        let client = Client::builder().user_agent("starport-cli").build()?;
        Ok(Self { client, base_url })
    }

    /// List ships and print them as JSON.
    pub(crate) async fn list(&self, args: &ListArgs) -> CliResult<()> {
        let pairs = list_pairs(args);
        let ships: Vec<Ship> = self.get_json("/rest/ships", &pairs).await?;
        print_json(&ships)
    }

    /// Print the count of matching ships.
    pub(crate) async fn count(&self, filter: &FilterArgs) -> CliResult<()> {
        let pairs = filter_pairs(filter);
        let count: usize = self.get_json("/rest/ships/count", &pairs).await?;
        println!("{count}");
        Ok(())
    }

    /// Fetch one ship and print it as JSON.
    pub(crate) async fn get(&self, id: &str) -> CliResult<()> {
        let id = parse_id(id)?;
        let ship: Ship = self.get_json(&format!("/rest/ships/{id}"), &[]).await?;
        print_json(&ship)
    }

    /// Create a ship and print the stored record.
    pub(crate) async fn create(&self, args: &CreateArgs) -> CliResult<()> {
        let draft = build_draft(args)?;
        let response = self
            .client
            .post(format!("{}/rest/ships", self.base_url))
            .json(&draft)
            .send()
            .await?;
        let ship: Ship = decode(response).await?;
        print_json(&ship)
    }

    /// Update a ship and print the stored record.
    pub(crate) async fn update(&self, args: &UpdateArgs) -> CliResult<()> {
        let id = parse_id(&args.id)?;
        let patch = build_patch(args)?;
        let response = self
            .client
            .post(format!("{}/rest/ships/{id}", self.base_url))
            .json(&patch)
            .send()
            .await?;
        let ship: Ship = decode(response).await?;
        print_json(&ship)
    }

    /// Delete a ship.
    pub(crate) async fn delete(&self, id: &str) -> CliResult<()> {
        let id = parse_id(id)?;
        let response = self
            .client
            .delete(format!("{}/rest/ships/{id}", self.base_url))
            .send()
            .await?;
        if response.status().is_success() {
            println!("deleted ship {id}");
            return Ok(());
        }
        Err(error_from(response).await)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        pairs: &[(&'static str, String)],
    ) -> CliResult<T> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(pairs)
            .send()
            .await?;
        decode(response).await
    }
}

/// Normalize the server URL for consistent API requests.
fn normalize_server_url(server_url: &str) -> CliResult<String> {
    let trimmed = server_url.trim();
    if trimmed.is_empty() {
        return Err("server url is required".into());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Assemble wire query pairs from filter flags.
fn filter_pairs(filter: &FilterArgs) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(name) = &filter.name {
        pairs.push(("name", name.clone()));
    }
    if let Some(planet) = &filter.planet {
        pairs.push(("planet", planet.clone()));
    }
    if let Some(ship_type) = &filter.ship_type {
        pairs.push(("shipType", ship_type.clone()));
    }
    if let Some(after) = filter.after {
        pairs.push(("after", after.to_string()));
    }
    if let Some(before) = filter.before {
        pairs.push(("before", before.to_string()));
    }
    if let Some(is_used) = filter.is_used {
        pairs.push(("isUsed", is_used.to_string()));
    }
    if let Some(min_speed) = filter.min_speed {
        pairs.push(("minSpeed", min_speed.to_string()));
    }
    if let Some(max_speed) = filter.max_speed {
        pairs.push(("maxSpeed", max_speed.to_string()));
    }
    if let Some(min_crew_size) = filter.min_crew_size {
        pairs.push(("minCrewSize", min_crew_size.to_string()));
    }
    if let Some(max_crew_size) = filter.max_crew_size {
        pairs.push(("maxCrewSize", max_crew_size.to_string()));
    }
    if let Some(min_rating) = filter.min_rating {
        pairs.push(("minRating", min_rating.to_string()));
    }
    if let Some(max_rating) = filter.max_rating {
        pairs.push(("maxRating", max_rating.to_string()));
    }
    pairs
}

/// Assemble wire query pairs for the list command.
fn list_pairs(args: &ListArgs) -> Vec<(&'static str, String)> {
    let mut pairs = filter_pairs(&args.filter);
    if let Some(order) = &args.order {
        pairs.push(("order", order.clone()));
    }
    if let Some(page_number) = args.page_number {
        pairs.push(("pageNumber", page_number.to_string()));
    }
    if let Some(page_size) = args.page_size {
        pairs.push(("pageSize", page_size.to_string()));
    }
    pairs
}

/// Build a creation payload from CLI flags.
fn build_draft(args: &CreateArgs) -> CliResult<ShipDraft> {
    let ship_type: ShipType = args.ship_type.parse()?;
    Ok(ShipDraft {
        name: Some(args.name.clone()),
        planet: Some(args.planet.clone()),
        ship_type: Some(ship_type),
        prod_date: Some(millis_to_datetime(args.prod_date)?),
        is_used: args.is_used,
        speed: Some(args.speed),
        crew_size: Some(args.crew_size),
    })
}

/// Build an update payload from CLI flags.
fn build_patch(args: &UpdateArgs) -> CliResult<ShipPatch> {
    let ship_type = match &args.ship_type {
        Some(raw) => Some(raw.parse::<ShipType>()?),
        None => None,
    };
    let prod_date = match args.prod_date {
        Some(millis) => Some(millis_to_datetime(millis)?),
        None => None,
    };
    Ok(ShipPatch {
        name: args.name.clone(),
        planet: args.planet.clone(),
        ship_type,
        prod_date,
        is_used: args.is_used,
        speed: args.speed,
        crew_size: args.crew_size,
    })
}

fn millis_to_datetime(millis: i64) -> CliResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| format!("prod date out of range: {millis}").into())
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> CliResult<T> {
    if response.status().is_success() {
        return Ok(response.json::<T>().await?);
    }
    Err(error_from(response).await)
}

async fn error_from(response: reqwest::Response) -> Box<dyn std::error::Error + Send + Sync> {
    let status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };
    format!("server rejected request ({status}): {message}").into()
}

fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{build_draft, build_patch, filter_pairs, list_pairs, normalize_server_url};
    use crate::{CreateArgs, FilterArgs, ListArgs, UpdateArgs};
    use starport_core::ShipType;

    fn create_args() -> CreateArgs {
        CreateArgs {
            name: "Bellona".to_string(),
            planet: "Venus".to_string(),
            ship_type: "TRANSPORT".to_string(),
            prod_date: 32_535_216_000_000,
            is_used: None,
            speed: 0.5,
            crew_size: 50,
        }
    }

    #[test]
    fn normalize_server_url_trims_trailing_slash() {
        let url = normalize_server_url("http://localhost:8080/").expect("url");
        assert_eq!(url, "http://localhost:8080");
    }

    #[test]
    fn normalize_server_url_rejects_empty() {
        let err = normalize_server_url("   ").unwrap_err();
        assert!(err.to_string().contains("server url"));
    }

    #[test]
    fn filter_pairs_use_wire_names() {
        let filter = FilterArgs {
            name: Some("Bell".to_string()),
            ship_type: Some("MERCHANT".to_string()),
            is_used: Some(true),
            min_speed: Some(0.25),
            max_crew_size: Some(500),
            ..FilterArgs::default()
        };
        let pairs = filter_pairs(&filter);

        assert_eq!(
            pairs,
            vec![
                ("name", "Bell".to_string()),
                ("shipType", "MERCHANT".to_string()),
                ("isUsed", "true".to_string()),
                ("minSpeed", "0.25".to_string()),
                ("maxCrewSize", "500".to_string()),
            ]
        );
    }

    #[test]
    fn empty_filter_produces_no_pairs() {
        assert!(filter_pairs(&FilterArgs::default()).is_empty());
    }

    #[test]
    fn list_pairs_append_paging_and_order() {
        let args = ListArgs {
            order: Some("speed".to_string()),
            page_number: Some(2),
            page_size: Some(10),
            ..ListArgs::default()
        };
        let pairs = list_pairs(&args);

        assert_eq!(
            pairs,
            vec![
                ("order", "speed".to_string()),
                ("pageNumber", "2".to_string()),
                ("pageSize", "10".to_string()),
            ]
        );
    }

    #[test]
    fn build_draft_maps_flags_to_payload() {
        let draft = build_draft(&create_args()).expect("draft");
        assert_eq!(draft.name.as_deref(), Some("Bellona"));
        assert_eq!(draft.ship_type, Some(ShipType::Transport));
        assert!(draft.is_used.is_none());
        assert_eq!(
            draft.prod_date.expect("prod date").timestamp_millis(),
            32_535_216_000_000
        );
    }

    #[test]
    fn build_draft_rejects_unknown_category() {
        let mut args = create_args();
        args.ship_type = "GALLEON".to_string();
        assert!(build_draft(&args).is_err());
    }

    #[test]
    fn build_patch_keeps_absent_fields_absent() {
        let args = UpdateArgs {
            id: "1".to_string(),
            speed: Some(0.75),
            ..UpdateArgs::default()
        };
        let patch = build_patch(&args).expect("patch");
        assert_eq!(patch.speed, Some(0.75));
        assert!(patch.name.is_none());
        assert!(patch.ship_type.is_none());
        assert!(patch.prod_date.is_none());
    }
}
