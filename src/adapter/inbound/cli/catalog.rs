//! Handlers for the `offer` and `odd` command groups.

use std::fs;

use chrono::{DateTime, Utc};
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::{BodyArgs, EntityCommand, ListArgs, PruneArgs};
use super::output;
use crate::domain::{
    BestPrice, Collection, DomainError, Entity, EntityId, EntityInput, Odd, Offer, Page,
    PageRequest, Visibility,
};
use crate::error::Result;
use crate::port::inbound::catalog::Catalog;

#[derive(Tabled)]
struct OfferRow {
    #[tabled(rename = "#")]
    order: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Promo")]
    promo: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Enabled")]
    enabled: bool,
    #[tabled(rename = "Id")]
    id: String,
}

impl From<&Offer> for OfferRow {
    fn from(offer: &Offer) -> Self {
        Self {
            order: offer.order,
            name: offer.details.name.clone(),
            promo: offer.details.promo_info.clone(),
            rating: offer
                .details
                .rating
                .map_or_else(|| "-".to_string(), |r| r.to_string()),
            enabled: offer.details.enabled,
            id: offer.id.to_string(),
        }
    }
}

#[derive(Tabled)]
struct OddRow {
    #[tabled(rename = "#")]
    order: i64,
    #[tabled(rename = "Fixture")]
    fixture: String,
    #[tabled(rename = "League")]
    league: String,
    #[tabled(rename = "Kick-off")]
    kickoff: String,
    #[tabled(rename = "1")]
    home: String,
    #[tabled(rename = "X")]
    draw: String,
    #[tabled(rename = "2")]
    away: String,
    #[tabled(rename = "Suspended")]
    suspended: bool,
    #[tabled(rename = "Id")]
    id: String,
}

fn best(price: &BestPrice) -> String {
    if price.is_empty() {
        "-".to_string()
    } else {
        format!("{} ({})", price.value, price.bookie)
    }
}

impl From<&Odd> for OddRow {
    fn from(odd: &Odd) -> Self {
        let best_odds = &odd.best_calculated_odds;
        Self {
            order: odd.order,
            fixture: format!("{} v {}", odd.details.home_team, odd.details.away_team),
            league: odd.details.league.clone(),
            kickoff: odd.details.event_date_time.format("%Y-%m-%d %H:%M").to_string(),
            home: best(&best_odds.home_win),
            draw: best(&best_odds.draw),
            away: best(&best_odds.away_win),
            suspended: odd.details.suspend_all,
            id: odd.id.to_string(),
        }
    }
}

fn command_name(collection: Collection, verb: &str) -> String {
    format!("{}.{verb}", collection.singular())
}

/// Dispatch one shared entity subcommand.
pub async fn execute(
    catalog: &dyn Catalog,
    collection: Collection,
    command: EntityCommand,
) -> Result<()> {
    match command {
        EntityCommand::List(args) => list(catalog, collection, &args).await,
        EntityCommand::Get(arg) => {
            let entity = catalog.get(collection, &EntityId::from(arg.id)).await?;
            show(collection, "get", &entity)
        }
        EntityCommand::Create(body) => {
            let input = EntityInput::from_json(collection, &read_body(&body)?)?;
            let entity = catalog.create(input).await?;
            output::success(&format!(
                "Created {} {} at #{}",
                collection.singular(),
                output::highlight(entity.label()),
                entity.order()
            ));
            show(collection, "create", &entity)
        }
        EntityCommand::Update(args) => {
            let input = EntityInput::from_json(collection, &read_body(&args.body)?)?;
            let entity = catalog.update(&EntityId::from(args.id), input).await?;
            output::success(&format!(
                "Updated {} {}",
                collection.singular(),
                output::highlight(entity.label())
            ));
            show(collection, "update", &entity)
        }
        EntityCommand::Delete(arg) => {
            let removed = catalog.delete(collection, &EntityId::from(arg.id)).await?;
            if output::is_json() {
                output::json_output(json!({
                    "command": command_name(collection, "delete"),
                    "removed": removed,
                }));
                return Ok(());
            }
            output::success(&format!(
                "Deleted {} {} (was #{})",
                collection.singular(),
                output::highlight(removed.label()),
                removed.order()
            ));
            Ok(())
        }
        EntityCommand::Reorder(args) => {
            let moved = catalog
                .reorder(collection, &EntityId::from(args.id), args.order)
                .await?;
            if output::is_json() {
                output::json_output(json!({
                    "command": command_name(collection, "reorder"),
                    "entity": moved,
                }));
                return Ok(());
            }
            output::success(&format!(
                "Moved {} {} to #{}",
                collection.singular(),
                output::highlight(moved.label()),
                moved.order()
            ));
            Ok(())
        }
    }
}

/// Execute `odd prune`.
pub async fn prune(catalog: &dyn Catalog, args: &PruneArgs) -> Result<()> {
    let now = match &args.before {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| DomainError::Validation {
                field: "before",
                reason: format!("not RFC 3339: {e}"),
            })?,
        None => Utc::now(),
    };

    let pruned = catalog.prune_outdated(now).await?;
    if output::is_json() {
        output::json_output(json!({
            "command": "odd.prune",
            "before": now.to_rfc3339(),
            "pruned": pruned,
        }));
        return Ok(());
    }
    output::success(&format!("Pruned {pruned} outdated odds"));
    Ok(())
}

fn read_body(body: &BodyArgs) -> Result<String> {
    match (&body.data, &body.file) {
        (Some(data), _) => Ok(data.clone()),
        (None, Some(path)) => Ok(fs::read_to_string(path)?),
        (None, None) => Err(DomainError::Validation {
            field: "body",
            reason: "provide --data or --file".to_string(),
        }
        .into()),
    }
}

async fn list(catalog: &dyn Catalog, collection: Collection, args: &ListArgs) -> Result<()> {
    let request = PageRequest::new(
        Some(args.page),
        Some(args.size),
        Visibility::from_include_disabled(args.disabled),
    )?;
    let page = catalog.list_page(collection, request).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": command_name(collection, "list"),
            "page": page,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    render_table(collection, &page);
    output::note(&format!(
        "page {} of {} ({} total)",
        page.current_page, page.total_pages, page.total_count
    ));
    Ok(())
}

fn render_table(collection: Collection, page: &Page<Entity>) {
    if page.items.is_empty() {
        output::note(&format!("no {} on this page", collection.name()));
        output::hint(&format!(
            "add one with `oddsboard {} create --data '{{...}}'`",
            collection.singular()
        ));
        return;
    }
    let table = match collection {
        Collection::Offers => Table::new(page.items.iter().filter_map(|e| match e {
            Entity::Offer(offer) => Some(OfferRow::from(offer)),
            Entity::Odd(_) => None,
        }))
        .to_string(),
        Collection::Odds => Table::new(page.items.iter().filter_map(|e| match e {
            Entity::Odd(odd) => Some(OddRow::from(odd)),
            Entity::Offer(_) => None,
        }))
        .to_string(),
    };
    output::lines(&table);
}

fn show(collection: Collection, verb: &str, entity: &Entity) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": command_name(collection, verb),
            "entity": entity,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section(&entity.label());
    output::field("Id", entity.id());
    output::field("Order", entity.order());
    match entity {
        Entity::Offer(offer) => {
            output::field("Enabled", offer.details.enabled);
            output::field("Play link", &offer.details.play_link);
            output::field("Promo", &offer.details.promo_info);
            if let Some(rating) = offer.details.rating {
                output::field("Rating", rating);
            }
        }
        Entity::Odd(odd) => {
            output::field("League", &odd.details.league);
            output::field("Kick-off", odd.details.event_date_time.to_rfc3339());
            output::field("Suspended", odd.details.suspend_all);
            output::field("Bookies", odd.details.odds.len());
            let best_odds = &odd.best_calculated_odds;
            output::field("Best home", best(&best_odds.home_win));
            output::field("Best draw", best(&best_odds.draw));
            output::field("Best away", best(&best_odds.away_win));
        }
    }
    if output::verbosity() > 0 {
        output::lines(&serde_json::to_string_pretty(entity)?);
    }
    Ok(())
}
