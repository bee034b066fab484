//! Builders for domain values used across tests.
//!
//! Entities built here use their name as id, so assertions can refer to
//! them directly. Orders are left at zero; the position manager assigns
//! them on insert.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    BookieOdds, BookieSubmission, Entity, EntityId, Odd, OddDetails, OddInput, Offer,
    OfferDetails, OfferInput, PriceSet,
};

/// `(bookie, homeWin, draw, awayWin, suspended)`.
pub type Quote<'a> = (&'a str, Decimal, Decimal, Decimal, bool);

/// Build a bookie mapping from quotes.
pub fn bookie_odds(quotes: &[Quote<'_>]) -> BookieOdds {
    quotes
        .iter()
        .map(|&(bookie, home, draw, away, suspended)| {
            let prices = PriceSet::new(home, draw, away);
            let submission = if suspended {
                BookieSubmission::suspended(prices)
            } else {
                BookieSubmission::active(prices)
            };
            (bookie.to_string(), submission)
        })
        .collect()
}

/// Enabled offer details for bookie `name`.
pub fn offer_details(name: &str) -> OfferDetails {
    OfferDetails {
        name: name.to_string(),
        enabled: true,
        play_link: format!("https://{name}.example/play"),
        promo_info: "100% up to 50".to_string(),
        ..Default::default()
    }
}

/// Offer entity whose id is `name`.
pub fn offer_entity(name: &str) -> Entity {
    Entity::Offer(Offer {
        id: EntityId::from(name),
        order: 0,
        details: offer_details(name),
    })
}

/// Odds entity with id `id` for a fixture at `event`, priced by one bookie.
pub fn odd_entity(id: &str, event: DateTime<Utc>) -> Entity {
    let details = OddDetails {
        event_date_time: event,
        league: "Premier League".to_string(),
        home_team: format!("{id} Home"),
        away_team: format!("{id} Away"),
        suspend_all: false,
        odds: bookie_odds(&[("acme", Decimal::TWO, Decimal::new(32, 1), Decimal::new(41, 1), false)]),
    };
    let best_calculated_odds = details.best_odds().unwrap_or_default();
    Entity::Odd(Odd {
        id: EntityId::from(id),
        order: 0,
        details,
        best_calculated_odds,
    })
}

/// Complete create input for an offer.
pub fn offer_input(name: &str) -> OfferInput {
    OfferInput {
        name: Some(name.to_string()),
        enabled: Some(true),
        play_link: Some(format!("https://{name}.example/play")),
        promo_info: Some("Free bet".to_string()),
        ..Default::default()
    }
}

/// Complete create input for a fixture a week from now.
pub fn odd_input(quotes: &[Quote<'_>]) -> OddInput {
    odd_input_at(Utc::now() + Duration::days(7), quotes)
}

/// Complete create input for a fixture at `event`.
pub fn odd_input_at(event: DateTime<Utc>, quotes: &[Quote<'_>]) -> OddInput {
    OddInput {
        event_date_time: Some(event.to_rfc3339()),
        league: Some("Premier League".to_string()),
        home_team: Some("Arsenal".to_string()),
        away_team: Some("Chelsea".to_string()),
        suspend_all: None,
        odds: Some(bookie_odds(quotes)),
        order: None,
    }
}
