//! A member of either ordered collection.

use serde::{Deserialize, Serialize};

use super::collection::Collection;
use super::error::DomainError;
use super::id::EntityId;
use super::odd::{Odd, OddInput};
use super::offer::{Offer, OfferInput};

/// Offer or odds record, as the store sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entity {
    Offer(Offer),
    Odd(Odd),
}

impl Entity {
    #[must_use]
    pub fn collection(&self) -> Collection {
        match self {
            Entity::Offer(_) => Collection::Offers,
            Entity::Odd(_) => Collection::Odds,
        }
    }

    #[must_use]
    pub fn id(&self) -> &EntityId {
        match self {
            Entity::Offer(offer) => &offer.id,
            Entity::Odd(odd) => &odd.id,
        }
    }

    #[must_use]
    pub fn order(&self) -> i64 {
        match self {
            Entity::Offer(offer) => offer.order,
            Entity::Odd(odd) => odd.order,
        }
    }

    pub(crate) fn set_order(&mut self, order: i64) {
        match self {
            Entity::Offer(offer) => offer.order = order,
            Entity::Odd(odd) => odd.order = order,
        }
    }

    /// Disabled offers are `enabled == false`; disabled odds are `suspendAll`.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        match self {
            Entity::Offer(offer) => offer.is_disabled(),
            Entity::Odd(odd) => odd.is_disabled(),
        }
    }

    /// Display label: offer name or `home v away`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Entity::Offer(offer) => offer.details.name.clone(),
            Entity::Odd(odd) => format!("{} v {}", odd.details.home_team, odd.details.away_team),
        }
    }

    #[must_use]
    pub fn into_offer(self) -> Option<Offer> {
        match self {
            Entity::Offer(offer) => Some(offer),
            Entity::Odd(_) => None,
        }
    }

    #[must_use]
    pub fn into_odd(self) -> Option<Odd> {
        match self {
            Entity::Odd(odd) => Some(odd),
            Entity::Offer(_) => None,
        }
    }
}

impl From<Offer> for Entity {
    fn from(offer: Offer) -> Self {
        Entity::Offer(offer)
    }
}

impl From<Odd> for Entity {
    fn from(odd: Odd) -> Self {
        Entity::Odd(odd)
    }
}

/// Caller-supplied fields for either collection.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityInput {
    Offer(OfferInput),
    Odd(OddInput),
}

impl EntityInput {
    /// Parse a JSON body destined for `collection`.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] on malformed JSON or unknown fields.
    pub fn from_json(collection: Collection, body: &str) -> Result<Self, DomainError> {
        match collection {
            Collection::Offers => OfferInput::from_json(body).map(EntityInput::Offer),
            Collection::Odds => OddInput::from_json(body).map(EntityInput::Odd),
        }
    }

    #[must_use]
    pub fn collection(&self) -> Collection {
        match self {
            EntityInput::Offer(_) => Collection::Offers,
            EntityInput::Odd(_) => Collection::Odds,
        }
    }

    /// Explicitly requested slot, if any.
    #[must_use]
    pub fn order(&self) -> Option<i64> {
        match self {
            EntityInput::Offer(input) => input.order,
            EntityInput::Odd(input) => input.order,
        }
    }
}
