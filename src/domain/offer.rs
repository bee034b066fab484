//! Bookie promotional offers.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::EntityId;

/// Longest accepted `promoInfo`, in characters.
pub const PROMO_INFO_MAX_CHARS: usize = 20;

/// Reference to an externally hosted image. Stored as data only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub cloudinary_id: String,
    pub image_url: String,
}

/// A stored offer. `name` doubles as the bookie key in odds records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: EntityId,
    pub order: i64,
    #[serde(flatten)]
    pub details: OfferDetails,
}

/// Every offer field except identity and rank.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetails {
    pub name: String,
    pub enabled: bool,
    pub play_link: String,
    pub promo_info: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pros: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cons: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wagering_rollover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_odds: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_info2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_info3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub rating: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub min_odds_for_bonus: Option<Decimal>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selections: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_image: Option<ImageRef>,
}

impl Offer {
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        !self.details.enabled
    }
}

/// Caller-supplied offer fields, used for both create and partial update.
///
/// All fields are optional on the wire; [`OfferInput::into_details`]
/// enforces the ones required on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OfferInput {
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub play_link: Option<String>,
    pub promo_info: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub review: Option<String>,
    pub up_to: Option<String>,
    pub wagering_rollover: Option<String>,
    pub min_odds: Option<String>,
    pub key_info2: Option<String>,
    pub key_info3: Option<String>,
    pub terms: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub rating: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub min_odds_for_bonus: Option<Decimal>,
    pub selections: Option<BTreeMap<String, String>>,
    pub logo: Option<ImageRef>,
    pub info_image: Option<ImageRef>,
    /// Explicit slot on create. Rejected on update.
    pub order: Option<i64>,
}

impl OfferInput {
    /// Parse a JSON request body.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] on malformed JSON or unknown fields.
    pub fn from_json(body: &str) -> Result<Self, DomainError> {
        serde_json::from_str(body).map_err(|e| DomainError::validation("body", e.to_string()))
    }

    /// Build the details of a new offer.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] naming the first missing or invalid field.
    pub fn into_details(self) -> Result<OfferDetails, DomainError> {
        self.check_ranges()?;
        let name = required_text("name", self.name)?;
        let enabled = self
            .enabled
            .ok_or_else(|| DomainError::validation("enabled", "is required"))?;
        let play_link = required_text("playLink", self.play_link)?;
        let promo_info = required_text("promoInfo", self.promo_info)?;

        Ok(OfferDetails {
            name,
            enabled,
            play_link,
            promo_info,
            pros: self.pros,
            cons: self.cons,
            review: self.review,
            up_to: self.up_to,
            wagering_rollover: self.wagering_rollover,
            min_odds: self.min_odds,
            key_info2: self.key_info2,
            key_info3: self.key_info3,
            terms: self.terms,
            rating: self.rating,
            min_odds_for_bonus: self.min_odds_for_bonus,
            selections: self.selections.unwrap_or_default(),
            logo: self.logo,
            info_image: self.info_image,
        })
    }

    /// Overwrite the fields present in this input.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] if a present field is invalid or the
    /// input carries an `order`.
    pub fn apply_to(self, details: &mut OfferDetails) -> Result<(), DomainError> {
        if self.order.is_some() {
            return Err(DomainError::validation(
                "order",
                "cannot be set on update; use reorder",
            ));
        }
        self.check_ranges()?;

        if let Some(name) = self.name {
            details.name = non_empty("name", name)?;
        }
        if let Some(enabled) = self.enabled {
            details.enabled = enabled;
        }
        if let Some(play_link) = self.play_link {
            details.play_link = non_empty("playLink", play_link)?;
        }
        if let Some(promo_info) = self.promo_info {
            details.promo_info = non_empty("promoInfo", promo_info)?;
        }
        overwrite(&mut details.pros, self.pros);
        overwrite(&mut details.cons, self.cons);
        overwrite(&mut details.review, self.review);
        overwrite(&mut details.up_to, self.up_to);
        overwrite(&mut details.wagering_rollover, self.wagering_rollover);
        overwrite(&mut details.min_odds, self.min_odds);
        overwrite(&mut details.key_info2, self.key_info2);
        overwrite(&mut details.key_info3, self.key_info3);
        overwrite(&mut details.terms, self.terms);
        overwrite(&mut details.rating, self.rating);
        overwrite(&mut details.min_odds_for_bonus, self.min_odds_for_bonus);
        overwrite(&mut details.logo, self.logo);
        overwrite(&mut details.info_image, self.info_image);
        if let Some(selections) = self.selections {
            details.selections = selections;
        }
        Ok(())
    }

    fn check_ranges(&self) -> Result<(), DomainError> {
        if let Some(promo) = &self.promo_info {
            if promo.chars().count() > PROMO_INFO_MAX_CHARS {
                return Err(DomainError::validation(
                    "promoInfo",
                    format!("must be at most {PROMO_INFO_MAX_CHARS} characters"),
                ));
            }
        }
        if let Some(rating) = self.rating {
            if rating < Decimal::ZERO || rating > Decimal::from(5) {
                return Err(DomainError::validation("rating", "must be between 0 and 5"));
            }
        }
        Ok(())
    }
}

fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

pub(crate) fn non_empty(field: &'static str, value: String) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(value)
}

pub(crate) fn required_text(
    field: &'static str,
    value: Option<String>,
) -> Result<String, DomainError> {
    let value = value.ok_or_else(|| DomainError::validation(field, "is required"))?;
    non_empty(field, value)
}
