//! Catalog behaviour end to end over the stores.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use oddsboard::application::catalog::{CatalogConfig, CatalogService};
use oddsboard::domain::{
    BookieSubmission, Collection, DomainError, EntityId, EntityInput, OddInput, OfferInput,
    PageRequest, Visibility,
};
use oddsboard::error::Error;
use oddsboard::port::inbound::catalog::Catalog;
use oddsboard::testkit::domain::{odd_input, odd_input_at, offer_input};
use oddsboard::testkit::store::{memory_catalog, ranking, sqlite_memory_store};

fn page(number: i64, size: i64, visibility: Visibility) -> PageRequest {
    PageRequest::new(Some(number), Some(size), visibility).unwrap()
}

#[tokio::test]
async fn pagination_boundary() {
    let (_, catalog) = memory_catalog();
    for i in 0..25 {
        catalog
            .create(EntityInput::Offer(offer_input(&format!("bookie{i:02}"))))
            .await
            .unwrap();
    }

    let first = catalog
        .list_page(Collection::Offers, page(1, 10, Visibility::ActiveOnly))
        .await
        .unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.total_count, 25);
    assert_eq!(first.current_page, 1);

    let last = catalog
        .list_page(Collection::Offers, page(3, 10, Visibility::ActiveOnly))
        .await
        .unwrap();
    assert_eq!(last.items.len(), 5);
    let orders: Vec<i64> = last.items.iter().map(|e| e.order()).collect();
    assert_eq!(orders, [21, 22, 23, 24, 25]);

    let beyond = catalog
        .list_page(Collection::Offers, page(4, 10, Visibility::ActiveOnly))
        .await
        .unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_pages, 3);
}

#[tokio::test]
async fn disabled_entries_are_hidden_unless_requested() {
    let (_, catalog) = memory_catalog();
    for name in ["a", "b", "c"] {
        let mut input = offer_input(name);
        input.enabled = Some(name != "b");
        catalog.create(EntityInput::Offer(input)).await.unwrap();
    }

    let active = catalog
        .list_page(Collection::Offers, page(1, 10, Visibility::ActiveOnly))
        .await
        .unwrap();
    let labels: Vec<String> = active.items.iter().map(|e| e.label()).collect();
    assert_eq!(labels, ["a", "c"]);
    assert_eq!(active.total_count, 2);

    let all = catalog
        .list_page(Collection::Offers, page(1, 10, Visibility::All))
        .await
        .unwrap();
    assert_eq!(all.total_count, 3);
}

#[tokio::test]
async fn suspended_odds_are_disabled() {
    let (_, catalog) = memory_catalog();
    let mut input = odd_input(&[("acme", dec!(2.0), dec!(3.0), dec!(4.0), false)]);
    input.suspend_all = Some(true);
    catalog.create(EntityInput::Odd(input)).await.unwrap();

    let active = catalog
        .list_page(Collection::Odds, page(1, 10, Visibility::ActiveOnly))
        .await
        .unwrap();
    assert_eq!(active.total_count, 0);
    assert_eq!(active.total_pages, 0);
}

#[tokio::test]
async fn aggregator_example_through_create() {
    let (_, catalog) = memory_catalog();
    let odd = catalog
        .create(EntityInput::Odd(odd_input(&[
            ("A", dec!(2.1), dec!(3.0), dec!(3.5), false),
            ("B", dec!(2.3), dec!(2.9), dec!(3.6), true),
        ])))
        .await
        .unwrap()
        .into_odd()
        .unwrap();

    let best = &odd.best_calculated_odds;
    assert_eq!((best.home_win.value, best.home_win.bookie.as_str()), (dec!(2.1), "A"));
    assert_eq!((best.draw.value, best.draw.bookie.as_str()), (dec!(3.0), "A"));
    assert_eq!((best.away_win.value, best.away_win.bookie.as_str()), (dec!(3.5), "A"));
}

#[tokio::test]
async fn malformed_update_leaves_record_untouched() {
    let (_, catalog) = memory_catalog();
    let created = catalog
        .create(EntityInput::Odd(odd_input(&[(
            "acme",
            dec!(2.0),
            dec!(3.0),
            dec!(4.0),
            false,
        )])))
        .await
        .unwrap();

    let mut odds = oddsboard::testkit::domain::bookie_odds(&[(
        "acme",
        dec!(9.0),
        dec!(9.0),
        dec!(9.0),
        false,
    )]);
    odds.insert("broken".into(), BookieSubmission::without_prices());
    let patch = OddInput {
        odds: Some(odds),
        league: Some("Changed".into()),
        ..Default::default()
    };

    let err = catalog
        .update(created.id(), EntityInput::Odd(patch))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::MalformedSubmission { ref bookie }) if bookie == "broken"
    ));

    let stored = catalog.get(Collection::Odds, created.id()).await.unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn validation_errors_name_the_field() {
    let (_, catalog) = memory_catalog();

    let mut long_promo = offer_input("acme");
    long_promo.promo_info = Some("x".repeat(21));
    let err = catalog
        .create(EntityInput::Offer(long_promo))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::Validation { field: "promoInfo", .. })
    ));

    let mut bad_rating = offer_input("acme");
    bad_rating.rating = Some(dec!(5.5));
    let err = catalog
        .create(EntityInput::Offer(bad_rating))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::Validation { field: "rating", .. })
    ));

    let mut missing = odd_input(&[]);
    missing.event_date_time = None;
    let err = catalog.create(EntityInput::Odd(missing)).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::Validation {
            field: "eventDateTime",
            ..
        })
    ));
}

#[tokio::test]
async fn explicit_order_on_create_is_reconciled() {
    let (store, catalog) = memory_catalog();
    for name in ["a", "b", "c"] {
        catalog
            .create(EntityInput::Offer(offer_input(name)))
            .await
            .unwrap();
    }
    let mut first = offer_input("first");
    first.order = Some(1);
    catalog.create(EntityInput::Offer(first)).await.unwrap();

    let mut too_far = offer_input("late");
    too_far.order = Some(9);
    let err = catalog
        .create(EntityInput::Offer(too_far))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::InvalidOrder { requested: 9, max: 5 })
    ));

    let orders: Vec<i64> = ranking(store.as_ref(), Collection::Offers)
        .await
        .unwrap()
        .into_iter()
        .map(|(_, order)| order)
        .collect();
    assert_eq!(orders, [1, 2, 3, 4]);
    let labels: Vec<String> = catalog
        .list_page(Collection::Offers, page(1, 10, Visibility::All))
        .await
        .unwrap()
        .items
        .iter()
        .map(|e| e.label())
        .collect();
    assert_eq!(labels, ["first", "a", "b", "c"]);
}

#[tokio::test]
async fn mid_transaction_failure_rolls_back_create() {
    let (store, catalog) = memory_catalog();
    for name in ["a", "b"] {
        catalog
            .create(EntityInput::Offer(offer_input(name)))
            .await
            .unwrap();
    }

    // Insert succeeds, the shift of the explicit-order move fails.
    store.inject_write_failure(1);
    let mut input = offer_input("x");
    input.order = Some(1);
    let err = catalog.create(EntityInput::Offer(input)).await.unwrap_err();
    assert!(matches!(err, Error::TransactionFailure(_)));

    let ranking = ranking(store.as_ref(), Collection::Offers).await.unwrap();
    assert_eq!(ranking.len(), 2);
}

#[tokio::test]
async fn offer_delete_cascades_and_compacts() {
    let (_, catalog) = memory_catalog();
    let mut offers = Vec::new();
    for name in ["alpha", "beta", "gamma"] {
        offers.push(
            catalog
                .create(EntityInput::Offer(offer_input(name)))
                .await
                .unwrap(),
        );
    }
    let odd = catalog
        .create(EntityInput::Odd(odd_input(&[
            ("beta", dec!(4.0), dec!(4.0), dec!(4.0), false),
            ("gamma", dec!(2.0), dec!(3.0), dec!(1.5), false),
        ])))
        .await
        .unwrap();

    let removed = catalog
        .delete(Collection::Offers, offers[1].id())
        .await
        .unwrap();
    assert_eq!(removed.order(), 2);

    let gamma = catalog.get(Collection::Offers, offers[2].id()).await.unwrap();
    assert_eq!(gamma.order(), 2);

    let odd = catalog
        .get(Collection::Odds, odd.id())
        .await
        .unwrap()
        .into_odd()
        .unwrap();
    assert_eq!(odd.details.odds.keys().collect::<Vec<_>>(), ["gamma"]);
    assert_eq!(odd.best_calculated_odds.home_win.bookie, "gamma");
    assert_eq!(odd.best_calculated_odds.home_win.value, dec!(2.0));
}

#[tokio::test]
async fn prune_removes_started_fixtures_and_compacts() {
    let (store, catalog) = memory_catalog();
    let now = Utc::now();
    let quotes = [("acme", dec!(2.0), dec!(3.0), dec!(4.0), false)];
    let schedule = [
        ("past-1", now - Duration::days(2)),
        ("future-1", now + Duration::days(1)),
        ("past-2", now - Duration::hours(1)),
        ("future-2", now + Duration::days(3)),
    ];
    let mut ids = Vec::new();
    for (name, at) in schedule {
        let mut input = odd_input_at(at, &quotes);
        input.home_team = Some(name.to_string());
        ids.push(
            catalog
                .create(EntityInput::Odd(input))
                .await
                .unwrap()
                .id()
                .clone(),
        );
    }

    let pruned = catalog.prune_outdated(now).await.unwrap();
    assert_eq!(pruned, 2);

    let remaining = ranking(store.as_ref(), Collection::Odds).await.unwrap();
    assert_eq!(
        remaining,
        vec![(ids[1].to_string(), 1), (ids[3].to_string(), 2)]
    );
    assert_eq!(catalog.prune_outdated(now).await.unwrap(), 0);
}

#[tokio::test]
async fn reorder_rejects_out_of_range_and_unknown() {
    let (_, catalog) = memory_catalog();
    let a = catalog
        .create(EntityInput::Offer(offer_input("a")))
        .await
        .unwrap();

    let err = catalog
        .reorder(Collection::Offers, a.id(), 2)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::InvalidOrder { requested: 2, max: 1 })
    ));

    let err = catalog
        .reorder(Collection::Offers, &EntityId::from("ghost"), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn sqlite_catalog_roundtrips_updates() {
    let catalog = CatalogService::new(
        Arc::new(sqlite_memory_store().unwrap()),
        CatalogConfig { max_page_size: 50 },
    );
    let created = catalog
        .create(EntityInput::Offer(offer_input("acme")))
        .await
        .unwrap();

    let patch = OfferInput {
        rating: Some(dec!(4.5)),
        enabled: Some(false),
        ..Default::default()
    };
    catalog
        .update(created.id(), EntityInput::Offer(patch))
        .await
        .unwrap();

    let stored = catalog
        .get(Collection::Offers, created.id())
        .await
        .unwrap()
        .into_offer()
        .unwrap();
    assert_eq!(stored.details.rating, Some(dec!(4.5)));
    assert!(stored.is_disabled());
    assert_eq!(stored.order, 1);

    let err = catalog
        .list_page(Collection::Offers, page(1, 51, Visibility::All))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::Validation { field: "pageSize", .. })
    ));
}

#[tokio::test]
async fn unbounded_page_size_counts_one_page() {
    let catalog = CatalogService::new(
        Arc::new(sqlite_memory_store().unwrap()),
        CatalogConfig {
            max_page_size: i64::MAX,
        },
    );
    for name in ["a", "b"] {
        catalog
            .create(EntityInput::Offer(offer_input(name)))
            .await
            .unwrap();
    }

    let all = catalog
        .list_page(Collection::Offers, page(1, i64::MAX, Visibility::All))
        .await
        .unwrap();
    assert_eq!(all.items.len(), 2);
    assert_eq!(all.total_pages, 1);
    assert_eq!(all.total_count, 2);
}

#[tokio::test]
async fn sqlite_prune_compares_below_one_second() {
    let store = Arc::new(sqlite_memory_store().unwrap());
    let catalog = CatalogService::new(Arc::clone(&store), CatalogConfig::default());
    let now = Utc::now();
    let quotes = [("acme", dec!(2.0), dec!(3.0), dec!(4.0), false)];
    let mut ids = Vec::new();
    for at in [
        now - Duration::milliseconds(300),
        now + Duration::milliseconds(300),
        now,
    ] {
        ids.push(
            catalog
                .create(EntityInput::Odd(odd_input_at(at, &quotes)))
                .await
                .unwrap()
                .id()
                .clone(),
        );
    }

    assert_eq!(catalog.prune_outdated(now).await.unwrap(), 1);
    let remaining = ranking(store.as_ref(), Collection::Odds).await.unwrap();
    assert_eq!(
        remaining,
        vec![(ids[1].to_string(), 1), (ids[2].to_string(), 2)]
    );
}
