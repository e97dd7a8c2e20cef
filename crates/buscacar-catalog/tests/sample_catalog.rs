//! End-to-end checks over the sample data shipped in `data/`.

use std::path::PathBuf;

use buscacar_catalog::{
    extract_brand_and_model, run_query, similar, suggestions, CatalogStore, Facets, RangeFilter,
    SearchRequest, SkipReason, SortKey,
};
use buscacar_core::{Category, Fuel, Transmission};
use rust_decimal::Decimal;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn sample_store() -> CatalogStore {
    let dir = data_dir();
    CatalogStore::from_paths(&dir.join("catalog.csv"), &dir.join("brands.json"))
        .expect("sample data loads")
}

#[test]
fn sample_feed_report() {
    let store = sample_store();
    let report = store.parse_report();

    assert_eq!(report.rows_seen, 14);
    assert_eq!(report.rows_kept, 10);
    assert_eq!(report.skipped(SkipReason::TooFewFields), 1);
    assert_eq!(report.skipped(SkipReason::DuplicateLink), 1);
    assert_eq!(report.skipped(SkipReason::InvalidYear), 1);
    assert_eq!(report.skipped(SkipReason::InvalidPrice), 1);
    assert_eq!(report.mileage_defaulted, 0);
}

#[test]
fn sample_records_are_normalized() {
    let store = sample_store();

    let corolla = store
        .vehicle("https://www.lojacentro.com.br/anuncio/1001")
        .expect("duplicated origin stripped from id");
    assert_eq!(corolla.brand, "Toyota");
    assert_eq!(corolla.price, Decimal::new(118_900, 0));
    assert_eq!(corolla.mileage, 12_500);
    assert_eq!(corolla.transmission, Transmission::Automatic);
    assert_eq!(corolla.category, Category::Car);

    let strada = store
        .vehicle("https://www.lojanorte.com.br/anuncio/2002")
        .expect("strada");
    assert_eq!(strada.category, Category::Commercial);
    assert_eq!(strada.price, Decimal::new(98_000, 0), "first occurrence wins");

    let polo = store
        .vehicle("https://www.lojanorte.com.br/anuncio/2003")
        .expect("polo");
    assert_eq!((polo.brand.as_str(), polo.model.as_str()), ("Volkswagen", "Polo"));
    assert_eq!(polo.mileage, 0);

    let tiggo = store
        .vehicle("https://www.autosul.com.br/anuncio/4008")
        .expect("tiggo");
    assert_eq!(tiggo.brand, "Caoa Chery");
    assert_eq!(tiggo.fuel, Fuel::Gasoline);
    assert_eq!(tiggo.transmission, Transmission::Automatic);

    let compass = store
        .vehicle("https://www.multimarcas.com.br/anuncio/3006")
        .expect("quoted title with comma");
    assert_eq!(compass.model, "Compass");
}

#[test]
fn sample_brands_are_deduplicated() {
    let store = sample_store();
    let fiats: Vec<_> = store.all_brands().iter().filter(|b| b.name == "Fiat").collect();
    assert_eq!(fiats.len(), 1);
    assert!(!fiats[0].models.contains(&"Palio".to_owned()));
    assert_eq!(store.all_brands().len(), 15);
}

#[test]
fn sample_query_pipeline() {
    let store = sample_store();
    let request = SearchRequest {
        query: "toyota".to_owned(),
        facets: Facets {
            price: Some(RangeFilter::at_least(Decimal::new(150_000, 0))),
            ..Facets::default()
        },
        sort: SortKey::PriceDesc,
        ..SearchRequest::default()
    };
    let page = run_query(&store, &request).expect("query");
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].model, "Hilux");

    let similar_to_corolla = similar(&store, "https://www.lojacentro.com.br/anuncio/1001", 4);
    assert_eq!(similar_to_corolla.len(), 1);
    assert_eq!(similar_to_corolla[0].model, "Hilux");
}

#[test]
fn sample_suggestions_and_extraction() {
    let store = sample_store();

    let found = suggestions(store.all_brands(), "tig");
    let models: Vec<&str> = found.iter().map(|s| s.model).collect();
    assert_eq!(models, vec!["Tiggo 5X", "Tiggo 7", "Tiggo 8"]);

    let extracted = extract_brand_and_model(store.all_brands(), "quero um onix 2019");
    assert_eq!(extracted.brand.as_deref(), Some("Chevrolet"));
    assert_eq!(extracted.model.as_deref(), Some("Onix"));
}
