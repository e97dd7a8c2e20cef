use super::*;

// -----------------------------------------------------------------------
// parse_year
// -----------------------------------------------------------------------

#[test]
fn year_plain() {
    assert_eq!(parse_year("2023"), Some(2023));
}

#[test]
fn year_surrounding_whitespace() {
    assert_eq!(parse_year(" 2019 "), Some(2019));
}

#[test]
fn year_not_a_number() {
    assert!(parse_year("ano-invalido").is_none());
}

#[test]
fn year_fabrication_model_pair_keeps_first() {
    assert_eq!(parse_year("2019/2020"), Some(2019));
    assert_eq!(parse_year("2021 "), Some(2021));
}

#[test]
fn year_needs_leading_digits() {
    assert!(parse_year("/2020").is_none());
    assert!(parse_year("").is_none());
}

#[test]
fn year_out_of_range() {
    assert!(parse_year("23").is_none());
    assert!(parse_year("20230").is_none());
}

// -----------------------------------------------------------------------
// parse_price
// -----------------------------------------------------------------------

#[test]
fn price_with_thousands_and_cents() {
    assert_eq!(parse_price("R$118.900,00"), Some(Decimal::new(118_900, 0)));
}

#[test]
fn price_round_number() {
    assert_eq!(parse_price("R$98.000,00"), Some(Decimal::new(98_000, 0)));
}

#[test]
fn price_with_space_after_symbol() {
    assert_eq!(parse_price("R$ 1.234,56"), Some(Decimal::new(123_456, 2)));
}

#[test]
fn price_without_symbol() {
    assert_eq!(parse_price("45.000"), Some(Decimal::new(45_000, 0)));
}

#[test]
fn price_text_is_rejected() {
    assert!(parse_price("Consulte").is_none());
}

#[test]
fn price_empty_is_rejected() {
    assert!(parse_price("").is_none());
}

#[test]
fn price_negative_is_rejected() {
    assert!(parse_price("R$-10,00").is_none());
}

// -----------------------------------------------------------------------
// parse_mileage
// -----------------------------------------------------------------------

#[test]
fn mileage_with_thousands_separator() {
    assert_eq!(parse_mileage("KM 124.000"), MileageReading::Reported(124_000));
}

#[test]
fn mileage_sentinel_is_not_reported() {
    assert_eq!(parse_mileage("KM N/D"), MileageReading::NotReported);
    assert_eq!(parse_mileage("KM N/D").value(), 0);
}

#[test]
fn mileage_blank_is_not_reported() {
    assert_eq!(parse_mileage(""), MileageReading::NotReported);
    assert_eq!(parse_mileage("   ").value(), 0);
}

#[test]
fn mileage_garbage_is_unreadable_and_zero() {
    let reading = parse_mileage("KM ???");
    assert_eq!(reading, MileageReading::Unreadable);
    assert_eq!(reading.value(), 0);
}

#[test]
fn mileage_decimal_part_is_truncated() {
    assert_eq!(parse_mileage("KM 12,9"), MileageReading::Reported(12));
}

// -----------------------------------------------------------------------
// split_title
// -----------------------------------------------------------------------

#[test]
fn title_brand_and_model() {
    assert_eq!(
        split_title("Toyota Corolla XEi 2.0"),
        ("Toyota".to_owned(), "Corolla".to_owned())
    );
}

#[test]
fn title_vw_separator_remap() {
    assert_eq!(
        split_title("VW - Polo 1.0 TSI"),
        ("Volkswagen".to_owned(), "Polo".to_owned())
    );
}

#[test]
fn title_gm_remap() {
    assert_eq!(
        split_title("GM - Onix LT"),
        ("Chevrolet".to_owned(), "Onix".to_owned())
    );
}

#[test]
fn title_caoa_remap_keeps_second_token_as_model() {
    assert_eq!(
        split_title("CAOA Tiggo 5X"),
        ("Caoa Chery".to_owned(), "Tiggo".to_owned())
    );
}

#[test]
fn title_en_dash_separator() {
    assert_eq!(
        split_title("Fiat \u{2013} Argo Drive"),
        ("Fiat".to_owned(), "Argo".to_owned())
    );
}

#[test]
fn title_separator_without_model() {
    assert_eq!(split_title("VW -"), ("Volkswagen".to_owned(), String::new()));
}

#[test]
fn title_single_token() {
    assert_eq!(split_title("Fiat"), ("Fiat".to_owned(), String::new()));
}

#[test]
fn title_empty_uses_unknown_brand() {
    assert_eq!(split_title("   "), (UNKNOWN_BRAND.to_owned(), String::new()));
}

#[test]
fn title_collapses_repeated_whitespace() {
    assert_eq!(
        split_title("Honda   Civic"),
        ("Honda".to_owned(), "Civic".to_owned())
    );
}

// -----------------------------------------------------------------------
// truncate_chars
// -----------------------------------------------------------------------

#[test]
fn truncate_counts_characters_not_bytes() {
    let title = "é".repeat(150);
    assert_eq!(truncate_chars(&title, 100).chars().count(), 100);
}

#[test]
fn truncate_short_string_unchanged() {
    assert_eq!(truncate_chars("Fiat Uno", 100), "Fiat Uno");
}
