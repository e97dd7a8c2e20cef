//! Brand logo resolution.
//!
//! Known manufacturers map to a fixed image URL. Any other brand gets a
//! generated initials avatar so the UI always has something to render.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const PLACEHOLDER_BASE: &str = "https://ui-avatars.com/api/";

/// Characters escaped in the placeholder's `name` parameter. Mirrors the set
/// browsers leave alone in a URI component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const WIKIMEDIA: &str = "https://upload.wikimedia.org/wikipedia";

/// `(lower-cased brand name, path under the wikimedia thumb root)`.
///
/// Feed spellings such as `"VW - VolksWagen"` are listed next to the
/// canonical name.
const KNOWN_LOGOS: &[(&str, &str)] = &[
    ("fiat", "commons/thumb/f/fa/Fiat_Automobiles_logo_2006.svg/200px-Fiat_Automobiles_logo_2006.svg.png"),
    ("volkswagen", "commons/thumb/6/6d/Volkswagen_logo_2019.svg/200px-Volkswagen_logo_2019.svg.png"),
    ("vw - volkswagen", "commons/thumb/6/6d/Volkswagen_logo_2019.svg/200px-Volkswagen_logo_2019.svg.png"),
    ("chevrolet", "commons/thumb/c/ce/Chevrolet_logo.svg/200px-Chevrolet_logo.svg.png"),
    ("gm - chevrolet", "commons/thumb/c/ce/Chevrolet_logo.svg/200px-Chevrolet_logo.svg.png"),
    ("toyota", "commons/thumb/5/5a/Toyota_EU.svg/200px-Toyota_EU.svg.png"),
    ("hyundai", "commons/thumb/7/78/Hyundai_logo_%282011%29.svg/200px-Hyundai_logo_%282011%29.svg.png"),
    ("honda", "commons/thumb/7/76/Honda_logo.svg/200px-Honda_logo.svg.png"),
    ("jeep", "commons/thumb/d/df/Jeep_logo.svg/200px-Jeep_logo.svg.png"),
    ("nissan", "commons/thumb/8/8c/Nissan_logo.svg/200px-Nissan_logo.svg.png"),
    ("renault", "commons/thumb/8/8d/Renault_2015.svg/200px-Renault_2015.svg.png"),
    ("peugeot", "commons/thumb/5/5e/Peugeot_2021.svg/200px-Peugeot_2021.svg.png"),
    ("citroën", "commons/thumb/1/10/Citro%C3%ABn_2022.svg/200px-Citro%C3%ABn_2022.svg.png"),
    ("citroen", "commons/thumb/1/10/Citro%C3%ABn_2022.svg/200px-Citro%C3%ABn_2022.svg.png"),
    ("ford", "commons/thumb/a/a0/Ford_Motor_Company_Logo_2017.svg/200px-Ford_Motor_Company_Logo_2017.svg.png"),
    ("byd", "commons/thumb/1/14/BYD_company_logo.svg/200px-BYD_company_logo.svg.png"),
    ("caoa chery", "commons/thumb/4/45/Chery_Logo.svg/200px-Chery_Logo.svg.png"),
    ("mitsubishi", "commons/thumb/5/50/Mitsubishi_logo.svg/200px-Mitsubishi_logo.svg.png"),
    ("bmw", "commons/thumb/4/44/BMW.svg/200px-BMW.svg.png"),
    ("porsche", "de/thumb/8/87/Porsche_Logo.svg/200px-Porsche_Logo.svg.png"),
    ("kia", "commons/thumb/5/5e/Kia_logo.svg/200px-Kia_logo.svg.png"),
];

/// Returns the logo URL for `brand_name`, matching known names
/// case-insensitively and falling back to [`placeholder_logo`].
#[must_use]
pub fn logo_for(brand_name: &str) -> String {
    known_logo(brand_name).unwrap_or_else(|| placeholder_logo(brand_name))
}

/// Looks up a fixed logo URL, if the brand is known.
#[must_use]
pub fn known_logo(brand_name: &str) -> Option<String> {
    let key = brand_name.trim().to_lowercase();
    KNOWN_LOGOS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, path)| format!("{WIKIMEDIA}/{path}"))
}

/// Builds the generated-avatar URL for a brand.
#[must_use]
pub fn placeholder_logo(brand_name: &str) -> String {
    let encoded = utf8_percent_encode(brand_name, COMPONENT);
    format!("{PLACEHOLDER_BASE}?name={encoded}&background=random")
}
