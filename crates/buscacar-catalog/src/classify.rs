//! Category, transmission and fuel inference from listing titles.
//!
//! Each attribute is decided by an ordered rule table: the first rule whose
//! predicate holds wins, otherwise the attribute's default applies. All
//! matching is case-insensitive substring matching.

use buscacar_core::{Category, Fuel, Transmission};

/// Lower-cased text a rule can inspect.
#[derive(Debug, Clone)]
pub struct TitleSignals {
    title: String,
    model: String,
}

impl TitleSignals {
    #[must_use]
    pub fn new(title: &str, model: &str) -> Self {
        Self {
            title: title.to_lowercase(),
            model: model.to_lowercase(),
        }
    }

    fn title_has_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.title.contains(n))
    }

    fn model_has_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.model.contains(n))
    }
}

/// One `(predicate, result)` pair of a rule table.
#[derive(Clone, Copy)]
pub struct Rule<T: 'static> {
    pub name: &'static str,
    pub applies: fn(&TitleSignals) -> bool,
    pub result: T,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

/// Returns the result of the first matching rule, or `default`.
pub fn first_match<T: Copy>(rules: &[Rule<T>], signals: &TitleSignals, default: T) -> T {
    rules
        .iter()
        .find(|rule| (rule.applies)(signals))
        .map_or(default, |rule| rule.result)
}

const PICKUP_AND_VAN_MODELS: &[&str] = &[
    "strada", "toro", "amarok", "hilux", "ranger", "montana", "kangoo",
];
const PICKUP_WORDS: &[&str] = &["picape"];

const AUTOMATIC_MARKERS: &[&str] = &[
    "automatic",
    "automático",
    "automatico",
    "cvt",
    "dsg",
    "tiptronic",
];

const DIESEL_MARKERS: &[&str] = &["diesel"];
const GASOLINE_MARKERS: &[&str] = &["gasolina", "gasoline"];
const FLEX_MARKERS: &[&str] = &["flex"];
const ELECTRIC_MARKERS: &[&str] = &["elétrico", "eletrico", "electric"];

fn is_pickup_or_van_model(s: &TitleSignals) -> bool {
    s.model_has_any(PICKUP_AND_VAN_MODELS) || s.title_has_any(PICKUP_AND_VAN_MODELS)
}

fn mentions_pickup(s: &TitleSignals) -> bool {
    s.title_has_any(PICKUP_WORDS)
}

fn has_automatic_gearbox(s: &TitleSignals) -> bool {
    s.title_has_any(AUTOMATIC_MARKERS)
}

fn mentions_diesel(s: &TitleSignals) -> bool {
    s.title_has_any(DIESEL_MARKERS)
}

/// A flex engine also runs on gasoline, so "gasolina" alone is not enough.
fn gasoline_only(s: &TitleSignals) -> bool {
    s.title_has_any(GASOLINE_MARKERS) && !s.title_has_any(FLEX_MARKERS)
}

fn mentions_electric(s: &TitleSignals) -> bool {
    s.title_has_any(ELECTRIC_MARKERS)
}

pub const CATEGORY_RULES: &[Rule<Category>] = &[
    Rule {
        name: "pickup or van model",
        applies: is_pickup_or_van_model,
        result: Category::Commercial,
    },
    Rule {
        name: "pickup keyword",
        applies: mentions_pickup,
        result: Category::Commercial,
    },
];

pub const TRANSMISSION_RULES: &[Rule<Transmission>] = &[Rule {
    name: "automatic gearbox marker",
    applies: has_automatic_gearbox,
    result: Transmission::Automatic,
}];

pub const FUEL_RULES: &[Rule<Fuel>] = &[
    Rule {
        name: "diesel",
        applies: mentions_diesel,
        result: Fuel::Diesel,
    },
    Rule {
        name: "gasoline without flex",
        applies: gasoline_only,
        result: Fuel::Gasoline,
    },
    Rule {
        name: "electric",
        applies: mentions_electric,
        result: Fuel::Electric,
    },
];

#[must_use]
pub fn infer_category(signals: &TitleSignals) -> Category {
    first_match(CATEGORY_RULES, signals, Category::Car)
}

#[must_use]
pub fn infer_transmission(signals: &TitleSignals) -> Transmission {
    first_match(TRANSMISSION_RULES, signals, Transmission::Manual)
}

#[must_use]
pub fn infer_fuel(signals: &TitleSignals) -> Fuel {
    first_match(FUEL_RULES, signals, Fuel::Flex)
}
