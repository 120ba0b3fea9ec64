//! Static advisory text per weather category
//!
//! Two independent tables: one keyed by the image-model vocabulary, one by the
//! tabular-model vocabulary. Callers must query the table matching the model
//! that produced the category.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::category::{CnnClass, TabularClass};

/// Guidance for one weather category
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Advice {
    pub agriculture: &'static str,
    pub solar: &'static str,
    pub general: &'static str,
}

impl Advice {
    /// Field names of an advisory entry, in display order
    pub const FIELDS: [&'static str; 3] = ["agriculture", "solar", "general"];

    const fn new(agriculture: &'static str, solar: &'static str, general: &'static str) -> Self {
        Self {
            agriculture,
            solar,
            general,
        }
    }
}

/// Result of an advisory lookup; serializes to `{}` on a miss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvisoryEntry(Option<Advice>);

impl AdvisoryEntry {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn advice(&self) -> Option<&Advice> {
        self.0.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Advice> for AdvisoryEntry {
    fn from(advice: Advice) -> Self {
        Self(Some(advice))
    }
}

impl Serialize for AdvisoryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(advice) => advice.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// Which vocabulary a category string belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryTable {
    Image,
    Tabular,
}

/// Look up advice for `category` in `table`; unknown categories yield an empty entry
pub fn lookup(table: AdvisoryTable, category: &str) -> AdvisoryEntry {
    match table {
        AdvisoryTable::Image => category
            .parse::<CnnClass>()
            .map(|c| AdvisoryEntry::from(c.advice()))
            .unwrap_or_default(),
        AdvisoryTable::Tabular => category
            .parse::<TabularClass>()
            .map(|c| AdvisoryEntry::from(c.advice()))
            .unwrap_or_default(),
    }
}

impl CnnClass {
    pub fn advice(&self) -> Advice {
        match self {
            CnnClass::Shine => Advice::new(
                "Irrigation recommandée si le sol est sec",
                "Production solaire optimale",
                "Temps ensoleillé idéal pour les activités extérieures",
            ),
            CnnClass::Cloudy => Advice::new(
                "Irrigation possible si nécessaire",
                "Production solaire réduite",
                "Ciel couvert, temps stable",
            ),
            CnnClass::Foggy => Advice::new(
                "Risque de maladies cryptogamiques, surveiller les cultures",
                "Production solaire quasi nulle",
                "Brouillard, prudence pour les déplacements",
            ),
            CnnClass::Lightning => Advice::new(
                "Attention aux orages violents, protéger les équipements",
                "Production solaire interrompue",
                "Orages, éviter les activités extérieures",
            ),
            CnnClass::Rainbow => Advice::new(
                "Temps agréable après la pluie, humidité modérée",
                "Production solaire variable",
                "Arc-en-ciel, temps en amélioration",
            ),
            CnnClass::Rainy => Advice::new(
                "Bonne pour les cultures, inutile d'irriguer",
                "Production solaire faible",
                "Pluie, prévoir un parapluie",
            ),
            CnnClass::Rime => Advice::new(
                "Risque de gel, protéger les cultures sensibles",
                "Production solaire faible mais ciel dégagé",
                "Gel blanc, routes potentiellement glissantes",
            ),
            CnnClass::Sandstorm => Advice::new(
                "Risque de dégâts sur les cultures, protéger si possible",
                "Production solaire perturbée par la poussière",
                "Tempête de sable, protéger les voies respiratoires",
            ),
            CnnClass::Sunrise => Advice::new(
                "Bonne pour démarrer les activités agricoles",
                "Production solaire modérée",
                "Lever de soleil, belle journée en perspective",
            ),
        }
    }
}

impl TabularClass {
    pub fn advice(&self) -> Advice {
        match self {
            TabularClass::Cloudy => Advice::new(
                "Irrigation possible si nécessaire",
                "Production solaire réduite",
                "Temps couvert mais stable",
            ),
            TabularClass::Rainy => Advice::new(
                "Bonne pour les cultures, inutile d'irriguer",
                "Production solaire faible",
                "Prévoir des vêtements de pluie",
            ),
            TabularClass::Snowy => Advice::new(
                "Risque de gel, protéger les cultures sensibles",
                "Production solaire faible mais ciel dégagé",
                "Neige, routes difficiles",
            ),
            TabularClass::Sunny => Advice::new(
                "Bonne pour démarrer les activités agricoles",
                "Production solaire modérée",
                "Temps ensoleillé idéal",
            ),
        }
    }
}
