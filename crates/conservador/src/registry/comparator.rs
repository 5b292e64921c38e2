use super::domain::{round_pesos, Pesos};
use serde::Serialize;

const NOTARY_RATE: f64 = 0.003;
const STAMP_TAX_RATE: f64 = 0.008;
const TITLE_STUDY_FEE: Pesos = 150_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseCostConcept {
    Registry,
    Notary,
    StampTax,
    TitleStudy,
}

impl PurchaseCostConcept {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Registry => "Conservador",
            Self::Notary => "Notaria (estimado)",
            Self::StampTax => "Impuesto Timbre",
            Self::TitleStudy => "Estudio Titulos",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseCostLine {
    pub concept: PurchaseCostConcept,
    pub label: &'static str,
    pub amount: Pesos,
    /// Share of the property value in percent; absent for a zero-valued property.
    pub share_pct: Option<f64>,
}

/// Breaks a property purchase into the costs a buyer usually faces besides the price.
pub fn compare_purchase_costs(registry_total: Pesos, property_value: f64) -> Vec<PurchaseCostLine> {
    let value = if property_value.is_finite() {
        property_value.max(0.0)
    } else {
        0.0
    };

    [
        (PurchaseCostConcept::Registry, registry_total as f64),
        (PurchaseCostConcept::Notary, value * NOTARY_RATE),
        (PurchaseCostConcept::StampTax, value * STAMP_TAX_RATE),
        (PurchaseCostConcept::TitleStudy, TITLE_STUDY_FEE as f64),
    ]
    .into_iter()
    .map(|(concept, raw)| PurchaseCostLine {
        concept,
        label: concept.label(),
        amount: round_pesos(raw),
        share_pct: share_of(raw, value),
    })
    .collect()
}

fn share_of(amount: f64, property_value: f64) -> Option<f64> {
    if property_value <= 0.0 {
        return None;
    }
    Some(round_hundredths(amount / property_value * 100.0))
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
