use serde::{Deserialize, Serialize};

/// Whole Chilean pesos. The registry never charges fractions of a peso.
pub type Pesos = u64;

/// How the inscription fee of a given act is charged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeeRule {
    /// Flat charge independent of the property value.
    Fixed { amount: Pesos },
    /// Percentage of the property value, never below `minimum`.
    Proportional { rate: f64, minimum: Pesos },
}

impl FeeRule {
    /// Inscription fee for a property of the given value, rounded to whole pesos.
    pub fn inscription_fee(&self, property_value: f64) -> Pesos {
        match *self {
            FeeRule::Fixed { amount } => amount,
            FeeRule::Proportional { rate, minimum } => {
                let proportional = property_value.max(0.0) * (rate / 100.0);
                round_pesos(proportional.max(minimum as f64))
            }
        }
    }

    pub fn label(&self) -> String {
        match *self {
            FeeRule::Fixed { amount } => format!("Fijo {}", super::format::format_clp(amount)),
            FeeRule::Proportional { rate, minimum } => format!(
                "{}% del valor (minimo {})",
                rate,
                super::format::format_clp(minimum)
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InscriptionType {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub fee_rule: FeeRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateKind {
    General,
    InscriptionCopy,
    Validity,
    Dominion,
    Liens,
    Litigation,
}

impl CertificateKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Dominion,
            Self::Liens,
            Self::Validity,
            Self::Litigation,
            Self::InscriptionCopy,
            Self::General,
        ]
    }

    /// Certificates bundled into an estimate when the user asks for them.
    pub const fn bundled() -> [Self; 4] {
        [Self::General, Self::Dominion, Self::Liens, Self::Validity]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "Certificado General",
            Self::InscriptionCopy => "Copia de Inscripcion",
            Self::Validity => "Certificado de Vigencia",
            Self::Dominion => "Certificado de Dominio Vigente",
            Self::Liens => "Certificado de Hipotecas y Gravamenes",
            Self::Litigation => "Certificado de Litigios",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CertificateFee {
    pub kind: CertificateKind,
    pub label: &'static str,
    pub price: Pesos,
}

#[derive(Debug, Clone, Serialize)]
pub struct Office {
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub served_areas: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Region {
    pub name: &'static str,
    pub offices: Vec<Office>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "compraventa")]
    Purchase,
    #[serde(rename = "hipoteca")]
    Mortgage,
    #[serde(rename = "herencia")]
    Inheritance,
    #[serde(rename = "subdivision")]
    Subdivision,
}

impl TransactionKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Purchase,
            Self::Mortgage,
            Self::Inheritance,
            Self::Subdivision,
        ]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Purchase => "compraventa",
            Self::Mortgage => "hipoteca",
            Self::Inheritance => "herencia",
            Self::Subdivision => "subdivision",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Purchase => "Compraventa de Propiedad",
            Self::Mortgage => "Constitucion de Hipoteca",
            Self::Inheritance => "Herencia",
            Self::Subdivision => "Subdivision de Terreno",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Purchase => "🏠",
            Self::Mortgage => "🏦",
            Self::Inheritance => "📜",
            Self::Subdivision => "📐",
        }
    }

    pub fn from_slug(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentChecklist {
    pub kind: TransactionKind,
    pub label: &'static str,
    pub documents: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessStep {
    pub step: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistryBook {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlossaryEntry {
    pub term: &'static str,
    pub definition: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExternalLink {
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

pub(crate) fn round_pesos(value: f64) -> Pesos {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round() as Pesos
}
