use super::catalog::RegistryCatalog;
use super::domain::{CertificateKind, InscriptionType, Pesos};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Largest property value the calculator accepts, in CLP. Fees derived from it stay
/// well inside `Pesos` and inside the exact integer range of `f64`.
pub const MAX_PROPERTY_VALUE: f64 = 1e15;

/// Inputs of a single fee estimate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstimateRequest {
    pub inscription_type: String,
    pub property_value: f64,
    #[serde(default = "default_include_certificates")]
    pub include_certificates: bool,
}

fn default_include_certificates() -> bool {
    true
}

impl EstimateRequest {
    /// Rejects property values above [`MAX_PROPERTY_VALUE`].
    pub fn check_property_value(&self) -> Result<(), EstimateError> {
        if self.property_value > MAX_PROPERTY_VALUE {
            return Err(EstimateError::PropertyValueOutOfRange(self.property_value));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CostEstimate {
    pub inscription_fee: Pesos,
    pub certificates_fee: Pesos,
    pub total: Pesos,
}

impl CostEstimate {
    pub const ZERO: Self = Self {
        inscription_fee: 0,
        certificates_fee: 0,
        total: 0,
    };
}

#[derive(Debug, Error, PartialEq)]
pub enum EstimateError {
    #[error("unknown inscription type '{0}'")]
    UnknownInscriptionType(String),
    #[error("property value {0} exceeds the supported maximum of {max}", max = MAX_PROPERTY_VALUE)]
    PropertyValueOutOfRange(f64),
}

/// Pure fee arithmetic over the registry tariff tables.
#[derive(Debug, Clone, Copy)]
pub struct FeeCalculator<'a> {
    catalog: &'a RegistryCatalog,
}

impl Default for FeeCalculator<'static> {
    fn default() -> Self {
        Self::new(RegistryCatalog::standard())
    }
}

impl<'a> FeeCalculator<'a> {
    pub fn new(catalog: &'a RegistryCatalog) -> Self {
        Self { catalog }
    }

    /// Estimate for the given inputs. An unknown inscription type yields a zero estimate
    /// and values above [`MAX_PROPERTY_VALUE`] are capped.
    pub fn estimate(&self, request: &EstimateRequest) -> CostEstimate {
        match self.catalog.inscription_type(&request.inscription_type) {
            Some(kind) => {
                self.estimate_for(kind, request.property_value, request.include_certificates)
            }
            None => CostEstimate::ZERO,
        }
    }

    pub fn try_estimate(&self, request: &EstimateRequest) -> Result<CostEstimate, EstimateError> {
        request.check_property_value()?;
        let kind = self
            .catalog
            .inscription_type(&request.inscription_type)
            .ok_or_else(|| EstimateError::UnknownInscriptionType(request.inscription_type.clone()))?;

        let estimate = self.estimate_for(kind, request.property_value, request.include_certificates);
        debug!(
            inscription_type = kind.id,
            property_value = request.property_value,
            total = estimate.total,
            "computed fee estimate"
        );
        Ok(estimate)
    }

    pub fn estimate_for(
        &self,
        kind: &InscriptionType,
        property_value: f64,
        include_certificates: bool,
    ) -> CostEstimate {
        let property_value = if property_value > MAX_PROPERTY_VALUE {
            MAX_PROPERTY_VALUE
        } else {
            property_value
        };
        let inscription_fee = kind.fee_rule.inscription_fee(property_value);
        let certificates_fee = if include_certificates {
            self.bundled_certificates_fee()
        } else {
            0
        };

        CostEstimate {
            inscription_fee,
            certificates_fee,
            total: inscription_fee.saturating_add(certificates_fee),
        }
    }

    /// Sum of the certificates a registration normally needs.
    pub fn bundled_certificates_fee(&self) -> Pesos {
        CertificateKind::bundled()
            .into_iter()
            .map(|kind| self.catalog.certificate_price(kind))
            .sum()
    }
}
