use super::html::encode_query_value;
use super::view::View;
use crate::registry::{
    EstimateRequest, DEFAULT_INSCRIPTION_TYPE, DEFAULT_PROPERTY_VALUE, DEFAULT_REGION,
    MAX_PROPERTY_VALUE,
};
use serde::Deserialize;

/// Raw query string of the page. Every field is optional and loosely typed so that
/// malformed input can be coerced instead of rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub vista: Option<String>,
    pub tipo: Option<String>,
    pub valor: Option<String>,
    pub certificados: Option<String>,
    pub region: Option<String>,
    /// Present when the calculator form itself was submitted.
    pub enviado: Option<String>,
}

/// Everything the page needs to render one view. Nothing survives the request.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub view: View,
    pub inscription_type: String,
    pub property_value: f64,
    pub include_certificates: bool,
    pub region: String,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            view: View::default(),
            inscription_type: DEFAULT_INSCRIPTION_TYPE.to_string(),
            property_value: DEFAULT_PROPERTY_VALUE,
            include_certificates: true,
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl PageState {
    pub fn from_query(query: &PageQuery) -> Self {
        let defaults = Self::default();
        let form_submitted = query.enviado.is_some();

        let include_certificates = match query.certificados.as_deref() {
            Some(flag) => is_truthy(flag),
            // Browsers omit unchecked boxes, so absence only means "off" for a submitted form.
            None => !form_submitted && defaults.include_certificates,
        };

        Self {
            view: View::parse(query.vista.as_deref()),
            inscription_type: query
                .tipo
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.inscription_type),
            property_value: query
                .valor
                .as_deref()
                .map(coerce_property_value)
                .unwrap_or(defaults.property_value),
            include_certificates,
            region: query
                .region
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.region),
        }
    }

    pub fn estimate_request(&self) -> EstimateRequest {
        EstimateRequest {
            inscription_type: self.inscription_type.clone(),
            property_value: self.property_value,
            include_certificates: self.include_certificates,
        }
    }

    /// Copy of this state showing another view.
    pub fn with_view(&self, view: View) -> Self {
        Self {
            view,
            ..self.clone()
        }
    }

    /// Copy of this state with another region selected.
    pub fn with_region(&self, region: &str) -> Self {
        Self {
            region: region.to_string(),
            ..self.clone()
        }
    }

    /// Page URL reproducing this state.
    pub fn href(&self) -> String {
        format!(
            "/?vista={}&tipo={}&valor={}&certificados={}&region={}",
            self.view.slug(),
            encode_query_value(&self.inscription_type),
            format_plain_number(self.property_value),
            self.include_certificates,
            encode_query_value(&self.region),
        )
    }
}

/// Empty, non-numeric, negative and non-finite input all become 0. Values above
/// [`MAX_PROPERTY_VALUE`] are capped.
pub fn coerce_property_value(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.min(MAX_PROPERTY_VALUE),
        _ => 0.0,
    }
}

fn is_truthy(flag: &str) -> bool {
    matches!(
        flag.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "si" | "sí" | "yes"
    )
}

pub(crate) fn format_plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
