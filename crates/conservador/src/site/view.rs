use serde::{Deserialize, Serialize};

/// Panel currently shown on the page. Every panel is reachable from every other one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    #[default]
    #[serde(rename = "calculadora")]
    Calculator,
    #[serde(rename = "conservadores")]
    Offices,
    #[serde(rename = "documentos")]
    Documents,
    #[serde(rename = "guia")]
    Guide,
}

impl View {
    pub const fn all() -> [Self; 4] {
        [Self::Calculator, Self::Offices, Self::Documents, Self::Guide]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Calculator => "calculadora",
            Self::Offices => "conservadores",
            Self::Documents => "documentos",
            Self::Guide => "guia",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Calculator => "Calculadora",
            Self::Offices => "Oficinas",
            Self::Documents => "Documentos",
            Self::Guide => "Guia",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Calculator => "🧮",
            Self::Offices => "🏛️",
            Self::Documents => "📄",
            Self::Guide => "📋",
        }
    }

    /// Unknown or missing values fall back to the calculator.
    pub fn parse(value: Option<&str>) -> Self {
        value
            .map(str::trim)
            .and_then(|value| {
                Self::all()
                    .into_iter()
                    .find(|view| view.slug().eq_ignore_ascii_case(value))
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_every_slug() {
        for view in View::all() {
            assert_eq!(View::parse(Some(view.slug())), view);
        }
    }

    #[test]
    fn parse_falls_back_to_calculator() {
        assert_eq!(View::parse(None), View::Calculator);
        assert_eq!(View::parse(Some("mapa")), View::Calculator);
        assert_eq!(View::parse(Some(" GUIA ")), View::Guide);
    }
}
