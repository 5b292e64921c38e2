use serde::Serialize;

/// Discovery metadata emitted in the document head.
#[derive(Debug, Clone, Serialize)]
pub struct PageMetadata {
    pub lang: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub og_title: &'static str,
    pub og_description: &'static str,
    pub og_type: &'static str,
}

pub const PAGE_METADATA: PageMetadata = PageMetadata {
    lang: "es",
    title: "Conservador Bienes Raices Chile | NewCooltura Informada",
    description: "Calculadora de aranceles, buscador de conservadores de bienes raices y guia de tramites en Chile",
    keywords: &[
        "conservador bienes raices",
        "aranceles CBR",
        "inscripcion propiedad",
        "certificado dominio",
    ],
    og_title: "Conservador Bienes Raices - NewCooltura Informada",
    og_description: "Aranceles y tramites en conservadores",
    og_type: "website",
};
