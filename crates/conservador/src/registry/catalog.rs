use super::domain::{
    CertificateFee, CertificateKind, DocumentChecklist, ExternalLink, FeeRule, GlossaryEntry,
    InscriptionType, Office, Pesos, ProcessStep, Region, RegistryBook, TransactionKind,
};
use chrono::NaiveDate;
use std::sync::OnceLock;

pub const DEFAULT_INSCRIPTION_TYPE: &str = "dominio";
pub const DEFAULT_PROPERTY_VALUE: f64 = 100_000_000.0;
pub const DEFAULT_REGION: &str = "Metropolitana";

/// Reference tables shown on the page. Built once and shared for the process lifetime.
#[derive(Debug)]
pub struct RegistryCatalog {
    inscription_types: Vec<InscriptionType>,
    certificate_fees: Vec<CertificateFee>,
    tariff_effective_from: NaiveDate,
    regions: Vec<Region>,
    checklists: Vec<DocumentChecklist>,
    process_steps: Vec<ProcessStep>,
    registry_books: Vec<RegistryBook>,
    glossary: Vec<GlossaryEntry>,
    links: Vec<ExternalLink>,
}

impl RegistryCatalog {
    pub fn standard() -> &'static Self {
        static CATALOG: OnceLock<RegistryCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| Self {
            inscription_types: standard_inscription_types(),
            certificate_fees: standard_certificate_fees(),
            tariff_effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            regions: standard_regions(),
            checklists: standard_checklists(),
            process_steps: standard_process_steps(),
            registry_books: standard_registry_books(),
            glossary: standard_glossary(),
            links: standard_links(),
        })
    }

    pub fn inscription_types(&self) -> &[InscriptionType] {
        &self.inscription_types
    }

    pub fn inscription_type(&self, id: &str) -> Option<&InscriptionType> {
        self.inscription_types.iter().find(|kind| kind.id == id)
    }

    pub fn certificate_fees(&self) -> &[CertificateFee] {
        &self.certificate_fees
    }

    pub fn certificate_price(&self, kind: CertificateKind) -> Pesos {
        self.certificate_fees
            .iter()
            .find(|fee| fee.kind == kind)
            .map(|fee| fee.price)
            .unwrap_or(0)
    }

    /// Approximate tariffs; the year is shown next to the certificate table.
    pub fn tariff_effective_from(&self) -> NaiveDate {
        self.tariff_effective_from
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Offices registered for `region`, or `None` when the region is unknown.
    pub fn offices_in(&self, region: &str) -> Option<&[Office]> {
        self.regions
            .iter()
            .find(|candidate| candidate.name == region)
            .map(|region| region.offices.as_slice())
    }

    pub fn checklists(&self) -> &[DocumentChecklist] {
        &self.checklists
    }

    pub fn checklist(&self, kind: TransactionKind) -> Option<&DocumentChecklist> {
        self.checklists.iter().find(|list| list.kind == kind)
    }

    pub fn process_steps(&self) -> &[ProcessStep] {
        &self.process_steps
    }

    pub fn registry_books(&self) -> &[RegistryBook] {
        &self.registry_books
    }

    pub fn glossary(&self) -> &[GlossaryEntry] {
        &self.glossary
    }

    pub fn links(&self) -> &[ExternalLink] {
        &self.links
    }
}

fn standard_inscription_types() -> Vec<InscriptionType> {
    vec![
        InscriptionType {
            id: "dominio",
            display_name: "Inscripcion de Dominio",
            description: "Transferencia de propiedad (compraventa, donacion, herencia)",
            fee_rule: FeeRule::Proportional {
                rate: 0.2,
                minimum: 15_000,
            },
        },
        InscriptionType {
            id: "hipoteca",
            display_name: "Hipoteca",
            description: "Garantia hipotecaria sobre un inmueble",
            fee_rule: FeeRule::Proportional {
                rate: 0.1,
                minimum: 10_000,
            },
        },
        InscriptionType {
            id: "prohibicion",
            display_name: "Prohibicion",
            description: "Prohibicion de gravar y enajenar",
            fee_rule: FeeRule::Proportional {
                rate: 0.05,
                minimum: 8_000,
            },
        },
        InscriptionType {
            id: "cancelacion",
            display_name: "Cancelacion Hipoteca",
            description: "Alzamiento de hipoteca",
            fee_rule: FeeRule::Fixed { amount: 12_000 },
        },
        InscriptionType {
            id: "usufructo",
            display_name: "Usufructo",
            description: "Derecho de uso y goce",
            fee_rule: FeeRule::Proportional {
                rate: 0.15,
                minimum: 12_000,
            },
        },
        InscriptionType {
            id: "servidumbre",
            display_name: "Servidumbre",
            description: "Servidumbre de paso u otra",
            fee_rule: FeeRule::Fixed { amount: 15_000 },
        },
        InscriptionType {
            id: "subdivision",
            display_name: "Subdivision",
            description: "Division de un predio",
            fee_rule: FeeRule::Fixed { amount: 25_000 },
        },
        InscriptionType {
            id: "fusion",
            display_name: "Fusion",
            description: "Union de predios",
            fee_rule: FeeRule::Fixed { amount: 25_000 },
        },
    ]
}

fn standard_certificate_fees() -> Vec<CertificateFee> {
    CertificateKind::ordered()
        .into_iter()
        .map(|kind| CertificateFee {
            kind,
            label: kind.label(),
            price: match kind {
                CertificateKind::General => 5_500,
                CertificateKind::InscriptionCopy => 3_500,
                CertificateKind::Validity => 4_500,
                CertificateKind::Dominion => 6_000,
                CertificateKind::Liens => 5_500,
                CertificateKind::Litigation => 4_000,
            },
        })
        .collect()
}

fn office(
    name: &'static str,
    address: &'static str,
    phone: &'static str,
    served_areas: &'static str,
) -> Office {
    Office {
        name,
        address,
        phone,
        served_areas,
    }
}

fn standard_regions() -> Vec<Region> {
    vec![
        Region {
            name: "Metropolitana",
            offices: vec![
                office(
                    "Conservador de Santiago",
                    "Morandé 440, Santiago",
                    "(2) 2387 5000",
                    "Santiago Centro y otras",
                ),
                office(
                    "Conservador de Providencia",
                    "Pedro de Valdivia 100, Providencia",
                    "(2) 2231 1000",
                    "Providencia, Ñuñoa, La Reina",
                ),
                office(
                    "Conservador de Las Condes",
                    "Apoquindo 4501, Las Condes",
                    "(2) 2207 2000",
                    "Las Condes, Vitacura, Lo Barnechea",
                ),
                office(
                    "Conservador de Puente Alto",
                    "Concha y Toro 461, Puente Alto",
                    "(2) 2850 5000",
                    "Puente Alto, La Florida, Pirque",
                ),
                office(
                    "Conservador de San Miguel",
                    "Gran Avenida 5631, San Miguel",
                    "(2) 2522 3000",
                    "San Miguel, La Cisterna, El Bosque",
                ),
                office(
                    "Conservador de Maipu",
                    "Av. Pajaritos 3195, Maipu",
                    "(2) 2531 6000",
                    "Maipu, Cerrillos, Padre Hurtado",
                ),
            ],
        },
        Region {
            name: "Valparaiso",
            offices: vec![
                office(
                    "Conservador de Valparaiso",
                    "Prat 827, Valparaiso",
                    "(32) 225 0000",
                    "Valparaiso, Viña del Mar",
                ),
                office(
                    "Conservador de Viña del Mar",
                    "Arlegui 340, Viña del Mar",
                    "(32) 268 8000",
                    "Viña del Mar, Concón",
                ),
            ],
        },
        Region {
            name: "Biobio",
            offices: vec![office(
                "Conservador de Concepcion",
                "Barros Arana 541, Concepcion",
                "(41) 222 5000",
                "Concepcion, Talcahuano",
            )],
        },
        Region {
            name: "Araucania",
            offices: vec![office(
                "Conservador de Temuco",
                "Claro Solar 865, Temuco",
                "(45) 221 2000",
                "Temuco, Padre Las Casas",
            )],
        },
        Region {
            name: "Los Lagos",
            offices: vec![office(
                "Conservador de Puerto Montt",
                "Urmeneta 509, Puerto Montt",
                "(65) 225 3000",
                "Puerto Montt, Puerto Varas",
            )],
        },
    ]
}

fn standard_checklists() -> Vec<DocumentChecklist> {
    TransactionKind::ordered()
        .into_iter()
        .map(|kind| DocumentChecklist {
            kind,
            label: kind.label(),
            documents: match kind {
                TransactionKind::Purchase => vec![
                    "Escritura publica de compraventa",
                    "Certificado de dominio vigente",
                    "Certificado de hipotecas y gravamenes",
                    "Certificado de numero municipal",
                    "Pago de contribuciones al dia",
                    "Formulario 2890 del SII",
                ],
                TransactionKind::Mortgage => vec![
                    "Escritura publica de hipoteca",
                    "Certificado de dominio vigente",
                    "Tasacion del inmueble",
                    "Certificado de avaluo fiscal",
                ],
                TransactionKind::Inheritance => vec![
                    "Posesion efectiva",
                    "Certificado de defuncion",
                    "Inscripcion de herencia",
                    "Pago de impuesto a la herencia",
                    "Certificados de nacimiento de herederos",
                ],
                TransactionKind::Subdivision => vec![
                    "Plano de subdivision aprobado",
                    "Certificado de informes previos",
                    "Resolucion de la DOM",
                    "Escritura de subdivision",
                ],
            },
        })
        .collect()
}

fn standard_process_steps() -> Vec<ProcessStep> {
    let steps = [
        (
            "Estudio de Titulos",
            "Abogado revisa los ultimos 10 años de inscripciones",
            "3-5 dias",
        ),
        (
            "Promesa de Compraventa",
            "Contrato preliminar ante notario",
            "1 dia",
        ),
        (
            "Escritura Publica",
            "Firma de la escritura definitiva en notaria",
            "1 dia",
        ),
        (
            "Pago de Impuestos",
            "Pago de impuesto de timbres y estampillas",
            "1 dia",
        ),
        (
            "Inscripcion en Conservador",
            "Ingreso de la escritura al Conservador",
            "5-15 dias",
        ),
        (
            "Entrega de Propiedad",
            "Una vez inscrita, la propiedad es tuya",
            "-",
        ),
    ];

    steps
        .into_iter()
        .zip(1u8..)
        .map(|((title, description, duration), step)| ProcessStep {
            step,
            title,
            description,
            duration,
        })
        .collect()
}

fn standard_registry_books() -> Vec<RegistryBook> {
    vec![
        RegistryBook {
            name: "Registro de Propiedad",
            description: "Transferencias de dominio",
            icon: "🏠",
        },
        RegistryBook {
            name: "Registro de Hipotecas",
            description: "Hipotecas y gravamenes",
            icon: "🏦",
        },
        RegistryBook {
            name: "Registro de Prohibiciones",
            description: "Prohibiciones de enajenar",
            icon: "🚫",
        },
        RegistryBook {
            name: "Registro de Comercio",
            description: "Sociedades y comercio",
            icon: "🏢",
        },
    ]
}

fn standard_glossary() -> Vec<GlossaryEntry> {
    [
        ("Foja", "Numero de pagina en el libro del Conservador"),
        ("Numero", "Numero correlativo de la inscripcion"),
        ("Año", "Año en que se realizo la inscripcion"),
        ("Rol", "Identificador del predio para el SII"),
        ("Dominio", "Derecho de propiedad sobre un bien"),
        (
            "Gravamen",
            "Carga que afecta a un inmueble (hipoteca, servidumbre)",
        ),
        (
            "Tradicion",
            "Modo de adquirir el dominio mediante inscripcion",
        ),
        ("Alzamiento", "Cancelacion de una hipoteca o prohibicion"),
    ]
    .into_iter()
    .map(|(term, definition)| GlossaryEntry { term, definition })
    .collect()
}

fn standard_links() -> Vec<ExternalLink> {
    vec![
        ExternalLink {
            name: "Fojas.cl",
            url: "https://www.fojas.cl",
            description: "Portal de tramites online",
        },
        ExternalLink {
            name: "Conservador de Santiago",
            url: "https://www.conservador.cl",
            description: "Sitio oficial",
        },
        ExternalLink {
            name: "SII - Avaluo Fiscal",
            url: "https://www.sii.cl",
            description: "Consulta de avaluo",
        },
        ExternalLink {
            name: "Registro Civil",
            url: "https://www.registrocivil.cl",
            description: "Certificados de nacimiento",
        },
    ]
}
