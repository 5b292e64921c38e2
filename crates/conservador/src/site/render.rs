use super::html::escape;
use super::metadata::{PageMetadata, PAGE_METADATA};
use super::state::{format_plain_number, PageState};
use super::view::View;
use crate::config::SiteConfig;
use crate::registry::domain::{DocumentChecklist, Office};
use crate::registry::format::{format_clp, format_clp_value, format_percent};
use crate::registry::{compare_purchase_costs, CostEstimate, FeeCalculator, RegistryCatalog};
use chrono::Datelike;

pub const STYLESHEET_PATH: &str = "/static/styles.css";
pub const STYLESHEET: &str = include_str!("styles.css");

/// Server-side renderer for the single CBR page.
#[derive(Debug, Clone)]
pub struct PageRenderer<'a> {
    catalog: &'a RegistryCatalog,
    site: SiteConfig,
}

impl<'a> PageRenderer<'a> {
    pub fn new(catalog: &'a RegistryCatalog, site: SiteConfig) -> Self {
        Self { catalog, site }
    }

    pub fn render(&self, state: &PageState) -> String {
        let mut page = String::with_capacity(16 * 1024);
        page.push_str("<!DOCTYPE html>\n");
        page.push_str(&format!("<html lang=\"{}\">\n", PAGE_METADATA.lang));
        page.push_str(&head(&PAGE_METADATA));
        page.push_str("<body>\n");
        page.push_str(&header());
        page.push_str(&self.nav(state));
        page.push_str(&format!(
            "<main class=\"content\" data-view=\"{}\">\n",
            state.view.slug()
        ));
        let panel = match state.view {
            View::Calculator => self.calculator_panel(state),
            View::Offices => self.offices_panel(state),
            View::Documents => self.documents_panel(),
            View::Guide => self.guide_panel(),
        };
        page.push_str(&panel);
        page.push_str("</main>\n");
        page.push_str(&self.footer());
        page.push_str("</body>\n</html>\n");
        page
    }

    fn nav(&self, state: &PageState) -> String {
        let mut nav = String::from("<nav class=\"tabs\">\n");
        for view in View::all() {
            let class = if view == state.view { "tab active" } else { "tab" };
            nav.push_str(&format!(
                "  <a class=\"{class}\" href=\"{}\"><span>{}</span> <span class=\"tab-label\">{}</span></a>\n",
                escape(&state.with_view(view).href()),
                view.icon(),
                view.label()
            ));
        }
        nav.push_str("</nav>\n");
        nav
    }

    fn calculator_panel(&self, state: &PageState) -> String {
        let calculator = FeeCalculator::new(self.catalog);
        let estimate = calculator.estimate(&state.estimate_request());
        let selected = self.catalog.inscription_type(&state.inscription_type);

        let mut panel = String::from("<section class=\"card\">\n<h3>🧮 Calculadora de Aranceles</h3>\n");
        panel.push_str("<div class=\"grid two\">\n");

        panel.push_str("<form class=\"inputs\" method=\"get\" action=\"/\">\n");
        panel.push_str(&format!(
            "<input type=\"hidden\" name=\"vista\" value=\"{}\">\n<input type=\"hidden\" name=\"region\" value=\"{}\">\n<input type=\"hidden\" name=\"enviado\" value=\"1\">\n",
            View::Calculator.slug(),
            escape(&state.region)
        ));

        panel.push_str("<label for=\"tipo\">Tipo de Inscripcion</label>\n");
        panel.push_str("<select id=\"tipo\" name=\"tipo\" onchange=\"this.form.submit()\">\n");
        for kind in self.catalog.inscription_types() {
            let selected_attr = if kind.id == state.inscription_type {
                " selected"
            } else {
                ""
            };
            panel.push_str(&format!(
                "  <option value=\"{}\"{selected_attr}>{}</option>\n",
                kind.id,
                escape(kind.display_name)
            ));
        }
        panel.push_str("</select>\n");
        if let Some(kind) = selected {
            panel.push_str(&format!(
                "<p class=\"hint\">{}</p>\n<p class=\"hint rule\">{}</p>\n",
                escape(kind.description),
                escape(&kind.fee_rule.label())
            ));
        }

        panel.push_str(&format!(
            "<label for=\"valor\">Valor de la Propiedad (CLP)</label>\n<input id=\"valor\" type=\"number\" min=\"0\" name=\"valor\" value=\"{}\" onchange=\"this.form.submit()\">\n<p class=\"hint\">{}</p>\n",
            format_plain_number(state.property_value),
            format_clp_value(state.property_value)
        ));

        let checked = if state.include_certificates { " checked" } else { "" };
        panel.push_str(&format!(
            "<div class=\"check\"><input id=\"certificados\" type=\"checkbox\" name=\"certificados\" value=\"true\"{checked} onchange=\"this.form.submit()\"><label for=\"certificados\">Incluir certificados necesarios</label></div>\n"
        ));
        panel.push_str("<noscript><button type=\"submit\">Calcular</button></noscript>\n");
        panel.push_str("</form>\n");

        panel.push_str(&estimate_box(&estimate, state.include_certificates));
        panel.push_str("</div>\n</section>\n");

        panel.push_str(&self.certificate_table());
        panel.push_str(&purchase_comparison(&estimate, state.property_value));
        panel
    }

    fn certificate_table(&self) -> String {
        let mut table = String::new();
        table.push_str(&format!(
            "<section class=\"card\">\n<h3>📜 Aranceles de Certificados ({})</h3>\n<div class=\"grid three\">\n",
            self.catalog.tariff_effective_from().year()
        ));
        for fee in self.catalog.certificate_fees() {
            table.push_str(&format!(
                "  <div class=\"row\"><span>{}</span><span class=\"amount\">{}</span></div>\n",
                escape(fee.label),
                format_clp(fee.price)
            ));
        }
        table.push_str("</div>\n</section>\n");
        table
    }

    fn offices_panel(&self, state: &PageState) -> String {
        let mut panel =
            String::from("<section class=\"card\">\n<h3>🏛️ Buscar Conservador</h3>\n<div class=\"regions\">\n");
        for region in self.catalog.regions() {
            let class = if region.name == state.region {
                "region active"
            } else {
                "region"
            };
            panel.push_str(&format!(
                "  <a class=\"{class}\" href=\"{}\">{}</a>\n",
                escape(&state.with_region(region.name).href()),
                escape(region.name)
            ));
        }
        panel.push_str("</div>\n</section>\n");

        let offices = self.catalog.offices_in(&state.region).unwrap_or(&[]);
        panel.push_str("<div class=\"offices\">\n");
        for office in offices {
            panel.push_str(&office_card(office));
        }
        panel.push_str("</div>\n");

        panel.push_str(
            "<aside class=\"notice\">\n<h4>⚠️ Importante</h4>\n<ul>\n\
             <li>Las inscripciones deben hacerse en el Conservador donde esta ubicado el inmueble</li>\n\
             <li>Horario general: Lunes a Viernes 9:00 a 14:00</li>\n\
             <li>Muchos tramites se pueden iniciar online en fojas.cl</li>\n\
             </ul>\n</aside>\n",
        );
        panel
    }

    fn documents_panel(&self) -> String {
        self.catalog
            .checklists()
            .iter()
            .map(checklist_card)
            .collect()
    }

    fn guide_panel(&self) -> String {
        let mut panel =
            String::from("<section class=\"card\">\n<h3>📋 Proceso de Compra de Propiedad</h3>\n<ol class=\"steps\">\n");
        for step in self.catalog.process_steps() {
            panel.push_str(&format!(
                "  <li><span class=\"badge\">{}</span><div><h4>{}</h4><p>{}</p></div><span class=\"duration\">{}</span></li>\n",
                step.step,
                escape(step.title),
                escape(step.description),
                escape(step.duration)
            ));
        }
        panel.push_str("</ol>\n</section>\n");

        panel.push_str("<section class=\"card\">\n<h3>📚 Libros del Conservador</h3>\n<div class=\"grid four\">\n");
        for book in self.catalog.registry_books() {
            panel.push_str(&format!(
                "  <div class=\"book\"><span class=\"icon\">{}</span><h4>{}</h4><p>{}</p></div>\n",
                book.icon,
                escape(book.name),
                escape(book.description)
            ));
        }
        panel.push_str("</div>\n</section>\n");

        panel.push_str("<section class=\"card\">\n<h3>📖 Glosario</h3>\n<dl class=\"grid two\">\n");
        for entry in self.catalog.glossary() {
            panel.push_str(&format!(
                "  <div><dt>{}</dt><dd>{}</dd></div>\n",
                escape(entry.term),
                escape(entry.definition)
            ));
        }
        panel.push_str("</dl>\n</section>\n");

        panel.push_str("<section class=\"card links\">\n<h3>🔗 Recursos Online</h3>\n<div class=\"grid two\">\n");
        for link in self.catalog.links() {
            panel.push_str(&format!(
                "  <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"><h4>{}</h4><p>{}</p></a>\n",
                escape(link.url),
                escape(link.name),
                escape(link.description)
            ));
        }
        panel.push_str("</div>\n</section>\n");
        panel
    }

    fn footer(&self) -> String {
        format!(
            "<footer>\n<p>Conservador de Bienes Raices - Modulo de <a href=\"{}\">NewCooltura Informada</a></p>\n<p class=\"fine\">Portal educativo. Para tramites oficiales consulte en fojas.cl</p>\n</footer>\n",
            escape(&self.site.portal_url)
        )
    }
}

fn head(meta: &PageMetadata) -> String {
    format!(
        "<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{title}</title>\n<meta name=\"description\" content=\"{description}\">\n<meta name=\"keywords\" content=\"{keywords}\">\n<meta property=\"og:title\" content=\"{og_title}\">\n<meta property=\"og:description\" content=\"{og_description}\">\n<meta property=\"og:type\" content=\"{og_type}\">\n<link rel=\"stylesheet\" href=\"{STYLESHEET_PATH}\">\n</head>\n",
        title = escape(meta.title),
        description = escape(meta.description),
        keywords = escape(&meta.keywords.join(", ")),
        og_title = escape(meta.og_title),
        og_description = escape(meta.og_description),
        og_type = meta.og_type,
    )
}

fn header() -> String {
    String::from(
        "<header class=\"hero\">\n<span class=\"emblem\">🏛️</span>\n\
         <h1>Conservador de <span class=\"accent\">Bienes Raices</span></h1>\n\
         <p>Calculadora de aranceles, documentos y guia para inscripciones</p>\n\
         <div class=\"pills\"><span>🧮 Calculadora Aranceles</span><span>🏛️ Buscador Oficinas</span><span>📋 Documentos</span></div>\n\
         </header>\n",
    )
}

fn estimate_box(estimate: &CostEstimate, include_certificates: bool) -> String {
    let mut result = String::from("<div class=\"estimate\">\n<h4>Costo Estimado</h4>\n");
    result.push_str(&format!(
        "<div class=\"row\"><span>Inscripcion</span><span class=\"amount\" id=\"inscripcion\">{}</span></div>\n",
        format_clp(estimate.inscription_fee)
    ));
    if include_certificates {
        result.push_str(&format!(
            "<div class=\"row\"><span>Certificados</span><span class=\"amount\" id=\"certificados-total\">{}</span></div>\n",
            format_clp(estimate.certificates_fee)
        ));
    }
    result.push_str(&format!(
        "<div class=\"row total\"><span>Total Estimado</span><span class=\"amount\" id=\"total\">{}</span></div>\n",
        format_clp(estimate.total)
    ));
    result.push_str("<p class=\"fine\">* Valores aproximados. Consulte directamente en el Conservador para valores exactos.</p>\n</div>\n");
    result
}

fn purchase_comparison(estimate: &CostEstimate, property_value: f64) -> String {
    let mut section = String::new();
    section.push_str(&format!(
        "<section class=\"card comparison\">\n<h3>🏠 Costos Totales Compra Propiedad</h3>\n<p>Para una propiedad de {}:</p>\n<div class=\"grid four\">\n",
        format_clp_value(property_value)
    ));
    for line in compare_purchase_costs(estimate.total, property_value) {
        let share = line
            .share_pct
            .map(format_percent)
            .unwrap_or_else(|| "–".to_string());
        section.push_str(&format!(
            "  <div class=\"cost\"><p>{}</p><p class=\"amount\">{}</p><p class=\"share\">{share}</p></div>\n",
            escape(line.label),
            format_clp(line.amount)
        ));
    }
    section.push_str("</div>\n</section>\n");
    section
}

fn office_card(office: &Office) -> String {
    format!(
        "<article class=\"office\">\n<h4>{}</h4>\n<div class=\"grid three\"><span>📍 {}</span><span>📞 {}</span><span>🏘️ {}</span></div>\n</article>\n",
        escape(office.name),
        escape(office.address),
        escape(office.phone),
        escape(office.served_areas)
    )
}

fn checklist_card(checklist: &DocumentChecklist) -> String {
    let mut card = String::new();
    card.push_str(&format!(
        "<section class=\"card\" id=\"{}\">\n<h3>{} {}</h3>\n<ul class=\"checklist grid two\">\n",
        checklist.kind.slug(),
        checklist.kind.icon(),
        escape(checklist.label)
    ));
    for document in &checklist.documents {
        card.push_str(&format!("  <li>✓ {}</li>\n", escape(document)));
    }
    card.push_str("</ul>\n</section>\n");
    card
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(state: &PageState) -> String {
        PageRenderer::new(RegistryCatalog::standard(), SiteConfig::default()).render(state)
    }

    #[test]
    fn default_page_shows_calculator_estimate() {
        let page = render(&PageState::default());
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<html lang=\"es\">"));
        assert!(page.contains("data-view=\"calculadora\""));
        assert!(page.contains("id=\"inscripcion\">$200.000<"));
        assert!(page.contains("id=\"certificados-total\">$21.500<"));
        assert!(page.contains("id=\"total\">$221.500<"));
        assert!(page.contains("Aranceles de Certificados (2024)"));
    }

    #[test]
    fn certificates_row_hidden_when_excluded() {
        let state = PageState {
            include_certificates: false,
            ..PageState::default()
        };
        let page = render(&state);
        assert!(!page.contains("id=\"certificados-total\""));
        assert!(page.contains("id=\"total\">$200.000<"));
    }

    #[test]
    fn every_view_renders_a_closed_document() {
        for view in View::all() {
            let page = render(&PageState::default().with_view(view));
            assert!(page.starts_with("<!DOCTYPE html>\n<html lang=\"es\">\n<head>"));
            assert!(page.ends_with("</footer>\n</body>\n</html>\n"), "{}", view.slug());
            let main = format!("<main class=\"content\" data-view=\"{}\">\n", view.slug());
            assert!(page.contains(&main));
        }
    }

    #[test]
    fn capped_property_value_renders_whole_pesos() {
        let state = PageState {
            property_value: crate::registry::MAX_PROPERTY_VALUE,
            ..PageState::default()
        };
        let page = render(&state);
        assert!(page.contains("id=\"inscripcion\">$2.000.000.000.000<"));
        assert!(page.contains("id=\"total\">$2.000.000.021.500<"));
    }

    #[test]
    fn zero_value_comparison_omits_shares() {
        let state = PageState {
            property_value: 0.0,
            ..PageState::default()
        };
        let page = render(&state);
        assert!(page.contains("<p class=\"share\">–</p>"));
    }
}
