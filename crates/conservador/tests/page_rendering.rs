use conservador::config::SiteConfig;
use conservador::registry::RegistryCatalog;
use conservador::site::{PageQuery, PageRenderer, PageState, View};

fn render(query: PageQuery) -> String {
    let state = PageState::from_query(&query);
    PageRenderer::new(RegistryCatalog::standard(), SiteConfig::default()).render(&state)
}

fn query(pairs: &[(&str, &str)]) -> PageQuery {
    let mut query = PageQuery::default();
    for (key, value) in pairs {
        let value = Some(value.to_string());
        match *key {
            "vista" => query.vista = value,
            "tipo" => query.tipo = value,
            "valor" => query.valor = value,
            "certificados" => query.certificados = value,
            "region" => query.region = value,
            "enviado" => query.enviado = value,
            other => panic!("unexpected key {other}"),
        }
    }
    query
}

#[test]
fn head_carries_discovery_metadata() {
    let page = render(PageQuery::default());
    assert!(page.contains("<title>Conservador Bienes Raices Chile | NewCooltura Informada</title>"));
    assert!(page.contains("name=\"keywords\" content=\"conservador bienes raices, aranceles CBR, inscripcion propiedad, certificado dominio\""));
    assert!(page.contains("property=\"og:type\" content=\"website\""));
    assert!(page.contains("href=\"/static/styles.css\""));
}

#[test]
fn nav_marks_the_active_view() {
    let page = render(query(&[("vista", "documentos")]));
    assert!(page.contains("data-view=\"documentos\""));
    assert!(page.contains("class=\"tab active\" href=\"/?vista=documentos&amp;"));
    for view in View::all() {
        assert!(page.contains(&format!("vista={}", view.slug())));
    }
}

#[test]
fn cancellation_without_certificates_totals_12000() {
    let page = render(query(&[
        ("tipo", "cancelacion"),
        ("valor", "987654321"),
        ("enviado", "1"),
    ]));
    assert!(page.contains("id=\"total\">$12.000<"));
    assert!(page.contains("<option value=\"cancelacion\" selected>"));
    assert!(page.contains("Alzamiento de hipoteca"));
}

#[test]
fn malformed_value_renders_zero_property() {
    let page = render(query(&[("valor", "doce millones")]));
    assert!(page.contains("Para una propiedad de $0:"));
    assert!(page.contains("id=\"inscripcion\">$15.000<"));
}

#[test]
fn unknown_type_renders_zero_estimate() {
    let page = render(query(&[("tipo", "<script>")]));
    assert!(page.contains("id=\"total\">$0<"));
    assert!(!page.contains("<script>"));
}

#[test]
fn offices_view_lists_selected_region() {
    let page = render(query(&[("vista", "conservadores"), ("region", "Biobio")]));
    assert!(page.contains("Conservador de Concepcion"));
    assert!(!page.contains("Conservador de Santiago"));
    assert!(page.contains("class=\"region active\""));
}

#[test]
fn offices_view_for_unknown_region_is_empty() {
    let page = render(query(&[("vista", "conservadores"), ("region", "Magallanes")]));
    assert!(page.contains("<div class=\"offices\">\n</div>"));
    assert!(!page.contains("class=\"region active\""));
}

#[test]
fn guide_view_shows_steps_glossary_and_links() {
    let page = render(query(&[("vista", "guia")]));
    assert!(page.contains("Inscripcion en Conservador"));
    assert!(page.contains("<dt>Tradicion</dt>"));
    assert!(page.contains("href=\"https://www.fojas.cl\" target=\"_blank\" rel=\"noopener noreferrer\""));
    assert!(page.contains("Registro de Comercio"));
}
