use super::catalog::RegistryCatalog;
use super::domain::{FeeRule, Pesos};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub category: &'static str,
    pub id: String,
    pub name: &'static str,
    pub rule: &'static str,
    pub rate_pct: Option<f64>,
    pub amount: Pesos,
}

/// Flattens inscription rules and certificate prices into one tariff listing.
pub fn tariff_schedule(catalog: &RegistryCatalog) -> Vec<ScheduleRow> {
    let inscriptions = catalog.inscription_types().iter().map(|kind| {
        let (rule, rate_pct, amount) = match kind.fee_rule {
            FeeRule::Fixed { amount } => ("fixed", None, amount),
            FeeRule::Proportional { rate, minimum } => ("proportional", Some(rate), minimum),
        };
        ScheduleRow {
            category: "inscription",
            id: kind.id.to_string(),
            name: kind.display_name,
            rule,
            rate_pct,
            amount,
        }
    });

    let certificates = catalog.certificate_fees().iter().map(|fee| ScheduleRow {
        category: "certificate",
        id: serde_json::to_value(fee.kind)
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default(),
        name: fee.label,
        rule: "fixed",
        rate_pct: None,
        amount: fee.price,
    });

    inscriptions.chain(certificates).collect()
}

pub fn write_schedule_csv<W: Write>(catalog: &RegistryCatalog, writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in tariff_schedule(catalog) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_lists_every_tariff() {
        let rows = tariff_schedule(RegistryCatalog::standard());
        assert_eq!(rows.len(), 14);
        let litigation = rows
            .iter()
            .find(|row| row.id == "litigation")
            .expect("litigation certificate listed");
        assert_eq!(litigation.amount, 4_000);
    }

    #[test]
    fn csv_export_has_header_and_rows() {
        let mut buffer = Vec::new();
        write_schedule_csv(RegistryCatalog::standard(), &mut buffer).expect("csv writes");
        let text = String::from_utf8(buffer).expect("utf8 csv");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("category,id,name,rule,rate_pct,amount")
        );
        assert!(text.contains("inscription,dominio,Inscripcion de Dominio,proportional,0.2,15000"));
        assert!(text.contains("inscription,cancelacion,Cancelacion Hipoteca,fixed,,12000"));
    }
}
