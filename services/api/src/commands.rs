use clap::{Args, ValueEnum};
use conservador::error::AppError;
use conservador::registry::domain::TransactionKind;
use conservador::registry::format::{format_clp, format_clp_value, format_percent};
use conservador::registry::{
    compare_purchase_costs, write_schedule_csv, EstimateRequest, FeeCalculator, RegistryCatalog,
    DEFAULT_INSCRIPTION_TYPE, DEFAULT_PROPERTY_VALUE, MAX_PROPERTY_VALUE,
};
use std::io::Write;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Inscription type identifier (dominio, hipoteca, cancelacion, ...)
    #[arg(long, default_value = DEFAULT_INSCRIPTION_TYPE)]
    pub(crate) tipo: String,
    /// Property value in CLP
    #[arg(long, default_value_t = DEFAULT_PROPERTY_VALUE, value_parser = parse_property_value)]
    pub(crate) valor: f64,
    /// Leave the standard certificates out of the estimate
    #[arg(long)]
    pub(crate) sin_certificados: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum ScheduleFormat {
    Table,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct ScheduleArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ScheduleFormat::Table)]
    pub(crate) format: ScheduleFormat,
}

#[derive(Args, Debug)]
pub(crate) struct OfficesArgs {
    /// Region name as listed on the page (e.g. "Los Lagos")
    #[arg(long)]
    pub(crate) region: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DocumentsArgs {
    /// Transaction kind: compraventa, hipoteca, herencia or subdivision
    #[arg(long, value_parser = parse_transaction_kind)]
    pub(crate) kind: Option<TransactionKind>,
}

fn parse_property_value(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as a property value ({err})"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("property value must be a non-negative number, got '{raw}'"));
    }
    if value > MAX_PROPERTY_VALUE {
        return Err(format!(
            "property value '{raw}' exceeds the supported maximum of {MAX_PROPERTY_VALUE}"
        ));
    }
    Ok(value)
}

fn parse_transaction_kind(raw: &str) -> Result<TransactionKind, String> {
    TransactionKind::from_slug(raw).ok_or_else(|| {
        let known: Vec<_> = TransactionKind::ordered()
            .into_iter()
            .map(TransactionKind::slug)
            .collect();
        format!("unknown transaction kind '{raw}' (expected one of {})", known.join(", "))
    })
}

pub(crate) fn run_estimate<W: Write>(args: EstimateArgs, out: &mut W) -> Result<(), AppError> {
    let catalog = RegistryCatalog::standard();
    let request = EstimateRequest {
        inscription_type: args.tipo,
        property_value: args.valor,
        include_certificates: !args.sin_certificados,
    };
    let estimate = FeeCalculator::new(catalog).try_estimate(&request)?;
    let kind = catalog
        .inscription_type(&request.inscription_type)
        .map(|kind| kind.display_name)
        .unwrap_or_default();

    writeln!(
        out,
        "{kind} | propiedad {}",
        format_clp_value(request.property_value)
    )?;
    writeln!(out, "- Inscripcion:    {:>14}", format_clp(estimate.inscription_fee))?;
    if request.include_certificates {
        writeln!(out, "- Certificados:   {:>14}", format_clp(estimate.certificates_fee))?;
    }
    writeln!(out, "- Total estimado: {:>14}", format_clp(estimate.total))?;

    writeln!(out, "\nCostos totales de compra")?;
    for line in compare_purchase_costs(estimate.total, request.property_value) {
        let share = line
            .share_pct
            .map(format_percent)
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "- {:<20} {:>14} ({share})",
            line.label,
            format_clp(line.amount)
        )?;
    }
    Ok(())
}

pub(crate) fn run_schedule<W: Write>(args: ScheduleArgs, out: &mut W) -> Result<(), AppError> {
    let catalog = RegistryCatalog::standard();
    match args.format {
        ScheduleFormat::Csv => write_schedule_csv(catalog, out)?,
        ScheduleFormat::Table => {
            writeln!(out, "Inscripciones")?;
            for kind in catalog.inscription_types() {
                writeln!(
                    out,
                    "- {:<12} {:<24} {}",
                    kind.id,
                    kind.display_name,
                    kind.fee_rule.label()
                )?;
            }
            writeln!(
                out,
                "\nCertificados ({})",
                catalog.tariff_effective_from().format("%Y")
            )?;
            for fee in catalog.certificate_fees() {
                writeln!(out, "- {:<40} {:>8}", fee.label, format_clp(fee.price))?;
            }
        }
    }
    Ok(())
}

pub(crate) fn run_offices<W: Write>(args: OfficesArgs, out: &mut W) -> Result<(), AppError> {
    let catalog = RegistryCatalog::standard();
    let regions = catalog
        .regions()
        .iter()
        .filter(|region| args.region.as_deref().map_or(true, |name| region.name == name));

    let mut listed = 0;
    for region in regions {
        writeln!(out, "{}", region.name)?;
        for office in &region.offices {
            writeln!(
                out,
                "- {} | {} | {} | {}",
                office.name, office.address, office.phone, office.served_areas
            )?;
        }
        listed += 1;
    }
    if listed == 0 {
        if let Some(region) = args.region {
            writeln!(out, "Sin oficinas registradas para la region '{region}'")?;
        }
    }
    Ok(())
}

pub(crate) fn run_documents<W: Write>(args: DocumentsArgs, out: &mut W) -> Result<(), AppError> {
    let catalog = RegistryCatalog::standard();
    for checklist in catalog
        .checklists()
        .iter()
        .filter(|list| args.kind.map_or(true, |kind| list.kind == kind))
    {
        writeln!(out, "{}", checklist.label)?;
        for document in &checklist.documents {
            writeln!(out, "  [ ] {document}")?;
        }
    }
    Ok(())
}
