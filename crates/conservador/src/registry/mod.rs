//! Registry tariff tables, fee arithmetic and reference data for the CBR page.

mod calculator;
mod catalog;
mod comparator;
pub mod domain;
pub mod format;
mod schedule;

pub use calculator::{
    CostEstimate, EstimateError, EstimateRequest, FeeCalculator, MAX_PROPERTY_VALUE,
};
pub use catalog::{
    RegistryCatalog, DEFAULT_INSCRIPTION_TYPE, DEFAULT_PROPERTY_VALUE, DEFAULT_REGION,
};
pub use comparator::{compare_purchase_costs, PurchaseCostConcept, PurchaseCostLine};
pub use schedule::{tariff_schedule, write_schedule_csv, ScheduleRow};
