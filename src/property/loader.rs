//! Load saved portfolio properties from CSV

use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

use super::{PropertyFacts, SavedProperty};
use crate::error::Result;
use crate::units::Fraction;

/// Default location of the saved portfolio
pub const DEFAULT_PORTFOLIO_PATH: &str = "data/portfolio.csv";

/// Raw CSV row matching portfolio.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "HomeValue")]
    home_value: f64,
    #[serde(rename = "Beds")]
    beds: Option<u8>,
    #[serde(rename = "Baths")]
    baths: Option<f32>,
    #[serde(rename = "Sqft")]
    sqft: Option<u32>,
    #[serde(rename = "TaxAnnual")]
    tax_annual: f64,
    #[serde(rename = "HoaMonthly")]
    hoa_monthly: f64,
    #[serde(rename = "InsuranceAnnual")]
    insurance_annual: f64,
    #[serde(rename = "RentEstimate")]
    rent_estimate: f64,
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
    #[serde(rename = "DownPaymentPercent")]
    down_payment_percent: f64,
    #[serde(rename = "VacancyRate")]
    vacancy_rate: f64,
    #[serde(rename = "MaintenanceRate")]
    maintenance_rate: f64,
    #[serde(rename = "ManagementRate")]
    management_rate: f64,
    #[serde(rename = "Notes")]
    notes: Option<String>,
    #[serde(rename = "AddedOn")]
    added_on: Option<NaiveDate>,
}

impl CsvRow {
    fn into_saved_property(self) -> SavedProperty {
        SavedProperty {
            facts: PropertyFacts {
                address: self.address,
                home_value: self.home_value,
                tax_annual: self.tax_annual,
                hoa_monthly: self.hoa_monthly,
                insurance_annual: self.insurance_annual,
                rent_estimate: self.rent_estimate,
                beds: self.beds,
                baths: self.baths,
                sqft: self.sqft,
            },
            interest_rate: Fraction::new(self.interest_rate),
            down_payment_percent: Fraction::new(self.down_payment_percent),
            vacancy_rate: Fraction::new(self.vacancy_rate),
            maintenance_rate: Fraction::new(self.maintenance_rate),
            management_rate: Fraction::new(self.management_rate),
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            added_on: self.added_on,
        }
    }
}

/// Load all saved properties from a CSV file
pub fn load_portfolio<P: AsRef<Path>>(path: P) -> Result<Vec<SavedProperty>> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load saved properties from any reader (e.g., string buffer, request body)
pub fn load_portfolio_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<SavedProperty>> {
    collect_rows(Reader::from_reader(reader))
}

/// Load the portfolio from the default data/portfolio.csv location
pub fn load_default_portfolio() -> Result<Vec<SavedProperty>> {
    load_portfolio(DEFAULT_PORTFOLIO_PATH)
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<SavedProperty>> {
    let mut properties = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        properties.push(row.into_saved_property());
    }
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_portfolio() {
        let properties = load_default_portfolio().expect("Failed to load portfolio");
        assert_eq!(properties.len(), 3);

        let first = &properties[0];
        assert!(first.facts.address.starts_with("123 Main St"));
        assert_eq!(first.facts.home_value, 512_000.0);
        assert_eq!(first.facts.beds, Some(3));
        assert_eq!(first.added_on, NaiveDate::from_ymd_opt(2024, 3, 15));

        // Blank optional columns
        assert!(properties[1].notes.is_none());
        assert!(properties[2].added_on.is_none());
        assert_eq!(properties[2].down_payment_percent, Fraction::new(0.10));
    }

    #[test]
    fn test_load_from_reader() {
        let data = "Address,HomeValue,Beds,Baths,Sqft,TaxAnnual,HoaMonthly,InsuranceAnnual,RentEstimate,InterestRate,DownPaymentPercent,VacancyRate,MaintenanceRate,ManagementRate,Notes,AddedOn\n\
                    9 Pine Ct,250000,,,,3000,0,900,1900,0.06,0.2,0.05,0.05,0.08,,\n";
        let properties = load_portfolio_from_reader(data.as_bytes()).unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].facts.address, "9 Pine Ct");
        assert!(properties[0].facts.sqft.is_none());
        assert_eq!(properties[0].interest_rate, Fraction::new(0.06));
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let data = "Address,HomeValue,Beds,Baths,Sqft,TaxAnnual,HoaMonthly,InsuranceAnnual,RentEstimate,InterestRate,DownPaymentPercent,VacancyRate,MaintenanceRate,ManagementRate,Notes,AddedOn\n\
                    9 Pine Ct,lots,,,,3000,0,900,1900,0.06,0.2,0.05,0.05,0.08,,\n";
        assert!(load_portfolio_from_reader(data.as_bytes()).is_err());
    }
}
