//! Property facts, rent comparables and saved portfolio records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::finance::FinanceInputs;
use crate::units::{Fraction, Money};

/// Valuation and carrying costs for a property, as supplied by a data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFacts {
    pub address: String,

    /// Automated valuation (AVM) or purchase price
    pub home_value: Money,
    pub tax_annual: Money,
    #[serde(default)]
    pub hoa_monthly: Money,
    pub insurance_annual: Money,

    /// Provider's monthly rent estimate
    pub rent_estimate: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beds: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baths: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqft: Option<u32>,
}

/// A nearby rental used to estimate market rent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentComp {
    pub id: String,
    pub address: String,
    /// Monthly rent
    pub rent: Money,
    #[serde(default)]
    pub beds: Option<u8>,
    #[serde(default)]
    pub baths: Option<f32>,
    #[serde(default)]
    pub sqft: Option<u32>,
    /// Distance from the subject property
    #[serde(default)]
    pub distance_miles: Option<f64>,
}

/// Average rent of the selected comparables, or None if none are selected
pub fn average_comp_rent(comps: &[RentComp], selected_ids: &[String]) -> Option<Money> {
    let selected: Vec<Money> = comps
        .iter()
        .filter(|comp| selected_ids.contains(&comp.id))
        .map(|comp| comp.rent)
        .collect();

    if selected.is_empty() {
        return None;
    }
    Some(selected.iter().sum::<Money>() / selected.len() as f64)
}

/// Where the rent used in an analysis came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentSource {
    /// Entered by the user
    Custom,
    /// Average of selected comparables
    Comparables,
    /// Provider estimate
    Estimate,
}

/// Pick the rent to analyze: custom rent, else comparables average, else the estimate
pub fn select_rent(
    facts: &PropertyFacts,
    custom_rent: Option<Money>,
    comps: &[RentComp],
    selected_comp_ids: &[String],
) -> (Money, RentSource) {
    if let Some(rent) = custom_rent.filter(|r| *r > 0.0) {
        return (rent, RentSource::Custom);
    }
    if let Some(rent) = average_comp_rent(comps, selected_comp_ids) {
        return (rent, RentSource::Comparables);
    }
    (facts.rent_estimate, RentSource::Estimate)
}

/// A property saved to a portfolio along with the terms it was analyzed under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProperty {
    pub facts: PropertyFacts,
    pub interest_rate: Fraction,
    pub down_payment_percent: Fraction,
    pub vacancy_rate: Fraction,
    pub maintenance_rate: Fraction,
    pub management_rate: Fraction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_on: Option<NaiveDate>,
}

impl SavedProperty {
    /// Calculator inputs using this property's own rates; loan term,
    /// closing costs and PMI come from `base`
    pub fn finance_inputs(&self, base: &Assumptions) -> FinanceInputs {
        FinanceInputs {
            interest_rate: self.interest_rate,
            down_payment_percent: self.down_payment_percent,
            vacancy_rate: self.vacancy_rate,
            maintenance_rate: self.maintenance_rate,
            management_rate: self.management_rate,
            ..base.finance_inputs(&self.facts, self.facts.rent_estimate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn comp(id: &str, rent: Money) -> RentComp {
        RentComp {
            id: id.to_string(),
            address: format!("{} Comp Rd", id),
            rent,
            beds: Some(3),
            baths: Some(2.0),
            sqft: Some(1_600),
            distance_miles: Some(0.4),
        }
    }

    fn facts() -> PropertyFacts {
        PropertyFacts {
            address: "1 Test Way".to_string(),
            home_value: 400_000.0,
            tax_annual: 6_000.0,
            hoa_monthly: 0.0,
            insurance_annual: 1_500.0,
            rent_estimate: 2_500.0,
            beds: Some(3),
            baths: Some(2.0),
            sqft: Some(1_650),
        }
    }

    #[test]
    fn test_average_of_selected_comps() {
        let comps = vec![comp("a", 2_400.0), comp("b", 2_600.0), comp("c", 3_500.0)];
        let selected = vec!["a".to_string(), "b".to_string()];
        assert_relative_eq!(average_comp_rent(&comps, &selected).unwrap(), 2_500.0);
        assert!(average_comp_rent(&comps, &[]).is_none());
        assert!(average_comp_rent(&comps, &["zzz".to_string()]).is_none());
    }

    #[test]
    fn test_rent_selection_priority() {
        let comps = vec![comp("a", 2_700.0)];
        let selected = vec!["a".to_string()];

        assert_eq!(select_rent(&facts(), Some(2_900.0), &comps, &selected), (2_900.0, RentSource::Custom));
        assert_eq!(select_rent(&facts(), None, &comps, &selected), (2_700.0, RentSource::Comparables));
        assert_eq!(select_rent(&facts(), None, &comps, &[]), (2_500.0, RentSource::Estimate));
        // A zero custom rent counts as not entered
        assert_eq!(select_rent(&facts(), Some(0.0), &[], &[]), (2_500.0, RentSource::Estimate));
    }

    #[test]
    fn test_saved_property_uses_own_rates() {
        let saved = SavedProperty {
            facts: facts(),
            interest_rate: Fraction::new(0.07),
            down_payment_percent: Fraction::new(0.25),
            vacancy_rate: Fraction::new(0.04),
            maintenance_rate: Fraction::new(0.05),
            management_rate: Fraction::ZERO,
            notes: None,
            added_on: None,
        };
        let inputs = saved.finance_inputs(&Assumptions::default_underwriting());
        assert_eq!(inputs.interest_rate, Fraction::new(0.07));
        assert_eq!(inputs.down_payment_percent, Fraction::new(0.25));
        assert_eq!(inputs.management_rate, Fraction::ZERO);
        assert_eq!(inputs.loan_term_years, 30);
        assert_eq!(inputs.rent_estimate, 2_500.0);
    }
}
