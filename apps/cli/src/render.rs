//! Plain-text rendering for the terminal.

use fitclass::deriver::{FeatureRecord, FeatureScheme};
use fitclass::domain::frame::FeatureRow;
use fitclass::domain::response::PredictionResponse;
use std::fmt::Write;

/// `young_adult` -> `Young Adult`
pub(crate) fn title(label: &str) -> String {
    label
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn advice(label: &str) -> &'static str {
    match label {
        "High" => "High fitness level: great job! Keep maintaining your healthy lifestyle.",
        "Medium" => "Medium fitness level: you're doing well! Consider increasing physical activity.",
        _ => "Low fitness level: consider consulting a fitness professional to improve your health.",
    }
}

pub(crate) fn prediction(record: &FeatureRecord, response: &PredictionResponse) -> String {
    let label = &response.predicted_membership_category;
    let (category, value) = record.category();

    let mut out = String::new();
    let _ = writeln!(out, "Predicted category: {label}");
    let _ = writeln!(out, "Age group:          {}", title(record.age_group()));
    let _ = writeln!(out, "{:<20}{}", format!("{}:", title(category)), value.to_uppercase());
    let _ = writeln!(out, "BMI:                {:.2}", record.bmi());
    let _ = writeln!(out, "City tier:          {}", record.city_tier());
    if let Some(probabilities) = &response.probabilities {
        let _ = writeln!(out, "Probabilities:");
        for (class, p) in probabilities.iter() {
            let _ = writeln!(out, "  {class:<10}{p:.3}");
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", advice(label));
    out
}

pub(crate) fn features(row: &FeatureRow) -> String {
    let width = row.columns().map(str::len).max().unwrap_or(0) + 2;
    row.iter().fold(String::new(), |mut out, (column, value)| {
        let _ = writeln!(out, "{:<width$}{value}", format!("{column}:"));
        out
    })
}

pub(crate) fn scheme(scheme: &dyn FeatureScheme, active: bool) -> String {
    let tiers = scheme.city_tiers();
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", scheme.kind(), if active { " (active)" } else { "" });
    let _ = writeln!(out, "  columns:      {}", scheme.columns().join(", "));
    let _ = writeln!(out, "  occupations:  {}", scheme.occupations().join(", "));
    let _ = writeln!(
        out,
        "  lifestyle:    {}",
        if scheme.requires_lifestyle() { "required" } else { "ignored" }
    );
    let _ = writeln!(out, "  tier 1:       {}", tiers.tier_1().join(", "));
    let _ = writeln!(out, "  tier 2:       {}", tiers.tier_2().join(", "));
    let _ = writeln!(out, "  tier 3:       every other city");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles() {
        assert_eq!(title("young_adult"), "Young Adult");
        assert_eq!(title("high_risk"), "High Risk");
        assert_eq!(title("adult"), "Adult");
        assert_eq!(title(""), "");
    }

    #[test]
    fn advice_falls_back_to_low() {
        assert!(advice("High").starts_with("High fitness level"));
        assert!(advice("Medium").starts_with("Medium fitness level"));
        assert!(advice("Gold").starts_with("Low fitness level"));
    }

    #[test]
    fn feature_rows_are_aligned() {
        let row = FeatureRow::new().with("bmi", 22.86).with("occupation", "teacher");
        assert_eq!(features(&row), "bmi:        22.86\noccupation: teacher\n");
    }
}
