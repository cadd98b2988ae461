use fitclass_deriver::{
    CityTier, CityTiers, FeatureScheme, IncomeAgeGroup, IncomeScheme, RiskAgeGroup, RiskScheme,
    bmi,
};
use fitclass_domain::input::RawInput;
use proptest::prelude::*;

fn input(age: i64, weight: f64, height: f64, income: f64, city: &str) -> RawInput {
    RawInput {
        age,
        weight,
        height,
        income_lpa: income,
        active_lifestyle: Some(true),
        city: city.to_owned(),
        occupation: "student".to_owned(),
    }
}

proptest! {
    #[test]
    fn bmi_is_rounded_and_idempotent(weight in 1.0f64..300.0, height in 0.5f64..2.49) {
        let value = bmi(weight, height);
        prop_assert_eq!(value, bmi(weight, height));
        prop_assert!(((value * 100.0).round() - value * 100.0).abs() < 1e-6);
        prop_assert!((value - weight / (height * height)).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn risk_age_bands_cover_every_valid_age(age in 1i64..100) {
        let group = RiskAgeGroup::from_age(age);
        let expected = if age < 25 {
            RiskAgeGroup::Young
        } else if age < 40 {
            RiskAgeGroup::Adult
        } else if age < 60 {
            RiskAgeGroup::MiddleAged
        } else {
            RiskAgeGroup::Senior
        };
        prop_assert_eq!(group, expected);
    }

    #[test]
    fn income_age_bands_cover_every_valid_age(age in 1i64..100) {
        let group = IncomeAgeGroup::from_age(age);
        let expected = if age < 18 {
            IncomeAgeGroup::Teen
        } else if age < 30 {
            IncomeAgeGroup::YoungAdult
        } else if age < 50 {
            IncomeAgeGroup::Adult
        } else {
            IncomeAgeGroup::Senior
        };
        prop_assert_eq!(group, expected);
    }

    #[test]
    fn city_tier_follows_list_membership(city in "[A-Za-z ]{0,16}") {
        let tiers = CityTiers::risk_defaults();
        let expected = if tiers.tier_1().contains(&city) {
            CityTier::One
        } else if tiers.tier_2().contains(&city) {
            CityTier::Two
        } else {
            CityTier::Three
        };
        prop_assert_eq!(tiers.tier(&city), expected);
    }

    #[test]
    fn valid_inputs_always_derive(
        age in 1i64..100,
        weight in 0.1f64..400.0,
        height in 0.1f64..2.49,
        income in 0.01f64..500.0,
    ) {
        let raw = input(age, weight, height, income, "Denver");
        for scheme in [&RiskScheme::default() as &dyn FeatureScheme, &IncomeScheme::default()] {
            let valid = scheme.validate(&raw);
            prop_assert!(valid.is_ok());
            if let Ok(valid) = valid {
                let row = scheme.derive(&valid).to_row();
                prop_assert_eq!(row.columns().collect::<Vec<_>>(), scheme.columns());
            }
        }
    }

    #[test]
    fn out_of_range_ages_are_rejected(age in prop_oneof![i64::MIN..=0, 100i64..=i64::MAX]) {
        let raw = input(age, 70.0, 1.75, 15.0, "Denver");
        let err = IncomeScheme::default().validate(&raw);
        prop_assert!(err.is_err());
    }
}
