/// Body mass index rounded to two decimals.
///
/// Ties on the scaled value round to even. Callers guarantee a positive, finite height.
#[must_use]
pub fn bmi(weight: f64, height: f64) -> f64 {
    round2(weight / (height * height))
}

#[must_use]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert!((bmi(70.0, 1.75) - 22.86).abs() < 1e-9);
        assert!((bmi(100.0, 1.75) - 32.65).abs() < 1e-9);
        assert!((bmi(60.0, 1.6) - 23.44).abs() < 1e-9);
    }

    #[test]
    fn ties_round_to_even() {
        assert!((round2(0.125) - 0.12).abs() < 1e-12);
        assert!((round2(0.375) - 0.38).abs() < 1e-12);
    }
}
