//! New-analysis form input and its validation.

use chrono::Datelike;

use super::model::AnalysisRequest;
use crate::validation::{FieldErrors, FormField};

/// Earliest year the backend has data for.
pub const MIN_YEAR: i32 = 1900;

/// Raw form input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisForm {
    pub activo: String,
    pub inicio: String,
    pub fin: String,
}

impl AnalysisForm {
    pub fn new(
        activo: impl Into<String>,
        inicio: impl Into<String>,
        fin: impl Into<String>,
    ) -> Self {
        Self {
            activo: activo.into(),
            inicio: inicio.into(),
            fin: fin.into(),
        }
    }

    /// Validates against the current local year.
    pub fn validate(&self) -> Result<AnalysisRequest, FieldErrors> {
        self.validate_for_year(chrono::Local::now().year())
    }

    /// Validates each field independently and builds the normalized payload.
    ///
    /// Years must fall in `[MIN_YEAR, current_year]`. There is no ordering
    /// rule between the two years.
    pub fn validate_for_year(&self, current_year: i32) -> Result<AnalysisRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        let symbol = self.activo.trim().to_uppercase();
        if symbol.is_empty() {
            errors.push(FormField::Activo, "Asset is required");
        }

        let year1 = check_year(&self.inicio, "Start year", current_year)
            .map_err(|msg| errors.push(FormField::Inicio, msg))
            .ok();
        let year2 = check_year(&self.fin, "End year", current_year)
            .map_err(|msg| errors.push(FormField::Fin, msg))
            .ok();

        match (year1, year2) {
            (Some(year1), Some(year2)) if errors.is_empty() => Ok(AnalysisRequest {
                symbol,
                year1,
                year2,
            }),
            _ => Err(errors),
        }
    }
}

fn check_year(raw: &str, label: &str, current_year: i32) -> Result<i32, String> {
    let value = match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => return Err(format!("{label} must be a number")),
    };
    if value.fract() != 0.0 {
        return Err(format!("{label} must be a whole number"));
    }

    // Range-check before narrowing so oversized whole numbers stay range errors.
    if value < f64::from(MIN_YEAR) {
        return Err(format!("{label} must be {MIN_YEAR} or later"));
    }
    if value > f64::from(current_year) {
        return Err(format!(
            "{label} cannot be after the current year ({current_year})"
        ));
    }
    Ok(value as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2026;

    #[test]
    fn test_valid_form_is_normalized() {
        let form = AnalysisForm::new("  aapl ", "2020", "2023");
        let request = form.validate_for_year(YEAR).unwrap();
        assert_eq!(
            request,
            AnalysisRequest {
                symbol: "AAPL".to_string(),
                year1: 2020,
                year2: 2023,
            }
        );
    }

    #[test]
    fn test_end_before_start_is_allowed() {
        let request = AnalysisForm::new("MSFT", "2023", "2020")
            .validate_for_year(YEAR)
            .unwrap();
        assert_eq!(request.year1, 2023);
        assert_eq!(request.year2, 2020);
    }

    #[test]
    fn test_year_below_floor_is_rejected() {
        let errors = AnalysisForm::new("AAPL", "1800", "2020")
            .validate_for_year(YEAR)
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FormField::Inicio),
            Some("Start year must be 1900 or later")
        );
    }

    #[test]
    fn test_future_year_is_rejected() {
        let errors = AnalysisForm::new("AAPL", "2020", "2027")
            .validate_for_year(YEAR)
            .unwrap_err();
        assert_eq!(
            errors.get(FormField::Fin),
            Some("End year cannot be after the current year (2026)")
        );
    }

    #[test]
    fn test_non_numeric_and_fractional_years() {
        let errors = AnalysisForm::new("AAPL", "twenty", "2020.5")
            .validate_for_year(YEAR)
            .unwrap_err();
        assert_eq!(
            errors.get(FormField::Inicio),
            Some("Start year must be a number")
        );
        assert_eq!(
            errors.get(FormField::Fin),
            Some("End year must be a whole number")
        );
    }

    #[test]
    fn test_all_fields_reported_together() {
        let errors = AnalysisForm::new("   ", "", "1800")
            .validate_for_year(YEAR)
            .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(FormField::Activo), Some("Asset is required"));
    }

    #[test]
    fn test_oversized_whole_number_is_a_range_error() {
        let errors = AnalysisForm::new("AAPL", "99999999999", "2020")
            .validate_for_year(YEAR)
            .unwrap_err();
        assert_eq!(
            errors.get(FormField::Inicio),
            Some("Start year cannot be after the current year (2026)")
        );
    }

    #[test]
    fn test_integral_decimal_notation_is_accepted() {
        let request = AnalysisForm::new("AAPL", "2020.0", "2023")
            .validate_for_year(YEAR)
            .unwrap();
        assert_eq!(request.year1, 2020);

        let errors = AnalysisForm::new("AAPL", "1e3", "2023")
            .validate_for_year(YEAR)
            .unwrap_err();
        assert_eq!(
            errors.get(FormField::Inicio),
            Some("Start year must be 1900 or later")
        );
    }
}
