use crate::models::{EnrichmentResult, PersonData};

/// Render a nationality probability the way it is stored: two decimals, as text
#[inline]
pub fn format_probability(probability: f64) -> String {
    format!("{:.2}", probability)
}

/// Overlay the populated fields of `result` onto `data`.
///
/// Absent fields leave the record untouched. The probability is only written
/// together with the nationality it belongs to.
pub fn apply_enrichment(data: &mut PersonData, result: &EnrichmentResult) {
    if let Some(age) = result.age {
        data.age = Some(age);
    }

    if let Some(gender) = &result.gender {
        data.gender = Some(gender.clone());
    }

    if let Some(nationality) = &result.nationality {
        data.nationality = Some(nationality.clone());
        data.nationality_probability = result.nationality_probability.map(format_probability);
    }
}
