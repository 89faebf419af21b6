//! Antituberculosis dosage engine.
//!
//! Maps (weight, age class, formulation) to a dosing recommendation:
//! - Combined formulations (HRZE, HR) use banded tablet-count lookup
//! - Separate formulations use per-kilogram computed doses with caps
//!
//! Weights outside every validated band never get a guessed dose; they get
//! an instructional guidance line instead.

use crate::bands::{lookup_band, Band};
use crate::{AgeClass, DosageResult, DoseLine, DoseValue, Error, Formulation, Result};

/// Safety advisory appended to every successful result
pub const ADVISORY: &str = "Prendre à jeun, 30 minutes avant le repas. \
     Associer vitamine B6 (pyridoxine) 25-50 mg/jour.";

const GUIDANCE_CONSULT_PEDIATRICIAN: &str = "Consulter pédiatre";
const GUIDANCE_USE_ADULT_DOSING: &str = "Utiliser posologie adulte";
const GUIDANCE_WEIGHT_BASED: &str = "Posologie calculée en fonction du poids";

/// Adult tablet counts for both combined formulations (HRZE and HR share the
/// same weight bands). The tail repeats the [56,70] value: 4 tablets is the
/// ceiling for combined forms, no higher band exists.
const ADULT_COMBINED_BANDS: [Band<&str>; 5] = [
    Band { min: 20.0, max: Some(24.0), label: "1.5" },
    Band { min: 25.0, max: Some(39.0), label: "2" },
    Band { min: 40.0, max: Some(55.0), label: "3" },
    Band { min: 56.0, max: Some(70.0), label: "4" },
    Band { min: 70.0, max: None, label: "4" },
];

/// Pediatric tablet counts for both combined formulations
const CHILD_COMBINED_BANDS: [Band<&str>; 4] = [
    Band { min: 4.0, max: Some(7.0), label: "1" },
    Band { min: 8.0, max: Some(11.0), label: "2" },
    Band { min: 12.0, max: Some(15.0), label: "3" },
    Band { min: 16.0, max: Some(24.0), label: "4" },
];

/// Below this weight, pediatric combined forms are dosed per weight rather
/// than from the band table.
const CHILD_BANDED_MIN_KG: f64 = 4.0;

const ISONIAZID_CAP_MG: u32 = 300;
const RIFAMPICIN_CAP_MG: u32 = 600;
const ETHAMBUTOL_MG_PER_KG: f64 = 20.0;

/// Compute a dosing recommendation from raw inputs.
///
/// `weight_input` is free text; parsing failure or a non-positive value is
/// the only rejected condition. Every valid (weight, age, formulation)
/// combination produces a result.
pub fn compute_dosage(
    weight_input: &str,
    age: AgeClass,
    form: Formulation,
) -> Result<DosageResult> {
    let weight = parse_weight(weight_input)?;

    let lines = match form {
        Formulation::Hrze | Formulation::Hr => combined_lines(weight, age, form),
        Formulation::Separate => separate_lines(weight, age),
    };

    tracing::debug!(
        "Computed dosage: {:?} {:?} at {} kg, {} line(s)",
        form,
        age,
        weight,
        lines.len()
    );

    Ok(DosageResult { lines, advisory: ADVISORY })
}

fn parse_weight(input: &str) -> Result<f64> {
    let weight = input
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::InvalidWeight(input.to_string()))?;
    if !weight.is_finite() || weight <= 0.0 {
        return Err(Error::InvalidWeight(input.to_string()));
    }
    Ok(weight)
}

fn combined_label(form: Formulation, age: AgeClass) -> &'static str {
    match (form, age) {
        (Formulation::Hrze, AgeClass::Adult) => "HRZE Adulte (75mg+150mg+400mg+275mg)",
        (Formulation::Hrze, AgeClass::Child) => "HRZ Enfant (50mg+75mg+150mg)",
        (Formulation::Hr, AgeClass::Adult) => "HR Adulte (75mg+150mg)",
        (Formulation::Hr, AgeClass::Child) => "HR Enfant (50mg+75mg)",
        (Formulation::Separate, _) => unreachable!("separate form has no combined label"),
    }
}

/// Banded tablet lines for the combined formulations.
///
/// Children on HRZE always get an additional computed Éthambutol line ("si
/// indiqué"), whatever the band outcome; E is not part of HR, so the HR child
/// path never emits it.
fn combined_lines(weight: f64, age: AgeClass, form: Formulation) -> Vec<DoseLine> {
    let label = combined_label(form, age);
    let mut lines = Vec::new();

    match age {
        AgeClass::Adult => {
            let value = lookup_band(weight, &ADULT_COMBINED_BANDS)
                .map(DoseValue::Tablets)
                .unwrap_or(DoseValue::Guidance(GUIDANCE_CONSULT_PEDIATRICIAN));
            lines.push(DoseLine { label, value, note: None });
        }
        AgeClass::Child => {
            let value = if weight < CHILD_BANDED_MIN_KG {
                DoseValue::Guidance(GUIDANCE_WEIGHT_BASED)
            } else {
                lookup_band(weight, &CHILD_COMBINED_BANDS)
                    .map(DoseValue::Tablets)
                    .unwrap_or(DoseValue::Guidance(GUIDANCE_USE_ADULT_DOSING))
            };
            lines.push(DoseLine { label, value, note: None });

            if form == Formulation::Hrze {
                lines.push(DoseLine {
                    label: "Éthambutol",
                    value: DoseValue::MilligramsPerDay(per_kg_dose(
                        weight,
                        ETHAMBUTOL_MG_PER_KG,
                        None,
                    )),
                    note: Some("si indiqué"),
                });
            }
        }
    }

    lines
}

/// Per-kilogram computed lines for the four separate drugs
fn separate_lines(weight: f64, age: AgeClass) -> Vec<DoseLine> {
    let (isoniazid_rate, rifampicin_rate, pyrazinamide_rate) = match age {
        AgeClass::Adult => (5.0, 10.0, 30.0),
        AgeClass::Child => (10.0, 15.0, 35.0),
    };

    vec![
        DoseLine {
            label: "Isoniazide",
            value: DoseValue::MilligramsPerDay(per_kg_dose(
                weight,
                isoniazid_rate,
                Some(ISONIAZID_CAP_MG),
            )),
            note: None,
        },
        DoseLine {
            label: "Rifampicine",
            value: DoseValue::MilligramsPerDay(per_kg_dose(
                weight,
                rifampicin_rate,
                Some(RIFAMPICIN_CAP_MG),
            )),
            note: None,
        },
        DoseLine {
            label: "Pyrazinamide",
            value: DoseValue::MilligramsPerDay(per_kg_dose(weight, pyrazinamide_rate, None)),
            note: None,
        },
        DoseLine {
            label: "Éthambutol",
            value: DoseValue::MilligramsPerDay(per_kg_dose(weight, ETHAMBUTOL_MG_PER_KG, None)),
            note: None,
        },
    ]
}

/// Round to the nearest milligram, then apply the cap when one exists
fn per_kg_dose(weight: f64, mg_per_kg: f64, cap: Option<u32>) -> u32 {
    let dose = (weight * mg_per_kg).round() as u32;
    match cap {
        Some(cap) => dose.min(cap),
        None => dose,
    }
}
