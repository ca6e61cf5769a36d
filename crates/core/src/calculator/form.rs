//! Calculator form state

use std::collections::BTreeMap;

use carbonwise_domain::{
    form_keys, ActivityInput, CalculationOutcome, CarbonError, Result, SubjectKind,
};

/// Initial selections; every other field starts empty.
const INITIAL_SELECTIONS: [(&str, &str); 5] = [
    (form_keys::VEHICLE_TYPE, "car"),
    (form_keys::FUEL_TYPE, "petrol"),
    (form_keys::DIET_TYPE, "mixed"),
    (form_keys::PACKAGING, "mixed"),
    (form_keys::FLIGHT_DURATION, ""),
];

/// Flat field state behind the calculator page
///
/// Holds raw text exactly as typed. Parsing happens once per calculation in
/// [`CalculatorForm::input`].
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorForm {
    subject: SubjectKind,
    fields: BTreeMap<String, String>,
    last_outcome: Option<CalculationOutcome>,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        Self::new(SubjectKind::default())
    }
}

impl CalculatorForm {
    pub fn new(subject: SubjectKind) -> Self {
        Self { subject, fields: default_fields(), last_outcome: None }
    }

    /// Update one field.
    ///
    /// # Errors
    /// Returns `CarbonError::InvalidInput` for a key the calculator does not
    /// know.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        if !form_keys::is_known(field) {
            return Err(CarbonError::InvalidInput(format!("Unknown calculator field '{field}'")));
        }
        self.fields.insert(field.to_string(), value.into());
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn set_subject(&mut self, subject: SubjectKind) {
        self.subject = subject;
    }

    pub fn subject(&self) -> SubjectKind {
        self.subject
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// A fresh input built from the current field values
    pub fn input(&self) -> ActivityInput {
        ActivityInput::from_form(&self.fields)
    }

    /// Keep `outcome` for display until the next calculation or reset.
    pub fn record(&mut self, outcome: CalculationOutcome) {
        self.last_outcome = Some(outcome);
    }

    pub fn last_outcome(&self) -> Option<&CalculationOutcome> {
        self.last_outcome.as_ref()
    }

    /// Restore every field to its initial value and drop the last outcome.
    /// The subject selection is kept.
    pub fn reset(&mut self) {
        self.fields = default_fields();
        self.last_outcome = None;
    }
}

fn default_fields() -> BTreeMap<String, String> {
    let mut fields: BTreeMap<String, String> =
        form_keys::ALL.iter().map(|key| ((*key).to_string(), String::new())).collect();
    fields.insert(form_keys::DATA_CENTER.to_string(), "false".to_string());
    fields.insert(form_keys::MANUFACTURING.to_string(), "false".to_string());
    for (key, value) in INITIAL_SELECTIONS {
        fields.insert(key.to_string(), value.to_string());
    }
    fields
}
