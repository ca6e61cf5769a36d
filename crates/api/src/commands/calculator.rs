//! Footprint calculation commands

use std::path::Path;

use carbonwise_core::{CalculatorForm, FootprintService};
use carbonwise_domain::{
    CalculationOutcome, CarbonError, Result as DomainResult, SubjectKind,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// Build a calculator form from a flat JSON object of form fields.
///
/// Values may be strings, numbers or booleans; `null` clears a field.
/// Unknown keys are rejected so typos do not silently count as zero.
///
/// # Errors
/// Returns `CarbonError::InvalidInput` when the document is not an object,
/// names an unknown field, or nests objects or arrays.
pub fn form_from_json(document: &Value, subject: SubjectKind) -> DomainResult<CalculatorForm> {
    let fields = document.as_object().ok_or_else(|| {
        CarbonError::InvalidInput("Calculator input must be a JSON object of form fields".into())
    })?;

    let mut form = CalculatorForm::new(subject);
    for (key, value) in fields {
        let text = match value {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Null => String::new(),
            Value::Array(_) | Value::Object(_) => {
                return Err(CarbonError::InvalidInput(format!(
                    "Field '{key}' must be a string, number or boolean"
                )));
            }
        };
        form.set(key, text)?;
    }
    Ok(form)
}

/// Read a calculator form from a JSON file.
///
/// # Errors
/// Returns `CarbonError::NotFound` or `CarbonError::Storage` when the file
/// cannot be read, and `CarbonError::InvalidInput` when it is not valid
/// calculator input.
pub fn read_form(path: &Path, subject: SubjectKind) -> DomainResult<CalculatorForm> {
    let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            CarbonError::NotFound(format!("Input file not found: {}", path.display()))
        }
        _ => CarbonError::Storage(format!("Failed to read {}: {}", path.display(), e)),
    })?;
    let document: Value = serde_json::from_str(&contents).map_err(|e| {
        CarbonError::InvalidInput(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;
    form_from_json(&document, subject)
}

/// Calculate the footprint for the form's current values and keep the
/// outcome on the form.
///
/// With `local_only` the remote API is never contacted. Otherwise the
/// remote result is used when available, with the local estimate as
/// fallback.
#[instrument(skip(ctx, form), fields(subject = %form.subject()))]
pub async fn calculate(
    ctx: &AppContext,
    form: &mut CalculatorForm,
    local_only: bool,
) -> DomainResult<CalculationOutcome> {
    let input = form.input();
    let subject = form.subject();

    let outcome = execute_logged("calculator::calculate", || async {
        let outcome = if local_only {
            FootprintService::local_only().calculate_local(&input, subject)
        } else {
            ctx.footprint.calculate(&input, subject).await
        };
        Ok(outcome)
    })
    .await?;

    info!(
        source = ?outcome.source(),
        total_tons = outcome.breakdown().total,
        fallback = outcome.is_fallback(),
        "Calculation complete"
    );
    form.record(outcome.clone());
    Ok(outcome)
}
