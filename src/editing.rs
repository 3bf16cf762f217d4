//! Editing-surface guards.
//!
//! These helpers turn user edits on a single step into `StepPatch`es for the
//! store, refusing edits that would break a step's shape. The store itself
//! does not surface these refusals.

use crate::error::EditError;
use crate::step::{Step, StepIssue, StepPatch};

fn choice_options(step: &Step) -> Result<&[String], EditError> {
    if step.kind().is_choice() {
        Ok(step.options())
    } else {
        Err(EditError::NotAChoice {
            step_id: step.id().clone(),
        })
    }
}

fn check_index(step: &Step, options: &[String], index: usize) -> Result<(), EditError> {
    if index < options.len() {
        Ok(())
    } else {
        Err(EditError::OptionOutOfRange {
            step_id: step.id().clone(),
            index,
            len: options.len(),
        })
    }
}

/// Appends a numbered option (`Option 2`, `Option 3`, ...).
pub fn add_option(step: &Step) -> Result<StepPatch, EditError> {
    let options = choice_options(step)?;
    let mut next = options.to_vec();
    next.push(format!("Option {}", options.len() + 1));
    Ok(StepPatch::options(next))
}

/// Removes the option at `index`, refusing to drop the last remaining option.
pub fn remove_option(step: &Step, index: usize) -> Result<StepPatch, EditError> {
    let options = choice_options(step)?;
    check_index(step, options, index)?;
    if options.len() <= 1 {
        return Err(EditError::OptionFloor {
            step_id: step.id().clone(),
        });
    }
    let mut next = options.to_vec();
    next.remove(index);
    Ok(StepPatch::options(next))
}

pub fn rename_option(
    step: &Step,
    index: usize,
    value: impl Into<String>,
) -> Result<StepPatch, EditError> {
    let options = choice_options(step)?;
    check_index(step, options, index)?;
    let mut next = options.to_vec();
    next[index] = value.into();
    Ok(StepPatch::options(next))
}

/// Flips `required`. Steps that collect no response have no toggle.
pub fn toggle_required(step: &Step) -> Option<StepPatch> {
    step.kind()
        .collects_response()
        .then(|| StepPatch::required(!step.required))
}

/// Whether the editing surface should show the inline "required field" marker.
pub fn shows_title_marker(step: &Step) -> bool {
    step.issues().contains(&StepIssue::EmptyTitle)
}
