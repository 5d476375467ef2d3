//! Combines mandatory and conditional line items into a staffing result.

use std::fmt::Write;

use crate::algorithms::round_to;
use crate::error::{NormsError, NormsResult};
use crate::models::{ScaleSource, StaffingContext, StaffingLineItem, StaffingResult};

/// Sum the two lists and render the justification.
///
/// Pure: the same inputs always serialize to the same bytes. Fails with
/// `InvalidInput` when a total does not fit in a `u32`.
pub fn aggregate(
    context: &StaffingContext,
    mandatory: Vec<StaffingLineItem>,
    conditional: Vec<StaffingLineItem>,
) -> NormsResult<StaffingResult> {
    let total_mandatory = total_count(&mandatory, "total_mandatory")?;
    let total_conditional = total_count(&conditional, "total_conditional")?;
    let total = total_mandatory
        .checked_add(total_conditional)
        .ok_or_else(|| overflow("total"))?;

    let itr_per_100_workers = if context.workers_count > 0 {
        round_to(total as f64 / context.workers_count as f64 * 100.0, 2)
    } else {
        0.0
    };

    let justification = render_justification(
        context,
        &mandatory,
        &conditional,
        total_mandatory,
        total_conditional,
        itr_per_100_workers,
    );

    Ok(StaffingResult {
        project_name: context.project_name.clone(),
        workers_count: context.workers_count,
        scale: context.scale,
        scale_source: context.scale_source,
        mandatory,
        conditional,
        total_mandatory,
        total_conditional,
        total,
        itr_per_100_workers,
        justification,
    })
}

/// Checked sum of the item counts.
pub(crate) fn total_count(items: &[StaffingLineItem], field: &str) -> NormsResult<u32> {
    items
        .iter()
        .try_fold(0u32, |sum, item| sum.checked_add(item.count))
        .ok_or_else(|| overflow(field))
}

fn overflow(field: &str) -> NormsError {
    NormsError::invalid_input(field, "staffing count exceeds the supported range")
}

/// Re-render the justification of an existing result from its item lists.
pub fn justification_for(result: &StaffingResult) -> String {
    let context = StaffingContext {
        project_name: result.project_name.clone(),
        workers_count: result.workers_count,
        scale: result.scale,
        scale_source: result.scale_source,
    };
    render_justification(
        &context,
        &result.mandatory,
        &result.conditional,
        result.total_mandatory,
        result.total_conditional,
        result.itr_per_100_workers,
    )
}

fn render_justification(
    context: &StaffingContext,
    mandatory: &[StaffingLineItem],
    conditional: &[StaffingLineItem],
    total_mandatory: u32,
    total_conditional: u32,
    itr_per_100_workers: f64,
) -> String {
    let mut text = String::new();

    let source = match context.scale_source {
        ScaleSource::Detected => "detected from worker count",
        ScaleSource::Override => "set explicitly",
    };
    if let Some(name) = &context.project_name {
        let _ = writeln!(text, "Project: {}", name);
    }
    let _ = writeln!(
        text,
        "Workers: {}; scale: {} ({}, {})",
        context.workers_count,
        context.scale.name(),
        context.scale.code(),
        source
    );

    let _ = writeln!(text, "Mandatory roles:");
    for item in mandatory {
        let _ = writeln!(
            text,
            "  - {}: {} [{}]",
            item.name, item.formula, item.details
        );
    }

    let _ = writeln!(text, "Conditional roles:");
    for item in conditional {
        if item.enabled {
            let _ = writeln!(
                text,
                "  - {}: {} [{}]",
                item.name, item.formula, item.details
            );
        } else {
            let _ = writeln!(text, "  - {}: not required ({})", item.name, item.details);
        }
    }

    let _ = write!(
        text,
        "Total: {} mandatory + {} conditional = {} ({:.2} per 100 workers)",
        total_mandatory,
        total_conditional,
        total_mandatory.saturating_add(total_conditional),
        itr_per_100_workers
    );
    text
}
