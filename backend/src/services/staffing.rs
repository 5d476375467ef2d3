//! Scale-based staffing calculation entry point.

use crate::error::NormsResult;
use crate::models::{
    ProjectScale, ScaleSource, StaffingConstants, StaffingContext, StaffingRequest,
    StaffingResult,
};

use super::aggregate::aggregate;
use super::coefficients::CoefficientLookup;
use super::conditional::compute_conditional;
use super::mandatory::compute_mandatory;

/// Validate, classify, compute both role lists and aggregate.
///
/// Pure over its inputs; fails before computing anything when the request is
/// invalid or a required coefficient is absent for the resolved scale.
pub fn compute_staffing(
    request: &StaffingRequest,
    coefficients: &impl CoefficientLookup,
    constants: &StaffingConstants,
) -> NormsResult<StaffingResult> {
    let workers_count = request.validate()?;
    constants.validate()?;

    let (scale, scale_source) = match request.scale {
        Some(scale) => (scale, ScaleSource::Override),
        None => (ProjectScale::classify(workers_count), ScaleSource::Detected),
    };

    let context = StaffingContext {
        project_name: request.project_name.clone(),
        workers_count,
        scale,
        scale_source,
    };

    let mandatory = compute_mandatory(workers_count, scale, coefficients)?;
    let conditional = compute_conditional(&request.factors, constants);

    aggregate(&context, mandatory, conditional)
}
