//! Mandatory roles: always staffed, sized from the worker count.

use crate::algorithms::{ceil_div, ceil_ratio};
use crate::error::{NormsError, NormsResult};
use crate::models::{ProjectScale, Role, StaffingLineItem};

use super::aggregate::total_count;
use super::coefficients::CoefficientLookup;

/// Regulatory ratio for safety officers; not scale dependent.
pub const WORKERS_PER_SAFETY_OFFICER: u32 = 50;

/// Engineering staff served by one general-affairs specialist.
pub const ITR_PER_ADMIN_SPECIALIST: u32 = 15;

/// Roles whose divisor comes from the coefficient table.
pub const SCALE_DEPENDENT_ROLES: [Role; 3] = [
    Role::SiteSupervisor,
    Role::Foreman,
    Role::WarehouseSpecialist,
];

/// Compute the six mandatory line items in evaluation order.
///
/// Every scale-dependent coefficient is resolved before anything is computed,
/// so a missing one fails the whole calculation with no partial output.
pub fn compute_mandatory(
    workers_count: u32,
    scale: ProjectScale,
    coefficients: &impl CoefficientLookup,
) -> NormsResult<Vec<StaffingLineItem>> {
    let k_prorab = required_coefficient(coefficients, Role::SiteSupervisor, scale)?;
    let k_master = required_coefficient(coefficients, Role::Foreman, scale)?;
    let k_sklad = required_coefficient(coefficients, Role::WarehouseSpecialist, scale)?;

    let mut items = Vec::with_capacity(Role::MANDATORY.len());

    items.push(StaffingLineItem::enabled(
        Role::ProjectLead,
        "1",
        1,
        "One project lead per project regardless of scale",
    ));
    items.push(per_coefficient(Role::SiteSupervisor, "K_prorab", workers_count, scale, k_prorab));
    items.push(per_coefficient(Role::Foreman, "K_master", workers_count, scale, k_master));

    let safety = ceil_div(workers_count, WORKERS_PER_SAFETY_OFFICER);
    items.push(StaffingLineItem::enabled(
        Role::SafetyOfficer,
        format!(
            "ceil({} / {}) = {}",
            workers_count, WORKERS_PER_SAFETY_OFFICER, safety
        ),
        safety,
        format!(
            "Labour-safety regulation: one officer per {} workers",
            WORKERS_PER_SAFETY_OFFICER
        ),
    ));
    items.push(per_coefficient(Role::WarehouseSpecialist, "K_sklad", workers_count, scale, k_sklad));

    // Sized from the five finalized items above, not from the worker count.
    let running_total = total_count(&items, "total_mandatory")?;
    let admin = ceil_div(running_total, ITR_PER_ADMIN_SPECIALIST).max(1);
    items.push(StaffingLineItem::enabled(
        Role::AdminSpecialist,
        format!(
            "max(1, ceil({} / {})) = {}",
            running_total, ITR_PER_ADMIN_SPECIALIST, admin
        ),
        admin,
        format!(
            "One specialist per {} engineering staff; {} staff in the roles above",
            ITR_PER_ADMIN_SPECIALIST, running_total
        ),
    ));

    Ok(items)
}

fn required_coefficient(
    coefficients: &impl CoefficientLookup,
    role: Role,
    scale: ProjectScale,
) -> NormsResult<f64> {
    coefficients
        .coefficient(role.position_group(), scale)
        .ok_or_else(|| NormsError::missing_coefficient(role.position_group(), scale))
}

fn per_coefficient(
    role: Role,
    symbol: &str,
    workers_count: u32,
    scale: ProjectScale,
    k: f64,
) -> StaffingLineItem {
    let count = ceil_ratio(workers_count as f64, k);
    StaffingLineItem::enabled(
        role,
        format!("ceil({} / {}) = {}", workers_count, format_number(k), count),
        count,
        format!(
            "{}[{}] = {}: workers per one specialist at this scale",
            symbol,
            scale.code(),
            format_number(k)
        ),
    )
}

/// Whole numbers without decimals, others with at most two.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
