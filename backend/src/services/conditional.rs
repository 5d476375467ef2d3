//! Conditional roles, each triggered by one situational factor.
//!
//! The five rules are independent of each other and of the mandatory roles.
//! A rule whose factor is absent or zero still produces a disabled line item.

use crate::algorithms::{ceil_div, ceil_ratio};
use crate::models::{Role, StaffingConstants, StaffingFactors, StaffingLineItem};

use super::mandatory::format_number;

/// Compute the five conditional line items in display order.
///
/// Factors are expected to be validated already; negative values are treated
/// as absent.
pub fn compute_conditional(
    factors: &StaffingFactors,
    constants: &StaffingConstants,
) -> Vec<StaffingLineItem> {
    vec![
        drivers(factors.vehicle_count, constants),
        scaffold_inspectors(factors.scaffold_area_m2, constants),
        foreign_worker_liaisons(factors.foreign_workers_count, constants),
        security_staff(
            factors.security_posts,
            factors.round_the_clock_security,
            constants,
        ),
        design_engineer(factors.design_work),
    ]
}

fn positive_count(value: Option<i64>) -> Option<u32> {
    value
        .filter(|v| *v > 0)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}

fn drivers(vehicle_count: Option<i64>, constants: &StaffingConstants) -> StaffingLineItem {
    let Some(vehicles) = positive_count(vehicle_count) else {
        return StaffingLineItem::disabled(Role::DriverMechanic, "No vehicles or machinery on site");
    };
    let count = ceil_div(vehicles, constants.vehicles_per_driver).max(1);
    StaffingLineItem::enabled(
        Role::DriverMechanic,
        format!(
            "max(1, ceil({} / {})) = {}",
            vehicles, constants.vehicles_per_driver, count
        ),
        count,
        format!(
            "{} vehicles, one driver/mechanic per {}",
            vehicles, constants.vehicles_per_driver
        ),
    )
}

fn scaffold_inspectors(area: Option<f64>, constants: &StaffingConstants) -> StaffingLineItem {
    let Some(area) = area.filter(|a| a.is_finite() && *a > 0.0) else {
        return StaffingLineItem::disabled(Role::ScaffoldInspector, "No scaffolding on site");
    };
    let divisor = constants.scaffold_area_per_inspector;
    let count = ceil_ratio(area, divisor).max(1);
    StaffingLineItem::enabled(
        Role::ScaffoldInspector,
        format!(
            "max(1, ceil({} / {})) = {}",
            format_number(area),
            format_number(divisor),
            count
        ),
        count,
        format!(
            "{} m² of scaffolding, one inspector per {} m²",
            format_number(area),
            format_number(divisor)
        ),
    )
}

fn foreign_worker_liaisons(
    foreign_workers: Option<i64>,
    constants: &StaffingConstants,
) -> StaffingLineItem {
    let Some(foreign) = positive_count(foreign_workers) else {
        return StaffingLineItem::disabled(Role::ForeignWorkerLiaison, "No foreign workers");
    };
    let count = ceil_div(foreign, constants.foreign_workers_per_liaison).max(1);
    StaffingLineItem::enabled(
        Role::ForeignWorkerLiaison,
        format!(
            "max(1, ceil({} / {})) = {}",
            foreign, constants.foreign_workers_per_liaison, count
        ),
        count,
        format!(
            "{} foreign workers, one liaison per {}",
            foreign, constants.foreign_workers_per_liaison
        ),
    )
}

fn security_staff(
    posts: Option<i64>,
    round_the_clock: bool,
    constants: &StaffingConstants,
) -> StaffingLineItem {
    let Some(posts) = positive_count(posts) else {
        return StaffingLineItem::disabled(Role::SecurityStaff, "No security posts");
    };
    let (multiplier, coverage) = if round_the_clock {
        (constants.round_the_clock_shift_multiplier, "round-the-clock")
    } else {
        (constants.security_shift_multiplier, "shift")
    };
    let count = posts.saturating_mul(multiplier);
    StaffingLineItem::enabled(
        Role::SecurityStaff,
        format!("{} × {} = {}", posts, multiplier, count),
        count,
        format!(
            "{} posts with {} coverage, {} staff per post",
            posts, coverage, multiplier
        ),
    )
}

fn design_engineer(design_work: bool) -> StaffingLineItem {
    if design_work {
        StaffingLineItem::enabled(
            Role::DesignEngineer,
            "1",
            1,
            "Design work is performed on the project",
        )
    } else {
        StaffingLineItem::disabled(Role::DesignEngineer, "No design work")
    }
}
