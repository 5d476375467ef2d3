//! Legacy ratio-based calculator.
//!
//! Sizes total engineering staff from a single company-wide ratio per 100
//! workers and splits it by the historical share of each position group.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::error::{NormsError, NormsResult};
use crate::models::{CalculatorConfig, Role};

/// Group name used for the project lead in older calculator configs.
pub const LEGACY_PROJECT_LEAD_GROUP: &str = "ГИП/Руководитель проекта";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionBreakdown {
    pub position_group: String,
    pub recommended_count: u32,
    pub percentage: f64,
    pub calculation_details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioResult {
    pub project_name: String,
    pub workers_count: u32,
    pub total_itr_recommended: u32,
    pub itr_per_100_workers: f64,
    pub position_breakdown: Vec<PositionBreakdown>,
    pub justification: String,
}

fn is_project_lead_group(group: &str) -> bool {
    group == LEGACY_PROJECT_LEAD_GROUP || group == Role::ProjectLead.position_group()
}

/// Ratio-based estimate for one project.
pub fn compute_ratio_based(
    project_name: &str,
    workers_count: i64,
    config: &CalculatorConfig,
) -> NormsResult<RatioResult> {
    if workers_count <= 0 {
        return Err(NormsError::invalid_input(
            "workers_count",
            format!("must be a positive integer, got {}", workers_count),
        ));
    }
    let workers = u32::try_from(workers_count).map_err(|_| {
        NormsError::invalid_input("workers_count", format!("is too large: {}", workers_count))
    })?;
    let base_ratio = config.base_itr_per_100_workers;
    if !base_ratio.is_finite() || base_ratio <= 0.0 {
        return Err(NormsError::invalid_input(
            "base_itr_per_100_workers",
            format!("must be a positive finite number, got {}", base_ratio),
        ));
    }

    let total_raw = workers as f64 / 100.0 * base_ratio;
    let total_itr_recommended = ceil_to_u32(total_raw);

    let mut position_breakdown = Vec::with_capacity(config.position_group_percentages.len());
    for (group, percentage) in &config.position_group_percentages {
        if !percentage.is_finite() || *percentage < 0.0 {
            return Err(NormsError::invalid_input(
                format!("position_group_percentages.{}", group),
                format!("must be a non-negative finite number, got {}", percentage),
            ));
        }
        let share = total_raw * percentage / 100.0;
        let mut recommended_count = ceil_to_u32(share);
        if is_project_lead_group(group) {
            recommended_count = recommended_count.max(1);
        }
        position_breakdown.push(PositionBreakdown {
            position_group: group.clone(),
            recommended_count,
            percentage: *percentage,
            calculation_details: format!(
                "{:.2} × {}% / 100 = {:.2} ≈ {}",
                total_raw, percentage, share, recommended_count
            ),
        });
    }

    let justification = render_justification(
        project_name,
        workers,
        total_raw,
        total_itr_recommended,
        &position_breakdown,
        config,
    );

    Ok(RatioResult {
        project_name: project_name.to_string(),
        workers_count: workers,
        total_itr_recommended,
        itr_per_100_workers: base_ratio,
        position_breakdown,
        justification,
    })
}

fn ceil_to_u32(value: f64) -> u32 {
    let ceiled = value.ceil();
    if ceiled <= 0.0 {
        0
    } else if ceiled >= u32::MAX as f64 {
        u32::MAX
    } else {
        ceiled as u32
    }
}

fn render_justification(
    project_name: &str,
    workers: u32,
    total_raw: f64,
    total: u32,
    breakdown: &[PositionBreakdown],
    config: &CalculatorConfig,
) -> String {
    let base_ratio = config.base_itr_per_100_workers;
    let mut text = String::new();
    let _ = writeln!(text, "ITR staffing estimate for project \"{}\"", project_name);
    let _ = writeln!(text);
    let _ = writeln!(text, "Base ratio: {:.2} ITR per 100 workers", base_ratio);
    let _ = writeln!(text, "Workers: {}", workers);
    let _ = writeln!(
        text,
        "Calculation: ({} / 100) × {:.2} = {:.2}",
        workers, base_ratio, total_raw
    );
    let _ = writeln!(text, "Recommended ITR: {} (rounded up)", total);
    let _ = writeln!(text);
    let _ = writeln!(text, "Breakdown by position group:");
    for item in breakdown {
        let _ = writeln!(
            text,
            "- {}: {} ({:.1}%)",
            item.position_group, item.recommended_count, item.percentage
        );
    }
    let _ = writeln!(text);
    let _ = write!(
        text,
        "Based on {} projects ({})",
        config.metadata.projects_count, config.metadata.data_period
    );
    text
}
