pub mod calculator;
pub mod norms;
pub mod projects;
pub mod standards;

#[cfg(test)]
mod tests {
    #[test]
    fn test_module_structure() {
        assert_eq!(super::calculator::LIST_SCALES, "list_scales");
        assert_eq!(super::calculator::CALCULATE_STAFFING, "calculate_staffing");
        assert_eq!(super::calculator::CALCULATE_RATIO, "calculate_ratio");
        assert_eq!(super::norms::GET_NORMS, "get_norms");
        assert_eq!(super::norms::GET_NORMS_DETAILS, "get_norms_details");
        assert_eq!(super::norms::DERIVE_STATISTICS, "derive_statistics");
        assert_eq!(super::norms::GET_SNAPSHOT, "get_snapshot");
        assert_eq!(super::norms::RELOAD_SNAPSHOT, "reload_snapshot");
        assert_eq!(super::projects::LIST_PROJECTS, "list_projects");
        assert_eq!(
            super::projects::GET_PROJECT_DYNAMICS,
            "get_project_dynamics"
        );
        assert_eq!(super::standards::GET_STANDARDS, "get_standards");
    }
}
