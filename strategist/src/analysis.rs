use validator::{Validate, ValidationError};

const TIMELINE_THRESHOLD_DAYS: u32 = 30;
const VOLUME_THRESHOLD: f64 = 10_000.0;

const SAFETY_CHECKLIST: [&str; 9] = [
    "Conduct a site-specific risk assessment",
    "Verify the blast design and loading plan",
    "Confirm explosives storage and transport compliance",
    "Check licences and certifications of all shotfirers",
    "Establish the exclusion zone and post sentries",
    "Notify neighbours and sound warning signals",
    "Inspect initiation systems and hook-up",
    "Monitor weather and lightning conditions",
    "Carry out a post-blast inspection for misfires",
];

/// Inputs of a blasting project, as entered in the analysis form.
#[derive(
    Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema, Validate,
)]
#[validate(schema(function = "validate_finite_amounts"))]
pub struct ProjectData {
    #[validate(length(min = 1, message = "Project name is required"))]
    pub name: String,
    pub budget: f64,
    pub estimated_cost: f64,
    pub expected_revenue: f64,
    /// Days.
    #[validate(range(min = 1, message = "Timeline must be at least one day"))]
    pub timeline: u32,
    #[validate(range(min = 0.0, message = "Blast volume can't be negative"))]
    pub blast_volume: f64,
}

fn validate_finite_amounts(project: &ProjectData) -> Result<(), ValidationError> {
    let amounts = [
        project.budget,
        project.estimated_cost,
        project.expected_revenue,
        project.blast_volume,
    ];

    if amounts.iter().all(|amount| amount.is_finite()) {
        return Ok(());
    }

    let mut error = ValidationError::new("finite");
    error.message = Some("Amounts and volume must be finite numbers".into());

    Err(error)
}

impl Default for ProjectData {
    fn default() -> Self {
        Self {
            name: "New Blasting Project".to_string(),
            budget: 100_000.0,
            estimated_cost: 80_000.0,
            expected_revenue: 150_000.0,
            timeline: 60,
            blast_volume: 5_000.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct Analysis {
    pub recommendations: Vec<String>,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
}

/// Everything the "Analyze Project" action shows.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalysisReport {
    pub analysis: Analysis,
    pub roi: Option<f64>,
    pub safety_checklist: Vec<String>,
}

#[must_use]
pub fn analyze(project: &ProjectData) -> Analysis {
    let mut analysis = Analysis::default();

    if project.budget < project.estimated_cost {
        analysis
            .risks
            .push("Budget constraints may impact project execution".to_string());
        analysis
            .recommendations
            .push("Consider cost optimization strategies".to_string());
    }

    if project.timeline < TIMELINE_THRESHOLD_DAYS {
        analysis
            .risks
            .push("Accelerated timeline may increase safety risks".to_string());
        analysis
            .recommendations
            .push("Implement expedited safety checks and approvals".to_string());
    }

    if project.blast_volume > VOLUME_THRESHOLD {
        analysis
            .opportunities
            .push("Economies of scale with large blast volume".to_string());
        analysis
            .recommendations
            .push("Consider automated drilling and loading equipment".to_string());
    }

    analysis
}

/// Return on investment as a percentage, `None` when it isn't a finite number.
#[must_use]
pub fn roi(project: &ProjectData) -> Option<f64> {
    if project.estimated_cost == 0.0 {
        return None;
    }

    Some((project.expected_revenue - project.estimated_cost) / project.estimated_cost * 100.0)
        .filter(|roi| roi.is_finite())
}

#[must_use]
pub fn safety_checklist() -> Vec<String> {
    SAFETY_CHECKLIST.iter().map(ToString::to_string).collect()
}

#[must_use]
pub fn report(project: &ProjectData) -> AnalysisReport {
    AnalysisReport {
        analysis: analyze(project),
        roi: roi(project),
        safety_checklist: safety_checklist(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectData {
        ProjectData {
            name: "North Pit".to_string(),
            budget: 100_000.0,
            estimated_cost: 80_000.0,
            expected_revenue: 150_000.0,
            timeline: 60,
            blast_volume: 5_000.0,
        }
    }

    #[test]
    fn healthy_project_has_no_findings() {
        assert_eq!(analyze(&project()), Analysis::default());
    }

    #[test]
    fn flags_budget_shortfall() {
        let analysis = analyze(&ProjectData {
            budget: 50_000.0,
            ..project()
        });

        assert_eq!(analysis.risks, vec!["Budget constraints may impact project execution"]);
        assert_eq!(analysis.recommendations, vec!["Consider cost optimization strategies"]);
        assert!(analysis.opportunities.is_empty());
    }

    #[test]
    fn budget_equal_to_cost_is_fine() {
        let analysis = analyze(&ProjectData {
            budget: 80_000.0,
            ..project()
        });

        assert!(analysis.risks.is_empty());
    }

    #[test]
    fn flags_accelerated_timeline() {
        let analysis = analyze(&ProjectData {
            timeline: 29,
            ..project()
        });

        assert_eq!(analysis.risks, vec!["Accelerated timeline may increase safety risks"]);
        assert_eq!(
            analysis.recommendations,
            vec!["Implement expedited safety checks and approvals"]
        );

        assert!(analyze(&ProjectData {
            timeline: 30,
            ..project()
        })
        .risks
        .is_empty());
    }

    #[test]
    fn spots_economies_of_scale() {
        let analysis = analyze(&ProjectData {
            blast_volume: 10_001.0,
            ..project()
        });

        assert_eq!(
            analysis.opportunities,
            vec!["Economies of scale with large blast volume"]
        );
        assert_eq!(
            analysis.recommendations,
            vec!["Consider automated drilling and loading equipment"]
        );

        assert!(analyze(&ProjectData {
            blast_volume: 10_000.0,
            ..project()
        })
        .opportunities
        .is_empty());
    }

    #[test]
    fn keeps_check_order() {
        let analysis = analyze(&ProjectData {
            budget: 10_000.0,
            timeline: 7,
            blast_volume: 25_000.0,
            ..project()
        });

        assert_eq!(
            analysis.recommendations,
            vec![
                "Consider cost optimization strategies",
                "Implement expedited safety checks and approvals",
                "Consider automated drilling and loading equipment",
            ]
        );
        assert_eq!(
            analysis.risks,
            vec![
                "Budget constraints may impact project execution",
                "Accelerated timeline may increase safety risks",
            ]
        );
    }

    #[test]
    fn computes_roi() {
        assert_eq!(roi(&project()), Some(87.5));
        assert_eq!(
            roi(&ProjectData {
                expected_revenue: 40_000.0,
                ..project()
            }),
            Some(-50.0)
        );
    }

    #[test]
    fn roi_is_undefined_without_cost() {
        assert_eq!(
            roi(&ProjectData {
                estimated_cost: 0.0,
                ..project()
            }),
            None
        );
    }

    #[test]
    fn roi_is_undefined_when_it_overflows() {
        let project = ProjectData {
            estimated_cost: 1e-310,
            expected_revenue: 1e300,
            ..project()
        };

        assert_eq!(roi(&project), None);
        assert_eq!(
            roi(&ProjectData {
                estimated_cost: f64::NAN,
                ..project
            }),
            None
        );
    }

    #[test]
    fn checklist_is_fixed() {
        let checklist = safety_checklist();

        assert_eq!(checklist.len(), 9);
        assert_eq!(checklist, safety_checklist());
        assert_eq!(report(&project()).safety_checklist, checklist);
        assert_eq!(
            report(&ProjectData {
                timeline: 1,
                ..project()
            })
            .safety_checklist,
            checklist
        );
    }

    #[test]
    fn validates_form_input() {
        assert!(project().validate().is_ok());

        let errors = ProjectData {
            timeline: 0,
            blast_volume: -1.0,
            ..project()
        }
        .validate()
        .unwrap_err();

        let fields = errors.field_errors();
        assert!(fields.contains_key("timeline"));
        assert!(fields.contains_key("blast_volume"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn rejects_non_finite_amounts() {
        assert!(ProjectData {
            blast_volume: f64::NAN,
            ..project()
        }
        .validate()
        .is_err());

        for project in [
            ProjectData {
                budget: f64::INFINITY,
                ..project()
            },
            ProjectData {
                estimated_cost: f64::NAN,
                ..project()
            },
            ProjectData {
                expected_revenue: f64::NEG_INFINITY,
                ..project()
            },
        ] {
            let errors = project.validate().unwrap_err();

            assert!(errors.errors().contains_key("__all__"));
        }
    }
}
