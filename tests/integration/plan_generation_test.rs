//! Integration tests for the plan generation boundary.

use chrono::{DateTime, TimeZone, Utc};
use runflow::plan::{GenerationError, PlanDraft, PlanGenerator, PlanRequest, RunningPlan};
use runflow::workouts::RunType;
use runflow::AppState;

/// Generator that answers with canned response text.
struct CannedGenerator {
    response: String,
    now: DateTime<Utc>,
}

impl PlanGenerator for CannedGenerator {
    fn generate(&self, request: &PlanRequest) -> Result<RunningPlan, GenerationError> {
        request.validate()?;
        PlanDraft::from_json(&self.response)?
            .into_plan(request, self.now)
    }
}

/// Generator whose transport always fails.
struct OfflineGenerator;

impl PlanGenerator for OfflineGenerator {
    fn generate(&self, _request: &PlanRequest) -> Result<RunningPlan, GenerationError> {
        Err(GenerationError::Transport("connection refused".to_string()))
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 6, 30, 0).unwrap()
}

const DRAFT: &str = r#"{
    "name": "First 10K",
    "weeks": [
        {"weekNumber": 1, "workouts": [
            {"dayOffset": 1, "type": "easy", "distanceKm": 4, "durationMin": 26, "description": "Easy"},
            {"dayOffset": 3, "type": "rest", "distanceKm": 0, "durationMin": 0, "description": "Off"},
            {"dayOffset": 5, "type": "long", "distanceKm": 7, "durationMin": 48, "description": "Long"}
        ]},
        {"weekNumber": 3, "workouts": [
            {"dayOffset": 2, "type": "tempo", "distanceKm": 6, "durationMin": 33, "description": "Tempo"}
        ]}
    ]
}"#;

#[test]
fn test_generated_plan_is_committed() {
    let generator = CannedGenerator {
        response: DRAFT.to_string(),
        now: now(),
    };
    let request = PlanRequest::new("first 10K", "Beginner", 4, 3);

    let mut state = AppState::default();
    state.apply_generated(generator.generate(&request)).unwrap();

    let plan = state.plan.as_ref().unwrap();
    assert_eq!(plan.name, "First 10K");
    assert_eq!(plan.total_weeks, 4);
    assert_eq!(plan.weeks.len(), 4);
    assert_eq!(plan.created_at, now());
    assert_eq!(plan.weeks[0].workouts.len(), 3);
    assert!(plan.weeks[1].workouts.is_empty());
    assert_eq!(plan.weeks[2].workouts[0].kind, RunType::Tempo);
    assert!(plan.all_workouts().all(|(_, w)| !w.is_completed));
}

#[test]
fn test_failures_leave_plan_untouched() {
    let request = PlanRequest::new("first 10K", "Beginner", 4, 3);
    let mut state = AppState::default();
    state
        .apply_generated(
            CannedGenerator {
                response: DRAFT.to_string(),
                now: now(),
            }
            .generate(&request),
        )
        .unwrap();
    let before = state.plan.clone();

    let failures = [
        OfflineGenerator.generate(&request),
        CannedGenerator {
            response: String::new(),
            now: now(),
        }
        .generate(&request),
        CannedGenerator {
            response: "Sorry, I can't help with that.".to_string(),
            now: now(),
        }
        .generate(&request),
        CannedGenerator {
            response: r#"{"name": "Empty", "weeks": []}"#.to_string(),
            now: now(),
        }
        .generate(&request),
    ];

    for result in failures {
        assert!(state.apply_generated(result).is_err());
        assert_eq!(state.plan, before);
    }
}

#[test]
fn test_invalid_request_is_rejected_before_calling_out() {
    let generator = CannedGenerator {
        response: DRAFT.to_string(),
        now: now(),
    };

    for request in [
        PlanRequest::new("", "Beginner", 4, 3),
        PlanRequest::new("10K", "Beginner", 0, 3),
        PlanRequest::new("10K", "Beginner", 4, 8),
    ] {
        assert!(matches!(
            generator.generate(&request),
            Err(GenerationError::InvalidRequest(_))
        ));
    }
}
