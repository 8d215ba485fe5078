use crate::infra::seed_directory;
use clap::Args;
use keeper_core::error::AppError;
use keeper_core::surveys::{
    Answer, EvaluationService, EvaluationTargetKind, ResponseStatus, ResponseSubmission, SurveyId,
    UserId,
};
use serde_json::json;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Acting user for the listing and results portions of the demo.
    #[arg(long, default_value = "admin")]
    pub(crate) acting_user: String,
    /// Skip the response-submission portion and render the empty state.
    #[arg(long)]
    pub(crate) skip_responses: bool,
}

fn rating(question_id: &str, value: i64) -> Answer {
    Answer {
        question_id: question_id.to_string(),
        value: json!(value),
    }
}

fn submission(
    survey: &str,
    employee: &str,
    evaluator: &str,
    answers: Vec<Answer>,
) -> ResponseSubmission {
    ResponseSubmission {
        survey: SurveyId(survey.to_string()),
        employee: UserId(employee.to_string()),
        evaluator: UserId(evaluator.to_string()),
        answers,
        status: ResponseStatus::Submitted,
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        acting_user,
        skip_responses,
    } = args;
    let acting = UserId(acting_user);

    println!("Keeper evaluation demo");
    let service = Arc::new(EvaluationService::new(Arc::new(seed_directory())));

    if !skip_responses {
        let submissions = vec![
            submission(
                "keeper-2025",
                "elif",
                "elif",
                vec![
                    rating("q-pot-1", 4),
                    rating("q-pot-2", 5),
                    rating("q-cul-1", 4),
                    rating("q-team-1", 5),
                    rating("q-team-2", 4),
                    rating("q-exec-1", 3),
                ],
            ),
            submission(
                "keeper-2025",
                "deniz",
                "deniz",
                vec![
                    rating("q-pot-1", 3),
                    rating("q-cul-1", 3),
                    rating("q-team-1", 4),
                    rating("q-exec-1", 4),
                ],
            ),
            submission(
                "keeper-2025",
                "can",
                "can",
                vec![rating("q-pot-1", 5), rating("q-team-1", 3)],
            ),
            submission("manager-form-2025", "mert", "elif", vec![rating("q-team-1", 5)]),
            submission(
                "teammate-form-2025",
                "deniz",
                "elif",
                vec![rating("q-team-1", 4)],
            ),
        ];
        for entry in submissions {
            let stored = service.submit_response(entry)?;
            println!(
                "- Stored response: survey {} / employee {}",
                stored.survey.0, stored.employee.0
            );
        }
    }

    println!("\nSurvey listing for {}", acting.0);
    for entry in service.list_visible_surveys(&acting)? {
        println!(
            "- {} ({}) | {} submitted",
            entry.survey.title, entry.survey.id.0, entry.submitted_responses
        );
    }

    println!("\nResults overview");
    let summaries = service.results_overview(&acting)?;
    if summaries.is_empty() {
        println!("- no submitted keeper responses yet");
    }
    for summary in &summaries {
        println!(
            "- {} / {} | {} responses | keeper {:.1} (performance {:.1}, contribution {:.1}, potential {:.1})",
            summary.employee_name,
            summary.survey_title,
            summary.response_count,
            summary.scores.keeper_score,
            summary.scores.performance_score,
            summary.scores.contribution_score,
            summary.scores.potential_score
        );
    }

    if !skip_responses {
        println!("\nEmployee detail: Elif Kaya");
        let detail = service.employee_results(&acting, &UserId("elif".to_string()))?;
        println!(
            "- keeper {:.1} | manager-form avg {:.1} | teammate-form avg {:.1} | last submission {}",
            detail.scores.keeper_score,
            detail.manager_form_average,
            detail.teammate_form_average,
            detail
                .latest_submission
                .map(|at| at.to_rfc3339())
                .unwrap_or_else(|| "never".to_string())
        );
    }

    println!("\nCompletion for elif");
    for row in service.completion_for(&UserId("elif".to_string()))? {
        let state = if row.filled >= row.required {
            "complete"
        } else {
            "pending"
        };
        println!(
            "- {}: {}/{} ({})",
            row.survey_id.0, row.filled, row.required, state
        );
    }

    println!("\nEvaluation targets for elif");
    let superiors =
        service.list_evaluation_targets(&UserId("elif".to_string()), EvaluationTargetKind::Superiors)?;
    let teammates =
        service.list_evaluation_targets(&UserId("elif".to_string()), EvaluationTargetKind::Teammates)?;
    println!(
        "- superiors: {}",
        superiors
            .iter()
            .map(|user| user.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "- teammates: {}",
        teammates
            .iter()
            .map(|user| user.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}
