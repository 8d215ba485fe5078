use super::domain::{Response, Survey, SurveyId, SurveyKind, User, UserId};
use super::relations::{superiors, teammates};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// How many required evaluations a user has filled for one survey.
///
/// `required == 0` (for example, a department-less user facing a teammate
/// form) means the cell is vacuously complete, not missing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionCell {
    pub filled: usize,
    pub required: usize,
}

impl CompletionCell {
    pub const fn is_complete(&self) -> bool {
        self.filled >= self.required
    }
}

/// Flattened cell for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionEntry {
    pub user_id: UserId,
    pub survey_id: SurveyId,
    pub filled: usize,
    pub required: usize,
}

/// Per-(user, survey) completion matrix: who still owes which evaluations.
#[derive(Debug, Clone, Default)]
pub struct CompletionMatrix {
    cells: HashMap<(UserId, SurveyId), CompletionCell>,
}

impl CompletionMatrix {
    /// Build the matrix from the full user/survey/response collections.
    ///
    /// A response counts toward its actor: the evaluator for manager and
    /// teammate forms (falling back to the target when no distinct evaluator
    /// was recorded), the employee themselves for self/general forms.
    pub fn build(users: &[User], surveys: &[Survey], responses: &[Response]) -> Self {
        let mut submitted_targets: HashMap<(UserId, SurveyId), HashSet<UserId>> = HashMap::new();

        for response in responses {
            if !response.is_submitted() {
                continue;
            }
            let Some(survey) = surveys.iter().find(|survey| survey.id == response.survey) else {
                continue;
            };
            let actor = response.actor_for(survey.kind()).clone();
            submitted_targets
                .entry((actor, survey.id.clone()))
                .or_default()
                .insert(response.employee.clone());
        }

        let mut cells = HashMap::new();
        for user in users {
            for survey in surveys {
                let key = (user.id.clone(), survey.id.clone());
                let targets = submitted_targets.get(&key);
                cells.insert(key, cell_for(user, survey, users, targets));
            }
        }

        Self { cells }
    }

    pub fn cell(&self, user: &UserId, survey: &SurveyId) -> Option<CompletionCell> {
        self.cells.get(&(user.clone(), survey.clone())).copied()
    }

    pub fn cells(&self) -> &HashMap<(UserId, SurveyId), CompletionCell> {
        &self.cells
    }

    /// Rows for one user, in survey-collection order.
    pub fn rows_for(&self, user: &UserId, surveys: &[Survey]) -> Vec<CompletionEntry> {
        surveys
            .iter()
            .filter_map(|survey| {
                self.cell(user, &survey.id).map(|cell| CompletionEntry {
                    user_id: user.clone(),
                    survey_id: survey.id.clone(),
                    filled: cell.filled,
                    required: cell.required,
                })
            })
            .collect()
    }

    pub fn entries(&self) -> Vec<CompletionEntry> {
        let mut entries: Vec<CompletionEntry> = self
            .cells
            .iter()
            .map(|((user_id, survey_id), cell)| CompletionEntry {
                user_id: user_id.clone(),
                survey_id: survey_id.clone(),
                filled: cell.filled,
                required: cell.required,
            })
            .collect();
        entries.sort_by(|left, right| {
            (&left.user_id, &left.survey_id).cmp(&(&right.user_id, &right.survey_id))
        });
        entries
    }
}

fn cell_for(
    user: &User,
    survey: &Survey,
    users: &[User],
    submitted_targets: Option<&HashSet<UserId>>,
) -> CompletionCell {
    let has_target = |target: &UserId| -> bool {
        submitted_targets.is_some_and(|targets| targets.contains(target))
    };

    match survey.kind() {
        SurveyKind::General => CompletionCell {
            filled: usize::from(has_target(&user.id)),
            required: 1,
        },
        SurveyKind::ManagerForm => {
            let required_targets = superiors(user, users);
            CompletionCell {
                filled: required_targets
                    .iter()
                    .filter(|target| has_target(&target.id))
                    .count(),
                required: required_targets.len(),
            }
        }
        SurveyKind::TeammateForm => {
            let required_targets = teammates(user, users);
            CompletionCell {
                filled: required_targets
                    .iter()
                    .filter(|target| has_target(&target.id))
                    .count(),
                required: required_targets.len(),
            }
        }
    }
}
