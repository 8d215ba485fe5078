use keeper_core::surveys::{
    AssignmentType, Category, CategoryId, DirectoryRepository, QuestionId, QuestionKind,
    RepositoryError, Response, Role, Subcategory, Survey, SurveyId, SurveyStatus, User, UserId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Directory backed by process memory. The org collections are fixed at
/// startup; responses mutate through the upsert path.
#[derive(Default)]
pub(crate) struct InMemoryDirectory {
    users: Vec<User>,
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    surveys: Vec<Survey>,
    responses: Mutex<Vec<Response>>,
}

impl InMemoryDirectory {
    pub(crate) fn with_data(
        users: Vec<User>,
        categories: Vec<Category>,
        subcategories: Vec<Subcategory>,
        surveys: Vec<Survey>,
    ) -> Self {
        Self {
            users,
            categories,
            subcategories,
            surveys,
            responses: Mutex::new(Vec::new()),
        }
    }
}

impl DirectoryRepository for InMemoryDirectory {
    fn users(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.clone())
    }

    fn user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.iter().find(|user| user.id == *id).cloned())
    }

    fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.categories.clone())
    }

    fn subcategories(&self) -> Result<Vec<Subcategory>, RepositoryError> {
        Ok(self.subcategories.clone())
    }

    fn surveys(&self) -> Result<Vec<Survey>, RepositoryError> {
        Ok(self.surveys.clone())
    }

    fn survey(&self, id: &SurveyId) -> Result<Option<Survey>, RepositoryError> {
        Ok(self.surveys.iter().find(|survey| survey.id == *id).cloned())
    }

    fn responses(&self) -> Result<Vec<Response>, RepositoryError> {
        Ok(self
            .responses
            .lock()
            .expect("response mutex poisoned")
            .clone())
    }

    fn upsert_response(&self, response: Response) -> Result<Response, RepositoryError> {
        let mut guard = self.responses.lock().expect("response mutex poisoned");
        guard.retain(|existing| {
            existing.survey != response.survey || existing.employee != response.employee
        });
        guard.push(response.clone());
        Ok(response)
    }
}

fn seed_user(id: &str, name: &str, role: Role, department: Option<&str>, kpi: f64) -> User {
    User {
        id: UserId(id.to_string()),
        name: name.to_string(),
        email: format!("{id}@dovec.example"),
        role,
        department: department.map(str::to_string),
        departments: Vec::new(),
        kpi,
    }
}

fn seed_survey(id: &str, title: &str, categories: &[&str]) -> Survey {
    Survey {
        id: SurveyId(id.to_string()),
        title: title.to_string(),
        categories: categories.iter().map(|name| name.to_string()).collect(),
        status: SurveyStatus::Active,
        questions: Vec::new(),
        assignment_type: AssignmentType::All,
        assigned_departments: Vec::new(),
        assigned_users: Vec::new(),
        assigned_roles: Vec::new(),
        start_date: None,
        end_date: None,
    }
}

/// Seed organization used by both `serve` and `demo`: two departments, the
/// full role ladder, and the three standard survey families.
pub(crate) fn seed_directory() -> InMemoryDirectory {
    let categories = vec![
        ("cat-pot", "Potential"),
        ("cat-cul", "Culture Harmony"),
        ("cat-team", "Team Effect"),
        ("cat-exec", "Executive Observation"),
    ];
    let questions = vec![
        ("q-pot-1", "Potential for growth", "cat-pot"),
        ("q-pot-2", "Learning agility", "cat-pot"),
        ("q-cul-1", "Alignment with company values", "cat-cul"),
        ("q-team-1", "Collaboration within the team", "cat-team"),
        ("q-team-2", "Support for teammates", "cat-team"),
        ("q-exec-1", "Delivery reliability", "cat-exec"),
    ];

    InMemoryDirectory::with_data(
        vec![
            seed_user("admin", "System Admin", Role::Admin, None, 0.0),
            seed_user("aylin", "Aylin Demir", Role::Director, Some("Satış"), 95.0),
            seed_user("kerem", "Kerem Aksoy", Role::Coordinator, Some("Satış"), 88.0),
            seed_user("mert", "Mert Yılmaz", Role::Manager, Some("Satış"), 85.0),
            seed_user("elif", "Elif Kaya", Role::Employee, Some("Satış"), 80.0),
            seed_user("deniz", "Deniz Çelik", Role::Employee, Some("Satış"), 72.0),
            seed_user("zeynep", "Zeynep Arslan", Role::Manager, Some("Mühendislik"), 90.0),
            seed_user("can", "Can Öztürk", Role::Employee, Some("Mühendislik"), 76.0),
        ],
        categories
            .into_iter()
            .map(|(id, name)| Category {
                id: CategoryId(id.to_string()),
                name: name.to_string(),
                parent: None,
            })
            .collect(),
        questions
            .into_iter()
            .map(|(id, name, category)| Subcategory {
                id: QuestionId(id.to_string()),
                name: name.to_string(),
                category: CategoryId(category.to_string()),
                kind: QuestionKind::Rating { min: 1, max: 5 },
            })
            .collect(),
        vec![
            seed_survey(
                "keeper-2025",
                "Keeper Evaluation 2025",
                &[
                    "Potential",
                    "Culture Harmony",
                    "Team Effect",
                    "Executive Observation",
                ],
            ),
            seed_survey("manager-form-2025", "Yönetici Değerlendirme Formu", &[]),
            seed_survey(
                "teammate-form-2025",
                "Takım Arkadaşı Değerlendirme Formu",
                &[],
            ),
        ],
    )
}
