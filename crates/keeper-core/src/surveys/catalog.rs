use super::domain::{Category, QuestionId, QuestionKind, Subcategory, Survey};
use tracing::warn;

/// A resolved, answerable question together with its classification hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuestion {
    pub id: QuestionId,
    pub name: String,
    /// Owning category name; empty for ad-hoc survey questions.
    pub category_name: String,
    pub kind: QuestionKind,
}

/// Flat, ordered list of the questions a survey actually asks, produced by
/// resolving its category references against the category/subcategory
/// collections.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: Vec<CatalogQuestion>,
}

impl QuestionCatalog {
    /// Resolve a survey's category references. Each reference is tried as a
    /// category id first and as an exact name when the id lookup fails.
    /// Unresolvable references contribute zero questions and never error;
    /// incremental data entry routinely leaves dangling references behind.
    ///
    /// A non-empty legacy `questions` array on the survey is concatenated
    /// after the category-derived questions, not substituted for them.
    pub fn resolve(
        survey: &Survey,
        categories: &[Category],
        subcategories: &[Subcategory],
    ) -> Self {
        let mut questions = Vec::new();

        for reference in &survey.categories {
            let category = categories
                .iter()
                .find(|category| category.id.0 == *reference)
                .or_else(|| categories.iter().find(|category| category.name == *reference));

            let Some(category) = category else {
                warn!(
                    survey = %survey.id.0,
                    reference,
                    "skipping unresolvable category reference"
                );
                continue;
            };

            for subcategory in subcategories
                .iter()
                .filter(|subcategory| subcategory.category == category.id)
            {
                questions.push(CatalogQuestion {
                    id: subcategory.id.clone(),
                    name: subcategory.name.clone(),
                    category_name: category.name.clone(),
                    kind: subcategory.kind,
                });
            }
        }

        for question in &survey.questions {
            questions.push(CatalogQuestion {
                id: question.id.clone(),
                name: question.text.clone(),
                category_name: String::new(),
                kind: question.kind,
            });
        }

        Self { questions }
    }

    pub fn questions(&self) -> &[CatalogQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
