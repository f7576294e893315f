use rand::Rng;

use crate::model::{Question, QuestionCatalog, QuizFilter};
use crate::shuffle::sample;

use super::QuizError;

/// Pick the questions for one session.
///
/// Filters the catalog, shuffles the matches once and keeps at most `count`.
/// With fewer matches than `count`, every match is used.
///
/// # Errors
///
/// Returns `QuizError::EmptyCatalog` when the selection would be empty.
pub fn select_questions<R>(
    catalog: &QuestionCatalog,
    filter: &QuizFilter,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Question>, QuizError>
where
    R: Rng + ?Sized,
{
    let matching: Vec<Question> = catalog.matching(filter).into_iter().cloned().collect();
    let selected = sample(matching, count, rng);
    if selected.is_empty() {
        return Err(QuizError::EmptyCatalog { filter: *filter });
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::sample_catalog;
    use crate::model::{Category, CategoryFilter, Difficulty, DifficultyFilter, QuestionId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn programming_hard() -> QuizFilter {
        QuizFilter::new(
            CategoryFilter::Only(Category::Programming),
            DifficultyFilter::Only(Difficulty::Hard),
        )
    }

    #[test]
    fn fewer_matches_than_requested_returns_permutation_of_matches() {
        let catalog = sample_catalog();
        let mut rng = StdRng::seed_from_u64(11);

        let picked = select_questions(&catalog, &programming_hard(), 5, &mut rng).unwrap();

        let mut ids: Vec<u32> = picked.iter().map(|q| q.id().value()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![5, 6, 7]);
    }

    #[test]
    fn truncates_to_requested_count() {
        let catalog = sample_catalog();
        let mut rng = StdRng::seed_from_u64(5);

        let picked = select_questions(&catalog, &QuizFilter::all(), 4, &mut rng).unwrap();

        assert_eq!(picked.len(), 4);
        let mut ids: Vec<QuestionId> = picked.iter().map(Question::id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn order_is_randomized_across_seeds() {
        let catalog = sample_catalog();
        let orders: Vec<Vec<QuestionId>> = (0..8)
            .map(|seed| {
                select_questions(
                    &catalog,
                    &QuizFilter::all(),
                    9,
                    &mut StdRng::seed_from_u64(seed),
                )
                .unwrap()
                .iter()
                .map(Question::id)
                .collect()
            })
            .collect();

        assert!(orders.iter().any(|order| order != &orders[0]));
    }

    #[test]
    fn empty_selection_is_an_error() {
        let catalog = sample_catalog();
        let filter = QuizFilter::new(
            CategoryFilter::Only(Category::NonTechnical),
            DifficultyFilter::All,
        );
        let err = select_questions(&catalog, &filter, 5, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, QuizError::EmptyCatalog { .. }));

        let zero = select_questions(&catalog, &QuizFilter::all(), 0, &mut StdRng::seed_from_u64(1));
        assert!(zero.is_err());
    }
}
