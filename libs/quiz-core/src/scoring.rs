//! Quiz scoring.

use crate::types::{Question, Score};

/// Score an attempt.
///
/// `answers[i]` is compared against `questions[i].correct`; entries past the
/// shorter of the two sequences are ignored. `total` is always the number
/// of questions.
pub fn score(answers: &[i64], questions: &[Question]) -> Score {
    let correct = answers
        .iter()
        .zip(questions)
        .filter(|(answer, question)| question.is_correct(**answer))
        .count();

    let total = questions.len();
    let percentage = if total == 0 {
        0.0
    } else {
        round_one_decimal(correct as f64 * 100.0 / total as f64)
    };

    Score {
        score: correct as u32,
        total: total as u32,
        percentage,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNANSWERED;
    use pretty_assertions::assert_eq;

    fn questions(corrects: &[usize]) -> Vec<Question> {
        corrects
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Question::new(
                    format!("Q{}", i + 1),
                    vec!["a".into(), "b".into(), "c".into()],
                    c,
                )
            })
            .collect()
    }

    #[test]
    fn single_correct_answer() {
        let qs = vec![Question::new(
            "1+1?",
            vec!["1".into(), "2".into(), "3".into()],
            1,
        )];
        assert_eq!(
            score(&[1], &qs),
            Score {
                score: 1,
                total: 1,
                percentage: 100.0
            }
        );
        assert_eq!(
            score(&[UNANSWERED], &qs),
            Score {
                score: 0,
                total: 1,
                percentage: 0.0
            }
        );
    }

    #[test]
    fn all_unanswered_scores_zero() {
        let qs = questions(&[0, 1, 2]);
        assert_eq!(score(&[UNANSWERED; 3], &qs).score, 0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        let qs = questions(&[0, 0, 0]);
        let result = score(&[0, 1, 2], &qs);
        assert_eq!(result.score, 1);
        assert_eq!(result.percentage, 33.3);

        let result = score(&[0, 0, 2], &qs);
        assert_eq!(result.percentage, 66.7);
    }

    #[test]
    fn mismatched_lengths_are_tolerated() {
        let qs = questions(&[0, 1]);
        assert_eq!(score(&[0], &qs).score, 1);
        assert_eq!(score(&[0], &qs).total, 2);
        assert_eq!(score(&[0, 1, 2, 0], &qs).score, 2);
    }

    #[test]
    fn no_questions_scores_zero_percent() {
        let result = score(&[], &[]);
        assert_eq!(result.total, 0);
        assert_eq!(result.percentage, 0.0);
    }
}
