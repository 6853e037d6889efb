//! Per-student quiz progress.
//!
//! Each quiz a student touches has its own [`QuizProgress`]; a quiz with no
//! entry has not been started. Completion is split in two so the caller can
//! persist the result between computing it and caching it:
//!
//! ```text
//! start ─▶ InProgress ──pending_attempt()──▶ (persist) ──complete()──▶ Completed
//!              ▲  │ submit_answer / goto                                   │
//!              ├──┘                                                        │
//!              ├─────────── submit_answer (answers carried over) ◀─────────┤
//!              └──────────────── start (answers discarded) ◀───────────────┘
//! ```
//!
//! Only `start` forgets recorded answers.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::scoring;
use crate::types::{Question, ReviewItem, Score, UNANSWERED};

/// Navigation directive submitted alongside an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Prev,
    #[default]
    Next,
    Submit,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prev" => Ok(Self::Prev),
            "next" => Ok(Self::Next),
            "submit" => Ok(Self::Submit),
            other => Err(format!("unknown action: {other}")),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Submit => "submit",
        })
    }
}

/// Where the student should go after submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Question(usize),
    Complete,
}

/// A scored attempt that has not been cached yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// One entry per question, `UNANSWERED` where nothing was recorded.
    pub answers: Vec<i64>,
    pub score: Score,
}

/// Snapshot kept after completion for the review page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedAttempt {
    pub result_id: i64,
    pub answers: Vec<i64>,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuizProgress {
    InProgress {
        current: usize,
        answers: BTreeMap<usize, i64>,
    },
    Completed(CompletedAttempt),
}

impl CompletedAttempt {
    /// Answers keyed by question index, leaving out unanswered ones.
    fn recorded_answers(&self) -> BTreeMap<usize, i64> {
        self.answers
            .iter()
            .enumerate()
            .filter(|&(_, &answer)| answer != UNANSWERED)
            .map(|(index, &answer)| (index, answer))
            .collect()
    }
}

impl QuizProgress {
    fn fresh() -> Self {
        Self::InProgress {
            current: 0,
            answers: BTreeMap::new(),
        }
    }
}

/// All quiz progress belonging to one student session, keyed by quiz id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizSessions {
    quizzes: HashMap<i64, QuizProgress>,
}

impl QuizSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self, quiz_id: i64) -> Option<&QuizProgress> {
        self.quizzes.get(&quiz_id)
    }

    /// Begin (or restart) a quiz, discarding any earlier progress.
    pub fn start(&mut self, quiz_id: i64) {
        self.quizzes.insert(quiz_id, QuizProgress::fresh());
    }

    /// Move to `index`, clamping anything outside `[0, total)` to the first question.
    pub fn goto(&mut self, quiz_id: i64, index: i64, total: usize) -> usize {
        let index = clamp_index(index, total).unwrap_or(0);
        if let Some(QuizProgress::InProgress { current, .. }) = self.quizzes.get_mut(&quiz_id) {
            *current = index;
        }
        index
    }

    /// Answer previously recorded for a question, if any.
    pub fn answer_for(&self, quiz_id: i64, index: usize) -> Option<i64> {
        match self.quizzes.get(&quiz_id)? {
            QuizProgress::InProgress { answers, .. } => answers.get(&index).copied(),
            QuizProgress::Completed(done) => done
                .answers
                .get(index)
                .copied()
                .filter(|&answer| answer != UNANSWERED),
        }
    }

    /// Record an answer and work out where to go next.
    ///
    /// A quiz that was never started begins here. A completed quiz goes
    /// back in progress with its earlier answers kept. An out-of-range
    /// `index` records nothing and sends the student back to the first
    /// question.
    pub fn submit_answer(
        &mut self,
        quiz_id: i64,
        total: usize,
        index: i64,
        option: Option<i64>,
        action: Action,
    ) -> Navigation {
        let progress = self
            .quizzes
            .entry(quiz_id)
            .or_insert_with(QuizProgress::fresh);
        if let QuizProgress::Completed(done) = &*progress {
            let answers = done.recorded_answers();
            *progress = QuizProgress::InProgress { current: 0, answers };
        }
        let QuizProgress::InProgress { current, answers } = progress else {
            unreachable!("completed progress was reopened above");
        };

        let Some(index) = clamp_index(index, total) else {
            *current = 0;
            return Navigation::Question(0);
        };

        if let Some(option) = option {
            answers.insert(index, option);
        }

        let next = match action {
            Action::Prev if index > 0 => Navigation::Question(index - 1),
            Action::Next if index + 1 < total => Navigation::Question(index + 1),
            Action::Submit | Action::Next => Navigation::Complete,
            Action::Prev => Navigation::Question(index),
        };
        if let Navigation::Question(q) = next {
            *current = q;
        }
        next
    }

    /// Score the answers recorded so far without changing any state.
    ///
    /// Questions with no recorded answer count as `UNANSWERED`. A quiz that
    /// is already completed is scored again from its cached answers.
    pub fn pending_attempt(&self, quiz_id: i64, questions: &[Question]) -> Attempt {
        let answers: Vec<i64> = (0..questions.len())
            .map(|i| self.answer_for(quiz_id, i).unwrap_or(UNANSWERED))
            .collect();
        let score = scoring::score(&answers, questions);
        Attempt { answers, score }
    }

    /// Cache a persisted attempt, moving the quiz to `Completed`.
    pub fn complete(&mut self, quiz_id: i64, attempt: Attempt, result_id: i64) -> &CompletedAttempt {
        let completed = CompletedAttempt {
            result_id,
            answers: attempt.answers,
            score: attempt.score,
        };
        self.quizzes
            .insert(quiz_id, QuizProgress::Completed(completed));
        match self.quizzes.get(&quiz_id) {
            Some(QuizProgress::Completed(c)) => c,
            _ => unreachable!("entry was just set to Completed"),
        }
    }

    pub fn completed(&self, quiz_id: i64) -> Option<&CompletedAttempt> {
        match self.quizzes.get(&quiz_id)? {
            QuizProgress::Completed(c) => Some(c),
            QuizProgress::InProgress { .. } => None,
        }
    }

    /// Pair each question with the cached answer for the completed attempt.
    pub fn review(
        &self,
        quiz_id: i64,
        questions: &[Question],
    ) -> Result<Vec<ReviewItem>, SessionError> {
        let completed = self
            .completed(quiz_id)
            .ok_or(SessionError::NotCompleted { quiz_id })?;

        Ok(questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let user_answer = completed.answers.get(i).copied().unwrap_or(UNANSWERED);
                ReviewItem {
                    number: i + 1,
                    question: question.clone(),
                    user_answer,
                    correct_answer: question.correct,
                    is_correct: question.is_correct(user_answer),
                }
            })
            .collect())
    }
}

fn clamp_index(index: i64, total: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const QUIZ: i64 = 7;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question::new(format!("Q{i}"), vec!["a".into(), "b".into()], 1))
            .collect()
    }

    #[test]
    fn start_initializes_first_question() {
        let mut sessions = QuizSessions::new();
        sessions.start(QUIZ);
        assert_eq!(
            sessions.progress(QUIZ),
            Some(&QuizProgress::InProgress {
                current: 0,
                answers: BTreeMap::new()
            })
        );
    }

    #[test]
    fn restart_discards_progress() {
        let mut sessions = QuizSessions::new();
        sessions.start(QUIZ);
        sessions.submit_answer(QUIZ, 3, 0, Some(1), Action::Next);
        sessions.start(QUIZ);
        assert_eq!(sessions.answer_for(QUIZ, 0), None);
    }

    #[test]
    fn goto_clamps_out_of_range() {
        let mut sessions = QuizSessions::new();
        sessions.start(QUIZ);
        assert_eq!(sessions.goto(QUIZ, 2, 3), 2);
        assert_eq!(sessions.goto(QUIZ, -5, 3), 0);
        assert_eq!(sessions.goto(QUIZ, 3, 3), 0);
    }

    #[test]
    fn navigation_follows_action() {
        let mut sessions = QuizSessions::new();
        sessions.start(QUIZ);
        assert_eq!(
            sessions.submit_answer(QUIZ, 3, 0, Some(1), Action::Next),
            Navigation::Question(1)
        );
        assert_eq!(
            sessions.submit_answer(QUIZ, 3, 1, None, Action::Prev),
            Navigation::Question(0)
        );
        assert_eq!(
            sessions.submit_answer(QUIZ, 3, 0, None, Action::Prev),
            Navigation::Question(0)
        );
        assert_eq!(
            sessions.submit_answer(QUIZ, 3, 2, Some(0), Action::Next),
            Navigation::Complete
        );
        assert_eq!(
            sessions.submit_answer(QUIZ, 3, 1, None, Action::Submit),
            Navigation::Complete
        );
    }

    #[test]
    fn answers_can_be_revised() {
        let mut sessions = QuizSessions::new();
        sessions.start(QUIZ);
        sessions.submit_answer(QUIZ, 2, 0, Some(0), Action::Next);
        sessions.submit_answer(QUIZ, 2, 0, Some(1), Action::Next);
        assert_eq!(sessions.answer_for(QUIZ, 0), Some(1));
    }

    #[test]
    fn out_of_range_submission_records_nothing() {
        let mut sessions = QuizSessions::new();
        sessions.start(QUIZ);
        assert_eq!(
            sessions.submit_answer(QUIZ, 2, 5, Some(1), Action::Next),
            Navigation::Question(0)
        );
        assert_eq!(sessions.answer_for(QUIZ, 5), None);
    }

    #[test]
    fn single_question_next_completes() {
        let qs = questions(1);
        let mut sessions = QuizSessions::new();
        sessions.start(QUIZ);
        let nav = sessions.submit_answer(QUIZ, qs.len(), 0, Some(1), Action::Next);
        assert_eq!(nav, Navigation::Complete);

        let attempt = sessions.pending_attempt(QUIZ, &qs);
        assert_eq!(attempt.answers, vec![1]);
        assert_eq!(attempt.score.score, 1);

        let completed = sessions.complete(QUIZ, attempt, 42);
        assert_eq!(completed.result_id, 42);
        assert!(sessions.completed(QUIZ).is_some());
    }

    #[test]
    fn unanswered_questions_become_minus_one() {
        let qs = questions(3);
        let mut sessions = QuizSessions::new();
        sessions.start(QUIZ);
        sessions.submit_answer(QUIZ, 3, 1, Some(1), Action::Next);
        let attempt = sessions.pending_attempt(QUIZ, &qs);
        assert_eq!(attempt.answers, vec![UNANSWERED, 1, UNANSWERED]);
        assert_eq!(attempt.score.score, 1);
    }

    #[test]
    fn pending_attempt_without_start_is_all_unanswered() {
        let sessions = QuizSessions::new();
        let attempt = sessions.pending_attempt(QUIZ, &questions(2));
        assert_eq!(attempt.answers, vec![UNANSWERED, UNANSWERED]);
        assert_eq!(attempt.score.percentage, 0.0);
    }

    #[test]
    fn review_requires_completion() {
        let qs = questions(2);
        let mut sessions = QuizSessions::new();
        assert_eq!(
            sessions.review(QUIZ, &qs),
            Err(SessionError::NotCompleted { quiz_id: QUIZ })
        );
        sessions.start(QUIZ);
        assert!(sessions.review(QUIZ, &qs).is_err());
    }

    #[test]
    fn review_pairs_answers_with_correct_index() {
        let qs = questions(2);
        let mut sessions = QuizSessions::new();
        sessions.start(QUIZ);
        sessions.submit_answer(QUIZ, 2, 0, Some(1), Action::Submit);
        let attempt = sessions.pending_attempt(QUIZ, &qs);
        sessions.complete(QUIZ, attempt, 1);

        let review = sessions.review(QUIZ, &qs).unwrap();
        assert_eq!(review.len(), 2);
        assert_eq!(review[0].number, 1);
        assert!(review[0].is_correct);
        assert_eq!(review[1].user_answer, UNANSWERED);
        assert!(!review[1].is_correct);
    }

    #[test]
    fn resubmitting_after_completion_keeps_earlier_answers() {
        let qs = questions(2);
        let mut sessions = QuizSessions::new();
        sessions.start(QUIZ);
        sessions.submit_answer(QUIZ, 2, 0, Some(1), Action::Next);
        sessions.submit_answer(QUIZ, 2, 1, Some(1), Action::Next);
        let attempt = sessions.pending_attempt(QUIZ, &qs);
        sessions.complete(QUIZ, attempt, 1);

        assert_eq!(
            sessions.submit_answer(QUIZ, 2, 1, Some(1), Action::Next),
            Navigation::Complete
        );
        assert!(sessions.completed(QUIZ).is_none());

        let attempt = sessions.pending_attempt(QUIZ, &qs);
        assert_eq!(attempt.answers, vec![1, 1]);
        assert_eq!(attempt.score.score, 2);
    }

    #[test]
    fn unanswered_questions_stay_unanswered_after_reopening() {
        let qs = questions(3);
        let mut sessions = QuizSessions::new();
        sessions.start(QUIZ);
        sessions.submit_answer(QUIZ, 3, 2, Some(0), Action::Submit);
        let attempt = sessions.pending_attempt(QUIZ, &qs);
        sessions.complete(QUIZ, attempt, 1);

        sessions.submit_answer(QUIZ, 3, 0, Some(1), Action::Next);
        assert_eq!(sessions.answer_for(QUIZ, 0), Some(1));
        assert_eq!(sessions.answer_for(QUIZ, 1), None);
        assert_eq!(sessions.answer_for(QUIZ, 2), Some(0));
    }

    #[test]
    fn completed_quiz_can_be_scored_again() {
        let qs = questions(2);
        let mut sessions = QuizSessions::new();
        sessions.start(QUIZ);
        sessions.submit_answer(QUIZ, 2, 1, Some(1), Action::Submit);
        let first = sessions.pending_attempt(QUIZ, &qs);
        sessions.complete(QUIZ, first.clone(), 1);

        assert_eq!(sessions.answer_for(QUIZ, 1), Some(1));
        assert_eq!(sessions.pending_attempt(QUIZ, &qs), first);
    }

    #[test]
    fn quizzes_are_isolated() {
        let mut sessions = QuizSessions::new();
        sessions.start(1);
        sessions.start(2);
        sessions.submit_answer(1, 2, 0, Some(1), Action::Next);
        assert_eq!(sessions.answer_for(1, 0), Some(1));
        assert_eq!(sessions.answer_for(2, 0), None);
    }

    #[test]
    fn action_parsing() {
        assert_eq!("prev".parse::<Action>().unwrap(), Action::Prev);
        assert_eq!("submit".parse::<Action>().unwrap(), Action::Submit);
        assert!("jump".parse::<Action>().is_err());
        assert_eq!(Action::default(), Action::Next);
    }
}
