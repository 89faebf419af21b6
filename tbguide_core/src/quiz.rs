//! Training quiz state machine and score classification.
//!
//! Sessions move `NotStarted → InProgress(question, score) → Finished(score)`.
//! Answering returns a one-shot [`PendingAdvance`] token; the caller fires it
//! after the configured delay. Firing is guarded against stale tokens, so a
//! token held across a restart is a harmless no-op.

use crate::bands::{lookup_band_or, Band};
use crate::QuizQuestion;

/// Phase of a quiz session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    InProgress {
        question: usize,
        score: u32,
        selected: Option<usize>,
    },
    Finished {
        score: u32,
    },
}

/// One-shot token for the scheduled question transition.
///
/// Only the `answer` that produced it can be advanced by it; fired against
/// any other state it does nothing.
#[derive(Clone, Copy, Debug)]
pub struct PendingAdvance {
    question: usize,
}

/// A quiz session over a fixed question list
#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    phase: QuizPhase,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            phase: QuizPhase::NotStarted,
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// The question awaiting an answer, if the session is in progress
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            QuizPhase::InProgress { question, .. } => self.questions.get(question),
            _ => None,
        }
    }

    /// Begin (or begin again) at the first question with a zero score
    pub fn start(&mut self) {
        self.phase = QuizPhase::InProgress {
            question: 0,
            score: 0,
            selected: None,
        };
        tracing::debug!("Quiz started: {} question(s)", self.questions.len());
    }

    /// Restart from scratch; equivalent to `start`
    pub fn restart(&mut self) {
        self.start();
    }

    /// Record an answer for the current question.
    ///
    /// A no-op when a selection already exists (double submissions are
    /// ignored) or when the session is not in progress. On success, returns
    /// the token that advances past this question.
    pub fn answer(&mut self, selected_index: usize) -> Option<PendingAdvance> {
        let QuizPhase::InProgress { question, score, selected } = &mut self.phase else {
            return None;
        };
        if selected.is_some() {
            tracing::debug!("Ignoring duplicate answer for question {}", question);
            return None;
        }

        *selected = Some(selected_index);
        let correct = self
            .questions
            .get(*question)
            .is_some_and(|q| q.correct == selected_index);
        if correct {
            *score += 1;
        }

        tracing::debug!(
            "Answered question {} with option {} ({})",
            question,
            selected_index,
            if correct { "correct" } else { "incorrect" }
        );

        Some(PendingAdvance { question: *question })
    }

    /// Whether the current question already has a recorded answer
    pub fn is_answered(&self) -> bool {
        matches!(
            self.phase,
            QuizPhase::InProgress { selected: Some(_), .. }
        )
    }

    /// Fire a scheduled advance.
    ///
    /// Transitions to the next question, or to `Finished` after the last one.
    /// Guarded: the session must still be in progress at the token's question
    /// with a recorded selection; otherwise the token is stale and nothing
    /// happens.
    pub fn fire(&mut self, pending: PendingAdvance) {
        match self.phase {
            QuizPhase::InProgress {
                question,
                score,
                selected: Some(_),
            } if question == pending.question => {
                if question + 1 < self.questions.len() {
                    self.phase = QuizPhase::InProgress {
                        question: question + 1,
                        score,
                        selected: None,
                    };
                } else {
                    self.phase = QuizPhase::Finished { score };
                    tracing::info!("Quiz finished: score {}/{}", score, self.questions.len());
                }
            }
            _ => {
                tracing::debug!(
                    "Dropping stale advance for question {}",
                    pending.question
                );
            }
        }
    }
}

// ============================================================================
// Score Classification
// ============================================================================

/// Tiered feedback for a finished quiz
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultTier {
    Excellent,
    Good,
    Review,
}

impl ResultTier {
    /// Feedback message shown with the final score
    pub fn message(&self) -> &'static str {
        match self {
            ResultTier::Excellent => "🎉 Excellent ! Vous maîtrisez bien la prise en charge.",
            ResultTier::Good => "👍 Bien ! Quelques révisions recommandées.",
            ResultTier::Review => "📚 Il est recommandé de revoir le guide.",
        }
    }
}

/// Score-ratio tiers, evaluated top down
const SCORE_TIERS: [Band<ResultTier>; 2] = [
    Band { min: 0.8, max: None, label: ResultTier::Excellent },
    Band { min: 0.6, max: None, label: ResultTier::Good },
];

/// Classify a final score into a feedback tier
pub fn classify_score(score: u32, total: usize) -> ResultTier {
    if total == 0 {
        return ResultTier::Review;
    }
    let ratio = score as f64 / total as f64;
    lookup_band_or(ratio, &SCORE_TIERS, ResultTier::Review)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_questions() -> Vec<QuizQuestion> {
        (0..3)
            .map(|i| QuizQuestion {
                question: format!("Question {}", i),
                options: vec!["A".into(), "B".into(), "C".into()],
                correct: 1,
                explanation: format!("Explication {}", i),
            })
            .collect()
    }

    #[test]
    fn test_session_starts_not_started() {
        let session = QuizSession::new(test_questions());
        assert_eq!(session.phase(), &QuizPhase::NotStarted);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_answer_before_start_is_noop() {
        let mut session = QuizSession::new(test_questions());
        assert!(session.answer(1).is_none());
        assert_eq!(session.phase(), &QuizPhase::NotStarted);
    }

    #[test]
    fn test_full_run_all_correct() {
        let mut session = QuizSession::new(test_questions());
        session.start();

        for _ in 0..3 {
            let pending = session.answer(1).expect("answer should be recorded");
            session.fire(pending);
        }

        assert_eq!(session.phase(), &QuizPhase::Finished { score: 3 });
    }

    #[test]
    fn test_incorrect_answers_do_not_score() {
        let mut session = QuizSession::new(test_questions());
        session.start();

        for _ in 0..3 {
            let pending = session.answer(0).unwrap();
            session.fire(pending);
        }

        assert_eq!(session.phase(), &QuizPhase::Finished { score: 0 });
    }

    #[test]
    fn test_double_answer_is_ignored() {
        let mut session = QuizSession::new(test_questions());
        session.start();

        let pending = session.answer(1).unwrap();
        // Second submission for the same question: ignored, score unchanged
        assert!(session.answer(1).is_none());
        assert!(session.answer(0).is_none());

        session.fire(pending);
        match session.phase() {
            QuizPhase::InProgress { question, score, .. } => {
                assert_eq!(*question, 1);
                assert_eq!(*score, 1);
            }
            other => panic!("unexpected phase {:?}", other),
        }
    }

    #[test]
    fn test_stale_advance_after_restart_is_noop() {
        let mut session = QuizSession::new(test_questions());
        session.start();

        let pending = session.answer(1).unwrap();
        session.restart();

        // The token belongs to the torn-down run; firing it must not move
        // or corrupt the fresh session.
        session.fire(pending);
        assert_eq!(
            session.phase(),
            &QuizPhase::InProgress { question: 0, score: 0, selected: None }
        );
    }

    #[test]
    fn test_fire_without_answer_is_noop() {
        let mut session = QuizSession::new(test_questions());
        session.start();

        let pending = session.answer(1).unwrap();
        session.fire(pending);
        // Same token again: the new current question has no selection yet
        session.fire(pending);

        match session.phase() {
            QuizPhase::InProgress { question, .. } => assert_eq!(*question, 1),
            other => panic!("unexpected phase {:?}", other),
        }
    }

    #[test]
    fn test_restart_resets_score() {
        let mut session = QuizSession::new(test_questions());
        session.start();
        let pending = session.answer(1).unwrap();
        session.fire(pending);

        session.restart();
        assert_eq!(
            session.phase(),
            &QuizPhase::InProgress { question: 0, score: 0, selected: None }
        );
    }

    #[test]
    fn test_classify_score_tiers() {
        // 5/6 ≈ 0.833 → Excellent
        assert_eq!(classify_score(5, 6), ResultTier::Excellent);
        assert_eq!(classify_score(6, 6), ResultTier::Excellent);
        // 4/6 ≈ 0.667 → Good
        assert_eq!(classify_score(4, 6), ResultTier::Good);
        // Exact boundaries are inclusive
        assert_eq!(classify_score(4, 5), ResultTier::Excellent);
        assert_eq!(classify_score(3, 5), ResultTier::Good);
        // Below 0.6 → Review
        assert_eq!(classify_score(2, 6), ResultTier::Review);
        assert_eq!(classify_score(0, 6), ResultTier::Review);
    }

    #[test]
    fn test_classify_empty_quiz() {
        assert_eq!(classify_score(0, 0), ResultTier::Review);
    }

    #[test]
    fn test_tier_messages() {
        assert!(ResultTier::Excellent.message().contains("Excellent"));
        assert!(ResultTier::Good.message().contains("révisions"));
        assert!(ResultTier::Review.message().contains("revoir le guide"));
    }
}
