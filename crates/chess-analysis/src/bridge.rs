//! The seam between the board and whatever scores positions.

use crate::engine::EngineError;
use crate::Evaluation;

/// Scores a position given as FEN, from white's point of view.
pub trait Evaluator {
    fn evaluate(&mut self, fen: &str) -> Result<Evaluation, EngineError>;
}

impl<E: Evaluator + ?Sized> Evaluator for &mut E {
    fn evaluate(&mut self, fen: &str) -> Result<Evaluation, EngineError> {
        (**self).evaluate(fen)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&mut self, fen: &str) -> Result<Evaluation, EngineError> {
        (**self).evaluate(fen)
    }
}

/// An absent evaluator scores every position as neutral.
impl<E: Evaluator> Evaluator for Option<E> {
    fn evaluate(&mut self, fen: &str) -> Result<Evaluation, EngineError> {
        match self {
            Some(evaluator) => evaluator.evaluate(fen),
            None => Ok(Evaluation::NEUTRAL),
        }
    }
}

/// Evaluates `fen`, falling back to [`Evaluation::NEUTRAL`] on any failure.
///
/// The failure is logged and never reaches the caller.
pub fn evaluate_or_neutral<E: Evaluator + ?Sized>(evaluator: &mut E, fen: &str) -> Evaluation {
    match evaluator.evaluate(fen) {
        Ok(evaluation) => evaluation,
        Err(err) => {
            tracing::warn!(error = %err, fen, "evaluation failed, using neutral score");
            Evaluation::NEUTRAL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Fixed(Evaluation);

    impl Evaluator for Fixed {
        fn evaluate(&mut self, _fen: &str) -> Result<Evaluation, EngineError> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl Evaluator for Broken {
        fn evaluate(&mut self, _fen: &str) -> Result<Evaluation, EngineError> {
            Err(EngineError::Timeout(Duration::from_millis(1)))
        }
    }

    const FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

    #[test]
    fn passes_through_successful_scores() {
        let mut evaluator = Fixed(Evaluation::centipawns(77));
        assert_eq!(
            evaluate_or_neutral(&mut evaluator, FEN),
            Evaluation::centipawns(77)
        );
    }

    #[test]
    fn failures_become_neutral() {
        assert_eq!(evaluate_or_neutral(&mut Broken, FEN), Evaluation::NEUTRAL);
    }

    #[test]
    fn missing_evaluator_is_neutral() {
        let mut none: Option<Fixed> = None;
        assert_eq!(evaluate_or_neutral(&mut none, FEN), Evaluation::NEUTRAL);
        let mut some = Some(Fixed(Evaluation::centipawns(-5)));
        assert_eq!(
            evaluate_or_neutral(&mut some, FEN),
            Evaluation::centipawns(-5)
        );
    }

    #[test]
    fn works_through_trait_objects() {
        let mut boxed: Box<dyn Evaluator> = Box::new(Broken);
        assert_eq!(evaluate_or_neutral(&mut boxed, FEN), Evaluation::NEUTRAL);
        let dynamic: &mut dyn Evaluator = &mut Fixed(Evaluation::centipawns(3));
        assert_eq!(evaluate_or_neutral(dynamic, FEN), Evaluation::centipawns(3));
    }
}
