//! Termination predicate evaluation.

use ludi_core::TerminationRule;

use crate::game::Game;

/// Evaluate one predicate against the current population and clock.
/// Returns whether it fired and, if so, the win flag it reports.
pub(crate) fn evaluate(rule: &TerminationRule, game: &Game) -> (bool, Option<bool>) {
    match rule {
        TerminationRule::SpriteCounter { stype, limit, win } => {
            done(game.num_sprites(stype) as i64 <= *limit, *win)
        }
        TerminationRule::MultiSpriteCounter {
            stype1,
            stype2,
            limit,
            win,
        } => done(
            game.num_sprites(stype1) as i64 <= *limit
                || game.num_sprites(stype2) as i64 <= *limit,
            *win,
        ),
        TerminationRule::Timeout { limit, win } => done(game.time() >= *limit, *win),
    }
}

fn done(fired: bool, win: bool) -> (bool, Option<bool>) {
    if fired {
        (true, Some(win))
    } else {
        (false, None)
    }
}
