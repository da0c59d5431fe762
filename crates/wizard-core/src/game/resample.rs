//! Reconstruction of a full world consistent with one seat's information.
//!
//! Only the other seats' hands are hidden from a viewpoint player. The
//! resampler re-drives the chance prefix of the history: the viewpoint's own
//! deals are replayed verbatim, seats that already played cards must have
//! been dealt them (fed back in reverse play order so the replayed tricks
//! stay feasible), and every remaining slot is drawn from the pool of
//! unseen cards weighted by multiplicity. Trump, guesses and plays are
//! public and replay unchanged.

use crate::framework::{PlayerId, State};
use crate::model::card::DISTINCT_CARDS;
use crate::model::round::RoundError;
use rand::Rng;

use super::state::WizardState;

pub(super) fn resample_from_infostate<'g, R: Rng + ?Sized>(
    state: &WizardState<'g>,
    player: usize,
    rng: &mut R,
) -> Result<WizardState<'g>, RoundError> {
    let round = state.round();
    let num_players = round.num_players();
    let mut clone = WizardState::new(state.game());

    // Pool of identities hidden from the viewpoint: the undealt deck plus
    // every other seat's current hand.
    let mut pool = *round.deck().card_counts();
    for seat in 0..num_players {
        if seat == player {
            continue;
        }
        for (index, &count) in round.hand(seat).counts().iter().enumerate() {
            pool[index] += count;
        }
    }

    // Cards each seat is known to have held because it played them, queued
    // back to front.
    let mut known_plays: Vec<Vec<usize>> = vec![Vec::new(); num_players];
    for play in round.history().iter().chain(round.table().plays()) {
        known_plays[play.seat].push(play.card.to_index());
    }

    let history = state.history();
    let deal_prefix = round.cards_dealt();
    let mut deal_to = round.start_player();
    for &(actor, action) in history.iter().take(deal_prefix) {
        debug_assert_eq!(actor, PlayerId::Chance);
        if deal_to == player {
            clone.apply_action(action)?;
        } else if let Some(index) = known_plays[deal_to].pop() {
            clone.apply_action(index)?;
        } else {
            clone.apply_action(draw_weighted(&mut pool, rng))?;
        }
        deal_to = if deal_to + 1 >= num_players {
            0
        } else {
            deal_to + 1
        };
    }

    // Trump, guesses and plays are public; replay them verbatim.
    for &(_, action) in history.iter().skip(deal_prefix) {
        clone.apply_replay_action(action)?;
    }
    Ok(clone)
}

/// Weighted draw over the pool multiset; the chosen count is decremented.
fn draw_weighted<R: Rng + ?Sized>(pool: &mut [u8; DISTINCT_CARDS], rng: &mut R) -> usize {
    let total: u32 = pool.iter().map(|&count| count as u32).sum();
    debug_assert!(total > 0, "card pool exhausted during resampling");
    let mut choice = rng.gen_range(0.0..total as f64);
    for (index, count) in pool.iter_mut().enumerate() {
        if *count == 0 {
            continue;
        }
        let weight = *count as f64;
        if choice <= weight {
            *count -= 1;
            return index;
        }
        choice -= weight;
    }
    // floating-point edge: fall back to the last populated identity
    let index = pool
        .iter()
        .rposition(|&count| count > 0)
        .expect("card pool exhausted");
    pool[index] -= 1;
    index
}
