//! Read-only computations over a league snapshot
//!
//! These back both the `LeagueManager` queries and the command line tool,
//! which works on snapshot files without any storage behind it.

use crate::config::RatingConfig;
use crate::error::Result;
use crate::league::storage::LeagueSnapshot;
use crate::ranking::{build_standings, RankingView, Standing, StandingsOptions};
use crate::rating::calculator::EloRatingCalculator;
use crate::rating::replay::{
    diverging_players, replay, DeltaSource, InitialRatings, ReplayOptions, ReplayOutcome,
};
use crate::types::PlayerId;
use tracing::{debug, warn};

/// Leaderboard for `view`.
///
/// The all-time view reads stored ratings directly. Monthly views replay the
/// month's games: the independent view from baseline with the monthly
/// k-factor, the accumulated view from each player's rating entering the
/// month with the regular k-factor. Monthly views only list players who
/// played in the month.
pub fn standings_for(
    snapshot: &LeagueSnapshot,
    view: RankingView,
    config: &RatingConfig,
) -> Result<Vec<Standing>> {
    let roster = snapshot.roster();

    let standings = match view {
        RankingView::AllTime => build_standings(
            &roster,
            |_| Some(config.starting_rating),
            StandingsOptions {
                low_confidence_threshold: config.low_confidence_threshold,
                include_inactive: true,
            },
        ),
        RankingView::MonthlyIndependent(_) => {
            let calculator = EloRatingCalculator::new(config.monthly_elo_config())?;
            let outcome = replay(
                &roster,
                &view.filter_games(&snapshot.games),
                &calculator,
                &ReplayOptions::default(),
            );
            monthly_standings(&outcome, config)
        }
        RankingView::MonthlyAccumulated(month) => {
            let calculator = EloRatingCalculator::new(config.elo_config())?;
            let options = ReplayOptions {
                delta_source: config.delta_source,
                initial: InitialRatings::CarryOver {
                    window_start: month.start(),
                },
            };
            let outcome = replay(
                &roster,
                &view.filter_games(&snapshot.games),
                &calculator,
                &options,
            );
            monthly_standings(&outcome, config)
        }
    };

    debug!("Built {} standings for {} view", standings.len(), view);
    Ok(standings)
}

fn monthly_standings(outcome: &ReplayOutcome, config: &RatingConfig) -> Vec<Standing> {
    build_standings(
        &outcome.roster,
        |id| outcome.initial_rating(id),
        StandingsOptions {
            low_confidence_threshold: config.monthly_low_confidence_threshold,
            include_inactive: false,
        },
    )
}

/// Replay the whole history from baseline with freshly computed deltas
pub fn recalculate(snapshot: &LeagueSnapshot, config: &RatingConfig) -> Result<ReplayOutcome> {
    let calculator = EloRatingCalculator::new(config.elo_config())?;
    Ok(replay(
        &snapshot.roster(),
        &snapshot.games,
        &calculator,
        &ReplayOptions {
            delta_source: DeltaSource::Recompute,
            initial: InitialRatings::Baseline,
        },
    ))
}

/// Ids of players whose stored record does not match a full replay
pub fn verify(snapshot: &LeagueSnapshot, config: &RatingConfig) -> Result<Vec<PlayerId>> {
    let stored = snapshot.roster();
    let outcome = recalculate(snapshot, config)?;
    let diverging = diverging_players(&stored, &outcome.roster);

    for player_id in &diverging {
        if let (Some(before), Some(after)) = (stored.get(player_id), outcome.roster.get(player_id)) {
            warn!(
                "Player {} diverges from replay: stored {} over {} games, replayed {} over {} games",
                player_id,
                before.current_rating,
                before.games_played,
                after.current_rating,
                after.games_played
            );
        }
    }

    Ok(diverging)
}
