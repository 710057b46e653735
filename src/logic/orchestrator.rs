//! Round orchestrator: replay reported rounds, generate the rest, assign first move.

use crate::config::EngineConfig;
use crate::ingest::{EntrantRow, FixedPairingRow, ResultRow, RoundRow};
use crate::logic::report::{pairing_table, standings_table, summary_line, PairingRow, StandingsRow};
use crate::logic::{
    fixed, pair_charlottesville, pair_clustered_quads, pair_distributed_quads, pair_evans_quads,
    pair_king_of_the_hill, pair_queen_of_the_hill, pair_round_robin, pair_swiss, pair_swiss_initial,
    standings_as_of, Ledger, Matcher, RepeatTracker,
};
use crate::models::{
    is_bye, Pairing, PairingFormat, Player, RoundPlan, RoundSpec, Roster, TournamentError,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Everything needed to compute one tournament: results, roster, plan, settings.
#[derive(Clone, Debug)]
pub struct Tournament {
    pub ledger: Ledger,
    pub roster: Roster,
    pub plan: RoundPlan,
    pub config: EngineConfig,
}

/// State carried from round to round. Rounds must be fed in order.
#[derive(Clone, Debug, Default)]
pub struct PairingContext {
    pub repeats: RepeatTracker,
    /// First moves handed out by round-robin and Charlottesville rounds in this run.
    pub rotation_starts: HashMap<String, u32>,
}

/// Pairings for one round, replayed or generated.
#[derive(Clone, Debug, Serialize)]
pub struct RoundPairings {
    pub round: u32,
    /// None for replayed rounds.
    pub format: Option<PairingFormat>,
    pub replayed: bool,
    pub pairings: Vec<Pairing>,
    pub table: Vec<PairingRow>,
    pub summary: String,
}

/// The round where generation stopped, and why.
#[derive(Clone, Debug, Serialize)]
pub struct RoundFailure {
    pub round: u32,
    pub message: String,
    #[serde(skip)]
    pub error: TournamentError,
}

#[derive(Clone, Debug, Serialize)]
pub struct TournamentReport {
    pub standings: Vec<StandingsRow>,
    pub rounds: Vec<RoundPairings>,
    pub failure: Option<RoundFailure>,
}

impl Tournament {
    pub fn new(ledger: Ledger, roster: Roster, plan: RoundPlan, config: EngineConfig) -> Self {
        Self {
            ledger,
            roster,
            plan,
            config,
        }
    }

    /// Build from raw table rows. Any ingestion error aborts before pairing.
    pub fn from_rows(
        results: &[ResultRow],
        entrants: &[EntrantRow],
        rounds: &[RoundRow],
        fixed_pairings: &[FixedPairingRow],
        config: EngineConfig,
    ) -> Result<Self, TournamentError> {
        let ledger = Ledger::record(results, &config.test_player)?;
        let roster = Roster::from_rows(entrants, fixed_pairings)?;
        let plan = RoundPlan::from_rows(rounds);
        Ok(Self::new(ledger, roster, plan, config))
    }

    pub fn standings(&self, round: u32) -> Vec<Player> {
        standings_as_of(&self.ledger, &self.roster, round)
    }

    /// Standings after the latest reported round plus pairings for every round up to
    /// the last pairable one. A round that cannot be paired ends the run; earlier
    /// rounds are still returned.
    pub fn run(&self, matcher: &dyn Matcher) -> TournamentReport {
        let standings = standings_table(&self.standings(self.ledger.last_round()), &self.roster);
        let last_round = self.plan.last_pairable_round(self.ledger.last_round());
        log::info!(
            "pairing rounds 1..={} ({} results reported up to round {})",
            last_round,
            self.ledger.results().len(),
            self.ledger.last_round()
        );

        let mut ctx = PairingContext::default();
        let mut rounds = Vec::new();
        let mut failure = None;
        for round in 1..=last_round {
            match self.next_round(round, &mut ctx, matcher) {
                Ok(r) => rounds.push(r),
                Err(error) => {
                    log::warn!("round {}: {}", round, error);
                    failure = Some(RoundFailure {
                        round,
                        message: error.to_string(),
                        error,
                    });
                    break;
                }
            }
        }
        TournamentReport {
            standings,
            rounds,
            failure,
        }
    }

    /// Replay or generate `round`, then record its meetings in `ctx`.
    pub fn next_round(
        &self,
        round: u32,
        ctx: &mut PairingContext,
        matcher: &dyn Matcher,
    ) -> Result<RoundPairings, TournamentError> {
        let (format, replayed, mut pairings) = if self.ledger.has_round(round) {
            log::info!("round {}: replaying reported results", round);
            (None, true, self.ledger.pairings_of(round))
        } else {
            let spec = self.plan.get(round)?;
            log::info!("round {}: generating {} pairings from round {}", round, spec.format, spec.basis);
            let mut pairings = self.generate(spec, ctx, matcher)?;
            self.assign_starts(spec.format, &mut pairings, ctx);
            debug_assert!(all_distinct(&pairings), "round {} pairs a player twice", round);
            (Some(spec.format), false, pairings)
        };
        for p in &mut pairings {
            p.repeats = ctx.repeats.add(&p.first, &p.second);
        }
        Ok(RoundPairings {
            round,
            format,
            replayed,
            table: pairing_table(&pairings, &self.roster),
            summary: summary_line(round, &pairings),
            pairings,
        })
    }

    /// Run the format for `spec`, with fixed pairings pulled out first where they apply.
    fn generate(
        &self,
        spec: &RoundSpec,
        ctx: &PairingContext,
        matcher: &dyn Matcher,
    ) -> Result<Vec<Pairing>, TournamentError> {
        let directives = self.roster.fixed_pairings(spec.round);
        let position = || {
            spec.position.ok_or(TournamentError::InvalidPosition {
                format: spec.format,
                position: 0,
            })
        };
        let resolved = || fixed::resolve(self.standings(spec.basis), directives);
        let ignore_fixed = || {
            if !directives.is_empty() {
                log::warn!(
                    "round {}: {} pairs from the seeding, ignoring {} fixed pairing(s)",
                    spec.round,
                    spec.format,
                    directives.len()
                );
            }
        };

        let (mut pairings, forced) = match spec.format {
            PairingFormat::Charlottesville => {
                ignore_fixed();
                (pair_charlottesville(&self.roster, spec.round)?, Vec::new())
            }
            PairingFormat::Swiss if spec.basis == 0 => {
                ignore_fixed();
                (pair_swiss_initial(&self.roster)?, Vec::new())
            }
            PairingFormat::Swiss => {
                let (s, f) = resolved()?;
                (pair_swiss(s, &ctx.repeats, &self.config.swiss, matcher)?, f)
            }
            PairingFormat::KingOfTheHill => {
                let (s, f) = resolved()?;
                (pair_king_of_the_hill(&s)?, f)
            }
            PairingFormat::QueenOfTheHill => {
                let (s, f) = resolved()?;
                (pair_queen_of_the_hill(&s)?, f)
            }
            PairingFormat::RoundRobin => {
                let (s, f) = resolved()?;
                (pair_round_robin(&s, position()?)?, f)
            }
            PairingFormat::ClusteredQuads => {
                let (s, f) = resolved()?;
                (pair_clustered_quads(&s, position()?)?, f)
            }
            PairingFormat::DistributedQuads => {
                let (s, f) = resolved()?;
                (pair_distributed_quads(&s, position()?)?, f)
            }
            PairingFormat::EvansQuads => {
                let (s, f) = resolved()?;
                (pair_evans_quads(&s, position()?)?, f)
            }
        };
        pairings.extend(forced);
        Ok(pairings)
    }

    /// Decide who moves first in freshly generated pairings.
    ///
    /// A bye always "moves first" so its opponent is not charged a start. Round-robin
    /// and Charlottesville rounds alternate on starts handed out in this run; other
    /// formats favour whoever has fewer starts in the reported results.
    fn assign_starts(&self, format: PairingFormat, pairings: &mut [Pairing], ctx: &mut PairingContext) {
        let rotation = format.uses_rotation_starts();
        for p in pairings.iter_mut() {
            p.first_starts = if is_bye(&p.first) {
                true
            } else if is_bye(&p.second) {
                false
            } else if rotation {
                let a = ctx.rotation_starts.get(&p.first).copied().unwrap_or(0);
                let b = ctx.rotation_starts.get(&p.second).copied().unwrap_or(0);
                a <= b
            } else {
                self.ledger.player_stats(&p.first).starts <= self.ledger.player_stats(&p.second).starts
            };
            if rotation {
                let (starter, _) = p.in_start_order();
                *ctx.rotation_starts.entry(starter.to_string()).or_insert(0) += 1;
            }
        }
    }
}

fn all_distinct(pairings: &[Pairing]) -> bool {
    let mut seen = HashSet::new();
    pairings
        .iter()
        .all(|p| p.first != p.second && seen.insert(p.first.as_str()) && seen.insert(p.second.as_str()))
}
