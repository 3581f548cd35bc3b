//! werewolf-metrics: Post-game analytics for refereed werewolf matches.
//!
//! [`build_metrics`] is a pure function over a sealed [`GameRecord`]: it walks
//! the phase records once, replaying who was alive when, and derives
//! per-agent and per-role results, vote decision quality, influence (swing
//! votes and early wagons) and discussion centrality.

pub mod influence;
pub mod quality;
pub mod report;
pub mod timeline;

pub use report::MetricsReport;

use std::collections::{BTreeMap, BTreeSet};

use werewolf_core::{Alignment, PlayerId, Role};
use werewolf_referee::{GameRecord, PhaseRecord};

use crate::quality::VoteCounts;
use crate::report::{
    AgentInfluence, AgentMetrics, Centrality, DecisionQuality, EarlySignals, Influence,
    InspectionLog, MetricsSummary, MisElimination, ProtectionLog, RoleSummary, SwingEvent,
    VoteCast, VoteReceived,
};
use crate::timeline::MentionEdge;

#[derive(Default)]
struct RoleTotals {
    wins: u32,
    losses: u32,
    rating_sum: i64,
    rating_count: u32,
}

/// Derive the metrics report for a completed match.
pub fn build_metrics(record: &GameRecord) -> MetricsReport {
    tracing::debug!(game_id = %record.game_id, phases = record.phases.len(), "Computing metrics");

    let mut alive: BTreeSet<PlayerId> = record.player_ids().into_iter().collect();
    let mut days_survived: BTreeMap<PlayerId, u32> = BTreeMap::new();
    let mut votes_cast: BTreeMap<PlayerId, Vec<VoteCast>> = BTreeMap::new();
    let mut votes_received: BTreeMap<PlayerId, Vec<VoteReceived>> = BTreeMap::new();
    let mut eliminated_on_day: BTreeMap<PlayerId, u32> = BTreeMap::new();
    let mut killed_on_night: BTreeMap<PlayerId, u32> = BTreeMap::new();
    let mut inspections: BTreeMap<PlayerId, Vec<InspectionLog>> = BTreeMap::new();
    let mut protections: BTreeMap<PlayerId, Vec<ProtectionLog>> = BTreeMap::new();

    let mut wolves_eliminated_days = Vec::new();
    let mut mis_eliminations = Vec::new();
    let mut day_eliminations = 0u32;
    let mut total_days = 0;

    let mut per_day = Vec::new();
    let mut vote_counts: BTreeMap<PlayerId, VoteCounts> = BTreeMap::new();
    let mut influence_per_agent: BTreeMap<PlayerId, AgentInfluence> = BTreeMap::new();
    let mut swing_events = Vec::new();

    for phase in &record.phases {
        match phase {
            PhaseRecord::Day(day) => {
                let day_number = day.day_number;
                total_days = total_days.max(day_number);
                for pid in &alive {
                    *days_survived.entry(pid.clone()).or_insert(0) += 1;
                }
                let wolves_alive: BTreeSet<PlayerId> = alive
                    .iter()
                    .filter(|pid| record.role_of(pid).is_some_and(Role::is_wolf))
                    .cloned()
                    .collect();

                let mut votes = Vec::with_capacity(day.voting.responses.len());
                for v in &day.voting.responses {
                    votes_cast.entry(v.voter.clone()).or_default().push(VoteCast {
                        day: day_number,
                        target: v.target.clone(),
                        reason: v.reason.clone(),
                    });
                    votes_received
                        .entry(v.target.clone())
                        .or_default()
                        .push(VoteReceived {
                            day: day_number,
                            from: v.voter.clone(),
                        });
                    if let (Some(from), Some(to)) =
                        (record.alignment_of(&v.voter), record.alignment_of(&v.target))
                    {
                        vote_counts.entry(v.voter.clone()).or_default().add(from, to);
                    }
                    votes.push((v.voter.clone(), v.target.clone()));
                }

                let eliminated = day.voting.resolution.eliminated.as_ref();
                per_day.push(quality::score_day(
                    record,
                    day_number,
                    &votes,
                    &wolves_alive,
                    eliminated.map(|e| &e.player_id),
                ));

                let Some(eliminated) = eliminated else {
                    continue;
                };
                let target = &eliminated.player_id;
                alive.remove(target);
                eliminated_on_day.insert(target.clone(), day_number);
                day_eliminations += 1;
                if eliminated.role.is_wolf() {
                    wolves_eliminated_days.push(day_number);
                } else {
                    mis_eliminations.push(MisElimination {
                        day: day_number,
                        player_id: target.clone(),
                        role: eliminated.role,
                    });
                }

                for voter in influence::early_wagon(&votes, target) {
                    influence_per_agent
                        .entry(voter.clone())
                        .or_default()
                        .early_final_wagon_votes += 1;
                }
                if let Some(voter) = influence::swing_voter(&votes, target) {
                    tracing::debug!(day = day_number, swing_voter = %voter, target = %target, "Swing vote");
                    influence_per_agent.entry(voter.clone()).or_default().swing_votes += 1;
                    swing_events.push(SwingEvent {
                        day_number,
                        swing_voter: voter.clone(),
                        target: target.clone(),
                    });
                }
            }
            PhaseRecord::Night(night) => {
                let night_number = night.night_number;
                for i in &night.resolution.inspections {
                    inspections.entry(i.detective.clone()).or_default().push(InspectionLog {
                        night: night_number,
                        target: i.target.clone(),
                        is_wolf: i.is_wolf,
                    });
                }
                for p in &night.resolution.protections {
                    protections.entry(p.doctor.clone()).or_default().push(ProtectionLog {
                        night: night_number,
                        target: p.target.clone(),
                        saved: p.saved,
                    });
                }
                if let Some(kill) = night.resolution.kill.as_ref().filter(|k| k.success) {
                    alive.remove(&kill.target);
                    eliminated_on_day.insert(kill.target.clone(), night_number);
                    killed_on_night.insert(kill.target.clone(), night_number);
                }
            }
        }
    }

    let winning_side = record.final_result.winning_side;
    let mut per_agent = BTreeMap::new();
    let mut role_totals: BTreeMap<Role, RoleTotals> = BTreeMap::new();
    let mut dq_per_agent = BTreeMap::new();

    for card in &record.players {
        let pid = &card.id;
        let Some(role) = record.role_of(pid) else {
            tracing::warn!(player_id = %pid, "Player has no role assignment, skipping");
            continue;
        };
        let alignment = role.alignment();
        let won = alignment == winning_side;

        let totals = role_totals.entry(role).or_default();
        if won {
            totals.wins += 1;
        } else {
            totals.losses += 1;
        }
        if let Some(rating) = card.rating.overall {
            totals.rating_sum += i64::from(rating);
            totals.rating_count += 1;
        }

        per_agent.insert(
            pid.clone(),
            AgentMetrics {
                alias: card.alias.clone(),
                role,
                alignment,
                won,
                days_survived: days_survived.get(pid).copied().unwrap_or(0),
                votes_cast: votes_cast.remove(pid).unwrap_or_default(),
                votes_received: votes_received.remove(pid).unwrap_or_default(),
                eliminated_on_day: eliminated_on_day.get(pid).copied(),
                killed_on_night: killed_on_night.get(pid).copied(),
                inspections: (role == Role::Detective)
                    .then(|| inspections.remove(pid).unwrap_or_default()),
                protections: (role == Role::Doctor)
                    .then(|| protections.remove(pid).unwrap_or_default()),
            },
        );

        let counts = vote_counts.get(pid).copied().unwrap_or_default();
        dq_per_agent.insert(pid.clone(), counts.finish(alignment));
        influence_per_agent.entry(pid.clone()).or_default();
    }

    let per_role = role_totals
        .into_iter()
        .map(|(role, t)| {
            let games = t.wins + t.losses;
            let summary = RoleSummary {
                games_played: games,
                wins: t.wins,
                losses: t.losses,
                win_rate: if games == 0 {
                    0.0
                } else {
                    f64::from(t.wins) / f64::from(games)
                },
                average_initial_rating: (t.rating_count > 0)
                    .then(|| t.rating_sum as f64 / f64::from(t.rating_count)),
            };
            (role, summary)
        })
        .collect();

    let mis_elim_rate = if day_eliminations == 0 {
        0.0
    } else {
        mis_eliminations.len() as f64 / f64::from(day_eliminations)
    };

    let edges = timeline::mention_edges(record);
    let early_signals = per_day
        .first()
        .map(|first| first_day_signals(record, first, &edges));

    MetricsReport {
        game_id: record.game_id,
        per_agent,
        per_role,
        summary: MetricsSummary {
            town_win: winning_side == Alignment::Town,
            wolves_eliminated_days,
            mis_eliminations,
            mis_elim_rate,
            total_days,
        },
        decision_quality: DecisionQuality {
            per_agent: dq_per_agent,
            per_day,
        },
        influence: Influence {
            per_agent: influence_per_agent,
            swing_events,
        },
        early_signals,
        centrality: centrality(record, &edges),
    }
}

fn first_day_signals(
    record: &GameRecord,
    first: &report::DayDecisionQuality,
    edges: &[MentionEdge],
) -> EarlySignals {
    let day_edges = edges.iter().filter(|e| e.day == first.day_number);
    let mut total = 0;
    let mut town_on_wolves = 0;
    for e in day_edges {
        total += 1;
        if record.alignment_of(&e.speaker) == Some(Alignment::Town)
            && record.alignment_of(&e.target) == Some(Alignment::Wolves)
        {
            town_on_wolves += 1;
        }
    }

    let wolf_eliminated = record
        .phases
        .iter()
        .filter_map(PhaseRecord::as_day)
        .find(|d| d.day_number == first.day_number)
        .and_then(|d| d.voting.resolution.eliminated.as_ref())
        .is_some_and(|e| e.role.is_wolf());

    EarlySignals {
        day_number: first.day_number,
        wolf_eliminated,
        precision: first.town_precision,
        recall: first.town_recall,
        town_mentions_of_wolves: town_on_wolves,
        total_mentions: total,
    }
}

fn centrality(record: &GameRecord, edges: &[MentionEdge]) -> BTreeMap<PlayerId, Centrality> {
    let mut degrees: BTreeMap<PlayerId, Centrality> = record
        .players
        .iter()
        .map(|c| (c.id.clone(), Centrality::default()))
        .collect();
    for e in edges {
        degrees.entry(e.speaker.clone()).or_default().out_degree += 1;
        degrees.entry(e.target.clone()).or_default().in_degree += 1;
    }
    degrees
}
