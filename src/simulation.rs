use std::{fmt, ops::RangeInclusive};

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::{
	data::{count_teams, get_team},
	error::{LeagueError, Result},
	injury::{apply_injury, decrement_all, is_available, InjuryDice},
	input::PerformanceSource,
	players::roster,
};

pub const INJURY_CHANCE: f64 = 0.10;

#[derive(Debug, Clone)]
pub struct MatchRules {
	pub injury_chance: f64,
	pub injury_duration: RangeInclusive<u32>,
	pub performance: RangeInclusive<u8>,
}

impl Default for MatchRules {
	fn default() -> Self {
		Self {
			injury_chance: INJURY_CHANCE,
			injury_duration: 1..=3,
			performance: 0..=10,
		}
	}
}

#[derive(Debug, Clone, Copy)]
pub struct MatchRequest {
	pub team1: i64,
	pub team2: i64,
	pub score1: u32,
	pub score2: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	Unavailable { remaining: u32 },
	Played { performance: u8, injury: Option<u32> },
}

#[derive(Debug, Clone)]
pub struct PlayerReport {
	pub name: String,
	pub outcome: Outcome,
}

impl fmt::Display for PlayerReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.outcome {
			Outcome::Unavailable { remaining } => {
				write!(f, "{} is injured ({remaining} match(es) left)", self.name)
			}
			Outcome::Played {
				performance,
				injury: Some(duration),
			} => write!(
				f,
				"{} played ({performance}) and got injured for {duration} match(es)",
				self.name
			),
			Outcome::Played {
				performance,
				injury: None,
			} => write!(f, "{} played ({performance})", self.name),
		}
	}
}

#[derive(Debug)]
pub struct MatchReport {
	pub match_id: i64,
	pub players: Vec<PlayerReport>,
	pub recovering: usize,
}

fn check_teams(conn: &Connection, request: &MatchRequest) -> Result<()> {
	if count_teams(conn)? < 2 {
		return Err(LeagueError::validation("at least two teams are needed"));
	}
	if request.team1 == request.team2 {
		return Err(LeagueError::validation("a team cannot play against itself"));
	}
	for id in [request.team1, request.team2] {
		if get_team(conn, id)?.is_none() {
			return Err(LeagueError::validation(format!("no team with id {id}")));
		}
	}

	Ok(())
}

/// Records one match: the match row, a participation per available
/// player, the injuries drawn, then one league-wide recovery step.
///
/// Everything commits together. The one exception is an empty roster:
/// the match row is kept and `EmptyRoster` is returned.
pub fn play_match(
	conn: &mut Connection,
	request: &MatchRequest,
	rules: &MatchRules,
	performances: &mut dyn PerformanceSource,
	dice: &mut dyn InjuryDice,
) -> Result<MatchReport> {
	check_teams(conn, request)?;

	let tx = conn.transaction()?;

	tx.execute(
		"INSERT INTO matches (team1_id, team2_id, score1, score2, played_at)
		 VALUES (?1, ?2, ?3, ?4, ?5);",
		params![
			request.team1,
			request.team2,
			request.score1,
			request.score2,
			Utc::now().naive_utc()
		],
	)?;
	let match_id = tx.last_insert_rowid();
	info!(match_id, team1 = request.team1, team2 = request.team2, "match created");

	let players = roster(&tx, request.team1, request.team2)?;
	if players.is_empty() {
		tx.commit()?;
		return Err(LeagueError::EmptyRoster { match_id });
	}

	let mut reports = Vec::with_capacity(players.len());
	for player in players {
		if !is_available(&player) {
			debug!(player_id = player.id, remaining = player.injury_remaining, "skipping injured player");
			reports.push(PlayerReport {
				name: player.name,
				outcome: Outcome::Unavailable {
					remaining: player.injury_remaining,
				},
			});
			continue;
		}

		let performance = performances.next_performance(&player, &rules.performance)?;

		let injury = if dice.injured(rules.injury_chance) {
			let duration = dice.duration(rules.injury_duration.clone());
			apply_injury(&tx, player.id, duration)?;
			info!(player_id = player.id, duration, "player injured");
			Some(duration)
		} else {
			None
		};

		tx.execute(
			"INSERT INTO match_players (match_id, player_id, performance, injured)
			 VALUES (?1, ?2, ?3, ?4);",
			params![match_id, player.id, performance, injury.is_some()],
		)?;

		reports.push(PlayerReport {
			name: player.name,
			outcome: Outcome::Played {
				performance,
				injury,
			},
		});
	}

	performances.finish()?;

	let recovering = decrement_all(&tx)?;
	tx.commit()?;
	info!(match_id, recovering, "match recorded");

	Ok(MatchReport {
		match_id,
		players: reports,
		recovering,
	})
}
