use std::ops::RangeInclusive;

use rand::Rng;
use rusqlite::{params, Connection};
use tracing::debug;

use crate::{
	error::{LeagueError, Result},
	players::Player,
};

pub fn is_available(player: &Player) -> bool {
	player.injury_remaining == 0
}

/// Overwrites the player's counter with `duration`.
pub fn apply_injury(conn: &Connection, player_id: i64, duration: u32) -> Result<()> {
	let changed = conn.execute(
		"UPDATE players SET match_blessure_restants = ?1 WHERE id = ?2;",
		params![duration, player_id],
	)?;
	if changed == 0 {
		return Err(LeagueError::validation(format!("no player with id {player_id}")));
	}

	debug!(player_id, duration, "injury recorded");
	Ok(())
}

/// One match of recovery for every player in the league, floored at zero.
pub fn decrement_all(conn: &Connection) -> Result<usize> {
	let recovering = conn.execute(
		"UPDATE players
		 SET match_blessure_restants = match_blessure_restants - 1
		 WHERE match_blessure_restants > 0;",
		[],
	)?;

	debug!(recovering, "injury counters decremented");
	Ok(recovering)
}

pub trait InjuryDice {
	fn injured(&mut self, chance: f64) -> bool;
	fn duration(&mut self, range: RangeInclusive<u32>) -> u32;
}

pub struct RandomDice<R>(pub R);

impl<R: Rng> InjuryDice for RandomDice<R> {
	fn injured(&mut self, chance: f64) -> bool {
		self.0.gen_bool(chance)
	}

	fn duration(&mut self, range: RangeInclusive<u32>) -> u32 {
		self.0.gen_range(range)
	}
}
