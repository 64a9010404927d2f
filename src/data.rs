use chrono::NaiveDateTime;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::{
	error::{LeagueError, Result},
	skills::Skills,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
	pub id: i64,
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
	pub id: i64,
	pub name: String,
	pub minimum: Skills,
}

#[derive(Debug)]
pub struct Match {
	pub id: i64,
	pub team1: String,
	pub score1: i64,
	pub score2: i64,
	pub team2: String,
	pub played_at: NaiveDateTime,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Participation {
	pub player_id: i64,
	pub player: String,
	pub performance: u8,
	pub injured: bool,
}

pub(crate) fn checked_name(name: &str) -> Result<&str> {
	let name = name.trim();
	if name.is_empty() {
		return Err(LeagueError::validation("name is required"));
	}

	Ok(name)
}

// UNIQUE violations are operator mistakes, anything else is a real failure.
fn name_taken(err: rusqlite::Error, name: &str) -> LeagueError {
	match err {
		rusqlite::Error::SqliteFailure(ref e, _) if e.code == ErrorCode::ConstraintViolation => {
			LeagueError::validation(format!("name '{name}' is already used"))
		}
		other => other.into(),
	}
}

fn expect_row(changed: usize, what: &str, id: i64) -> Result<()> {
	match changed {
		0 => Err(LeagueError::validation(format!("no {what} with id {id}"))),
		_ => Ok(()),
	}
}

pub fn count_teams(conn: &Connection) -> Result<i64> {
	Ok(conn.query_row("SELECT COUNT(*) FROM teams;", [], |row| row.get(0))?)
}

pub fn get_team(conn: &Connection, id: i64) -> Result<Option<Team>> {
	let team = conn
		.query_row("SELECT id, name FROM teams WHERE id = ?1;", [id], |row| {
			Ok(Team {
				id: row.get(0)?,
				name: row.get(1)?,
			})
		})
		.optional()?;

	Ok(team)
}

pub fn get_team_id(conn: &Connection, name: &str) -> Result<Option<i64>> {
	let mut stmt = conn.prepare("SELECT id FROM teams WHERE name = ?1;")?;
	let mut result = stmt.query_map([name.trim()], |row| row.get::<usize, i64>(0))?;

	let id: Option<i64> = match result.next() {
		Some(x) => Some(x?),
		None => None,
	};

	Ok(id)
}

pub fn new_team(conn: &Connection, name: &str) -> Result<i64> {
	let name = checked_name(name)?;
	conn.execute("INSERT INTO teams (name) VALUES (?1);", [name])
		.map_err(|e| name_taken(e, name))?;

	Ok(conn.last_insert_rowid())
}

pub fn list_teams(conn: &Connection) -> Result<Vec<Team>> {
	let mut stmt = conn.prepare("SELECT id, name FROM teams ORDER BY name;")?;
	let teams = stmt
		.query_map([], |row| {
			Ok(Team {
				id: row.get(0)?,
				name: row.get(1)?,
			})
		})?
		.collect::<rusqlite::Result<Vec<_>>>()?;

	Ok(teams)
}

pub fn rename_team(conn: &Connection, id: i64, name: &str) -> Result<()> {
	let name = checked_name(name)?;
	let changed = conn
		.execute("UPDATE teams SET name = ?1 WHERE id = ?2;", params![name, id])
		.map_err(|e| name_taken(e, name))?;

	expect_row(changed, "team", id)
}

pub fn delete_team(conn: &Connection, id: i64) -> Result<()> {
	let changed = conn.execute("DELETE FROM teams WHERE id = ?1;", [id])?;

	expect_row(changed, "team", id)
}

fn position_from_row(row: &Row) -> rusqlite::Result<Position> {
	Ok(Position {
		id: row.get(0)?,
		name: row.get(1)?,
		minimum: Skills {
			speed: row.get(2)?,
			endurance: row.get(3)?,
			force: row.get(4)?,
			technique: row.get(5)?,
		},
	})
}

pub fn get_position(conn: &Connection, id: i64) -> Result<Option<Position>> {
	let position = conn
		.query_row(
			"SELECT id, name, min_vitesse, min_endurance, min_force, min_technique
			 FROM positions WHERE id = ?1;",
			[id],
			position_from_row,
		)
		.optional()?;

	Ok(position)
}

pub fn get_position_id(conn: &Connection, name: &str) -> Result<Option<i64>> {
	let id = conn
		.query_row(
			"SELECT id FROM positions WHERE name = ?1;",
			[name.trim()],
			|row| row.get(0),
		)
		.optional()?;

	Ok(id)
}

pub fn new_position(conn: &Connection, name: &str, minimum: Skills) -> Result<i64> {
	let name = checked_name(name)?;
	conn.execute(
		"INSERT INTO positions (name, min_vitesse, min_endurance, min_force, min_technique)
		 VALUES (?1, ?2, ?3, ?4, ?5);",
		params![
			name,
			minimum.speed,
			minimum.endurance,
			minimum.force,
			minimum.technique
		],
	)
	.map_err(|e| name_taken(e, name))?;

	Ok(conn.last_insert_rowid())
}

pub fn list_positions(conn: &Connection) -> Result<Vec<Position>> {
	let mut stmt = conn.prepare(
		"SELECT id, name, min_vitesse, min_endurance, min_force, min_technique
		 FROM positions ORDER BY name;",
	)?;
	let positions = stmt
		.query_map([], position_from_row)?
		.collect::<rusqlite::Result<Vec<_>>>()?;

	Ok(positions)
}

pub fn update_position(conn: &Connection, id: i64, name: &str, minimum: Skills) -> Result<()> {
	let name = checked_name(name)?;
	let changed = conn
		.execute(
			"UPDATE positions
			 SET name = ?1, min_vitesse = ?2, min_endurance = ?3, min_force = ?4, min_technique = ?5
			 WHERE id = ?6;",
			params![
				name,
				minimum.speed,
				minimum.endurance,
				minimum.force,
				minimum.technique,
				id
			],
		)
		.map_err(|e| name_taken(e, name))?;

	expect_row(changed, "position", id)
}

pub fn delete_position(conn: &Connection, id: i64) -> Result<()> {
	let changed = conn.execute("DELETE FROM positions WHERE id = ?1;", [id])?;

	expect_row(changed, "position", id)
}

pub fn list_matches(conn: &Connection) -> Result<Vec<Match>> {
	let mut stmt = conn.prepare(
		"SELECT matches.id, t1.name, matches.score1, matches.score2, t2.name, matches.played_at
		 FROM matches
		 JOIN teams t1 ON t1.id = matches.team1_id
		 JOIN teams t2 ON t2.id = matches.team2_id
		 ORDER BY matches.played_at DESC, matches.id DESC;",
	)?;
	let matches = stmt
		.query_map([], |row| {
			Ok(Match {
				id: row.get(0)?,
				team1: row.get(1)?,
				score1: row.get(2)?,
				score2: row.get(3)?,
				team2: row.get(4)?,
				played_at: row.get(5)?,
			})
		})?
		.collect::<rusqlite::Result<Vec<_>>>()?;

	Ok(matches)
}

pub fn match_sheet(conn: &Connection, match_id: i64) -> Result<Vec<Participation>> {
	let exists: Option<i64> = conn
		.query_row("SELECT id FROM matches WHERE id = ?1;", [match_id], |row| {
			row.get(0)
		})
		.optional()?;
	if exists.is_none() {
		return Err(LeagueError::validation(format!("no match with id {match_id}")));
	}

	let mut stmt = conn.prepare(
		"SELECT players.id, players.name, match_players.performance, match_players.injured
		 FROM match_players
		 JOIN players ON players.id = match_players.player_id
		 WHERE match_players.match_id = ?1
		 ORDER BY match_players.id;",
	)?;
	let sheet = stmt
		.query_map([match_id], |row| {
			Ok(Participation {
				player_id: row.get(0)?,
				player: row.get(1)?,
				performance: row.get(2)?,
				injured: row.get(3)?,
			})
		})?
		.collect::<rusqlite::Result<Vec<_>>>()?;

	Ok(sheet)
}
