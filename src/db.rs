use std::path::Path;

use rusqlite::{Connection, Result};

pub fn open(path: &Path) -> Result<Connection> {
	let mut conn = Connection::open(path)?;
	prepare(&mut conn)?;

	Ok(conn)
}

#[cfg(test)]
pub fn open_in_memory() -> Result<Connection> {
	let mut conn = Connection::open_in_memory()?;
	prepare(&mut conn)?;

	Ok(conn)
}

fn prepare(conn: &mut Connection) -> Result<()> {
	// cascades below only fire with this on, and it is per connection
	conn.execute_batch("PRAGMA foreign_keys = ON;")?;
	create_schema(conn)
}

pub fn create_schema(conn: &mut Connection) -> Result<()> {
	let tx = conn.transaction()?;

	tx.execute(
		"CREATE TABLE IF NOT EXISTS teams (
			id   INTEGER PRIMARY KEY AUTOINCREMENT,
			name TEXT    NOT NULL
						 UNIQUE
		);",
		[],
	)?;

	tx.execute(
		"CREATE TABLE IF NOT EXISTS positions (
			id            INTEGER PRIMARY KEY AUTOINCREMENT,
			name          TEXT    NOT NULL
								  UNIQUE,
			min_vitesse   INTEGER NOT NULL,
			min_endurance INTEGER NOT NULL,
			min_force     INTEGER NOT NULL,
			min_technique INTEGER NOT NULL
		);",
		[],
	)?;

	tx.execute(
		"CREATE TABLE IF NOT EXISTS players (
			id                      INTEGER PRIMARY KEY AUTOINCREMENT,
			team_id                 INTEGER NOT NULL
											REFERENCES teams (id) ON DELETE CASCADE,
			name                    TEXT    NOT NULL,
			speed                   INTEGER NOT NULL,
			endurance               INTEGER NOT NULL,
			force                   INTEGER NOT NULL,
			technique               INTEGER NOT NULL,
			position_id             INTEGER REFERENCES positions (id) ON DELETE SET NULL,
			match_blessure_restants INTEGER NOT NULL
											DEFAULT 0
		);",
		[],
	)?;

	tx.execute(
		"CREATE TABLE IF NOT EXISTS matches (
			id        INTEGER PRIMARY KEY AUTOINCREMENT,
			team1_id  INTEGER NOT NULL
							  REFERENCES teams (id),
			team2_id  INTEGER NOT NULL
							  REFERENCES teams (id),
			score1    INTEGER NOT NULL,
			score2    INTEGER NOT NULL,
			played_at TEXT    NOT NULL
							  DEFAULT (datetime('now'))
		);",
		[],
	)?;

	tx.execute(
		"CREATE TABLE IF NOT EXISTS match_players (
			id          INTEGER PRIMARY KEY AUTOINCREMENT,
			match_id    INTEGER NOT NULL
								REFERENCES matches (id) ON DELETE CASCADE,
			player_id   INTEGER NOT NULL
								REFERENCES players (id) ON DELETE CASCADE,
			performance INTEGER NOT NULL,
			injured     INTEGER NOT NULL
								DEFAULT 0
		);",
		[],
	)?;

	tx.commit()
}
