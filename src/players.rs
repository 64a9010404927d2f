use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::warn;

use crate::{
	data::{checked_name, get_position, get_team, Position},
	error::{LeagueError, Result},
	skills::{Attribute, Skills},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
	pub id: i64,
	pub team_id: i64,
	pub name: String,
	pub skills: Skills,
	pub position_id: Option<i64>,
	pub injury_remaining: u32,
}

#[derive(Debug)]
pub struct PlayerListing {
	pub player: Player,
	pub team: String,
	pub position: Option<String>,
}

#[derive(Debug, Default)]
pub struct PlayerChanges {
	pub name: Option<String>,
	pub speed: Option<u8>,
	pub endurance: Option<u8>,
	pub force: Option<u8>,
	pub technique: Option<u8>,
	pub position: Option<i64>,
}

/// What happened to a requested position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
	NotRequested,
	Assigned(Position),
	Ineligible {
		position: Position,
		short: Vec<Attribute>,
	},
	UnknownPosition(i64),
}

impl Assignment {
	pub fn position_id(&self) -> Option<i64> {
		match self {
			Assignment::Assigned(position) => Some(position.id),
			_ => None,
		}
	}

	pub fn notice(&self) -> Option<String> {
		match self {
			Assignment::NotRequested | Assignment::Assigned(_) => None,
			Assignment::Ineligible { position, short } => {
				let names: Vec<&str> = short.iter().map(|a| a.name()).collect();
				Some(format!(
					"skills too low for {} (short on {}), position not assigned",
					position.name,
					names.join(", ")
				))
			}
			Assignment::UnknownPosition(id) => {
				Some(format!("no position with id {id}, position not assigned"))
			}
		}
	}
}

pub(crate) const PLAYER_COLUMNS: &str =
	"id, team_id, name, speed, endurance, force, technique, position_id, match_blessure_restants";

pub(crate) fn player_from_row(row: &Row) -> rusqlite::Result<Player> {
	Ok(Player {
		id: row.get(0)?,
		team_id: row.get(1)?,
		name: row.get(2)?,
		skills: Skills {
			speed: row.get(3)?,
			endurance: row.get(4)?,
			force: row.get(5)?,
			technique: row.get(6)?,
		},
		position_id: row.get(7)?,
		injury_remaining: row.get(8)?,
	})
}

pub fn assess_position(conn: &Connection, skills: &Skills, position_id: i64) -> Result<Assignment> {
	let assignment = match get_position(conn, position_id)? {
		None => Assignment::UnknownPosition(position_id),
		Some(position) if skills.meets(&position.minimum) => Assignment::Assigned(position),
		Some(position) => {
			let short = skills.shortfalls(&position.minimum);
			Assignment::Ineligible { position, short }
		}
	};

	if let Some(notice) = assignment.notice() {
		warn!(position_id, "{notice}");
	}

	Ok(assignment)
}

pub fn get_player(conn: &Connection, id: i64) -> Result<Option<Player>> {
	let player = conn
		.query_row(
			&format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1;"),
			[id],
			player_from_row,
		)
		.optional()?;

	Ok(player)
}

pub fn new_player(
	conn: &Connection,
	team_id: i64,
	name: &str,
	skills: Skills,
	position: Option<i64>,
) -> Result<(i64, Assignment)> {
	let name = checked_name(name)?;
	if get_team(conn, team_id)?.is_none() {
		return Err(LeagueError::validation(format!("no team with id {team_id}")));
	}
	let skills = Skills::new(skills.speed, skills.endurance, skills.force, skills.technique)?;

	let assignment = match position {
		Some(id) => assess_position(conn, &skills, id)?,
		None => Assignment::NotRequested,
	};

	conn.execute(
		"INSERT INTO players (team_id, name, speed, endurance, force, technique, position_id)
		 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
		params![
			team_id,
			name,
			skills.speed,
			skills.endurance,
			skills.force,
			skills.technique,
			assignment.position_id()
		],
	)?;

	Ok((conn.last_insert_rowid(), assignment))
}

pub fn update_player(conn: &Connection, id: i64, changes: PlayerChanges) -> Result<Assignment> {
	let Some(current) = get_player(conn, id)? else {
		return Err(LeagueError::validation(format!("no player with id {id}")));
	};

	let name = match &changes.name {
		Some(name) => checked_name(name)?.to_owned(),
		None => current.name.clone(),
	};
	let skills = Skills::new(
		changes.speed.unwrap_or(current.skills.speed),
		changes.endurance.unwrap_or(current.skills.endurance),
		changes.force.unwrap_or(current.skills.force),
		changes.technique.unwrap_or(current.skills.technique),
	)?;

	// the stored position is never re-checked against the new skills
	let assignment = match changes.position {
		Some(position_id) => assess_position(conn, &skills, position_id)?,
		None => Assignment::NotRequested,
	};
	let position_id = assignment.position_id().or(current.position_id);

	conn.execute(
		"UPDATE players
		 SET name = ?1, speed = ?2, endurance = ?3, force = ?4, technique = ?5, position_id = ?6
		 WHERE id = ?7;",
		params![
			name,
			skills.speed,
			skills.endurance,
			skills.force,
			skills.technique,
			position_id,
			id
		],
	)?;

	Ok(assignment)
}

pub fn delete_player(conn: &Connection, id: i64) -> Result<()> {
	match conn.execute("DELETE FROM players WHERE id = ?1;", [id])? {
		0 => Err(LeagueError::validation(format!("no player with id {id}"))),
		_ => Ok(()),
	}
}

pub fn list_players(conn: &Connection, team_id: Option<i64>) -> Result<Vec<PlayerListing>> {
	let mut stmt = conn.prepare(
		"SELECT players.id, players.team_id, players.name, players.speed, players.endurance,
				players.force, players.technique, players.position_id,
				players.match_blessure_restants, teams.name, positions.name
		 FROM players
		 JOIN teams ON teams.id = players.team_id
		 LEFT JOIN positions ON positions.id = players.position_id
		 WHERE ?1 IS NULL OR players.team_id = ?1
		 ORDER BY teams.name, players.name;",
	)?;
	let listings = stmt
		.query_map([team_id], |row| {
			Ok(PlayerListing {
				player: player_from_row(row)?,
				team: row.get(9)?,
				position: row.get(10)?,
			})
		})?
		.collect::<rusqlite::Result<Vec<_>>>()?;

	Ok(listings)
}

/// Players of both teams, ordered by team id then name.
pub fn roster(conn: &Connection, team1: i64, team2: i64) -> Result<Vec<Player>> {
	let mut stmt = conn.prepare(&format!(
		"SELECT {PLAYER_COLUMNS} FROM players
		 WHERE team_id IN (?1, ?2)
		 ORDER BY team_id, name;"
	))?;
	let players = stmt
		.query_map([team1, team2], player_from_row)?
		.collect::<rusqlite::Result<Vec<_>>>()?;

	Ok(players)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		data::{delete_position, delete_team, new_position, new_team},
		db::open_in_memory,
	};

	fn attaquant(conn: &Connection) -> i64 {
		new_position(conn, "Attaquant", Skills::new(60, 50, 40, 70).unwrap()).unwrap()
	}

	#[test]
	fn eligible_player_gets_position() {
		let conn = open_in_memory().unwrap();
		let team = new_team(&conn, "Lions").unwrap();
		let position = attaquant(&conn);

		let skills = Skills::new(80, 70, 60, 70).unwrap();
		let (id, assignment) = new_player(&conn, team, "X", skills, Some(position)).unwrap();

		assert!(matches!(assignment, Assignment::Assigned(_)));
		assert_eq!(get_player(&conn, id).unwrap().unwrap().position_id, Some(position));
	}

	#[test]
	fn ineligible_player_is_created_without_position() {
		let conn = open_in_memory().unwrap();
		let team = new_team(&conn, "Lions").unwrap();
		let position = attaquant(&conn);

		let weak = Skills::new(30, 30, 30, 30).unwrap();
		let (id, assignment) = new_player(&conn, team, "Weak", weak, Some(position)).unwrap();

		assert!(matches!(assignment, Assignment::Ineligible { .. }));
		assert!(assignment.notice().unwrap().contains("Attaquant"));
		let stored = get_player(&conn, id).unwrap().unwrap();
		assert_eq!(stored.position_id, None);
		assert_eq!(stored.injury_remaining, 0);
	}

	#[test]
	fn unknown_position_is_skipped() {
		let conn = open_in_memory().unwrap();
		let team = new_team(&conn, "Lions").unwrap();

		let (id, assignment) =
			new_player(&conn, team, "Y", Skills::default(), Some(99)).unwrap();

		assert_eq!(assignment, Assignment::UnknownPosition(99));
		assert_eq!(get_player(&conn, id).unwrap().unwrap().position_id, None);
	}

	#[test]
	fn player_needs_existing_team() {
		let conn = open_in_memory().unwrap();
		assert!(matches!(
			new_player(&conn, 7, "Ghost", Skills::default(), None),
			Err(LeagueError::Validation(_))
		));
	}

	#[test]
	fn ineligible_update_keeps_previous_position() {
		let conn = open_in_memory().unwrap();
		let team = new_team(&conn, "Lions").unwrap();
		let position = attaquant(&conn);
		let strict =
			new_position(&conn, "Gardien", Skills::new(90, 90, 90, 90).unwrap()).unwrap();
		let skills = Skills::new(80, 70, 60, 70).unwrap();
		let (id, _) = new_player(&conn, team, "X", skills, Some(position)).unwrap();

		let assignment = update_player(
			&conn,
			id,
			PlayerChanges {
				position: Some(strict),
				..Default::default()
			},
		)
		.unwrap();

		assert!(matches!(assignment, Assignment::Ineligible { .. }));
		assert_eq!(get_player(&conn, id).unwrap().unwrap().position_id, Some(position));
	}

	#[test]
	fn lowering_skills_keeps_assigned_position() {
		let conn = open_in_memory().unwrap();
		let team = new_team(&conn, "Lions").unwrap();
		let position = attaquant(&conn);
		let skills = Skills::new(80, 70, 60, 70).unwrap();
		let (id, _) = new_player(&conn, team, "X", skills, Some(position)).unwrap();

		update_player(
			&conn,
			id,
			PlayerChanges {
				name: Some("X2".into()),
				speed: Some(10),
				..Default::default()
			},
		)
		.unwrap();

		let stored = get_player(&conn, id).unwrap().unwrap();
		assert_eq!(stored.name, "X2");
		assert_eq!(stored.skills.speed, 10);
		assert_eq!(stored.position_id, Some(position));
	}

	#[test]
	fn update_checks_new_skills_against_requested_position() {
		let conn = open_in_memory().unwrap();
		let team = new_team(&conn, "Lions").unwrap();
		let position = attaquant(&conn);
		let (id, _) =
			new_player(&conn, team, "Late", Skills::new(30, 30, 30, 30).unwrap(), None).unwrap();

		let assignment = update_player(
			&conn,
			id,
			PlayerChanges {
				speed: Some(60),
				endurance: Some(50),
				force: Some(40),
				technique: Some(70),
				position: Some(position),
				..Default::default()
			},
		)
		.unwrap();

		assert!(matches!(assignment, Assignment::Assigned(_)));
		assert_eq!(get_player(&conn, id).unwrap().unwrap().position_id, Some(position));
	}

	#[test]
	fn deleting_position_clears_reference_and_team_cascades() {
		let conn = open_in_memory().unwrap();
		let team = new_team(&conn, "Lions").unwrap();
		let position = attaquant(&conn);
		let skills = Skills::new(80, 70, 60, 70).unwrap();
		let (id, _) = new_player(&conn, team, "X", skills, Some(position)).unwrap();

		delete_position(&conn, position).unwrap();
		assert_eq!(get_player(&conn, id).unwrap().unwrap().position_id, None);

		delete_team(&conn, team).unwrap();
		assert!(get_player(&conn, id).unwrap().is_none());
	}

	#[test]
	fn listing_and_roster_ordering() {
		let conn = open_in_memory().unwrap();
		let zebras = new_team(&conn, "Zebras").unwrap();
		let ants = new_team(&conn, "Ants").unwrap();
		for (team, name) in [(zebras, "Bob"), (ants, "Zoe"), (zebras, "Al"), (ants, "Ann")] {
			new_player(&conn, team, name, Skills::default(), None).unwrap();
		}

		let listed: Vec<String> = list_players(&conn, None)
			.unwrap()
			.into_iter()
			.map(|l| l.player.name)
			.collect();
		assert_eq!(listed, ["Ann", "Zoe", "Al", "Bob"]);

		let only_ants = list_players(&conn, Some(ants)).unwrap();
		assert_eq!(only_ants.len(), 2);
		assert!(only_ants.iter().all(|l| l.team == "Ants" && l.position.is_none()));

		// roster order follows team id, not team name
		let names: Vec<String> = roster(&conn, ants, zebras)
			.unwrap()
			.into_iter()
			.map(|p| p.name)
			.collect();
		assert_eq!(names, ["Al", "Bob", "Ann", "Zoe"]);
	}
}
