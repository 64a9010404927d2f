use std::io::Read;

use rand::Rng;
use rusqlite::Connection;
use serde::Deserialize;
use tracing::info;

use crate::{
	data::{count_teams, get_position_id, get_team_id, new_position, new_team},
	error::{LeagueError, Result},
	players::new_player,
	skills::Skills,
};

const DEMO_TEAMS: [&str; 3] = ["Lions", "Tigres", "Panthères"];
const DEMO_POSITIONS: [(&str, Skills); 3] = [
	(
		"Attaquant",
		Skills {
			speed: 60,
			endurance: 50,
			force: 40,
			technique: 70,
		},
	),
	(
		"Défenseur",
		Skills {
			speed: 40,
			endurance: 60,
			force: 70,
			technique: 50,
		},
	),
	(
		"Milieu",
		Skills {
			speed: 55,
			endurance: 65,
			force: 50,
			technique: 60,
		},
	),
];
const DEMO_SQUAD: usize = 5;

/// Fills an empty league with demo teams, positions and players.
/// Returns false without writing anything when teams already exist.
pub fn seed_demo(conn: &mut Connection, rng: &mut impl Rng) -> Result<bool> {
	if count_teams(conn)? > 0 {
		return Ok(false);
	}

	let tx = conn.transaction()?;

	let mut team_ids = Vec::with_capacity(DEMO_TEAMS.len());
	for name in DEMO_TEAMS {
		team_ids.push(new_team(&tx, name)?);
	}
	for (name, minimum) in DEMO_POSITIONS {
		new_position(&tx, name, minimum)?;
	}
	for team in team_ids {
		for index in 1..=DEMO_SQUAD {
			let skills = Skills::new(
				rng.gen_range(40..=90),
				rng.gen_range(40..=90),
				rng.gen_range(40..=90),
				rng.gen_range(40..=90),
			)?;
			new_player(&tx, team, &format!("Joueur {team}-{index}"), skills, None)?;
		}
	}

	tx.commit()?;
	info!("demo data seeded");

	Ok(true)
}

#[derive(Debug, Deserialize)]
struct PlayerRecord {
	team: String,
	name: String,
	speed: u8,
	endurance: u8,
	force: u8,
	technique: u8,
	position: Option<String>,
}

#[derive(Debug, Default)]
pub struct ImportSummary {
	pub players: usize,
	pub teams_created: usize,
	pub notices: Vec<String>,
}

/// Loads players from CSV with header
/// `team,name,speed,endurance,force,technique,position`.
/// Unknown teams are created, positions go through the usual eligibility check.
pub fn import_players(conn: &mut Connection, reader: impl Read) -> Result<ImportSummary> {
	let tx = conn.transaction()?;
	let mut summary = ImportSummary::default();
	let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

	for record in rdr.deserialize() {
		let record: PlayerRecord = record?;

		let team_id = match get_team_id(&tx, &record.team)? {
			Some(id) => id,
			None => {
				summary.teams_created += 1;
				new_team(&tx, &record.team)?
			}
		};

		let position = match record.position.as_deref() {
			None | Some("") => None,
			Some(name) => match get_position_id(&tx, name)? {
				Some(id) => Some(id),
				None => {
					return Err(LeagueError::validation(format!(
						"unknown position '{name}' for {}",
						record.name
					)))
				}
			},
		};

		let skills = Skills::new(record.speed, record.endurance, record.force, record.technique)?;
		let (_, assignment) = new_player(&tx, team_id, &record.name, skills, position)?;
		if let Some(notice) = assignment.notice() {
			info!(player = %record.name, "imported without position");
			summary.notices.push(format!("{}: {notice}", record.name));
		}
		summary.players += 1;
	}

	tx.commit()?;

	Ok(summary)
}

#[cfg(test)]
mod tests {
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;
	use crate::{data::list_teams, db::open_in_memory, players::list_players};

	#[test]
	fn seeds_only_an_empty_league() {
		let mut conn = open_in_memory().unwrap();
		let mut rng = StdRng::seed_from_u64(3);

		assert!(seed_demo(&mut conn, &mut rng).unwrap());
		assert!(!seed_demo(&mut conn, &mut rng).unwrap());

		assert_eq!(list_teams(&conn).unwrap().len(), 3);
		let players = list_players(&conn, None).unwrap();
		assert_eq!(players.len(), 15);
		for listing in players {
			let s = listing.player.skills;
			for value in [s.speed, s.endurance, s.force, s.technique] {
				assert!((40..=90).contains(&value));
			}
			assert!(listing.position.is_none());
		}
		assert_eq!(get_position_id(&conn, "Milieu").unwrap(), Some(3));
	}

	#[test]
	fn imports_players_with_eligibility() {
		let mut conn = open_in_memory().unwrap();
		new_position(&conn, "Attaquant", Skills::new(60, 50, 40, 70).unwrap()).unwrap();
		let csv = "team,name,speed,endurance,force,technique,position
Lions,X,80,70,60,70,Attaquant
Lions,Weak,30,30,30,30,Attaquant
Tigres,Y,50,50,50,50,
";

		let summary = import_players(&mut conn, csv.as_bytes()).unwrap();

		assert_eq!(summary.players, 3);
		assert_eq!(summary.teams_created, 2);
		assert_eq!(summary.notices.len(), 1);
		assert!(summary.notices[0].starts_with("Weak:"));

		let positions: Vec<(String, Option<String>)> = list_players(&conn, None)
			.unwrap()
			.into_iter()
			.map(|l| (l.player.name, l.position))
			.collect();
		assert_eq!(
			positions,
			[
				("Weak".to_owned(), None),
				("X".to_owned(), Some("Attaquant".to_owned())),
				("Y".to_owned(), None),
			]
		);
	}

	#[test]
	fn bad_row_rolls_back_import() {
		let mut conn = open_in_memory().unwrap();
		let csv = "team,name,speed,endurance,force,technique,position
Lions,X,80,70,60,70,
Lions,Bad,180,70,60,70,
";

		assert!(import_players(&mut conn, csv.as_bytes()).is_err());
		assert!(list_teams(&conn).unwrap().is_empty());
	}
}
