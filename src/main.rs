mod cli;
mod data;
mod db;
mod error;
mod injury;
mod input;
mod players;
mod print;
mod seed;
mod simulation;
mod skills;

use std::{
	fs::File,
	io::{self, Write},
	process::ExitCode,
};

use clap::Parser;
use cli::{Cli, Commands, MatchCommand, PlayerCommand, PositionCommand, SkillArgs, TeamCommand};
use error::{LeagueError, Result};
use injury::RandomDice;
use input::{PerformanceSource, ScriptedPerformances, TerminalPrompt};
use players::PlayerChanges;
use rand::{rngs::StdRng, SeedableRng};
use simulation::{MatchRequest, MatchRules};
use skills::Skills;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
	tracing_subscriber::registry()
		.with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.init();

	let cli = Cli::parse();

	match run(cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("error: {e}");
			ExitCode::FAILURE
		}
	}
}

fn rng(seed: Option<u64>) -> StdRng {
	match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_entropy(),
	}
}

fn skill_vector(args: &SkillArgs) -> Result<Skills> {
	Skills::new(args.speed, args.endurance, args.force, args.technique)
}

fn run(cli: Cli) -> Result<()> {
	let mut conn = db::open(&cli.database)?;

	let mut out = match cli.output.as_deref() {
		Some(path) => Box::new(File::create(path)?) as Box<dyn Write>,
		None => Box::new(io::stdout()) as Box<dyn Write>,
	};

	let string = match cli.command {
		Commands::Team(command) => match command {
			TeamCommand::Add { name } => {
				let id = data::new_team(&conn, &name)?;
				format!("Team {id} created.\n")
			}
			TeamCommand::List => print::teams_string(&data::list_teams(&conn)?),
			TeamCommand::Rename { id, name } => {
				data::rename_team(&conn, id, &name)?;
				String::from("Team updated.\n")
			}
			TeamCommand::Delete { id } => {
				data::delete_team(&conn, id)?;
				String::from("Team deleted.\n")
			}
		},
		Commands::Position(command) => match command {
			PositionCommand::Add { name, minimum } => {
				let id = data::new_position(&conn, &name, skill_vector(&minimum)?)?;
				format!("Position {id} created.\n")
			}
			PositionCommand::List => print::positions_string(&data::list_positions(&conn)?),
			PositionCommand::Update { id, name, minimum } => {
				data::update_position(&conn, id, &name, skill_vector(&minimum)?)?;
				String::from("Position updated.\n")
			}
			PositionCommand::Delete { id } => {
				data::delete_position(&conn, id)?;
				String::from("Position deleted.\n")
			}
		},
		Commands::Player(command) => match command {
			PlayerCommand::Add {
				team,
				name,
				skills: args,
				position,
			} => {
				let (id, assignment) =
					players::new_player(&conn, team, &name, skill_vector(&args)?, position)?;
				match assignment.notice() {
					Some(notice) => format!("{notice}.\nPlayer {id} created.\n"),
					None => format!("Player {id} created.\n"),
				}
			}
			PlayerCommand::List { team } => print::players_string(&players::list_players(&conn, team)?),
			PlayerCommand::Update {
				id,
				name,
				speed,
				endurance,
				force,
				technique,
				position,
			} => {
				let changes = PlayerChanges {
					name,
					speed,
					endurance,
					force,
					technique,
					position,
				};
				let assignment = players::update_player(&conn, id, changes)?;
				match assignment.notice() {
					Some(notice) => format!("{notice}.\nPlayer updated.\n"),
					None => String::from("Player updated.\n"),
				}
			}
			PlayerCommand::Delete { id } => {
				players::delete_player(&conn, id)?;
				String::from("Player deleted.\n")
			}
		},
		Commands::Match(command) => match command {
			MatchCommand::Play {
				team1,
				team2,
				score1,
				score2,
				performances,
				injury_chance,
				seed,
			} => {
				let request = MatchRequest {
					team1,
					team2,
					score1,
					score2,
				};
				let rules = MatchRules {
					injury_chance,
					..Default::default()
				};
				let mut dice = RandomDice(rng(seed));
				let mut source: Box<dyn PerformanceSource> = match performances {
					Some(values) => Box::new(ScriptedPerformances::new(values)),
					None => Box::new(TerminalPrompt::new(io::stdin().lock(), io::stdout())),
				};

				let report = simulation::play_match(
					&mut conn,
					&request,
					&rules,
					source.as_mut(),
					&mut dice,
				)?;
				print::report_string(&report)
			}
			MatchCommand::List => print::matches_string(&data::list_matches(&conn)?),
			MatchCommand::Show { id } => print::sheet_string(id, &data::match_sheet(&conn, id)?),
		},
		Commands::Seed { seed: rng_seed } => {
			if seed::seed_demo(&mut conn, &mut rng(rng_seed))? {
				String::from("Demo data added.\n")
			} else {
				String::from("Data already exists, nothing added.\n")
			}
		}
		Commands::Load { players: path } => {
			let file = File::open(&path)?;
			let summary = seed::import_players(&mut conn, file)?;

			let mut string = String::new();
			for notice in &summary.notices {
				string.push_str(&format!("{notice}.\n"));
			}
			string.push_str(&format!(
				"{} player(s) imported, {} team(s) created.\n",
				summary.players, summary.teams_created
			));
			string
		}
	};

	out.write_all(string.as_bytes()).map_err(LeagueError::from)
}
