use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::simulation::INJURY_CHANCE;

#[derive(Parser)]
#[command(author, version, about = "Amateur sports league manager", long_about = None)]
pub struct Cli {
	#[arg(short, long, value_name = "FILE", default_value = "sport_manager.db")]
	pub database: PathBuf,

	#[arg(short, long, value_name = "FILE")]
	pub output: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
	#[command(subcommand)]
	Team(TeamCommand),
	#[command(subcommand)]
	Position(PositionCommand),
	#[command(subcommand)]
	Player(PlayerCommand),
	#[command(subcommand)]
	Match(MatchCommand),
	/// Fill an empty league with demo data
	Seed {
		#[arg(long)]
		seed: Option<u64>,
	},
	/// Import players from a CSV file
	Load {
		#[arg(value_name = "FILE")]
		players: PathBuf,
	},
}

#[derive(Subcommand)]
pub enum TeamCommand {
	Add { name: String },
	List,
	Rename { id: i64, name: String },
	Delete { id: i64 },
}

#[derive(Args)]
pub struct SkillArgs {
	#[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
	pub speed: u8,
	#[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
	pub endurance: u8,
	#[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
	pub force: u8,
	#[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
	pub technique: u8,
}

#[derive(Subcommand)]
pub enum PositionCommand {
	Add {
		name: String,
		#[command(flatten)]
		minimum: SkillArgs,
	},
	List,
	Update {
		id: i64,
		name: String,
		#[command(flatten)]
		minimum: SkillArgs,
	},
	Delete {
		id: i64,
	},
}

#[derive(Subcommand)]
pub enum PlayerCommand {
	Add {
		team: i64,
		name: String,
		#[command(flatten)]
		skills: SkillArgs,
		#[arg(short, long)]
		position: Option<i64>,
	},
	List {
		#[arg(short, long)]
		team: Option<i64>,
	},
	Update {
		id: i64,
		#[arg(long)]
		name: Option<String>,
		#[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
		speed: Option<u8>,
		#[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
		endurance: Option<u8>,
		#[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
		force: Option<u8>,
		#[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
		technique: Option<u8>,
		#[arg(short, long)]
		position: Option<i64>,
	},
	Delete {
		id: i64,
	},
}

#[derive(Subcommand)]
pub enum MatchCommand {
	/// Record a match, asking for each available player's performance
	Play {
		team1: i64,
		team2: i64,
		score1: u32,
		score2: u32,
		/// Ratings in roster order instead of prompting, e.g. 7,5,8
		#[arg(long, value_delimiter = ',')]
		performances: Option<Vec<u8>>,
		#[arg(long, default_value_t = INJURY_CHANCE, value_parser = probability)]
		injury_chance: f64,
		#[arg(long)]
		seed: Option<u64>,
	},
	List,
	Show {
		id: i64,
	},
}

fn probability(s: &str) -> Result<f64, String> {
	let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
	if (0.0..=1.0).contains(&value) {
		Ok(value)
	} else {
		Err(format!("{value} is not between 0 and 1"))
	}
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn command_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn parses_match_play() {
		let cli = Cli::try_parse_from([
			"league",
			"match",
			"play",
			"1",
			"2",
			"3",
			"0",
			"--performances",
			"7,5,8",
			"--seed",
			"4",
		])
		.unwrap();

		let Commands::Match(MatchCommand::Play {
			team1,
			performances,
			injury_chance,
			seed,
			..
		}) = cli.command
		else {
			panic!("expected match play");
		};
		assert_eq!(team1, 1);
		assert_eq!(performances, Some(vec![7, 5, 8]));
		assert_eq!(injury_chance, INJURY_CHANCE);
		assert_eq!(seed, Some(4));
		assert_eq!(cli.database, PathBuf::from("sport_manager.db"));
	}

	#[test]
	fn rejects_out_of_range_values() {
		assert!(Cli::try_parse_from(["league", "player", "add", "1", "X", "101", "1", "1", "1"]).is_err());
		assert!(Cli::try_parse_from([
			"league", "match", "play", "1", "2", "0", "0", "--injury-chance", "1.5"
		])
		.is_err());
	}
}
