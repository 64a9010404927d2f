use crate::{
	data::{Match, Participation, Position, Team},
	players::PlayerListing,
	simulation::MatchReport,
};

pub fn teams_string(teams: &[Team]) -> String {
	if teams.is_empty() {
		return String::from("No teams.\n");
	}

	let mut string = String::new();
	for team in teams {
		string.push_str(&format!("[{}] {}\n", team.id, team.name));
	}

	string
}

pub fn positions_string(positions: &[Position]) -> String {
	if positions.is_empty() {
		return String::from("No positions.\n");
	}

	let mut string = String::new();
	for position in positions {
		string.push_str(&format!(
			"[{}] {} ({})\n",
			position.id, position.name, position.minimum
		));
	}

	string
}

pub fn players_string(players: &[PlayerListing]) -> String {
	if players.is_empty() {
		return String::from("No players.\n");
	}

	let mut string = String::new();
	for listing in players {
		let player = &listing.player;
		string.push_str(&format!(
			"[{}] {} ({}) - {} {} Injury:{}\n",
			player.id,
			player.name,
			listing.team,
			listing.position.as_deref().unwrap_or("no position"),
			player.skills,
			player.injury_remaining
		));
	}

	string
}

pub fn matches_string(matches: &[Match]) -> String {
	if matches.is_empty() {
		return String::from("No matches.\n");
	}

	let mut string = String::new();
	for m in matches {
		string.push_str(&format!(
			"[{}] {} {} - {} {} ({})\n",
			m.id,
			m.team1,
			m.score1,
			m.score2,
			m.team2,
			m.played_at.format("%Y-%m-%d %H:%M:%S")
		));
	}

	string
}

pub fn sheet_string(match_id: i64, sheet: &[Participation]) -> String {
	let mut string = format!("# Match {match_id}\n");
	if sheet.is_empty() {
		string.push_str("No participations.\n");
	}
	for row in sheet {
		let injured = if row.injured { " (injured)" } else { "" };
		string.push_str(&format!("{}: {}{injured}\n", row.player, row.performance));
	}

	string
}

pub fn report_string(report: &MatchReport) -> String {
	let mut string = String::new();
	for player in &report.players {
		string.push_str(&format!("{player}.\n"));
	}
	if report.recovering > 0 {
		string.push_str(&format!("{} player(s) recovering.\n", report.recovering));
	}
	string.push_str(&format!("Match {} recorded.\n", report.match_id));

	string
}
