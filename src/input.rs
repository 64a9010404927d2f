use std::{
	collections::VecDeque,
	io::{BufRead, Write},
	ops::RangeInclusive,
};

use crate::{
	error::{LeagueError, Result},
	players::Player,
};

pub trait PerformanceSource {
	fn next_performance(&mut self, player: &Player, range: &RangeInclusive<u8>) -> Result<u8>;

	/// Called once every available player has been rated.
	fn finish(&mut self) -> Result<()> {
		Ok(())
	}
}

/// Asks on a terminal until a number inside the range comes back.
pub struct TerminalPrompt<R, W> {
	input: R,
	output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
	pub fn new(input: R, output: W) -> Self {
		Self { input, output }
	}
}

impl<R: BufRead, W: Write> PerformanceSource for TerminalPrompt<R, W> {
	fn next_performance(&mut self, player: &Player, range: &RangeInclusive<u8>) -> Result<u8> {
		loop {
			write!(
				self.output,
				"Performance of {} ({}-{}): ",
				player.name,
				range.start(),
				range.end()
			)?;
			self.output.flush()?;

			let mut line = String::new();
			if self.input.read_line(&mut line)? == 0 {
				return Err(LeagueError::validation("input ended before the match was complete"));
			}

			match line.trim().parse::<u8>() {
				Ok(value) if range.contains(&value) => return Ok(value),
				Ok(_) => writeln!(
					self.output,
					"Value must be between {} and {}.",
					range.start(),
					range.end()
				)?,
				Err(_) => writeln!(self.output, "Please enter a number.")?,
			}
		}
	}
}

pub struct ScriptedPerformances(VecDeque<u8>);

impl ScriptedPerformances {
	pub fn new(values: impl IntoIterator<Item = u8>) -> Self {
		Self(values.into_iter().collect())
	}
}

impl PerformanceSource for ScriptedPerformances {
	fn next_performance(&mut self, player: &Player, range: &RangeInclusive<u8>) -> Result<u8> {
		let value = self.0.pop_front().ok_or_else(|| {
			LeagueError::validation(format!("no performance given for {}", player.name))
		})?;
		if !range.contains(&value) {
			return Err(LeagueError::validation(format!(
				"performance {value} for {} is outside {}-{}",
				player.name,
				range.start(),
				range.end()
			)));
		}

		Ok(value)
	}

	fn finish(&mut self) -> Result<()> {
		match self.0.len() {
			0 => Ok(()),
			left => Err(LeagueError::validation(format!(
				"{left} performance(s) left over, give one per available player"
			))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::skills::Skills;

	fn player() -> Player {
		Player {
			id: 1,
			team_id: 1,
			name: "X".into(),
			skills: Skills::default(),
			position_id: None,
			injury_remaining: 0,
		}
	}

	#[test]
	fn prompt_retries_until_valid() {
		let mut out = Vec::new();
		let mut prompt = TerminalPrompt::new("abc\n11\n 7 \n".as_bytes(), &mut out);

		assert_eq!(prompt.next_performance(&player(), &(0..=10)).unwrap(), 7);

		let printed = String::from_utf8(out).unwrap();
		assert_eq!(printed.matches("Performance of X (0-10): ").count(), 3);
		assert!(printed.contains("Please enter a number."));
		assert!(printed.contains("Value must be between 0 and 10."));
	}

	#[test]
	fn prompt_fails_at_end_of_input() {
		let mut prompt = TerminalPrompt::new("".as_bytes(), Vec::new());
		assert!(matches!(
			prompt.next_performance(&player(), &(0..=10)),
			Err(LeagueError::Validation(_))
		));
	}

	#[test]
	fn script_runs_out_and_checks_range() {
		let mut script = ScriptedPerformances::new([4, 12]);

		assert_eq!(script.next_performance(&player(), &(0..=10)).unwrap(), 4);
		assert!(script.next_performance(&player(), &(0..=10)).is_err());
		assert!(script.next_performance(&player(), &(0..=10)).is_err());
	}

	#[test]
	fn script_rejects_leftover_values() {
		let mut script = ScriptedPerformances::new([4, 9]);

		script.next_performance(&player(), &(0..=10)).unwrap();
		assert!(matches!(script.finish(), Err(LeagueError::Validation(_))));

		script.next_performance(&player(), &(0..=10)).unwrap();
		assert!(script.finish().is_ok());
	}
}
