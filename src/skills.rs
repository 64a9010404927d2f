use std::fmt;

use crate::error::{LeagueError, Result};

pub const SKILL_MAX: u8 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
	Speed,
	Endurance,
	Force,
	Technique,
}

impl Attribute {
	pub const ALL: [Attribute; 4] = [
		Attribute::Speed,
		Attribute::Endurance,
		Attribute::Force,
		Attribute::Technique,
	];

	pub fn name(self) -> &'static str {
		match self {
			Attribute::Speed => "speed",
			Attribute::Endurance => "endurance",
			Attribute::Force => "force",
			Attribute::Technique => "technique",
		}
	}
}

/// Skill vector of a player, or the minimum a position asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Skills {
	pub speed: u8,
	pub endurance: u8,
	pub force: u8,
	pub technique: u8,
}

impl Skills {
	pub fn new(speed: u8, endurance: u8, force: u8, technique: u8) -> Result<Self> {
		let skills = Skills {
			speed,
			endurance,
			force,
			technique,
		};

		for attribute in Attribute::ALL {
			if skills.get(attribute) > SKILL_MAX {
				return Err(LeagueError::validation(format!(
					"{} must be between 0 and {SKILL_MAX}",
					attribute.name()
				)));
			}
		}

		Ok(skills)
	}

	pub fn get(&self, attribute: Attribute) -> u8 {
		match attribute {
			Attribute::Speed => self.speed,
			Attribute::Endurance => self.endurance,
			Attribute::Force => self.force,
			Attribute::Technique => self.technique,
		}
	}

	pub fn meets(&self, minimum: &Skills) -> bool {
		eligible(self, minimum)
	}

	/// Attributes where `self` falls below `minimum`, in display order.
	pub fn shortfalls(&self, minimum: &Skills) -> Vec<Attribute> {
		Attribute::ALL
			.into_iter()
			.filter(|&attribute| self.get(attribute) < minimum.get(attribute))
			.collect()
	}
}

impl fmt::Display for Skills {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"V:{} E:{} F:{} T:{}",
			self.speed, self.endurance, self.force, self.technique
		)
	}
}

pub fn eligible(skills: &Skills, thresholds: &Skills) -> bool {
	Attribute::ALL
		.into_iter()
		.all(|attribute| skills.get(attribute) >= thresholds.get(attribute))
}
