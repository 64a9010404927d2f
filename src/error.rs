use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeagueError {
	#[error("{0}")]
	Validation(String),

	#[error("match {match_id} recorded, but neither team has any players")]
	EmptyRoster { match_id: i64 },

	#[error("database error: {0}")]
	Sqlite(#[from] rusqlite::Error),

	#[error("csv error: {0}")]
	Csv(#[from] csv::Error),

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}

impl LeagueError {
	pub fn validation(message: impl Into<String>) -> Self {
		Self::Validation(message.into())
	}
}

pub type Result<T, E = LeagueError> = std::result::Result<T, E>;
