use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnitrackError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown program: {0}")]
    UnknownProgram(String),

    #[error("No course groups could be read from catalog: {0}")]
    EmptyCatalog(String),

    #[error("Could not read transcript: {0}")]
    Transcript(String),

    #[error("No course {course} in group {group}")]
    NoSuchCourse { group: usize, course: usize },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, UnitrackError>;
