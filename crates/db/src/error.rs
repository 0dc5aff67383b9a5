use core::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    /// No quiz with the requested identifier exists.
    NotFound,
    /// The storage layer failed. Detail belongs in the server log, never
    /// in a response body.
    Fatal,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "quiz not found",
            Self::Fatal => "the database encountered a fatal error",
        })
    }
}

pub type Result<T> = core::result::Result<T, Error>;
