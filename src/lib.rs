mod color;
pub use color::*;

mod error;
pub use error::*;

mod palette;
pub use palette::*;

mod shift;
pub use shift::*;

mod output;
pub use output::*;


/// Parses a decimal integer token, ignoring surrounding whitespace.
/// `context` names where the token came from in the resulting error.
pub fn parse_int(context: &str, token: &str) -> Result<i64, ShiftError> {
    token.trim().parse().map_err(|_| ShiftError::Parse {
        context: context.to_string(),
        token: token.trim().to_string(),
    })
}
