use std::{fmt, io::Write};

use clap::ValueEnum;

use super::{error::*, shift::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Comma separated indices, each followed by a comma.
    #[default]
    Text,
    /// A JSON array of indices.
    Json,
}

impl fmt::Display for MatchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in self.iter() {
            write!(f, "{i},")?;
        }
        Ok(())
    }
}

impl MatchIndex {
    pub fn write_to(&self, mut w: impl Write, format: Format) -> Result<(), ShiftError> {
        match format {
            Format::Text => write!(w, "{self}")?,
            Format::Json => serde_json::to_writer(&mut w, self)?,
        }
        writeln!(w)?;
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn render(m: &MatchIndex, format: Format) -> String {
        let mut out = Vec::new();
        m.write_to(&mut out, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_keeps_trailing_separator() {
        assert_eq!(render(&MatchIndex(vec![1, 1]), Format::Text), "1,1,\n");
        assert_eq!(render(&MatchIndex(vec![0, 17, 255]), Format::Text), "0,17,255,\n");
    }

    #[test]
    fn json_array() {
        assert_eq!(render(&MatchIndex(vec![3, 0, 2]), Format::Json), "[3,0,2]\n");
    }

    #[test]
    fn empty_index() {
        assert_eq!(render(&MatchIndex(Vec::new()), Format::Text), "\n");
    }
}
