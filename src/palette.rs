use std::{fs, io, path::Path};

use serde::Deserialize;

use super::{color::*, error::*, parse_int};

/// Entry count of a classic 8-bit indexed palette.
pub const PALETTE_LEN: usize = 256;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    labs: Vec<Lab>,
}

#[derive(Deserialize)]
#[serde(transparent)]
struct PaletteSource(Vec<[i64; 3]>);

impl From<PaletteSource> for Palette {
    fn from(src: PaletteSource) -> Palette {
        Palette::new(src.0.into_iter().map(Color::from))
    }
}

impl Palette {
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        let colors: Vec<Color> = colors.into_iter().collect();
        let labs = colors.iter().map(|c| c.to_lab()).collect();
        Palette { colors, labs }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Fails unless the palette holds exactly `expected` entries.
    pub fn ensure_len(self, expected: usize) -> Result<Self, ShiftError> {
        match self.len() {
            0 => Err(ShiftError::EmptyPalette),
            n if n != expected => Err(ShiftError::PaletteSize { expected, found: n }),
            _ => Ok(self),
        }
    }

    /// Index of the entry closest to `target` under the CMC metric, with
    /// `target` as the reference color. Ties go to the lowest index.
    pub fn closest(&self, target: Color) -> Result<usize, ShiftError> {
        let target = target.to_lab();
        let mut best = None;
        let mut best_d = f64::INFINITY;
        for (i, lab) in self.labs.iter().enumerate() {
            let d = target.delta_e_cmc(*lab, CMC_LIGHTNESS, CMC_CHROMA);
            if best.is_none() || d < best_d {
                best = Some(i);
                best_d = d;
            }
        }
        best.ok_or(ShiftError::EmptyPalette)
    }

    /// Decodes the line based format: one `r,g,b` entry per line. Empty
    /// tokens (e.g. from a trailing comma) are dropped, lines without any
    /// tokens are skipped and tokens after the third are ignored.
    pub fn from_text(src: &str) -> Result<Palette, ShiftError> {
        let mut colors = Vec::with_capacity(PALETTE_LEN);
        for (n, line) in src.lines().enumerate() {
            let line_no = n + 1;
            let tokens: Vec<&str> = line
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();

            if tokens.is_empty() {
                continue;
            }

            let context = format!("palette line {line_no}");
            let channels = tokens
                .iter()
                .map(|token| parse_int(&context, token))
                .collect::<Result<Vec<_>, _>>()?;

            // channels past blue are decoded but not used
            let rgb: [i64; 3] = match channels.get(..3) {
                Some(&[r, g, b]) => [r, g, b],
                _ => return Err(ShiftError::ChannelCount { line: line_no, found: channels.len() }),
            };
            colors.push(Color::from(rgb));
        }

        Ok(Palette::new(colors))
    }

    pub fn from_json(src: &str) -> serde_json::Result<Palette> {
        serde_json::from_str::<PaletteSource>(src).map(Palette::from)
    }

    pub fn from_ron(src: &str) -> ron::error::SpannedResult<Palette> {
        ron::from_str::<PaletteSource>(src).map(Palette::from)
    }

    /// Loads a palette, choosing the decoder from the file extension:
    /// `.json` and `.ron` hold a list of `[r, g, b]` triples, anything else
    /// is read as text.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Palette, ShiftError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ShiftError::MissingPalette(path.to_path_buf()),
            _ => ShiftError::Io(e),
        })?;

        Ok(match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Palette::from_json(&contents)?,
            Some("ron") => Palette::from_ron(&contents)?,
            _ => Palette::from_text(&contents)?,
        })
    }
}
