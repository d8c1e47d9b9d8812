//! Cellular location field.
//!
//! ST600 devices report either an opaque 2G cell id or a 3G cell made of
//! five sub-fields. Nothing on the wire tags the variant: a first token of
//! exactly [`CELL_3G_TOKEN_LEN`] bytes (8 hex characters and `;`) is a 3G
//! cell id and is followed by MCC, MNC, LAC and signal level. Any other
//! length is a 2G cell. ST300 devices only send the 2G form.

use crate::frame::FrameReader;
use serde::{Deserialize, Serialize};
use std::io::Read;
use suntrace_core::{DecodeError, DecodeResult, Field, constants::*};

/// Structured 3G cell information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell3g {
    pub cell_id: String,
    pub mcc: String,
    pub mnc: String,
    pub lac: String,
    pub signal_level: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Gsm(String),
    Umts(Cell3g),
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Gsm(String::new())
    }
}

impl Cell {
    #[must_use]
    pub fn is_3g(&self) -> bool {
        matches!(self, Cell::Umts(_))
    }

    /// The cell id, whichever the generation.
    #[must_use]
    pub fn cell_id(&self) -> &str {
        match self {
            Cell::Gsm(id) => id,
            Cell::Umts(cell) => &cell.cell_id,
        }
    }
}

/// Which cell sub-grammar a report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellGrammar {
    /// One hex token, at most 6 characters.
    GsmOnly,
    /// 2G or 3G, chosen by the length of the first token.
    GsmOrUmts,
}

fn hex_text<R: Read>(
    reader: &mut FrameReader<R>,
    max_len: usize,
    field: Field,
) -> DecodeResult<String> {
    let token = reader.delimited(max_len, SEPARATOR, field)?;
    if !token.is_hex() {
        return Err(DecodeError::Syntax { field });
    }
    Ok(String::from_utf8_lossy(token.payload()).into_owned())
}

fn signal_level<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<f32> {
    let token = reader.delimited(MAX_SIGNAL_LEVEL_LEN, SEPARATOR, Field::SignalLevel)?;
    if !token.is_decimal() {
        return Err(DecodeError::Syntax {
            field: Field::SignalLevel,
        });
    }
    std::str::from_utf8(token.payload())
        .ok()
        .and_then(|s| s.parse::<f32>().ok())
        .ok_or_else(|| DecodeError::OutOfRange {
            field: Field::SignalLevel,
            literal: String::from_utf8_lossy(token.payload()).into_owned(),
        })
}

/// Decode the cell field into `cell`.
///
/// `cell` is updated as sub-fields are decoded, so on error it holds
/// everything read before the failing sub-field.
pub fn decode<R: Read>(
    reader: &mut FrameReader<R>,
    grammar: CellGrammar,
    cell: &mut Cell,
) -> DecodeResult<()> {
    let max_len = match grammar {
        CellGrammar::GsmOnly => MAX_CELL_2G_LEN,
        CellGrammar::GsmOrUmts => MAX_CELL_LEN,
    };
    let token = reader.delimited(max_len, SEPARATOR, Field::Cell)?;
    if !token.is_hex() {
        return Err(DecodeError::Syntax { field: Field::Cell });
    }
    let cell_id = String::from_utf8_lossy(token.payload()).into_owned();

    if token.len() != CELL_3G_TOKEN_LEN {
        *cell = Cell::Gsm(cell_id);
        return Ok(());
    }

    let mut umts = Cell3g {
        cell_id,
        ..Cell3g::default()
    };
    let result = umts_fields(reader, &mut umts);
    *cell = Cell::Umts(umts);
    result
}

fn umts_fields<R: Read>(reader: &mut FrameReader<R>, umts: &mut Cell3g) -> DecodeResult<()> {
    umts.mcc = hex_text(reader, MAX_MCC_LEN, Field::Mcc)?;
    umts.mnc = hex_text(reader, MAX_MNC_LEN, Field::Mnc)?;
    umts.lac = hex_text(reader, MAX_LAC_LEN, Field::Lac)?;
    umts.signal_level = signal_level(reader)?;
    Ok(())
}

/// Convenience wrapper returning the decoded cell.
pub fn read<R: Read>(reader: &mut FrameReader<R>, grammar: CellGrammar) -> DecodeResult<Cell> {
    let mut cell = Cell::default();
    decode(reader, grammar, &mut cell)?;
    Ok(cell)
}
