//! Model-dependent frame layout.
//!
//! A few parts of the report grammar depend on the family and model:
//! which cell sub-grammar applies and what follows the real-time flag.
//! [`FrameLayout::lookup`] is consulted once per frame, right after the
//! model field has been decoded.
//!
//! | family | report          | models                 | cell     | after real-time |
//! |--------|-----------------|------------------------|----------|-----------------|
//! | ST300  | STT/EMG/EVT/ALT | ST300, ST340, ST340LC  | 2G       | end of frame    |
//! | ST300  | STT/EMG/EVT/ALT | other ST300 models     | 2G       | unknown tail    |
//! | ST600  | STT/EMG/EVT/ALT | ST600R, ST600V         | 2G or 3G | ADC             |
//! | ST600  | UEX             | ST600R, ST600V         | 2G or 3G | end of frame    |

use crate::cell::CellGrammar;
use crate::field::Terminator;
use crate::message::ReportKind;
use suntrace_core::{Family, Model};

/// What follows the real-time flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trailer {
    /// The flag ends the frame.
    End,
    /// One ADC reading ends the frame.
    Adc,
    /// Undocumented fields up to the end of the frame.
    UnknownTail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub cell: CellGrammar,
    pub trailer: Trailer,
}

impl FrameLayout {
    #[must_use]
    pub fn lookup(family: Family, kind: ReportKind, model: Model) -> FrameLayout {
        match family {
            Family::St300 => FrameLayout {
                cell: CellGrammar::GsmOnly,
                trailer: if model.has_plain_st300_trailer() {
                    Trailer::End
                } else {
                    Trailer::UnknownTail
                },
            },
            Family::St600 => FrameLayout {
                cell: CellGrammar::GsmOrUmts,
                trailer: if kind == ReportKind::ExtendedData {
                    Trailer::End
                } else {
                    Trailer::Adc
                },
            },
        }
    }

    /// Byte expected after the real-time flag.
    #[must_use]
    pub fn real_time_terminator(&self) -> Terminator {
        match self.trailer {
            Trailer::End => Terminator::EndOfFrame,
            Trailer::Adc | Trailer::UnknownTail => Terminator::Separator,
        }
    }
}
