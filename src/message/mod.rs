//! Message module for cepstrum results

mod result;

pub use result::{CepstrumMessage, Magnitude, Segment};
