//! Configuration module for the cepstrum analyzer

mod settings;

pub use settings::{
    CepstrumConfig, Preset, MAX_FFT_SIZE, MAX_NUM_COEFFS, MAX_SAMPLE_RATE, SECOND_NS,
};
