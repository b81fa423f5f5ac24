//! Digital Signal Processing utilities

pub mod dct;
pub mod fft;
pub mod filters;
pub mod windows;

pub use dct::dct_ii;
pub use fft::{accumulate_power, FftProcessor};
pub use filters::pre_emphasis;
pub use windows::{apply_window, hamming};
