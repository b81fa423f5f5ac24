// src/core/analysis/cepstral.rs
//
// Interval closeout: turns the accumulated power spectrum into MFCCs.

use super::channel::ChannelState;
use super::mel::MelFilterbank;
use crate::core::dsp::dct_ii;

/// Compute the cepstral coefficients for the interval that just ended.
///
/// Averages the channel's power accumulator over `num_fft` evaluations,
/// applies the log filterbank and a DCT-II over all filter energies. The
/// returned slice stays valid until [`ChannelState::reset_interval`].
pub fn compute_coefficients<'a>(
    channel: &'a mut ChannelState,
    num_fft: u64,
    filterbank: &MelFilterbank,
) -> &'a [f32] {
    let count = num_fft.max(1) as f32;
    for p in channel.power.iter_mut() {
        *p /= count;
    }

    filterbank.apply(&channel.power, &mut channel.energies);
    dct_ii(&channel.energies, &mut channel.coeffs);

    &channel.coeffs
}
