//! Signal filtering utilities

/// Apply the pre-emphasis filter in place (boosts high frequencies).
///
/// `y[i] = x[i] - coefficient * x[i - 1]`, with `y[0] = x[0]`. Runs from the
/// last index down so every step still sees the unfiltered predecessor.
pub fn pre_emphasis(samples: &mut [f32], coefficient: f32) {
    for i in (1..samples.len()).rev() {
        samples[i] -= coefficient * samples[i - 1];
    }
}
