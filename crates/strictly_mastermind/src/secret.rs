//! Secret generation.
//!
//! Each position is drawn independently and uniformly from the preset's
//! alphabet. Repeated digits are allowed, as on the physical board.

use crate::types::{Code, DifficultyPreset};
use rand::Rng;
use tracing::instrument;

/// Generates a secret using the thread-local RNG.
#[instrument(skip_all, fields(length = preset.length, alphabet = preset.alphabet))]
pub fn generate_secret(preset: &DifficultyPreset) -> Code {
    generate_secret_with(preset, &mut rand::rng())
}

/// Generates a secret from the supplied RNG.
///
/// # Panics
///
/// Panics if the preset's alphabet is empty. Check the preset with
/// [`DifficultyPreset::validate`] first.
pub fn generate_secret_with<R: Rng + ?Sized>(preset: &DifficultyPreset, rng: &mut R) -> Code {
    (0..preset.length)
        .map(|_| rng.random_range(0..preset.alphabet))
        .collect()
}
