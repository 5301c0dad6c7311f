//! Physical constants shared by the quantity and irradiation models.

use std::f64::consts::LN_2;

/// Avogadro's number (atoms per mole).
pub const N_AV: f64 = 6.022_141e23;
/// Becquerels per microcurie.
pub const UCI_TO_BQ: f64 = 3.7e4;
/// Square centimetres per barn.
pub const BARN_TO_CM2: f64 = 1.0e-24;

pub fn decay_constant_from_half_life(half_life_s: f64) -> f64 {
    if half_life_s.is_infinite() {
        0.0
    } else {
        LN_2 / half_life_s
    }
}

pub fn half_life_from_decay_constant(decay_const: f64) -> f64 {
    if decay_const == 0.0 {
        f64::INFINITY
    } else {
        LN_2 / decay_const
    }
}
