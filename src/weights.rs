//! Capacitor weight generation for the supported redundancy strategies.

use crate::config::RedunStrategy;
use crate::error::{CdacError, Result};
use crate::Int;

/// Largest supported DAC resolution, in bits.
///
/// Unit-cap counts are held in 64-bit integers; resolutions past this bound
/// have no physical realization anyway.
pub const MAX_RESOLUTION: u32 = 32;

/// Computes the capacitor weight sequence for the given architecture.
///
/// Weights are in unit-cap counts, most significant bit first, with
/// `n_dac + n_extra` entries. Returns `Ok(None)` when the combination is
/// infeasible for the chosen strategy; such combinations are expected and
/// are skipped by the sweep expander. Out-of-range sizes are an error.
pub fn calc_weights(
    n_dac: u32,
    n_extra: u32,
    redun_strat: RedunStrategy,
) -> Result<Option<Vec<Int>>> {
    if n_dac == 0 || n_dac > MAX_RESOLUTION {
        return Err(CdacError::InvalidInput(format!(
            "n_dac must be in 1..={}, got {}",
            MAX_RESOLUTION, n_dac
        )));
    }
    if n_extra > MAX_RESOLUTION {
        return Err(CdacError::InvalidInput(format!(
            "n_extra must be at most {}, got {}",
            MAX_RESOLUTION, n_extra
        )));
    }

    // rdx2 admits no redundant capacitors; every other strategy needs them.
    let weights = match redun_strat {
        RedunStrategy::Rdx2 => {
            if n_extra != 0 {
                None
            } else {
                Some(binary_weights(n_dac))
            }
        }
        RedunStrategy::SubRdx2 => {
            if n_extra == 0 {
                None
            } else {
                Some(subradix_weights(n_dac, n_extra, false))
            }
        }
        RedunStrategy::SubRdx2Lim => {
            if n_extra == 0 {
                None
            } else {
                Some(subradix_weights(n_dac, n_extra, true))
            }
        }
        RedunStrategy::SubRdx2Rdst => {
            if n_extra == 0 {
                None
            } else {
                redistributed_weights(n_dac, n_extra)
            }
        }
        RedunStrategy::Rdx2Rpt => {
            if n_extra == 0 {
                None
            } else {
                repeated_weights(n_dac, n_extra)
            }
        }
    };

    Ok(weights)
}

/// `[2^(n_dac-1), ..., 2, 1]`.
fn binary_weights(n_dac: u32) -> Vec<Int> {
    (0..n_dac).rev().map(|i| 1 << i).collect()
}

/// Geometric weights with radix `r = 2^(n_dac/m)`, so the m-stage array
/// still spans `2^n_dac` while each stage overlaps the ones below it.
///
/// With `limit` set, values are truncated toward zero and clamped to at
/// least one unit cap; otherwise they are rounded to the nearest integer.
fn subradix_weights(n_dac: u32, n_extra: u32, limit: bool) -> Vec<Int> {
    let m = n_dac + n_extra;
    let radix = 2f64.powf(n_dac as f64 / m as f64);
    (0..m)
        .map(|i| {
            let x = radix.powi((m - 1 - i) as i32);
            if limit {
                (x.floor() as Int).max(1)
            } else {
                x.round() as Int
            }
        })
        .collect()
}

/// Binary weights with `2^(n_extra+2)` carved out of the MSB and spread
/// over the stages below it.
///
/// The base sequence is padded with unit caps to `m` entries so every
/// redundant stage exists even where the auxiliary sequence runs out.
/// Infeasible when the MSB cannot give up the redistributed charge and
/// stay positive.
fn redistributed_weights(n_dac: u32, n_extra: u32) -> Option<Vec<Int>> {
    let n_redist = n_extra + 2;
    let msb: Int = 1 << (n_dac - 1);
    if msb <= 1 << n_redist {
        return None;
    }

    let m = (n_dac + n_extra) as usize;
    let mut w = binary_weights(n_dac);
    w.resize(m, 1);
    w[0] -= 1 << n_redist;

    for (k, aux) in aux_sequence(n_redist).into_iter().enumerate() {
        let pos = k + 1;
        if pos >= m {
            break;
        }
        w[pos] += aux;
    }

    Some(w)
}

/// Descending powers of two taken twice each, then four unit entries.
/// Sums to exactly `2^n_redist`.
fn aux_sequence(n_redist: u32) -> Vec<Int> {
    let mut aux = Vec::new();
    for e in (1..n_redist.saturating_sub(1)).rev() {
        let v = 1 << e;
        aux.push(v);
        aux.push(v);
    }
    aux.extend([1, 1, 1, 1]);
    aux
}

/// Binary weights with `n_extra` stages duplicated, spaced `n_dac / n_extra`
/// apart starting one position above the LSB.
fn repeated_weights(n_dac: u32, n_extra: u32) -> Option<Vec<Int>> {
    let spacing = (n_dac / n_extra) as usize;
    let n = n_dac as usize;

    let mut clones = vec![0usize; n];
    for k in 0..n_extra as usize {
        let offset = 1 + k * spacing;
        if offset >= n {
            return None;
        }
        clones[n - 1 - offset] += 1;
    }

    let mut w = Vec::with_capacity(n + n_extra as usize);
    for (i, b) in binary_weights(n_dac).into_iter().enumerate() {
        for _ in 0..=clones[i] {
            w.push(b);
        }
    }
    Some(w)
}
