use crate::config::{CdacParams, RedunStrategy, SplitStrategy};

mod config;
mod weights;

pub(crate) fn params(
    n_dac: u32,
    n_extra: u32,
    redun_strat: RedunStrategy,
    split_strat: SplitStrategy,
) -> CdacParams {
    CdacParams::new(n_dac, n_extra, redun_strat, split_strat)
}
