use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Scheme for distributing capacitor weights across the array.
#[derive(
    Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RedunStrategy {
    /// Plain binary weighting, no redundant capacitors.
    Rdx2,
    /// Sub-radix-2 geometric weighting.
    SubRdx2,
    /// Sub-radix-2 geometric weighting, truncated toward 1.
    SubRdx2Lim,
    /// Binary weighting with part of the MSB redistributed to lower stages.
    SubRdx2Rdst,
    /// Binary weighting with repeated (duplicated) stages.
    Rdx2Rpt,
}

/// Scheme for physically realizing a weighted capacitor.
#[derive(
    Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// A single capacitor with the full multiplicity.
    NoSplit,
    /// Coarse multiples of the split threshold plus a voltage-divided fine tap.
    VdivSplit,
    /// Coarse multiples of the split threshold plus a difference capacitor.
    DiffCapSplit,
}

impl fmt::Display for RedunStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RedunStrategy::Rdx2 => "rdx2",
            RedunStrategy::SubRdx2 => "subrdx2",
            RedunStrategy::SubRdx2Lim => "subrdx2lim",
            RedunStrategy::SubRdx2Rdst => "subrdx2rdst",
            RedunStrategy::Rdx2Rpt => "rdx2rpt",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SplitStrategy::NoSplit => "nosplit",
            SplitStrategy::VdivSplit => "vdivsplit",
            SplitStrategy::DiffCapSplit => "diffcapsplit",
        };
        write!(f, "{}", s)
    }
}

/// Architectural parameters of a single CDAC instance.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct CdacParams {
    /// Effective DAC resolution in bits.
    pub n_dac: u32,
    /// Number of redundant physical capacitors beyond `n_dac`.
    pub n_extra: u32,
    pub redun_strat: RedunStrategy,
    pub split_strat: SplitStrategy,
}

impl CdacParams {
    #[inline]
    pub fn new(
        n_dac: u32,
        n_extra: u32,
        redun_strat: RedunStrategy,
        split_strat: SplitStrategy,
    ) -> Self {
        Self {
            n_dac,
            n_extra,
            redun_strat,
            split_strat,
        }
    }

    /// Cell name used for the generated topology and output files.
    pub fn name(&self) -> String {
        format!(
            "cdac_{}b{}e_{}_{}",
            self.n_dac, self.n_extra, self.redun_strat, self.split_strat
        )
    }
}

/// The enumeration space handed to the sweep expander.
///
/// The default space reproduces the full production sweep; a TOML file may
/// narrow or reorder any axis.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSpace {
    pub n_dac: Vec<u32>,
    pub n_extra: Vec<u32>,
    pub redun_strats: Vec<RedunStrategy>,
    pub split_strats: Vec<SplitStrategy>,
}

impl Default for SweepSpace {
    fn default() -> Self {
        Self {
            n_dac: vec![7, 9, 11, 13],
            n_extra: vec![0, 2, 4, 6],
            redun_strats: vec![
                RedunStrategy::Rdx2,
                RedunStrategy::SubRdx2,
                RedunStrategy::SubRdx2Lim,
                RedunStrategy::SubRdx2Rdst,
                RedunStrategy::Rdx2Rpt,
            ],
            split_strats: vec![
                SplitStrategy::NoSplit,
                SplitStrategy::VdivSplit,
                SplitStrategy::DiffCapSplit,
            ],
        }
    }
}

impl SweepSpace {
    /// Number of points in the Cartesian product, before legality filtering.
    pub fn len(&self) -> usize {
        self.n_dac.len() * self.n_extra.len() * self.redun_strats.len() * self.split_strats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn parse_sweep_config(path: impl AsRef<Path>) -> Result<SweepSpace> {
    let contents = fs::read_to_string(path)?;
    let data = toml::from_str(&contents)?;
    Ok(data)
}
