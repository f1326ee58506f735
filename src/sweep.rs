//! Sweep expansion across the CDAC parameter space.
//!
//! The expander walks the Cartesian product of the architectural axes in a
//! fixed order, drops infeasible combinations, and pairs every surviving
//! topology with the device-level sweep axes downstream tools recognize.
//! The emission order is load-bearing: consumers cache results keyed on
//! sequence index.

use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::config::{CdacParams, SweepSpace};
use crate::error::Result;
use crate::schematic::cdac::generate_topology;
use crate::schematic::Topology;
use crate::Int;

/// Process technologies every generated design targets.
pub const TECHNOLOGIES: [Tech; 3] = [Tech::Sky130, Tech::Gf180mcu, Tech::Asap7];

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tech {
    Sky130,
    Gf180mcu,
    Asap7,
}

/// A parameter that is either pinned or enumerated as a sweep axis.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SweepValue<T> {
    Fixed(T),
    Sweep(Vec<T>),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MosFlavor {
    Lvt,
    Svt,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CapFlavor {
    #[serde(rename = "momcap_1m")]
    Momcap1m,
    #[serde(rename = "momcap_2m")]
    Momcap2m,
    #[serde(rename = "momcap_3m")]
    Momcap3m,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResFlavor {
    Polyres,
}

/// Default transistor axes: both threshold flavors, unit geometry.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MosDefaults {
    #[serde(rename = "type")]
    pub flavor: SweepValue<MosFlavor>,
    pub w: SweepValue<Int>,
    pub l: SweepValue<Int>,
    pub nf: SweepValue<Int>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CapDefaults {
    #[serde(rename = "type")]
    pub flavor: SweepValue<CapFlavor>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResDefaults {
    #[serde(rename = "type")]
    pub flavor: SweepValue<ResFlavor>,
    pub r: SweepValue<Int>,
}

/// Per-device-kind sweep axes attached to every expanded topology.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SweepDescriptor {
    pub technologies: Vec<Tech>,
    pub nmos: MosDefaults,
    pub pmos: MosDefaults,
    pub cap: CapDefaults,
    pub res: ResDefaults,
}

impl Default for MosDefaults {
    fn default() -> Self {
        Self {
            flavor: SweepValue::Sweep(vec![MosFlavor::Lvt, MosFlavor::Svt]),
            w: SweepValue::Fixed(1),
            l: SweepValue::Fixed(1),
            nf: SweepValue::Fixed(1),
        }
    }
}

impl Default for SweepDescriptor {
    fn default() -> Self {
        Self {
            technologies: TECHNOLOGIES.to_vec(),
            nmos: MosDefaults::default(),
            pmos: MosDefaults::default(),
            cap: CapDefaults {
                flavor: SweepValue::Sweep(vec![
                    CapFlavor::Momcap1m,
                    CapFlavor::Momcap2m,
                    CapFlavor::Momcap3m,
                ]),
            },
            res: ResDefaults {
                flavor: SweepValue::Fixed(ResFlavor::Polyres),
                r: SweepValue::Fixed(4),
            },
        }
    }
}

/// One expanded configuration: architecture, netlist, and sweep axes.
#[derive(Debug, Clone, Serialize)]
pub struct CdacDesign {
    pub params: CdacParams,
    pub topology: Topology,
    pub sweep: SweepDescriptor,
}

/// Expands the enumeration space into the ordered sequence of valid designs.
///
/// Axis order is `(n_dac, n_extra, redun_strat, split_strat)`, outermost
/// first. Infeasible combinations are skipped; invalid sizes propagate as
/// errors.
pub fn expand(space: &SweepSpace) -> Result<Vec<CdacDesign>> {
    let mut designs = Vec::new();
    for (&n_dac, &n_extra, &redun_strat, &split_strat) in iproduct!(
        &space.n_dac,
        &space.n_extra,
        &space.redun_strats,
        &space.split_strats
    ) {
        let params = CdacParams::new(n_dac, n_extra, redun_strat, split_strat);
        let topology = match generate_topology(&params)? {
            Some(t) => t,
            None => continue,
        };
        designs.push(CdacDesign {
            params,
            topology,
            sweep: SweepDescriptor::default(),
        });
    }
    Ok(designs)
}
