//! CDAC topology synthesis.
//!
//! Each DAC stage gets a unit predriver inverter and, depending on the
//! split strategy, one or two driver branches and capacitors. The
//! `vdivsplit` strategy additionally shares one 64-segment resistor ladder
//! across all fine branches.

use crate::bus_bit;
use crate::config::{CdacParams, SplitStrategy};
use crate::error::Result;
use crate::schematic::elements::{Capacitor, Mosfet, Resistor};
use crate::schematic::sizing::calc_driver_strength;
use crate::schematic::{MosType, PortDir, Topology};
use crate::weights::calc_weights;
use crate::Int;

/// Weights above this many unit caps split into coarse and fine branches.
pub const SPLIT_THRESHOLD: Int = 64;

/// Synthesizes the CDAC netlist for the given architecture.
///
/// Returns `Ok(None)` when the weight calculator reports the combination
/// infeasible.
pub fn generate_topology(params: &CdacParams) -> Result<Option<Topology>> {
    let weights = match calc_weights(params.n_dac, params.n_extra, params.redun_strat)? {
        Some(w) => w,
        None => return Ok(None),
    };

    let mut topo = Topology::new(params.name());
    topo.add_port("top", PortDir::InOut);
    topo.add_port("vdd", PortDir::InOut);
    topo.add_port("vss", PortDir::InOut);
    for i in 0..weights.len() {
        topo.add_port(bus_bit("dac", i), PortDir::Input);
    }

    if params.split_strat == SplitStrategy::VdivSplit {
        emit_ladder(&mut topo)?;
    }

    for (i, &w) in weights.iter().enumerate() {
        emit_predriver(&mut topo, i)?;
        match params.split_strat {
            SplitStrategy::NoSplit => emit_nosplit_stage(&mut topo, i, w)?,
            SplitStrategy::VdivSplit => emit_vdiv_stage(&mut topo, i, w)?,
            SplitStrategy::DiffCapSplit => emit_diffcap_stage(&mut topo, i, w)?,
        }
    }

    Ok(Some(topo))
}

/// Unit-sized inverter buffering `dac[i]` onto `inter[i]`.
fn emit_predriver(topo: &mut Topology, i: usize) -> Result<()> {
    let input = bus_bit("dac", i);
    let output = bus_bit("inter", i);
    topo.add(Mosfet {
        name: format!("MPbuf{i}"),
        mos_type: MosType::Pmos,
        w: 1,
        drain: output.clone(),
        gate: input.clone(),
        source: "vdd".to_string(),
        body: "vdd".to_string(),
    })?;
    topo.add(Mosfet {
        name: format!("MNbuf{i}"),
        mos_type: MosType::Nmos,
        w: 1,
        drain: output,
        gate: input,
        source: "vss".to_string(),
        body: "vss".to_string(),
    })?;
    Ok(())
}

/// Complementary driver pair for stage `i`, gated by `inter[i]`.
///
/// `tag` selects the name family (`drv` or `rdiv`); the PMOS source is a
/// parameter so fine drivers can pull from a ladder tap instead of `vdd`.
fn emit_driver_pair(
    topo: &mut Topology,
    i: usize,
    tag: &str,
    w: Int,
    pmos_source: String,
    drain: String,
) -> Result<()> {
    let gate = bus_bit("inter", i);
    topo.add(Mosfet {
        name: format!("MP{tag}{i}"),
        mos_type: MosType::Pmos,
        w,
        drain: drain.clone(),
        gate: gate.clone(),
        source: pmos_source,
        body: "vdd".to_string(),
    })?;
    topo.add(Mosfet {
        name: format!("MN{tag}{i}"),
        mos_type: MosType::Nmos,
        w,
        drain,
        gate,
        source: "vss".to_string(),
        body: "vss".to_string(),
    })?;
    Ok(())
}

fn emit_nosplit_stage(topo: &mut Topology, i: usize, w: Int) -> Result<()> {
    let bot = bus_bit("bot", i);
    emit_driver_pair(
        topo,
        i,
        "drv",
        calc_driver_strength(1, w),
        "vdd".to_string(),
        bot.clone(),
    )?;
    topo.add(Capacitor {
        name: format!("Cmain{i}"),
        c: 1,
        m: w,
        top: "top".to_string(),
        bot,
    })?;
    Ok(())
}

/// Coarse branch in threshold-sized chunks; remainder realized as a single
/// unit cap driven from ladder tap `tap[r]`, giving it an `r/64` swing.
fn emit_vdiv_stage(topo: &mut Topology, i: usize, w: Int) -> Result<()> {
    let q = w / SPLIT_THRESHOLD;
    let r = w % SPLIT_THRESHOLD;

    if q > 0 {
        let bot = bus_bit("bot", i);
        emit_driver_pair(
            topo,
            i,
            "drv",
            calc_driver_strength(SPLIT_THRESHOLD, q),
            "vdd".to_string(),
            bot.clone(),
        )?;
        topo.add(Capacitor {
            name: format!("Cmain{i}"),
            c: SPLIT_THRESHOLD,
            m: q,
            top: "top".to_string(),
            bot,
        })?;
    }

    if r > 0 {
        let bot = bus_bit("bot_rdiv", i);
        emit_driver_pair(
            topo,
            i,
            "rdiv",
            calc_driver_strength(1, 1),
            bus_bit("tap", r as usize),
            bot.clone(),
        )?;
        // The sole capacitor of a fine-only stage keeps the Cmain name.
        let name = if q > 0 {
            format!("Crdiv{i}")
        } else {
            format!("Cmain{i}")
        };
        topo.add(Capacitor {
            name,
            c: 1,
            m: 1,
            top: "top".to_string(),
            bot,
        })?;
    }

    Ok(())
}

/// Coarse branch plus a difference capacitor on the predriver node.
///
/// A nonzero remainder replaces the coarse capacitor pair with a single
/// main/difference pair whose imbalance `c_main - c_diff = 2r` carries the
/// fine charge.
fn emit_diffcap_stage(topo: &mut Topology, i: usize, w: Int) -> Result<()> {
    let q = w / SPLIT_THRESHOLD;
    let r = w % SPLIT_THRESHOLD;

    let (w_drv, c_main, m_main, c_diff, m_diff) = if r > 0 {
        let c_main = SPLIT_THRESHOLD + 1 + r;
        let c_diff = SPLIT_THRESHOLD + 1 - r;
        let w_drv = if q > 0 {
            calc_driver_strength(SPLIT_THRESHOLD, q)
        } else {
            calc_driver_strength(c_main, 1)
        };
        (w_drv, c_main, 1, c_diff, 1)
    } else {
        (calc_driver_strength(SPLIT_THRESHOLD, q), SPLIT_THRESHOLD, q, 1, q)
    };

    let bot = bus_bit("bot", i);
    emit_driver_pair(topo, i, "drv", w_drv, "vdd".to_string(), bot.clone())?;
    topo.add(Capacitor {
        name: format!("Cmain{i}"),
        c: c_main,
        m: m_main,
        top: "top".to_string(),
        bot,
    })?;
    topo.add(Capacitor {
        name: format!("Cdiff{i}"),
        c: c_diff,
        m: m_diff,
        top: "top".to_string(),
        bot: bus_bit("inter", i),
    })?;
    Ok(())
}

/// 64-segment ladder from `vss` to `vdd`; `tap[k]` sits at `k/64` of the
/// supply. Emitted once, before the stage loop.
fn emit_ladder(topo: &mut Topology) -> Result<()> {
    topo.add(Resistor {
        name: "R0".to_string(),
        r: 1,
        p: bus_bit("tap", 1),
        n: "vss".to_string(),
    })?;
    for k in 1..63 {
        topo.add(Resistor {
            name: format!("R{k}"),
            r: 1,
            p: bus_bit("tap", k + 1),
            n: bus_bit("tap", k),
        })?;
    }
    topo.add(Resistor {
        name: "R63".to_string(),
        r: 1,
        p: "vdd".to_string(),
        n: bus_bit("tap", 63),
    })?;
    Ok(())
}
