//! Testbench binding for generated CDAC topologies.
//!
//! The binder only shapes data: supply and stimulus sources, a load, the
//! DUT hookup, and one transient analysis entry. Running the simulation is
//! a collaborator's job.

use derive_builder::Builder;
use serde::Serialize;

use crate::bus_bit;
use crate::error::{CdacError, Result};
use crate::schematic::elements::{Capacitor, Vsource};
use crate::schematic::{Device, Instance, Topology};
use crate::weights::MAX_RESOLUTION;
use crate::Int;

/// Code steps exercised by the stimulus, as fractions of full scale in
/// quarters: zero, quarter, half, three-quarter, full.
const CODE_QUARTERS: [u64; 5] = [0, 1, 2, 3, 4];

/// Stimulus and load parameters for a CDAC testbench.
#[derive(Debug, Clone, Builder, Serialize)]
#[builder(derive(Debug))]
pub struct TbParams {
    /// Resolution of the DUT in bits.
    pub n_dac: u32,
    /// Supply voltage.
    #[builder(default = "1.0")]
    pub vdd: f64,
    /// Time per code step in nanoseconds.
    #[builder(default = "100.0")]
    pub t_step: f64,
    /// Stimulus edge time in nanoseconds.
    #[builder(default = "1.0")]
    pub t_edge: f64,
    /// Load capacitor multiplicity, in unit caps.
    #[builder(default = "100")]
    pub c_load: Int,
    /// Transient stop time in nanoseconds.
    #[builder(default = "500.0")]
    pub t_stop: f64,
    /// Transient step in nanoseconds.
    #[builder(default = "0.1")]
    pub t_tran_step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Analysis {
    Tran { stop: f64, step: f64 },
}

/// A testbench: a portless circuit plus named analyses.
#[derive(Debug, Clone, Serialize)]
pub struct Testbench {
    pub circuit: Topology,
    pub analyses: Vec<(String, Analysis)>,
}

impl Testbench {
    pub fn analysis(&self, name: &str) -> Option<&Analysis> {
        self.analyses
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }
}

/// Binds a testbench to a CDAC of the given resolution with default
/// stimulus and load.
pub fn generate_tb(n_dac: u32) -> Result<Testbench> {
    let params = TbParamsBuilder::default()
        .n_dac(n_dac)
        .build()
        .map_err(|e| CdacError::InvalidInput(e.to_string()))?;
    bind_tb(&params)
}

/// Binds a testbench from explicit parameters.
pub fn bind_tb(params: &TbParams) -> Result<Testbench> {
    if params.n_dac == 0 || params.n_dac > MAX_RESOLUTION {
        return Err(CdacError::InvalidInput(format!(
            "n_dac must be in 1..={}, got {}",
            MAX_RESOLUTION, params.n_dac
        )));
    }

    let mut circuit = Topology::new(format!("cdac_tb_{}b", params.n_dac));

    circuit.add(Vsource::dc("Vvdd", "vdd", "gnd", params.vdd))?;
    circuit.add(Vsource::dc("Vvss", "vss", "gnd", 0.0))?;

    let codes = dac_codes(params.n_dac);
    for bit in 0..params.n_dac {
        circuit.add(Vsource::pwl(
            format!("Vdac{bit}"),
            bus_bit("dac", bit as usize),
            "gnd",
            bit_wave(&codes, bit, params),
        ))?;
    }

    circuit.add(Capacitor {
        name: "Cload".to_string(),
        c: 1,
        m: params.c_load,
        top: "top".to_string(),
        bot: "gnd".to_string(),
    })?;

    circuit.add(dut(params.n_dac))?;

    Ok(Testbench {
        circuit,
        analyses: vec![(
            "tran1".to_string(),
            Analysis::Tran {
                stop: params.t_stop,
                step: params.t_tran_step,
            },
        )],
    })
}

/// The five canonical codes: 0, quarter scale, half, three quarters, and
/// full scale, with `max = 2^n_dac - 1`.
fn dac_codes(n_dac: u32) -> [u64; 5] {
    let max = (1u64 << n_dac) - 1;
    CODE_QUARTERS.map(|q| (max as u128 * q as u128 / 4) as u64)
}

/// Piecewise-linear wave for one DAC input bit: holds each code's bit level
/// for a full step, with a `t_edge` ramp at each transition.
fn bit_wave(codes: &[u64; 5], bit: u32, params: &TbParams) -> Vec<(f64, f64)> {
    let level = |code: u64| {
        if (code >> bit) & 1 == 1 {
            params.vdd
        } else {
            0.0
        }
    };

    let mut wave = vec![(0.0, level(codes[0]))];
    for (k, &code) in codes.iter().enumerate().skip(1) {
        let t = k as f64 * params.t_step;
        wave.push((t, level(codes[k - 1])));
        wave.push((t + params.t_edge, level(code)));
    }
    wave
}

/// DUT instance with the CDAC port map applied identically on both sides.
fn dut(n_dac: u32) -> Instance {
    let mut pins = std::collections::BTreeMap::new();
    for port in ["top", "vdd", "vss"] {
        pins.insert(port.to_string(), port.to_string());
    }
    for bit in 0..n_dac as usize {
        pins.insert(bus_bit("dac", bit), bus_bit("dac", bit));
    }
    Instance {
        name: "Xdut".to_string(),
        device: Device::Subckt {
            cell: "cdac".to_string(),
        },
        pins,
    }
}
