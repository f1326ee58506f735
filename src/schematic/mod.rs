//! In-memory netlist structures shared by the CDAC synthesizer and the
//! testbench binder.
//!
//! Downstream tools (SPICE writers, layout generators) consume these
//! structures directly; port and instance order is insertion order so that
//! repeated runs emit identical netlists.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::error::{CdacError, Result};
use crate::Int;

pub mod cdac;
pub mod elements;
pub mod sizing;
pub mod tb;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDir {
    Input,
    Output,
    InOut,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Port {
    pub name: String,
    pub dir: PortDir,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MosType {
    /// An n-channel transistor.
    Nmos,
    /// A p-channel transistor.
    Pmos,
}

/// Device kind plus its numeric parameters.
///
/// `w` is a transistor width multiplier, `c` a unit-cap count, `m` a
/// multiplicity, and `r` a resistance multiplier. The voltage sources and
/// the subcircuit reference only ever appear in testbenches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Device {
    Mos { mos_type: MosType, w: Int },
    Cap { c: Int, m: Int },
    Res { r: Int },
    Vdc { dc: f64 },
    Vpwl { wave: Vec<(f64, f64)> },
    Subckt { cell: String },
}

/// A named, connected device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instance {
    pub name: String,
    pub device: Device,
    /// Pin name to net name.
    pub pins: BTreeMap<String, String>,
}

/// A generated circuit: a port list plus a flat bag of instances.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Topology {
    pub name: String,
    ports: Vec<Port>,
    instances: Vec<Instance>,
    #[serde(skip)]
    instance_names: HashSet<String>,
}

impl Topology {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn add_port(&mut self, name: impl Into<String>, dir: PortDir) {
        self.ports.push(Port {
            name: name.into(),
            dir,
        });
    }

    /// Adds an instance, rejecting duplicate names.
    ///
    /// A duplicate indicates a synthesizer bug; the topology must not be
    /// emitted in that case.
    pub fn add(&mut self, instance: impl Into<Instance>) -> Result<()> {
        let instance = instance.into();
        if !self.instance_names.insert(instance.name.clone()) {
            return Err(CdacError::DuplicateInstance(instance.name));
        }
        self.instances.push(instance);
        Ok(())
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn instance(&self, name: &str) -> Option<&Instance> {
        self.instances.iter().find(|inst| inst.name == name)
    }

    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Checks connectivity.
    ///
    /// Every net must either be a declared port or join at least two pins;
    /// an internal net seen on a single pin is dangling. Instance-name
    /// uniqueness is already enforced by [`Topology::add`].
    pub fn validate(&self) -> Result<()> {
        let port_names: HashSet<&str> = self.ports.iter().map(|p| p.name.as_str()).collect();

        let mut net_pins: HashMap<&str, usize> = HashMap::new();
        for inst in &self.instances {
            for net in inst.pins.values() {
                *net_pins.entry(net.as_str()).or_default() += 1;
            }
        }

        for inst in &self.instances {
            for net in inst.pins.values() {
                if port_names.contains(net.as_str()) {
                    continue;
                }
                if net_pins[net.as_str()] < 2 {
                    return Err(CdacError::DanglingNet(net.clone()));
                }
            }
        }

        Ok(())
    }
}
