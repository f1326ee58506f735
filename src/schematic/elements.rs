//! Schematic-level device primitives.
//!
//! Each primitive is a plain record that converts into a generic
//! [`Instance`]; the synthesizer works with these rather than raw pin maps.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Device, Instance, MosType};
use crate::Int;

/// A schematic-level representation of a MOSFET.
#[derive(Debug, Clone, Serialize)]
pub struct Mosfet {
    pub name: String,
    pub mos_type: MosType,
    /// Width multiplier relative to the unit device.
    pub w: Int,
    pub drain: String,
    pub gate: String,
    pub source: String,
    pub body: String,
}

impl From<Mosfet> for Instance {
    fn from(m: Mosfet) -> Self {
        let mut pins = BTreeMap::new();
        pins.insert("d".to_string(), m.drain);
        pins.insert("g".to_string(), m.gate);
        pins.insert("s".to_string(), m.source);
        pins.insert("b".to_string(), m.body);
        Instance {
            name: m.name,
            device: Device::Mos {
                mos_type: m.mos_type,
                w: m.w,
            },
            pins,
        }
    }
}

/// A capacitor of `m` parallel fingers of `c` unit caps each.
#[derive(Debug, Clone, Serialize)]
pub struct Capacitor {
    pub name: String,
    pub c: Int,
    pub m: Int,
    pub top: String,
    pub bot: String,
}

impl From<Capacitor> for Instance {
    fn from(c: Capacitor) -> Self {
        let mut pins = BTreeMap::new();
        pins.insert("p".to_string(), c.top);
        pins.insert("n".to_string(), c.bot);
        Instance {
            name: c.name,
            device: Device::Cap { c: c.c, m: c.m },
            pins,
        }
    }
}

/// A resistor of `r` series unit squares.
#[derive(Debug, Clone, Serialize)]
pub struct Resistor {
    pub name: String,
    pub r: Int,
    pub p: String,
    pub n: String,
}

impl From<Resistor> for Instance {
    fn from(r: Resistor) -> Self {
        let mut pins = BTreeMap::new();
        pins.insert("p".to_string(), r.p);
        pins.insert("n".to_string(), r.n);
        Instance {
            name: r.name,
            device: Device::Res { r: r.r },
            pins,
        }
    }
}

/// An independent voltage source, DC or piecewise linear.
#[derive(Debug, Clone, Serialize)]
pub struct Vsource {
    pub name: String,
    pub p: String,
    pub n: String,
    pub source: VsourceKind,
}

#[derive(Debug, Clone, Serialize)]
pub enum VsourceKind {
    Dc(f64),
    /// `(time, voltage)` points; time in nanoseconds.
    Pwl(Vec<(f64, f64)>),
}

impl Vsource {
    pub fn dc(name: impl Into<String>, p: impl Into<String>, n: impl Into<String>, dc: f64) -> Self {
        Self {
            name: name.into(),
            p: p.into(),
            n: n.into(),
            source: VsourceKind::Dc(dc),
        }
    }

    pub fn pwl(
        name: impl Into<String>,
        p: impl Into<String>,
        n: impl Into<String>,
        wave: Vec<(f64, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            p: p.into(),
            n: n.into(),
            source: VsourceKind::Pwl(wave),
        }
    }
}

impl From<Vsource> for Instance {
    fn from(v: Vsource) -> Self {
        let mut pins = BTreeMap::new();
        pins.insert("p".to_string(), v.p);
        pins.insert("n".to_string(), v.n);
        let device = match v.source {
            VsourceKind::Dc(dc) => Device::Vdc { dc },
            VsourceKind::Pwl(wave) => Device::Vpwl { wave },
        };
        Instance {
            name: v.name,
            device,
            pins,
        }
    }
}
