use crate::model::{Bus, BusType};
use crate::results::BusResult;

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

/// Bus results for the solved voltages `v`.
///
/// Generation at the slack bus (P and Q) and at PV buses (Q) is
/// replaced by the value the solution implies: injected power plus
/// local demand, less any shunt injection. All other quantities are
/// reported as entered.
pub fn pfsoln(
    base_mva: f64,
    buses: &[Bus],
    y_bus: &DMatrix<Complex64>,
    v: &[Complex64],
) -> Vec<BusResult> {
    let i_bus = y_bus * DVector::from_column_slice(v);

    buses
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let s_bus = v[i] * i_bus[i].conj() * base_mva; // injected bus power
            let (pg, qg) = match b.kind {
                BusType::Slack => (s_bus.re + b.pd, s_bus.im + b.qd - b.qsh),
                BusType::PV => (b.pg, s_bus.im + b.qd - b.qsh),
                BusType::PQ => (b.pg, b.qg),
            };

            BusResult {
                id: b.id,
                kind: b.kind.label(),
                vm: v[i].norm(),
                va: v[i].arg().to_degrees(),
                pg,
                qg,
                pd: b.pd,
                qd: b.qd,
            }
        })
        .collect()
}
