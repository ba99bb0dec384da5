use crate::error::{LoadFlowError, Result};
use crate::model::Line;

use num_complex::Complex64;

/// Power flow through one line, in MVA.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchFlow {
    /// 1-based line index.
    pub line: usize,
    pub from: usize,
    pub to: usize,
    /// Complex power leaving the `from` end.
    pub s_from: Complex64,
    /// Complex power leaving the `to` end.
    pub s_to: Complex64,
    /// `s_from + s_to`
    pub loss: Complex64,
    /// Effective tap ratio.
    pub tap: f64,
}

/// Computes the flow at both ends of every line from the bus voltages
/// `v` (p.u., indexed by bus number - 1).
///
///   I_from = (V_f - V_t/a) y + jB/2 V_f
///   I_to   = (V_t - a V_f) y/a^2 + jB/2 V_t
///
/// Returns the flows and the total system loss, which is the sum of the
/// line losses halved.
pub fn line_flows(
    lines: &[Line],
    v: &[Complex64],
    base_mva: f64,
) -> Result<(Vec<BranchFlow>, Complex64)> {
    let mut flows = Vec::with_capacity(lines.len());
    let mut total = Complex64::new(0.0, 0.0);

    for (l, br) in lines.iter().enumerate() {
        let vf = *v.get(br.from.wrapping_sub(1)).ok_or(LoadFlowError::UnknownBus {
            line: l + 1,
            bus: br.from,
        })?;
        let vt = *v.get(br.to.wrapping_sub(1)).ok_or(LoadFlowError::UnknownBus {
            line: l + 1,
            bus: br.to,
        })?;

        let y = br.y_series();
        let ysh = br.y_charging();
        let a = br.ratio();

        let i_f = (vf - vt / a) * y + ysh * vf;
        let i_t = (vt - vf * a) * y / (a * a) + ysh * vt;

        let s_f = vf * i_f.conj() * base_mva; // complex power at "from" bus
        let s_t = vt * i_t.conj() * base_mva; // complex power at "to" bus
        let loss = s_f + s_t;
        total += loss;

        flows.push(BranchFlow {
            line: l + 1,
            from: br.from,
            to: br.to,
            s_from: s_f,
            s_to: s_t,
            loss,
            tap: a,
        });
    }

    Ok((flows, total / 2.0))
}
