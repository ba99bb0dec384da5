//! Solved load flow, in the units the request layer works in.

use crate::lineflow::BranchFlow;

use num_complex::Complex64;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusResult {
    #[serde(rename = "bus")]
    pub id: usize,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Voltage magnitude (p.u.).
    #[serde(rename = "V")]
    pub vm: f64,
    /// Voltage angle (degrees).
    #[serde(rename = "angle")]
    pub va: f64,
    #[serde(rename = "Pg")]
    pub pg: f64,
    #[serde(rename = "Qg")]
    pub qg: f64,
    #[serde(rename = "Pd")]
    pub pd: f64,
    #[serde(rename = "Qd")]
    pub qd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineResult {
    pub line: usize,
    pub from: usize,
    pub to: usize,
    #[serde(rename = "Pij")]
    pub p: f64,
    #[serde(rename = "Qij")]
    pub q: f64,
    #[serde(rename = "Sij")]
    pub s: f64,
    #[serde(rename = "P_loss")]
    pub p_loss: f64,
    #[serde(rename = "Q_loss")]
    pub q_loss: f64,
    pub tap: f64,
}

impl From<&BranchFlow> for LineResult {
    fn from(f: &BranchFlow) -> Self {
        Self {
            line: f.line,
            from: f.from,
            to: f.to,
            p: f.s_from.re,
            q: f.s_from.im,
            s: f.s_from.norm(),
            p_loss: f.loss.re,
            q_loss: f.loss.im,
            tap: f.tap,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    #[serde(rename = "converged")]
    pub description: String,
    #[serde(skip)]
    pub success: bool,
    #[serde(skip)]
    pub iterations: usize,
    /// Total real power loss (MW).
    #[serde(rename = "P_loss")]
    pub p_loss: f64,
    /// Total reactive power loss (MVAr).
    #[serde(rename = "Q_loss")]
    pub q_loss: f64,
}

impl Summary {
    pub fn new(success: bool, iterations: usize, loss: Complex64) -> Self {
        Self {
            description: format!(
                "{} in {} iterations",
                if success { "Yes" } else { "No" },
                iterations
            ),
            success,
            iterations,
            p_loss: loss.re,
            q_loss: loss.im,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PFResults {
    pub bus_results: Vec<BusResult>,
    pub line_results: Vec<LineResult>,
    pub summary: Summary,
}

impl PFResults {
    pub fn converged(&self) -> bool {
        self.summary.success
    }

    pub fn iterations(&self) -> usize {
        self.summary.iterations
    }
}
