use crate::debug::{format_polar_vec, format_rect_vec};
use crate::error::Result;
use crate::lineflow::line_flows;
use crate::linsolve::{DenseLU, LinearSolver};
use crate::model::NetworkModel;
use crate::newton::{newtonpf, ProgressMonitor};
use crate::pfopt::PFOpt;
use crate::pfsoln::pfsoln;
use crate::results::{LineResult, PFResults, Summary};
use crate::ybus::make_ybus;

use num_complex::Complex64;

/// Runs a Newton-Raphson load flow on `model` with the dense LU solver.
pub fn runpf(model: &NetworkModel, mpopt: &PFOpt) -> Result<PFResults> {
    runpf_with(model, mpopt, &DenseLU, None)
}

/// Validates the network, builds Ybus, solves for the bus voltages and
/// derives line flows and losses.
///
/// Validation failures and a singular Jacobian are errors. Hitting the
/// iteration limit is not: the results carry `converged() == false` and
/// the last voltage estimate.
pub fn runpf_with(
    model: &NetworkModel,
    mpopt: &PFOpt,
    solver: &dyn LinearSolver,
    progress: Option<&dyn ProgressMonitor>,
) -> Result<PFResults> {
    mpopt.validate()?;
    model.validate()?;

    let base_mva = mpopt.base_mva;
    let buses = model.buses();
    let lines = model.lines();

    // get bus index lists of each type of bus
    let (_ref, pv, pq) = model.bus_types();

    // initial state
    let v0: Vec<Complex64> = buses
        .iter()
        .map(|b| Complex64::from_polar(b.vm, b.va.to_radians()))
        .collect();
    log::debug!("V0: {}", format_polar_vec(&v0));

    // scheduled injections (generation - load)
    let s_bus: Vec<Complex64> = buses.iter().map(|b| b.s_inj(base_mva)).collect();
    log::trace!("Sbus: {}", format_rect_vec(&s_bus));

    // build admittance matrix
    let y_bus = make_ybus(lines, buses.len());
    log::trace!("Ybus:{}", y_bus);

    let (v, success, iterations) =
        newtonpf(&y_bus, &s_bus, &v0, &pv, &pq, solver, mpopt, progress)?;

    let (flows, loss) = line_flows(lines, &v, base_mva)?;
    log::info!(
        "Total losses: P={:.3} MW, Q={:.3} Mvar",
        loss.re,
        loss.im
    );

    Ok(PFResults {
        bus_results: pfsoln(base_mva, buses, &y_bus, &v),
        line_results: flows.iter().map(LineResult::from).collect(),
        summary: Summary::new(success, iterations, loss),
    })
}
