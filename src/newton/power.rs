use crate::debug::{format_f64_vec, format_polar_vec};
use crate::error::{LoadFlowError, Result};
use crate::linsolve::{LinSolveError, LinearSolver};
use crate::newton::jacobian::{calc_injections, Jacobian};
use crate::newton::{norm_inf, ProgressMonitor};
use crate::pfopt::PFOpt;
use crate::ybus::polar;

use nalgebra::DMatrix;
use num_complex::Complex64;
use std::iter::zip;

/// Solves power flow using full Newton's method (power balance, polar).
///
/// The bus voltage vector contains the set point for generator
/// (including ref bus) buses, and the reference angle of the swing
/// bus, as well as an initial guess for remaining magnitudes and
/// angles. `s_bus` is the scheduled net injection of every bus in p.u.
///
/// Each iteration evaluates the P mismatch at every non-slack bus and
/// the Q mismatch at every PQ bus, solves the reduced Jacobian system
/// and applies the correction. Iteration stops once the largest
/// mismatch of an iteration falls below `mpopt.tolerance` or after
/// `mpopt.max_it` iterations.
///
/// Returns the final complex voltages, a flag which indicates whether it
/// converged or not, and the number of iterations performed. A singular
/// Jacobian is an error.
pub fn newtonpf(
    y_bus: &DMatrix<Complex64>,
    s_bus: &[Complex64],
    v0: &[Complex64],
    pv: &[usize],
    pq: &[usize],
    solver: &dyn LinearSolver,
    mpopt: &PFOpt,
    progress: Option<&dyn ProgressMonitor>,
) -> Result<(Vec<Complex64>, bool, usize)> {
    let nb = v0.len();
    if y_bus.shape() != (nb, nb) || s_bus.len() != nb {
        return Err(LoadFlowError::Numerical(format!(
            "Ybus is {}x{} for {} buses",
            y_bus.nrows(),
            y_bus.ncols(),
            nb
        )));
    }

    let mut pvpq = [pv, pq].concat();
    pvpq.sort_unstable();

    let tol = mpopt.tolerance;
    let max_it = mpopt.max_it;

    let (ym, theta) = polar(y_bus);
    let mut va: Vec<f64> = v0.iter().map(|v| v.arg()).collect();
    let mut vm: Vec<f64> = v0.iter().map(|v| v.norm()).collect();

    let p_spec: Vec<f64> = s_bus.iter().map(|s| s.re).collect();
    let q_spec: Vec<f64> = s_bus.iter().map(|s| s.im).collect();

    // set up indexing for updating V
    let npvpq = pvpq.len();
    let npq = pq.len();
    let (j1, j2) = (0, npvpq); // j1:j2 - V angle of pv and pq buses
    let (j3, j4) = (j2, j2 + npq); // j3:j4 - V mag of pq buses

    let mut i = 0;
    let mut norm_f = f64::INFINITY;

    while norm_f >= tol && i < max_it {
        // update iteration counter
        i += 1;

        // evaluate F(x)
        let (p_cal, q_cal) = calc_injections(&ym, &theta, &vm, &va);
        let f: Vec<f64> = [
            pvpq.iter().map(|&k| p_spec[k] - p_cal[k]).collect::<Vec<_>>(),
            pq.iter().map(|&k| q_spec[k] - q_cal[k]).collect::<Vec<_>>(),
        ]
        .concat();
        log::trace!("F_{}: {}", i, format_f64_vec(&f));

        // evaluate Jacobian
        let jac = Jacobian::new(&ym, &theta, &vm, &va).reduce(&pvpq, pq);
        log::trace!("J_{}:{}", i, jac);

        // compute update step
        let dx = {
            let mut dx = f.clone();
            solver.solve(jac, &mut dx).map_err(|err| match err {
                LinSolveError::Singular => LoadFlowError::SingularJacobian { iteration: i },
                err => LoadFlowError::Numerical(err.to_string()),
            })?;
            dx
        };
        log::trace!("dx: {}", format_f64_vec(&dx));

        // update voltage
        for (&k, dva) in zip(&pvpq, &dx[j1..j2]) {
            va[k] += dva;
        }
        for (&k, dvm) in zip(pq, &dx[j3..j4]) {
            vm[k] += dvm;
        }

        // check for convergence
        norm_f = norm_inf(&f);
        if let Some(pm) = progress {
            pm.update(i, norm_f);
        }
        log::debug!("norm_f{}: {}", i, norm_f);
    }

    let v: Vec<Complex64> = zip(&vm, &va)
        .map(|(&vm, &va)| Complex64::from_polar(vm, va))
        .collect();
    log::debug!("V_{}: {}", i, format_polar_vec(&v));

    if v.iter().any(|v| !(v.re.is_finite() && v.im.is_finite())) {
        return Err(LoadFlowError::Numerical(format!(
            "non-finite bus voltage after {} iterations",
            i
        )));
    }

    let converged = norm_f < tol;
    if converged {
        log::info!(
            "Newton's method power flow (power balance, polar) converged in {} iterations.",
            i
        );
    } else {
        log::info!(
            "Newton's method power flow (power balance, polar) did not converge in {} iterations.",
            i
        );
    }

    Ok((v, converged, i))
}
