use nalgebra::DMatrix;

/// Calculated bus injections from the polar form of Ybus.
///
///   P_i =  sum_k |V_i||V_k||Y_ik| cos(theta_ik - d_i + d_k)
///   Q_i = -sum_k |V_i||V_k||Y_ik| sin(theta_ik - d_i + d_k)
pub(crate) fn calc_injections(
    ym: &DMatrix<f64>,
    theta: &DMatrix<f64>,
    vm: &[f64],
    va: &[f64],
) -> (Vec<f64>, Vec<f64>) {
    let nb = vm.len();
    let mut p = vec![0.0; nb];
    let mut q = vec![0.0; nb];
    for i in 0..nb {
        for k in 0..nb {
            let a = theta[(i, k)] - va[i] + va[k];
            let m = vm[i] * vm[k] * ym[(i, k)];
            p[i] += m * a.cos();
            q[i] -= m * a.sin();
        }
    }
    (p, q)
}

/// Full (nb x nb) Jacobian blocks of the polar power balance equations.
pub(crate) struct Jacobian {
    /// dP/dVa
    pub j1: DMatrix<f64>,
    /// dP/dVm
    pub j2: DMatrix<f64>,
    /// dQ/dVa
    pub j3: DMatrix<f64>,
    /// dQ/dVm
    pub j4: DMatrix<f64>,
}

impl Jacobian {
    pub fn new(ym: &DMatrix<f64>, theta: &DMatrix<f64>, vm: &[f64], va: &[f64]) -> Self {
        let nb = vm.len();
        let mut j1 = DMatrix::zeros(nb, nb);
        let mut j2 = DMatrix::zeros(nb, nb);
        let mut j3 = DMatrix::zeros(nb, nb);
        let mut j4 = DMatrix::zeros(nb, nb);

        for i in 0..nb {
            for k in 0..nb {
                if i == k {
                    continue;
                }
                let a = theta[(i, k)] - va[i] + va[k];
                let (sin, cos) = a.sin_cos();
                let vy = vm[i] * ym[(i, k)];

                j1[(i, k)] = -vy * vm[k] * sin;
                j2[(i, k)] = vy * cos;
                j3[(i, k)] = -vy * vm[k] * cos;
                j4[(i, k)] = -vy * sin;

                j1[(i, i)] += vy * vm[k] * sin;
                j2[(i, i)] += vm[k] * ym[(i, k)] * cos;
                j3[(i, i)] += vy * vm[k] * cos;
                j4[(i, i)] -= vm[k] * ym[(i, k)] * sin;
            }
            let (sin, cos) = theta[(i, i)].sin_cos();
            j2[(i, i)] += 2.0 * vm[i] * ym[(i, i)] * cos;
            j4[(i, i)] -= 2.0 * vm[i] * ym[(i, i)] * sin;
        }

        Self { j1, j2, j3, j4 }
    }

    /// Reduced Jacobian
    ///
    ///   [ j1(pvpq, pvpq)  j2(pvpq, pq) ]
    ///   [ j3(pq, pvpq)    j4(pq, pq)   ]
    ///
    /// over the angle unknowns (all non-slack buses) followed by the
    /// magnitude unknowns (PQ buses).
    pub fn reduce(&self, pvpq: &[usize], pq: &[usize]) -> DMatrix<f64> {
        let na = pvpq.len();
        let n = na + pq.len();
        DMatrix::from_fn(n, n, |r, c| match (r < na, c < na) {
            (true, true) => self.j1[(pvpq[r], pvpq[c])],
            (true, false) => self.j2[(pvpq[r], pq[c - na])],
            (false, true) => self.j3[(pq[r - na], pvpq[c])],
            (false, false) => self.j4[(pq[r - na], pq[c - na])],
        })
    }
}
