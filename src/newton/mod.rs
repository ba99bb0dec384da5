mod jacobian;
mod power;

pub use power::newtonpf;

/// Receives the mismatch norm after every iteration.
pub trait ProgressMonitor {
    fn update(&self, i: usize, norm_f: f64);
}

/// Prints an iteration table to stderr.
pub struct PrintProgress {}

impl ProgressMonitor for PrintProgress {
    fn update(&self, i: usize, norm_f: f64) {
        if i <= 1 {
            eprintln!(" it    max P & Q mismatch (p.u.)");
            eprintln!("----  ---------------------------");
        }
        eprintln!("{:3}        {:10.3e}", i, norm_f);
    }
}

/// Infinity norm, zero for an empty slice and NaN if any entry is NaN.
pub(crate) fn norm_inf(x: &[f64]) -> f64 {
    x.iter().fold(0.0, |m: f64, v| {
        if v.is_nan() || m.is_nan() {
            f64::NAN
        } else {
            m.max(v.abs())
        }
    })
}
