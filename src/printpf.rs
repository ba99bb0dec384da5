use crate::results::PFResults;

use std::io::{self, Write};

/// Writes a plain-text report of the bus voltages, line flows and losses.
pub fn printpf<W: Write>(results: &PFResults, mut w: W) -> io::Result<()> {
    writeln!(w, "Power Flow Solution by Newton-Raphson Method")?;
    writeln!(w, "Converged: {}", results.summary.description)?;
    writeln!(w)?;

    writeln!(
        w,
        " Bus  Type        Voltage    Angle     ------Load------    ---Generation---"
    )?;
    writeln!(
        w,
        "  No.             Mag.       Degree      MW      Mvar        MW      Mvar"
    )?;
    for b in &results.bus_results {
        writeln!(
            w,
            "{:4}  {:<10} {:7.3} {:10.3} {:9.3} {:9.3} {:9.3} {:9.3}",
            b.id, b.kind, b.vm, b.va, b.pd, b.qd, b.pg, b.qg
        )?;
    }
    let (pd, qd, pg, qg) = results
        .bus_results
        .iter()
        .fold((0.0, 0.0, 0.0, 0.0), |(pd, qd, pg, qg), b| {
            (pd + b.pd, qd + b.qd, pg + b.pg, qg + b.qg)
        });
    writeln!(
        w,
        "Total                        {:18.3} {:9.3} {:9.3} {:9.3}",
        pd, qd, pg, qg
    )?;
    writeln!(w)?;

    writeln!(w, "Line Flow and Losses")?;
    writeln!(
        w,
        "Line From   To    P (MW)  Q (Mvar)   S (MVA)    Loss P    Loss Q     Tap"
    )?;
    for l in &results.line_results {
        writeln!(
            w,
            "{:4} {:4} {:4} {:9.3} {:9.3} {:9.3} {:9.3} {:9.3} {:7.3}",
            l.line, l.from, l.to, l.p, l.q, l.s, l.p_loss, l.q_loss, l.tap
        )?;
    }
    writeln!(w)?;
    writeln!(
        w,
        "Total losses: P={:.3} MW, Q={:.3} Mvar",
        results.summary.p_loss, results.summary.q_loss
    )?;
    Ok(())
}
