//! Network data: buses, lines and the validated snapshot the solver consumes.
//!
//! Bus and line rows arrive from the request layer as plain numeric
//! records (see [`Bus::from_record`] and [`Line::from_record`]). A
//! [`NetworkModel`] is an immutable snapshot: every edit returns a new
//! model, so concurrent solves never observe each other's changes.

use crate::error::{LoadFlowError, Result};

use num_complex::Complex64;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

/// Number of fields in a bus record.
pub const BUS_RECORD_LEN: usize = 11;
/// Number of fields in a line record.
pub const LINE_RECORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusType {
    /// Load bus: P and Q specified.
    PQ,
    /// Reference bus: |V| and angle fixed.
    Slack,
    /// Generator bus: P and |V| specified.
    PV,
}

impl BusType {
    /// Decodes the record type code (0 = PQ, 1 = slack, 2 = PV).
    pub fn from_code(code: f64) -> Option<Self> {
        if code == 0.0 {
            Some(BusType::PQ)
        } else if code == 1.0 {
            Some(BusType::Slack)
        } else if code == 2.0 {
            Some(BusType::PV)
        } else {
            None
        }
    }

    /// Label used in bus results.
    pub fn label(self) -> &'static str {
        match self {
            BusType::PQ => "Load",
            BusType::Slack => "Slack",
            BusType::PV => "Generator",
        }
    }
}

/// Drawing tools the request layer submits elements with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Slack,
    Generator,
    Load,
    Cable,
}

impl ToolKind {
    /// Bus type created by this tool, `None` for line tools.
    pub fn bus_type(self) -> Option<BusType> {
        match self {
            ToolKind::Slack => Some(BusType::Slack),
            ToolKind::Generator => Some(BusType::PV),
            ToolKind::Load => Some(BusType::PQ),
            ToolKind::Cable => None,
        }
    }
}

impl FromStr for ToolKind {
    type Err = LoadFlowError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Slack" => Ok(ToolKind::Slack),
            "Generator" => Ok(ToolKind::Generator),
            "Load" => Ok(ToolKind::Load),
            "Cable" => Ok(ToolKind::Cable),
            other => Err(LoadFlowError::UnknownTool(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    /// 1-based bus number.
    pub id: usize,
    pub kind: BusType,
    /// Voltage magnitude (p.u.), initial guess or set point.
    pub vm: f64,
    /// Voltage angle (degrees).
    pub va: f64,
    /// Real power demand (MW).
    pub pd: f64,
    /// Reactive power demand (MVAr).
    pub qd: f64,
    /// Real power generation (MW).
    pub pg: f64,
    /// Reactive power generation (MVAr).
    pub qg: f64,
    /// Reactive limits (MVAr). Carried through, not enforced.
    pub qmin: f64,
    pub qmax: f64,
    /// Shunt reactive injection (MVAr).
    pub qsh: f64,
}

impl Bus {
    pub fn new(id: usize, kind: BusType, vm: f64) -> Self {
        Self {
            id,
            kind,
            vm,
            va: 0.0,
            pd: 0.0,
            qd: 0.0,
            pg: 0.0,
            qg: 0.0,
            qmin: 0.0,
            qmax: 0.0,
            qsh: 0.0,
        }
    }

    /// Parses `[id, type, Vm, Va(deg), Pd, Qd, Pg, Qg, Qmin, Qmax, Qsh]`.
    ///
    /// `row` is the 1-based record position, used in error messages.
    /// Fields beyond the eleventh are ignored.
    pub fn from_record(row: usize, rec: &[f64]) -> Result<Self> {
        if rec.len() < BUS_RECORD_LEN {
            return Err(LoadFlowError::BusRecordTooShort {
                row,
                len: rec.len(),
            });
        }
        let id = bus_number(rec[0])?;
        let kind = BusType::from_code(rec[1])
            .ok_or(LoadFlowError::UnknownBusType { bus: id, code: rec[1] })?;

        const FIELDS: [&str; BUS_RECORD_LEN] = [
            "id", "type", "Vm", "Va", "Pd", "Qd", "Pg", "Qg", "Qmin", "Qmax", "Qsh",
        ];
        for (k, field) in FIELDS.iter().enumerate().skip(2) {
            if !rec[k].is_finite() {
                return Err(LoadFlowError::NonFiniteValue {
                    element: format!("bus {}", id),
                    field: *field,
                });
            }
        }

        Ok(Self {
            id,
            kind,
            vm: rec[2],
            va: rec[3],
            pd: rec[4],
            qd: rec[5],
            pg: rec[6],
            qg: rec[7],
            qmin: rec[8],
            qmax: rec[9],
            qsh: rec[10],
        })
    }

    /// Builds a bus the way the drawing tools submit it: the angle starts
    /// at zero, `p`/`q` are demand for a load and generation for a
    /// generator, and are ignored for the slack bus.
    pub fn from_tool(id: usize, kind: BusType, nominal_voltage: f64, p: f64, q: f64) -> Self {
        let mut bus = Bus::new(id, kind, nominal_voltage);
        match kind {
            BusType::PQ => {
                bus.pd = p;
                bus.qd = q;
            }
            BusType::PV => {
                bus.pg = p;
                bus.qg = q;
            }
            BusType::Slack => {}
        }
        bus
    }

    pub fn is_slack(&self) -> bool {
        self.kind == BusType::Slack
    }

    /// Net complex power injection in p.u. on `base_mva`.
    pub fn s_inj(&self, base_mva: f64) -> Complex64 {
        Complex64::new(
            (self.pg - self.pd) / base_mva,
            (self.qg - self.qd + self.qsh) / base_mva,
        )
    }
}

/// Base quantities for converting cable impedances to per-unit.
#[derive(Debug, Clone, Copy)]
pub struct CableBase {
    pub base_mva: f64,
    pub base_kv: f64,
}

impl Default for CableBase {
    fn default() -> Self {
        Self {
            base_mva: 100.0,
            base_kv: 138.0,
        }
    }
}

impl CableBase {
    /// Base impedance in ohms.
    pub fn z_base(&self) -> f64 {
        self.base_kv * self.base_kv / self.base_mva
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub from: usize,
    pub to: usize,
    /// Series resistance (p.u.).
    pub r: f64,
    /// Series reactance (p.u.).
    pub x: f64,
    /// Half of the total line charging susceptance (p.u.).
    pub b: f64,
    /// Transformer tap ratio, values <= 0 mean no transformer.
    pub tap: f64,
}

impl Line {
    pub fn new(from: usize, to: usize, r: f64, x: f64) -> Self {
        Self {
            from,
            to,
            r,
            x,
            b: 0.0,
            tap: 1.0,
        }
    }

    /// Parses `[from, to, R, X, B/2, tap]`.
    pub fn from_record(row: usize, rec: &[f64]) -> Result<Self> {
        if rec.len() < LINE_RECORD_LEN {
            return Err(LoadFlowError::LineRecordTooShort {
                row,
                len: rec.len(),
            });
        }
        let from = bus_number(rec[0])?;
        let to = bus_number(rec[1])?;

        const FIELDS: [&str; LINE_RECORD_LEN] = ["from", "to", "R", "X", "B/2", "tap"];
        for (k, field) in FIELDS.iter().enumerate().skip(2) {
            if !rec[k].is_finite() {
                return Err(LoadFlowError::NonFiniteValue {
                    element: format!("line {}", row),
                    field: *field,
                });
            }
        }

        Ok(Self {
            from,
            to,
            r: rec[2],
            x: rec[3],
            b: rec[4],
            tap: rec[5],
        })
    }

    /// Line from a cable entered in ohms per kilometre.
    pub fn from_cable(
        from: usize,
        to: usize,
        r_per_km: f64,
        x_per_km: f64,
        length_km: f64,
        b: f64,
        tap: f64,
        base: &CableBase,
    ) -> Self {
        let z_base = base.z_base();
        Self {
            from,
            to,
            r: r_per_km * length_km / z_base,
            x: x_per_km * length_km / z_base,
            b,
            tap,
        }
    }

    /// Effective tap ratio.
    pub fn ratio(&self) -> f64 {
        if self.tap > 0.0 {
            self.tap
        } else {
            1.0
        }
    }

    /// Series admittance `1 / (R + jX)`.
    pub fn y_series(&self) -> Complex64 {
        Complex64::new(self.r, self.x).inv()
    }

    /// Charging admittance lumped at each end.
    pub fn y_charging(&self) -> Complex64 {
        Complex64::new(0.0, self.b)
    }

    pub fn connects(&self, bus: usize) -> bool {
        self.from == bus || self.to == bus
    }
}

fn bus_number(v: f64) -> Result<usize> {
    if v.is_finite() && v >= 1.0 && v.fract() == 0.0 {
        Ok(v as usize)
    } else {
        Err(LoadFlowError::NonIntegerBusId(v))
    }
}

/// Raw bus and line rows as exchanged with the request layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseRecords {
    #[serde(alias = "busdata")]
    pub buses: Vec<Vec<f64>>,
    #[serde(alias = "linedata", default)]
    pub lines: Vec<Vec<f64>>,
}

impl CaseRecords {
    pub fn to_model(&self) -> Result<NetworkModel> {
        NetworkModel::from_records(&self.buses, &self.lines)
    }
}

/// Immutable snapshot of a network.
///
/// Buses are kept sorted by id. Construction only rejects malformed
/// elements and duplicate bus ids, so a network can be assembled one
/// element at a time; [`NetworkModel::validate`] checks that the
/// snapshot is solvable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkModel {
    buses: Vec<Bus>,
    lines: Vec<Line>,
}

impl NetworkModel {
    pub fn new(mut buses: Vec<Bus>, lines: Vec<Line>) -> Result<Self> {
        buses.sort_by_key(|b| b.id);
        for pair in buses.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(LoadFlowError::DuplicateBus(pair[0].id));
            }
        }
        Ok(Self { buses, lines })
    }

    pub fn from_records(bus_rows: &[Vec<f64>], line_rows: &[Vec<f64>]) -> Result<Self> {
        let buses = bus_rows
            .iter()
            .enumerate()
            .map(|(i, rec)| Bus::from_record(i + 1, rec))
            .collect::<Result<Vec<_>>>()?;
        let lines = line_rows
            .iter()
            .enumerate()
            .map(|(i, rec)| Line::from_record(i + 1, rec))
            .collect::<Result<Vec<_>>>()?;
        Self::new(buses, lines)
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn bus(&self, id: usize) -> Option<&Bus> {
        self.buses
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &self.buses[i])
    }

    /// Checks that the snapshot can be solved: bus ids run 1..=N, exactly
    /// one slack bus exists, every line joins existing buses and has a
    /// non-zero series impedance.
    pub fn validate(&self) -> Result<()> {
        if self.buses.is_empty() {
            return Err(LoadFlowError::EmptyNetwork);
        }
        let nb = self.buses.len();
        for (i, b) in self.buses.iter().enumerate() {
            if b.id != i + 1 {
                return Err(LoadFlowError::NonContiguousBusIds {
                    count: nb,
                    found: b.id,
                });
            }
        }

        match self.buses.iter().filter(|b| b.is_slack()).count() {
            0 => return Err(LoadFlowError::NoSlackBus),
            1 => {}
            n => return Err(LoadFlowError::MultipleSlackBuses(n)),
        }

        for (l, br) in self.lines.iter().enumerate() {
            for bus in [br.from, br.to] {
                if bus == 0 || bus > nb {
                    return Err(LoadFlowError::UnknownBus { line: l + 1, bus });
                }
            }
            if br.r == 0.0 && br.x == 0.0 {
                return Err(LoadFlowError::ZeroImpedance {
                    line: l + 1,
                    from: br.from,
                    to: br.to,
                });
            }
        }
        Ok(())
    }

    /// Internal (0-based) indices of the slack, PV and PQ buses.
    pub fn bus_types(&self) -> (Vec<usize>, Vec<usize>, Vec<usize>) {
        let mut ref_ = Vec::new();
        let mut pv = Vec::new();
        let mut pq = Vec::new();
        for (i, b) in self.buses.iter().enumerate() {
            match b.kind {
                BusType::Slack => ref_.push(i),
                BusType::PV => pv.push(i),
                BusType::PQ => pq.push(i),
            }
        }
        (ref_, pv, pq)
    }

    pub fn with_bus(&self, bus: Bus) -> Result<Self> {
        let mut buses = self.buses.clone();
        buses.push(bus);
        Self::new(buses, self.lines.clone())
    }

    /// Adds a line between two buses already in the table.
    ///
    /// Only the new line is checked. Whole-network rules (slack count,
    /// contiguous numbering) are left to [`NetworkModel::validate`].
    pub fn with_line(&self, line: Line) -> Result<Self> {
        let index = self.lines.len() + 1;
        for bus in [line.from, line.to] {
            if self.bus(bus).is_none() {
                return Err(LoadFlowError::UnknownBus { line: index, bus });
            }
        }
        if line.r == 0.0 && line.x == 0.0 {
            return Err(LoadFlowError::ZeroImpedance {
                line: index,
                from: line.from,
                to: line.to,
            });
        }

        let mut lines = self.lines.clone();
        lines.push(line);
        Ok(Self {
            buses: self.buses.clone(),
            lines,
        })
    }

    /// Removes every line stored as `from -> to`.
    pub fn without_line(&self, from: usize, to: usize) -> Self {
        Self {
            buses: self.buses.clone(),
            lines: self
                .lines
                .iter()
                .filter(|br| !(br.from == from && br.to == to))
                .cloned()
                .collect(),
        }
    }

    /// Removes a bus and its incident lines, then renumbers the remaining
    /// buses 1..=N in ascending order of their old ids. Line endpoints are
    /// remapped to the new numbers.
    ///
    /// Removing the slack bus is allowed; [`NetworkModel::validate`]
    /// reports the missing slack when the result is solved.
    pub fn without_bus(&self, id: usize) -> Result<Self> {
        if self.bus(id).is_none() {
            return Err(LoadFlowError::MissingBus(id));
        }

        let buses: Vec<Bus> = self.buses.iter().filter(|b| b.id != id).cloned().collect();
        let number: BTreeMap<usize, usize> = buses
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id, i + 1))
            .collect();
        let renumber = |old: usize| number.get(&old).copied().unwrap_or(old);

        let buses = buses
            .into_iter()
            .map(|b| Bus {
                id: renumber(b.id),
                ..b
            })
            .collect();
        let lines = self
            .lines
            .iter()
            .filter(|br| !br.connects(id))
            .map(|br| Line {
                from: renumber(br.from),
                to: renumber(br.to),
                ..br.clone()
            })
            .collect();

        Ok(Self { buses, lines })
    }

    /// Ids referenced by lines that are missing from the bus table.
    pub fn dangling_buses(&self) -> Vec<usize> {
        let ids: HashSet<usize> = self.buses.iter().map(|b| b.id).collect();
        let mut missing: Vec<usize> = self
            .lines
            .iter()
            .flat_map(|br| [br.from, br.to])
            .filter(|id| !ids.contains(id))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn three_bus() -> NetworkModel {
        NetworkModel::from_records(
            &[
                vec![1.0, 1.0, 1.03, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                vec![2.0, 0.0, 1.0, 0.0, 256.0, 110.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                vec![3.0, 2.0, 1.03, 0.0, 0.0, 0.0, 110.0, 0.0, 0.0, 0.0, 0.0],
            ],
            &[
                vec![1.0, 2.0, 0.02, 0.035, 0.0, 1.0],
                vec![1.0, 3.0, 0.02, 0.025, 0.0, 1.0],
                vec![3.0, 2.0, 0.0125, 0.025, 0.0, 1.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn parses_records() {
        let net = three_bus();
        net.validate().unwrap();
        assert_eq!(net.buses().len(), 3);
        assert_eq!(net.bus(2).unwrap().kind, BusType::PQ);
        assert_eq!(net.bus(3).unwrap().kind, BusType::PV);
        assert_eq!(net.lines()[2].from, 3);
        assert_eq!(net.lines()[2].to, 2);

        let (ref_, pv, pq) = net.bus_types();
        assert_eq!(ref_, vec![0]);
        assert_eq!(pv, vec![2]);
        assert_eq!(pq, vec![1]);
    }

    #[test]
    fn rejects_short_records() {
        let err = Bus::from_record(4, &[1.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(err, LoadFlowError::BusRecordTooShort { row: 4, len: 3 });

        let err = Line::from_record(2, &[1.0, 2.0, 0.1, 0.2, 0.0]).unwrap_err();
        assert_eq!(err, LoadFlowError::LineRecordTooShort { row: 2, len: 5 });
    }

    #[test]
    fn rejects_unknown_type_code() {
        let rec = [5.0, -1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let err = Bus::from_record(1, &rec).unwrap_err();
        assert_eq!(err, LoadFlowError::UnknownBusType { bus: 5, code: -1.0 });
    }

    #[test]
    fn rejects_fractional_bus_number() {
        let err = Line::from_record(1, &[1.5, 2.0, 0.1, 0.2, 0.0, 1.0]).unwrap_err();
        assert_eq!(err, LoadFlowError::NonIntegerBusId(1.5));
    }

    #[test]
    fn effective_tap() {
        let mut br = Line::new(1, 2, 0.01, 0.1);
        for tap in [0.0, -1.0, -0.5] {
            br.tap = tap;
            assert_eq!(br.ratio(), 1.0);
        }
        br.tap = 0.95;
        assert_eq!(br.ratio(), 0.95);
    }

    #[test]
    fn slack_count_is_checked() {
        let no_slack = NetworkModel::new(
            vec![Bus::new(1, BusType::PQ, 1.0), Bus::new(2, BusType::PV, 1.0)],
            vec![Line::new(1, 2, 0.01, 0.1)],
        )
        .unwrap();
        assert_eq!(no_slack.validate(), Err(LoadFlowError::NoSlackBus));

        let two_slack = NetworkModel::new(
            vec![Bus::new(1, BusType::Slack, 1.0), Bus::new(2, BusType::Slack, 1.0)],
            vec![Line::new(1, 2, 0.01, 0.1)],
        )
        .unwrap();
        assert_eq!(two_slack.validate(), Err(LoadFlowError::MultipleSlackBuses(2)));
    }

    #[test]
    fn line_to_missing_bus_is_rejected() {
        let mut lines = three_bus().lines().to_vec();
        lines.push(Line::new(2, 4, 0.01, 0.1));
        let net = NetworkModel::new(three_bus().buses().to_vec(), lines).unwrap();
        assert_eq!(
            net.validate(),
            Err(LoadFlowError::UnknownBus { line: 4, bus: 4 })
        );
        assert_eq!(net.dangling_buses(), vec![4]);
    }

    #[test]
    fn bus_zero_is_not_a_bus() {
        let mut lines = three_bus().lines().to_vec();
        lines.push(Line::new(0, 2, 0.01, 0.1));
        let net = NetworkModel::new(three_bus().buses().to_vec(), lines).unwrap();
        assert_eq!(
            net.validate(),
            Err(LoadFlowError::UnknownBus { line: 4, bus: 0 })
        );
        assert_eq!(net.dangling_buses(), vec![0]);
    }

    #[test]
    fn added_lines_must_join_existing_buses() {
        let net = three_bus();
        assert_eq!(
            net.with_line(Line::new(0, 2, 0.01, 0.1)),
            Err(LoadFlowError::UnknownBus { line: 4, bus: 0 })
        );
        assert_eq!(
            net.with_line(Line::new(2, 7, 0.01, 0.1)),
            Err(LoadFlowError::UnknownBus { line: 4, bus: 7 })
        );

        let net = net.with_line(Line::new(2, 3, 0.01, 0.1)).unwrap();
        assert_eq!(net.lines().len(), 4);
        net.validate().unwrap();
    }

    #[test]
    fn gaps_and_duplicates_are_rejected() {
        let gap = NetworkModel::new(
            vec![Bus::new(1, BusType::Slack, 1.0), Bus::new(3, BusType::PQ, 1.0)],
            vec![],
        )
        .unwrap();
        assert_eq!(
            gap.validate(),
            Err(LoadFlowError::NonContiguousBusIds { count: 2, found: 3 })
        );

        let dup = three_bus().with_bus(Bus::new(2, BusType::PQ, 1.0));
        assert_eq!(dup, Err(LoadFlowError::DuplicateBus(2)));
    }

    #[test]
    fn zero_impedance_is_rejected() {
        assert_eq!(
            three_bus().with_line(Line::new(1, 2, 0.0, 0.0)),
            Err(LoadFlowError::ZeroImpedance {
                line: 4,
                from: 1,
                to: 2
            })
        );

        let mut lines = three_bus().lines().to_vec();
        lines.push(Line::new(1, 2, 0.0, 0.0));
        let net = NetworkModel::new(three_bus().buses().to_vec(), lines).unwrap();
        assert_eq!(
            net.validate(),
            Err(LoadFlowError::ZeroImpedance {
                line: 4,
                from: 1,
                to: 2
            })
        );
    }

    #[test]
    fn removing_a_bus_renumbers() {
        let net = three_bus()
            .with_bus(Bus::from_tool(4, BusType::PQ, 1.0, 20.0, 5.0))
            .unwrap()
            .with_line(Line::new(4, 2, 0.01, 0.05))
            .unwrap();

        let net = net.without_bus(2).unwrap();
        let ids: Vec<usize> = net.buses().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(net.dangling_buses().is_empty());

        // only 1-3 survives, and old bus 3 is now bus 2
        assert_eq!(net.lines().len(), 1);
        assert_eq!((net.lines()[0].from, net.lines()[0].to), (1, 2));
        assert_eq!(net.bus(2).unwrap().kind, BusType::PV);
        assert_eq!(net.bus(3).unwrap().pd, 20.0);
        net.validate().unwrap();
    }

    #[test]
    fn removing_an_absent_bus_changes_nothing() {
        let net = three_bus();
        assert_eq!(net.without_bus(4), Err(LoadFlowError::MissingBus(4)));
        assert_eq!(net.without_bus(0), Err(LoadFlowError::MissingBus(0)));
        assert_eq!(net, three_bus());
    }

    #[test]
    fn edits_do_not_touch_the_original() {
        let net = three_bus();
        let edited = net.without_line(1, 2);
        assert_eq!(net.lines().len(), 3);
        assert_eq!(edited.lines().len(), 2);

        // stored direction matters
        assert_eq!(net.without_line(2, 1).lines().len(), 3);
    }

    #[test]
    fn tool_names() {
        assert_eq!("Generator".parse::<ToolKind>(), Ok(ToolKind::Generator));
        assert_eq!(ToolKind::Load.bus_type(), Some(BusType::PQ));
        assert_eq!(ToolKind::Cable.bus_type(), None);
        assert_eq!(
            "Grid".parse::<ToolKind>(),
            Err(LoadFlowError::UnknownTool("Grid".to_string()))
        );
    }

    #[test]
    fn tool_buses_fill_the_right_fields() {
        let load = Bus::from_tool(2, BusType::PQ, 1.0, 50.0, 10.0);
        assert_eq!((load.pd, load.qd, load.pg, load.qg), (50.0, 10.0, 0.0, 0.0));
        let gen = Bus::from_tool(3, BusType::PV, 1.02, 80.0, 0.0);
        assert_eq!((gen.pd, gen.pg), (0.0, 80.0));
        let slack = Bus::from_tool(1, BusType::Slack, 1.05, 80.0, 5.0);
        assert_eq!((slack.pd, slack.pg), (0.0, 0.0));
        assert_eq!(slack.va, 0.0);
    }

    #[test]
    fn injection_includes_shunt() {
        let mut b = Bus::from_tool(2, BusType::PQ, 1.0, 256.0, 110.0);
        b.qsh = 10.0;
        let s = b.s_inj(100.0);
        assert_relative_eq!(s.re, -2.56);
        assert_relative_eq!(s.im, -1.0);
    }

    #[test]
    fn cable_per_unit() {
        let br = Line::from_cable(1, 2, 0.2, 0.4, 0.65, 0.0, 1.0, &CableBase::default());
        let z_base = 138.0 * 138.0 / 100.0;
        assert_relative_eq!(br.r, 0.13 / z_base);
        assert_relative_eq!(br.x, 0.26 / z_base);
    }

    #[test]
    fn case_records_accept_request_layer_names() {
        let json = r#"{
            "busdata": [[1, 1, 1.0, 0, 0, 0, 0, 0, 0, 0, 0]],
            "linedata": []
        }"#;
        let case: CaseRecords = serde_json::from_str(json).unwrap();
        let net = case.to_model().unwrap();
        assert_eq!(net.buses().len(), 1);
        assert!(net.buses()[0].is_slack());
    }
}
