//! Generation snapshots and report sinks.
//!
//! The runner hands a [`Snapshot`] to a [`ReportSink`] at the start of
//! every generation and once more at termination. What happens to it is
//! up to the sink: [`NullSink`] drops it, [`MemorySink`] keeps copies, and
//! [`CsvHistorySink`] writes the classic per-generation text files.

use super::population::Population;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Evaluation and generation counters at a reporting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationInfo {
    /// Number of objective evaluations so far (`n_fe`).
    pub evaluations: usize,
    /// Generation counter (`c_gen`), starting at 1.
    pub generation: usize,
}

/// Borrowed view of the population at a reporting point.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Current population.
    pub population: &'a Population,
    /// Counters at this point.
    pub info: GenerationInfo,
}

impl<'a> Snapshot<'a> {
    /// Rows of `[objectives..., decisions...]`, one per subproblem.
    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + 'a {
        let population = self.population;
        (0..population.len()).map(move |i| population.row(i))
    }
}

/// Receives population snapshots during a run.
///
/// Errors abort the run and are returned as
/// [`MoeadError::Report`](super::MoeadError::Report).
pub trait ReportSink {
    /// Called at the start of every generation.
    fn record_generation(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;

    /// Called exactly once, after the last generation.
    fn record_final(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;
}

/// Sink that discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn record_generation(&mut self, _snapshot: &Snapshot<'_>) -> io::Result<()> {
        Ok(())
    }

    fn record_final(&mut self, _snapshot: &Snapshot<'_>) -> io::Result<()> {
        Ok(())
    }
}

/// Owned copy of a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRecord {
    /// Counters at the reporting point.
    pub info: GenerationInfo,
    /// `[objectives..., decisions...]` rows.
    pub rows: Vec<Vec<f64>>,
}

impl SnapshotRecord {
    fn capture(snapshot: &Snapshot<'_>) -> Self {
        Self {
            info: snapshot.info,
            rows: snapshot.rows().collect(),
        }
    }
}

/// Sink that keeps every snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// One record per generation, in order.
    pub generations: Vec<SnapshotRecord>,
    /// The terminal record, once the run finished.
    pub final_record: Option<SnapshotRecord>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for MemorySink {
    fn record_generation(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        self.generations.push(SnapshotRecord::capture(snapshot));
        Ok(())
    }

    fn record_final(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        self.final_record = Some(SnapshotRecord::capture(snapshot));
        Ok(())
    }
}

/// Sink writing whitespace-delimited text files per generation.
///
/// Layout under `output`:
///
/// ```text
/// <output>/history/<seed>/<gen>_paretos.csv   rows of [objectives..., decisions...]
/// <output>/history/<seed>/<gen>_info_gen.csv  n_fe and c_gen, one per line
/// <output>/<seed>_final.csv                   final population, written at termination
/// ```
///
/// Values use `%.18e` scientific notation (`1.000000000000000000e+00`).
#[derive(Debug, Clone)]
pub struct CsvHistorySink {
    output: PathBuf,
    history: PathBuf,
    seed: u64,
}

impl CsvHistorySink {
    /// Creates the sink and its directories.
    pub fn new(output: impl AsRef<Path>, seed: u64) -> io::Result<Self> {
        let output = output.as_ref().to_path_buf();
        let history = output.join("history").join(seed.to_string());
        fs::create_dir_all(&history)?;
        Ok(Self {
            output,
            history,
            seed,
        })
    }

    /// Directory holding the per-generation files.
    pub fn history_dir(&self) -> &Path {
        &self.history
    }

    /// Path of the final population file.
    pub fn final_path(&self) -> PathBuf {
        self.output.join(format!("{}_final.csv", self.seed))
    }

    fn write_history(&self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let generation = snapshot.info.generation;
        write_matrix(
            &self.history.join(format!("{generation}_paretos.csv")),
            snapshot.rows(),
        )?;
        write_matrix(
            &self.history.join(format!("{generation}_info_gen.csv")),
            [
                vec![snapshot.info.evaluations as f64],
                vec![generation as f64],
            ],
        )
    }
}

impl ReportSink for CsvHistorySink {
    fn record_generation(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        self.write_history(snapshot)
    }

    fn record_final(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        write_matrix(&self.final_path(), snapshot.rows())?;
        self.write_history(snapshot)
    }
}

fn write_matrix<I>(path: &Path, rows: I) -> io::Result<()>
where
    I: IntoIterator<Item = Vec<f64>>,
{
    let mut out = BufWriter::new(fs::File::create(path)?);
    for row in rows {
        let line: Vec<String> = row.iter().map(|&v| format_sci(v)).collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    out.flush()
}

/// Formats `v` like C's `%.18e`: 18 mantissa digits, signed two-digit exponent.
pub fn format_sci(v: f64) -> String {
    if !v.is_finite() {
        return if v.is_nan() {
            "nan".into()
        } else if v > 0.0 {
            "inf".into()
        } else {
            "-inf".into()
        };
    }
    let formatted = format!("{v:.18e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exp: i32 = exponent.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population() -> Population {
        Population::new(
            vec![vec![0.5, 0.25], vec![1.0, 0.0]],
            vec![vec![2.0, 3.0], vec![4.0, 5.0]],
        )
    }

    #[test]
    fn test_format_sci() {
        assert_eq!(format_sci(1.0), "1.000000000000000000e+00");
        assert_eq!(format_sci(0.0), "0.000000000000000000e+00");
        assert_eq!(format_sci(-0.0009765625), "-9.765625000000000000e-04");
        assert_eq!(format_sci(12345.0), "1.234500000000000000e+04");
        assert_eq!(format_sci(1024.0), "1.024000000000000000e+03");
        assert_eq!(format_sci(f64::NAN), "nan");
        assert_eq!(format_sci(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_snapshot_rows() {
        let pop = population();
        let snap = Snapshot {
            population: &pop,
            info: GenerationInfo {
                evaluations: 2,
                generation: 1,
            },
        };
        let rows: Vec<Vec<f64>> = snap.rows().collect();
        assert_eq!(rows, vec![vec![2.0, 3.0, 0.5, 0.25], vec![4.0, 5.0, 1.0, 0.0]]);
    }

    #[test]
    fn test_memory_sink_records() {
        let pop = population();
        let mut sink = MemorySink::new();
        let info = GenerationInfo {
            evaluations: 2,
            generation: 1,
        };
        sink.record_generation(&Snapshot { population: &pop, info }).unwrap();
        assert_eq!(sink.generations.len(), 1);
        assert!(sink.final_record.is_none());

        sink.record_final(&Snapshot { population: &pop, info }).unwrap();
        let last = sink.final_record.as_ref().unwrap();
        assert_eq!(last.info, info);
        assert_eq!(last.rows.len(), 2);
    }

    #[test]
    fn test_csv_sink_layout() {
        let dir = tempfile::tempdir().unwrap();
        let pop = population();
        let mut sink = CsvHistorySink::new(dir.path().join("run"), 7).unwrap();
        assert!(sink.history_dir().is_dir());

        let info = GenerationInfo {
            evaluations: 12,
            generation: 3,
        };
        sink.record_generation(&Snapshot { population: &pop, info }).unwrap();

        let paretos = fs::read_to_string(sink.history_dir().join("3_paretos.csv")).unwrap();
        let lines: Vec<&str> = paretos.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "2.000000000000000000e+00 3.000000000000000000e+00 5.000000000000000000e-01 2.500000000000000000e-01"
        );

        let info_gen = fs::read_to_string(sink.history_dir().join("3_info_gen.csv")).unwrap();
        assert_eq!(
            info_gen,
            "1.200000000000000000e+01\n3.000000000000000000e+00\n"
        );

        assert!(!sink.final_path().exists());
        sink.record_final(&Snapshot { population: &pop, info }).unwrap();
        assert_eq!(fs::read_to_string(sink.final_path()).unwrap(), paretos);
        assert!(sink.final_path().ends_with("7_final.csv"));
    }
}
