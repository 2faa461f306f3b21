//! Collects per-trial scores from a results directory and summarizes them.
//!
//! Trial files are matched purely by name: the seed is the last run of
//! decimal digits and the approach is whichever token (`lstsq` first, then
//! `ransac`) occurs in the name. Each file is turned into a [`TrialRecord`]
//! right away; everything downstream works on those records.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::plotting::plot_mse_scatter;
use crate::trial::{Approach, TrialRecord};

/// Extension of per-trial score files.
pub const SCORE_EXTENSION: &str = "csv";
pub const RESULTS_TEXT_FILE: &str = "processed_results_data.txt";
pub const RESULTS_JSON_FILE: &str = "processed_results_data.json";
pub const SCATTERPLOT_FILE: &str = "processed_scatterplot.png";

/// What the aggregator should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputKind {
    /// Density-coloured scatter of per-seed MSEs
    #[value(name = "scatterplot")]
    Scatterplot,
    /// Text and JSON summaries of the mean MSEs
    #[value(name = "results_data")]
    ResultsData,
}

impl OutputKind {
    pub fn token(self) -> &'static str {
        match self {
            OutputKind::Scatterplot => "scatterplot",
            OutputKind::ResultsData => "results_data",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Both approaches' scores for one seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedScores {
    pub lstsq: f64,
    pub ransac: f64,
}

impl SeedScores {
    pub fn get(&self, approach: Approach) -> f64 {
        match approach {
            Approach::Lstsq => self.lstsq,
            Approach::Ransac => self.ransac,
        }
    }
}

/// Per-seed scores ordered by seed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialTable {
    seeds: BTreeMap<u64, SeedScores>,
}

impl TrialTable {
    /// Pair up records by seed. Every seed needs exactly one record per approach.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = TrialRecord>,
    {
        let mut partial: BTreeMap<u64, [Option<f64>; 2]> = BTreeMap::new();
        for record in records {
            let slot = &mut partial.entry(record.seed).or_default()[record.approach as usize];
            if slot.is_some() {
                return Err(Error::DuplicateTrial {
                    seed: record.seed,
                    approach: record.approach,
                });
            }
            *slot = Some(record.mean_squared_error);
        }

        let mut seeds = BTreeMap::new();
        for (seed, [lstsq, ransac]) in partial {
            let missing = |approach| Error::MissingTrial { seed, approach };
            let scores = SeedScores {
                lstsq: lstsq.ok_or_else(|| missing(Approach::Lstsq))?,
                ransac: ransac.ok_or_else(|| missing(Approach::Ransac))?,
            };
            seeds.insert(seed, scores);
        }
        Ok(Self { seeds })
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn get(&self, seed: u64) -> Option<&SeedScores> {
        self.seeds.get(&seed)
    }

    pub fn seeds(&self) -> impl Iterator<Item = u64> + '_ {
        self.seeds.keys().copied()
    }

    /// Scores of one approach in seed order.
    pub fn values(&self, approach: Approach) -> Vec<f64> {
        self.seeds.values().map(|s| s.get(approach)).collect()
    }
}

/// Aggregate over all seeds in a [`TrialTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub num_seeds: usize,
    pub mse_lstsq: f64,
    pub mse_ransac: f64,
    /// Seeds where RANSAC scored strictly lower than least squares.
    pub ransac_wins: usize,
}

impl Summary {
    /// Three-line text form: seed count, then the mean MSE per approach.
    pub fn to_text(&self) -> String {
        format!(
            "num_seeds {}\nmse_lstsq {}\nmse_ransac {}\n",
            self.num_seeds, self.mse_lstsq, self.mse_ransac
        )
    }
}

fn digit_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("digit pattern is valid"))
}

/// Seed and approach encoded in a trial file name.
///
/// Only the final path component is inspected, so digits in parent
/// directories never leak into the seed.
pub fn parse_trial_filename(path: &Path) -> Result<(u64, Approach)> {
    let unrecognized = || Error::UnrecognizedTrialFile(path.to_path_buf());
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(unrecognized)?;

    let approach = if name.contains(Approach::Lstsq.token()) {
        Approach::Lstsq
    } else if name.contains(Approach::Ransac.token()) {
        Approach::Ransac
    } else {
        return Err(unrecognized());
    };

    let seed = digit_runs()
        .find_iter(name)
        .last()
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .ok_or_else(unrecognized)?;

    Ok((seed, approach))
}

/// Read one score file into a record.
pub fn read_trial_record(path: &Path) -> Result<TrialRecord> {
    let (seed, approach) = parse_trial_filename(path)?;
    let text = fs::read_to_string(path)?;
    let mean_squared_error = text.trim().parse::<f64>().map_err(|source| Error::InvalidScore {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TrialRecord {
        seed,
        approach,
        mean_squared_error,
    })
}

/// Score files directly inside `dir`, sorted by path.
pub fn score_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == SCORE_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load every score file in `dir` and pair the results by seed.
pub fn load_trials(dir: &Path) -> Result<TrialTable> {
    let paths = score_files(dir)?;
    debug!(dir = %dir.display(), files = paths.len(), "loading trial scores");
    let records = paths
        .iter()
        .map(|p| read_trial_record(p))
        .collect::<Result<Vec<_>>>()?;
    let table = TrialTable::from_records(records)?;
    info!(seeds = table.len(), "loaded trials");
    Ok(table)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean MSE per approach over every seed.
pub fn summarize(table: &TrialTable) -> Result<Summary> {
    if table.is_empty() {
        return Err(Error::NoTrials);
    }
    let lstsq = table.values(Approach::Lstsq);
    let ransac = table.values(Approach::Ransac);
    let ransac_wins = lstsq.iter().zip(&ransac).filter(|(l, r)| r < l).count();

    Ok(Summary {
        num_seeds: table.len(),
        mse_lstsq: mean(&lstsq),
        mse_ransac: mean(&ransac),
        ransac_wins,
    })
}

/// Write the text and JSON summaries into `dir`; returns their paths.
pub fn write_results_data(dir: &Path, summary: &Summary) -> Result<(PathBuf, PathBuf)> {
    let text_path = dir.join(RESULTS_TEXT_FILE);
    fs::write(&text_path, summary.to_text())?;

    let json_path = dir.join(RESULTS_JSON_FILE);
    fs::write(&json_path, serde_json::to_string_pretty(summary)?)?;

    info!(
        num_seeds = summary.num_seeds,
        mse_lstsq = summary.mse_lstsq,
        mse_ransac = summary.mse_ransac,
        ransac_wins = summary.ransac_wins,
        "wrote results data"
    );
    Ok((text_path, json_path))
}

/// Reload a summary written by [`write_results_data`].
pub fn read_results_json(dir: &Path) -> Result<Summary> {
    let text = fs::read_to_string(dir.join(RESULTS_JSON_FILE))?;
    Ok(serde_json::from_str(&text)?)
}

/// Render the per-seed comparison scatter plot into `dir`.
pub fn write_scatterplot(dir: &Path, table: &TrialTable) -> Result<PathBuf> {
    if table.is_empty() {
        return Err(Error::NoTrials);
    }
    let path = dir.join(SCATTERPLOT_FILE);
    plot_mse_scatter(
        &path,
        &table.values(Approach::Lstsq),
        &table.values(Approach::Ransac),
    )?;
    info!(path = %path.display(), "wrote scatterplot");
    Ok(path)
}

/// Load `dir` and produce the requested output there.
pub fn process(dir: &Path, output: OutputKind) -> Result<Vec<PathBuf>> {
    let table = load_trials(dir)?;
    match output {
        OutputKind::Scatterplot => Ok(vec![write_scatterplot(dir, &table)?]),
        OutputKind::ResultsData => {
            let summary = summarize(&table)?;
            let (text, json) = write_results_data(dir, &summary)?;
            Ok(vec![text, json])
        }
    }
}
