use std::str::FromStr;

use clap::Parser;

use crate::*;

/// The two supported batch schedulers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Manager {
    Pbs,
    Slurm,
}

impl FromStr for Manager {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pbs" => Ok(Manager::Pbs),
            "slurm" => Ok(Manager::Slurm),
            _ => bail!("unrecognized job manager: {}", s),
        }
    }
}

/// Create a new job file
///
/// Option values fall back to the `~/.new_job.py` defaults file, then to
/// built-in defaults.
#[derive(Parser, Clone, Debug)]
#[clap(
    name = "new-job",
    version,
    help_template = "{usage-heading}\n    {usage}\n\n{about}\n\n{all-args}"
)]
pub struct ClArgs {
    /// Job name
    pub job: String,
    /// Job manager (pbs or slurm)
    #[clap(short, long)]
    pub mgr: Option<String>,
    /// Research group
    #[clap(short, long)]
    pub grp: Option<String>,
    /// Queue priority
    #[clap(short, long)]
    pub queue: Option<String>,
    /// Number of CPUs per node
    #[clap(short = 'c', long)]
    pub ncpu: Option<usize>,
    /// Number of nodes
    #[clap(short = 'n', long)]
    pub node: Option<usize>,
    /// Memory in GB
    #[clap(short = 'b', long)]
    pub mem: Option<usize>,
    /// Wall time in hours
    #[clap(short = 't', long)]
    pub time: Option<usize>,
    /// Email address
    #[clap(short, long)]
    pub email: Option<String>,
    /// Overwrite an existing file without asking
    #[clap(short = 'f', long = "force")]
    pub force: bool,
}

/// Fully-resolved options for one run. Built once, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub job: String,
    pub mgr: Manager,
    pub grp: String,
    pub queue: String,
    pub ncpu: usize,
    pub node: usize,
    pub mem: usize,
    pub time: usize,
    pub email: String,
    pub overwrite: bool,
}

/// Trims and replaces hyphens with underscores. `None` when nothing is left.
pub fn normalize_job(job: &str) -> Option<String> {
    let job = job.trim().replace('-', "_");
    if job.is_empty() {
        None
    } else {
        Some(job)
    }
}

fn pick_string(flag: Option<String>, defaults: &DefaultsMap, key: &str, fallback: &str) -> String {
    flag.or_else(|| defaults.get(key).cloned())
        .unwrap_or_else(|| fallback.to_string())
}

// An unparseable numeric value in the defaults file falls through to the
// built-in default, like any other malformed input there.
fn pick_uint(flag: Option<usize>, defaults: &DefaultsMap, key: &str, fallback: usize) -> usize {
    flag.or_else(|| defaults.get(key).and_then(|v| v.parse().ok()))
        .unwrap_or(fallback)
}

fn default_email() -> String {
    let host = whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string());
    format!("{}@{}", whoami::username(), host)
}

impl Settings {
    /// Merges flags over file defaults over built-in defaults.
    pub fn resolve(args: ClArgs, defaults: &DefaultsMap) -> Result<Settings> {
        let job = normalize_job(&args.job)
            .ok_or_else(|| anyhow!("not a usable filename {:?}", args.job))?;

        let mgr: Manager = pick_string(args.mgr, defaults, "mgr", "pbs").parse()?;

        Ok(Settings {
            job,
            mgr,
            grp: pick_string(args.grp, defaults, "grp", ""),
            queue: pick_string(args.queue, defaults, "queue", "standard"),
            ncpu: pick_uint(args.ncpu, defaults, "ncpu", 12),
            node: pick_uint(args.node, defaults, "node", 1),
            mem: pick_uint(args.mem, defaults, "mem", 64),
            time: pick_uint(args.time, defaults, "time", 24),
            email: args
                .email
                .or_else(|| defaults.get("email").cloned())
                .unwrap_or_else(default_email),
            overwrite: args.force,
        })
    }
}
