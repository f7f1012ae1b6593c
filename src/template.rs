use std::fmt::Write;
use std::path::Path;

use crate::*;

const SHEBANG: &str = "#!/usr/bin/env bash";

/// Renders the full job script: shebang, scheduler directive header, fixed
/// body. Pure string assembly; values are interpolated verbatim.
pub fn render(s: &Settings, cwd: &Path) -> String {
    let mut script = String::new();
    writeln!(script, "{}", SHEBANG).unwrap();
    writeln!(script).unwrap();
    match s.mgr {
        Manager::Pbs => pbs_header(&mut script, s),
        Manager::Slurm => slurm_header(&mut script, s),
    }
    body(&mut script, cwd);
    script
}

fn pbs_header(script: &mut String, s: &Settings) {
    writeln!(script, "#PBS -W group_list={}", s.grp).unwrap();
    writeln!(script, "#PBS -q {}", s.queue).unwrap();
    writeln!(
        script,
        "#PBS -l select={}:ncpus={}:mem={}gb",
        s.node, s.ncpu, s.mem
    )
    .unwrap();
    writeln!(script, "#PBS -l walltime={}:00:00", s.time).unwrap();
    writeln!(script, "##PBS -N {}", s.job).unwrap();
    writeln!(script, "##PBS -o {}.out", s.job).unwrap();
    writeln!(script, "##PBS -e {}.err", s.job).unwrap();
    writeln!(script, "##PBS -m bea").unwrap();
    writeln!(script, "##PBS -M {}", s.email).unwrap();
}

fn slurm_header(script: &mut String, s: &Settings) {
    writeln!(script, "#SBATCH --account={}", s.grp).unwrap();
    writeln!(script, "#SBATCH --partition={}", s.queue).unwrap();
    writeln!(script, "#SBATCH --nodes={}", s.node).unwrap();
    writeln!(script, "#SBATCH --ntasks={}", s.ncpu).unwrap();
    writeln!(script, "#SBATCH --mem={}gb", s.mem).unwrap();
    writeln!(script, "#SBATCH --time={}:00:00", s.time).unwrap();
    writeln!(script, "##SBATCH --job-name={}", s.job).unwrap();
    writeln!(script, "##SBATCH --output={}.out", s.job).unwrap();
    writeln!(script, "##SBATCH --error={}.err", s.job).unwrap();
    writeln!(script, "##SBATCH --mail-type=ALL").unwrap();
    writeln!(script, "##SBATCH --mail-user={}", s.email).unwrap();
}

fn body(script: &mut String, cwd: &Path) {
    writeln!(script).unwrap();
    writeln!(script, "source ~/.bashrc").unwrap();
    writeln!(script).unwrap();
    writeln!(script, "# Activate an environment, e.g.:").unwrap();
    writeln!(script, "# source activate my-env").unwrap();
    writeln!(script).unwrap();
    writeln!(script, "# Load modules, e.g.:").unwrap();
    writeln!(script, "# module load gcc").unwrap();
    writeln!(script).unwrap();
    writeln!(script, "DIR=\"{}\"", cwd.display()).unwrap();
}
