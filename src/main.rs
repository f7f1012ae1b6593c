use std::io::{BufRead, Write};
use std::path::Path;

use clap::Parser;
use new_job::*;

fn confirm_overwrite(job: &str) -> Result<()> {
    print!("{:?} exists.  Overwrite? [yN] ", job);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    if answer.trim_start().to_lowercase().starts_with('y') {
        Ok(())
    } else {
        bail!("Will not overwrite. Bye!")
    }
}

fn write_script(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("failed to write {:?}", path))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(perms.mode() | 0o755);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {:?}", path))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = ClArgs::parse();

    let defaults = match rc_file_path() {
        Some(p) => load_defaults(p)?,
        None => DefaultsMap::new(),
    };
    let settings = Settings::resolve(args, &defaults)?;

    let path = Path::new(&settings.job);
    if path.is_file() && !settings.overwrite {
        confirm_overwrite(&settings.job)?;
    }

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    write_script(path, &render(&settings, &cwd))?;

    println!("Done, see new script {:?}.", settings.job);
    Ok(())
}
