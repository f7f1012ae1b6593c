use std::path::{Path, PathBuf};

use regex::Regex;

use crate::*;

pub const RC_FILE_NAME: &str = ".new_job.py";

/// Ordered option-name -> value map read from the per-user rc file.
pub type DefaultsMap = IndexMap<String, String>;

/// `~/.new_job.py`, or `None` when the home directory cannot be determined.
pub fn rc_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(RC_FILE_NAME))
}

/// Reads the defaults file if it exists. A missing file is an empty map.
pub fn load_defaults(path: impl AsRef<Path>) -> Result<DefaultsMap> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(DefaultsMap::new());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read defaults file {:?}", path))?;
    Ok(parse_defaults(&text))
}

/// Parses `key=value` lines. The first `=` separates key from value, both
/// sides are trimmed. Lines with no `=`, a blank key, or a blank value are
/// skipped.
pub fn parse_defaults(text: &str) -> DefaultsMap {
    lazy_static::lazy_static! {
        static ref KEY_VALUE: Regex = Regex::new(r"^([^=]+)=(.*)$").unwrap();
    }
    let mut defaults = DefaultsMap::new();
    for line in text.lines() {
        if let Some(captures) = KEY_VALUE.captures(line) {
            let key = captures[1].trim();
            let val = captures[2].trim();
            if !key.is_empty() && !val.is_empty() {
                defaults.insert(key.to_string(), val.to_string());
            }
        }
    }
    defaults
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> DefaultsMap {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let parsed = load_defaults(dir.path().join(RC_FILE_NAME)).unwrap();
        assert_eq!(parsed, DefaultsMap::new());
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_defaults(""), DefaultsMap::new());
        assert_eq!(parse_defaults("\n\n"), DefaultsMap::new());
    }

    #[test]
    fn well_formed_lines() {
        let parsed = parse_defaults("mgr=slurm\nqueue=windfall\nncpu=28\n");
        assert_eq!(
            parsed,
            map([("mgr", "slurm"), ("queue", "windfall"), ("ncpu", "28")])
        );
    }

    #[test]
    fn keys_and_values_trimmed() {
        assert_eq!(
            parse_defaults("  mgr =  pbs  \n\tmem\t=\t64\t"),
            map([("mgr", "pbs"), ("mem", "64")])
        );
    }

    #[test]
    fn malformed_lines_skipped() {
        assert_eq!(parse_defaults("no separator here"), DefaultsMap::new());
        assert_eq!(parse_defaults("   =value"), DefaultsMap::new());
        assert_eq!(parse_defaults("key=   "), DefaultsMap::new());
        assert_eq!(
            parse_defaults("junk\nqueue=standard\n=\n"),
            map([("queue", "standard")])
        );
    }

    #[test]
    fn first_equals_separates() {
        assert_eq!(
            parse_defaults("email=a=b@host"),
            map([("email", "a=b@host")])
        );
    }

    #[test]
    fn later_lines_win() {
        assert_eq!(
            parse_defaults("time=24\ntime=48"),
            map([("time", "48")])
        );
    }
}
