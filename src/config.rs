//! Runtime configuration read from the environment.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable overriding the project root.
pub const ROOT_VAR: &str = "GVT_ROOT";
/// Environment variable naming a cassette file to record the run into.
pub const RECORD_VAR: &str = "GVT_RECORD";
/// Environment variable holding the tracing filter directive.
pub const LOG_VAR: &str = "GVT_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings for one `gvt` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the working files and the `.gvt` metadata directory.
    pub root: PathBuf,
    /// Cassette path when the run should be recorded.
    pub record: Option<PathBuf>,
    /// Tracing filter directive.
    pub log_filter: String,
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `GVT_LOG` is not valid UTF-8, or if no root is
    /// configured and the current directory cannot be determined.
    pub fn from_env() -> Result<Self, std::io::Error> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Paths are taken as raw OS strings, so a root that is not valid UTF-8
    /// is still honoured.
    ///
    /// # Errors
    ///
    /// Returns an error if `GVT_LOG` is not valid UTF-8, or if no root is
    /// configured and the current directory cannot be determined.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, std::io::Error>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let root = match non_empty(lookup(ROOT_VAR)) {
            Some(root) => PathBuf::from(root),
            None => std::env::current_dir()?,
        };
        let log_filter = match non_empty(lookup(LOG_VAR)) {
            Some(filter) => filter.into_string().map_err(|raw| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("{LOG_VAR} is not valid UTF-8: {}", raw.to_string_lossy()),
                )
            })?,
            None => DEFAULT_LOG_FILTER.to_string(),
        };
        Ok(Self { root, record: non_empty(lookup(RECORD_VAR)).map(PathBuf::from), log_filter })
    }
}

fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|v| v.to_str().map_or(!v.is_empty(), |s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win() {
        let config = Config::from_lookup(|key| match key {
            ROOT_VAR => Some("/projects/demo".into()),
            RECORD_VAR => Some("/tmp/run.cassette.yaml".into()),
            LOG_VAR => Some("gvt=debug".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.root, PathBuf::from("/projects/demo"));
        assert_eq!(config.record, Some(PathBuf::from("/tmp/run.cassette.yaml")));
        assert_eq!(config.log_filter, "gvt=debug");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(|_| Some("  ".into())).unwrap();
        assert_eq!(config.root, std::env::current_dir().unwrap());
        assert_eq!(config.record, None);
        assert_eq!(config.log_filter, "warn");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_root_is_kept_verbatim() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"/projects/d\xffmo".to_vec());
        let expected = PathBuf::from(raw.clone());
        let config =
            Config::from_lookup(|key| (key == ROOT_VAR).then(|| raw.clone())).unwrap();

        assert_eq!(config.root, expected);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_log_filter_is_reported() {
        use std::os::unix::ffi::OsStringExt;

        let err = Config::from_lookup(|key| {
            (key == LOG_VAR).then(|| OsString::from_vec(vec![b'g', 0xff]))
        })
        .unwrap_err();

        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
