//! Root group
//!
//! Fills the shared [`Config`]; writes nothing.

use crate::cli::Matches;
use crate::config::Config;
use crate::error::Result;

pub const VERBOSE: &str = "verbose";
pub const HOME_DIRECTORY: &str = "home-directory";

/// Resolve the root group's options into the context
pub fn resolve_root(config: &mut Config, matches: &Matches) -> Result<()> {
    config.verbose = matches.flag(VERBOSE);
    if let Some(home) = matches.path(HOME_DIRECTORY) {
        config.home_directory = home.to_path_buf();
    }
    log::debug!("Home directory: {}", config.home_directory.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parse;
    use crate::commands::app;
    use std::path::PathBuf;

    #[test]
    fn test_resolve_defaults() {
        let app = app();
        let inv = parse(&["greet"], &app).unwrap();
        let mut config = Config::default();
        resolve_root(&mut config, inv.root().matches()).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolve_overrides() {
        let app = app();
        let inv = parse(&["--home-directory", "/srv", "--verbose", "greet"], &app).unwrap();
        let mut config = Config::default();
        resolve_root(&mut config, inv.root().matches()).unwrap();

        assert!(config.verbose);
        assert_eq!(config.home_directory, PathBuf::from("/srv"));
    }
}
