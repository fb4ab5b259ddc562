use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use figment::error::Kind;
use figment::providers::{Env, Format, Json, Toml, Yaml};
use figment::Figment;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::Result;

pub const ENV_PREFIX: &str = "I3BARJSON_";

fn config_file(args: &Cli) -> Result<PathBuf> {
    match args.config.as_ref() {
        Some(path) => Ok(path.to_owned()),
        None => match dirs::config_dir() {
            Some(dir) => Ok(dir.join("i3barjson/config")),
            None => bail!("failed to find config dir"),
        },
    }
}

/// Merge every supported flavour of `cfg_file`, missing files are skipped
fn main_figment(cfg_file: &Path) -> Figment {
    match cfg_file.extension().and_then(OsStr::to_str) {
        // an explicit extension is used as is
        Some("toml") => Figment::new().merge(Toml::file(cfg_file)),
        Some("json") => Figment::new().merge(Json::file(cfg_file)),
        Some("yaml") | Some("yml") => Figment::new().merge(Yaml::file(cfg_file)),
        _ => Figment::new()
            .merge(Toml::file(cfg_file.with_extension("toml")))
            .merge(Json::file(cfg_file.with_extension("json")))
            .merge(Yaml::file(cfg_file.with_extension("yaml")))
            .merge(Yaml::file(cfg_file.with_extension("yml"))),
    }
}

fn resolve_include(cfg_dir: &Path, include: PathBuf) -> Result<PathBuf> {
    match cfg_dir.join(&include).canonicalize() {
        Ok(path) => Ok(path),
        Err(e) => bail!("failed to find included config {}: {}", include.display(), e),
    }
}

pub fn parse(args: &Cli) -> Result<AppConfig> {
    let cfg_file = config_file(args)?;
    let cfg_dir = cfg_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    log::debug!("reading config from: {}", cfg_file.display());
    let mut figment = main_figment(&cfg_file);

    // parse any additional config files
    let figment = {
        let mut seen_config_files = HashSet::new();
        seen_config_files.insert(cfg_file.clone());
        loop {
            let include_paths = match figment.extract_inner::<Vec<PathBuf>>("include") {
                // we got some include paths, make them relative to the main config file
                Ok(paths) => paths
                    .into_iter()
                    .map(|p| resolve_include(&cfg_dir, p))
                    .collect::<Result<Vec<_>>>()?,
                // ignore if "include" wasn't specified at all
                Err(e) if matches!(e.kind, Kind::MissingField(_)) => vec![],
                // some other error occurred
                Err(e) => bail!(e),
            };

            if include_paths.iter().all(|p| seen_config_files.contains(p)) {
                break figment;
            }

            for include in include_paths {
                if seen_config_files.contains(&include) {
                    continue;
                }

                log::debug!("including config file: {}", include.display());
                match include.extension().and_then(OsStr::to_str) {
                    Some("toml") => figment = figment.admerge(Toml::file(&include)),
                    Some("json") => figment = figment.admerge(Json::file(&include)),
                    Some("yaml") | Some("yml") => figment = figment.admerge(Yaml::file(&include)),
                    Some(e) => bail!("Unsupported file extension: {}", e),
                    None => bail!("No file extension, cannot infer file format"),
                }

                seen_config_files.insert(include);
            }
        }
    };

    // environment variables override files, eg: `I3BARJSON_HEADER__CLICK_EVENTS=true`
    let figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    Ok(figment.extract::<AppConfig>()?)
}
