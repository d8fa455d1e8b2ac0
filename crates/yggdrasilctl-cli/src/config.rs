//! Configuration loading helpers for the admin client.
//!
//! The logic here filters CLI arguments destined for `ortho-config` so the
//! loader only receives supported flags while the main runtime can operate on
//! the remaining command tokens. The daemon's tooling spells the endpoint flag
//! `-endpoint`, so single-dash forms of known flags are accepted and rewritten
//! to their long form.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig as _;
use yggdrasilctl_config::Config;

use crate::AppError;

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: This list must be kept in sync with the fields of
/// `yggdrasilctl_config::Config` plus the loader's own `--config-path`.
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--endpoint",
    "--log-filter",
    "--log-format",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// # Flag Ordering
    ///
    /// Configuration flags (listed in `CONFIG_CLI_FLAGS`) must appear before
    /// the command name. Flags appearing after it are sent to the daemon as
    /// parameters.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, PartialEq, Eq)]
enum FlagAction {
    Include {
        argument: OsString,
        needs_value: bool,
    },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

impl OrthoConfigLoader {
    fn process_config_flag(argument: &OsStr) -> FlagAction {
        let argument_text = argument.to_string_lossy();
        let long_form = if argument_text.starts_with("--") {
            argument_text.into_owned()
        } else if argument_text.starts_with('-') {
            format!("-{argument_text}")
        } else {
            return FlagAction::Skip;
        };

        let (flag, has_inline_value) = long_form
            .split_once('=')
            .map_or((long_form.as_str(), false), |(name, _)| (name, true));

        if CONFIG_CLI_FLAGS.contains(&flag) {
            return FlagAction::Include {
                argument: OsString::from(&long_form),
                needs_value: !has_inline_value,
            };
        }

        FlagAction::Skip
    }
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some(program) = args.first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut filtered: Vec<OsString> = vec![program.clone()];
    let mut command_start = 1usize;
    let mut pending_value = false;

    for argument in args.iter().skip(1) {
        if pending_value {
            filtered.push(argument.clone());
            pending_value = false;
            command_start += 1;
            continue;
        }

        match OrthoConfigLoader::process_config_flag(argument.as_os_str()) {
            FlagAction::Include {
                argument: long_form,
                needs_value,
            } => {
                filtered.push(long_form);
                command_start += 1;
                pending_value = needs_value;
            }
            FlagAction::Skip => break,
        }
    }

    ConfigArgumentSplit {
        config_arguments: filtered,
        command_start,
    }
}
