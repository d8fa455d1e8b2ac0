//! Human-readable rendering of admin socket responses.
//!
//! The daemon's payloads carry no schema, so rendering is chosen by the
//! command name echoed back in the reply. Each strategy inspects the payload
//! with checked accessors and declines with `None` when the shape is not what
//! it expects; the registry then falls back to indented JSON.

mod interface;
mod scalar;
mod table;

use std::collections::HashMap;

use clap::ValueEnum;
use serde_json::Value;
use tracing::trace;

use interface::render_interfaces;
use table::render_table;

/// Output format selection for admin responses.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    Auto,
    /// Always render human-readable output.
    #[default]
    Human,
    /// Always emit the daemon's reply as a single JSON line.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Rendered through the [`RendererRegistry`].
    Human,
    /// The raw reply document.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto => {
                if stdout_is_terminal {
                    ResolvedOutputFormat::Human
                } else {
                    ResolvedOutputFormat::Json
                }
            }
            Self::Human => ResolvedOutputFormat::Human,
            Self::Json => ResolvedOutputFormat::Json,
        }
    }
}

/// A rendering strategy for one command's `response` payload.
///
/// Returns `None` when the payload does not have the expected shape.
pub type Renderer = fn(&Value) -> Option<String>;

/// Commands whose payload is `section → row → column → scalar`.
pub const TABULAR_COMMANDS: &[&str] = &[
    "help",
    "getPeers",
    "getSwitchPeers",
    "getDHT",
    "getSessions",
];

/// Commands whose payload maps interface names to TUN/TAP attributes.
pub const INTERFACE_COMMANDS: &[&str] = &["getTunTap", "setTunTap"];

/// Maps command names to rendering strategies.
#[derive(Clone, Debug)]
pub struct RendererRegistry {
    renderers: HashMap<String, Renderer>,
}

impl Default for RendererRegistry {
    /// Registry with the built-in strategies for the daemon's commands.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("dot", render_dot);
        for command in TABULAR_COMMANDS {
            registry.register(*command, render_table);
        }
        for command in INTERFACE_COMMANDS {
            registry.register(*command, render_interfaces);
        }
        registry
    }
}

impl RendererRegistry {
    /// Registry that renders every command as indented JSON.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registers `renderer` for `command`, replacing any earlier entry.
    pub fn register(&mut self, command: impl Into<String>, renderer: Renderer) -> &mut Self {
        self.renderers.insert(command.into(), renderer);
        self
    }

    /// Renders `response` for `command`.
    ///
    /// Unknown or absent command names, and payloads a strategy declines,
    /// are rendered as indented JSON.
    #[must_use]
    pub fn render(&self, command: Option<&str>, response: &Value) -> String {
        let strategy = command.and_then(|name| self.renderers.get(name));
        trace!(
            command = command.unwrap_or_default(),
            specific = strategy.is_some(),
            "selected renderer"
        );
        strategy
            .and_then(|renderer| renderer(response))
            .unwrap_or_else(|| render_json(response))
    }
}

/// Renders a `dot` payload by passing its graph text through unchanged.
#[must_use]
pub fn render_dot(response: &Value) -> Option<String> {
    let dot = response.get("dot")?.as_str()?;
    Some(format!("{dot}\n"))
}

/// Renders any value as JSON indented by two spaces.
#[must_use]
pub fn render_json(response: &Value) -> String {
    let mut rendered =
        serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string());
    rendered.push('\n');
    rendered
}
