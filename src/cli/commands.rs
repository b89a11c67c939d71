use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use http::Method;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::context::RequestContext;
use crate::registry::Registry;
use crate::resolver::{Resolution, Resolver};
use crate::runtime_config::ResolverConfig;
use crate::tree::load_tree_def;

/// Command-line interface for brrtpath
#[derive(Parser)]
#[command(name = "brrtpath")]
#[command(about = "Inspect and exercise brrtpath trees", long_about = None)]
pub struct Cli {
    /// Resolver configuration file (YAML); BRRTPATH_* variables override it
    #[arg(short, long, global = true, env = "BRRTPATH_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List every path served by a tree definition
    Links {
        /// Tree definition file (YAML or JSON)
        #[arg(short, long)]
        tree: PathBuf,
    },
    /// Resolve paths against a tree definition
    Resolve {
        /// Tree definition file (YAML or JSON)
        #[arg(short, long)]
        tree: PathBuf,

        /// Request method recorded in the context
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,

        /// Paths to resolve
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

/// How `resolve` prints its reports
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per path
    Text,
    /// One JSON object per line
    Json,
}

/// Summary of one resolution, as printed by `resolve`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveReport {
    pub path: String,
    pub outcome: String,
    pub node: Option<String>,
    pub value: Option<String>,
    pub trail: Vec<String>,
    pub params: BTreeMap<String, String>,
}

impl ResolveReport {
    fn new(
        path: &str,
        resolution: &Resolution<'_, String, RequestContext>,
        ctx: &RequestContext,
    ) -> Self {
        Self {
            path: path.to_string(),
            outcome: resolution.outcome().to_string(),
            node: resolution.node().map(|node| node.key().to_string()),
            value: resolution.value().cloned(),
            trail: resolution
                .trail()
                .iter()
                .map(|node| node.key().to_string())
                .collect(),
            params: ctx
                .params()
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        }
    }

    fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        write!(out, "{} -> {}", self.path, self.outcome)?;
        if let Some(node) = &self.node {
            write!(out, " node={node}")?;
        }
        if let Some(value) = &self.value {
            write!(out, " value={value}")?;
        }
        write!(out, " trail=[{}]", self.trail.join(", "))?;
        if !self.params.is_empty() {
            let params: Vec<String> = self
                .params
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            write!(out, " params={{{}}}", params.join(", "))?;
        }
        writeln!(out)
    }
}

fn load_config(path: Option<&Path>) -> Result<ResolverConfig> {
    match path {
        Some(path) => ResolverConfig::from_yaml_file(path),
        None => Ok(ResolverConfig::from_env()),
    }
}

fn load_resolver(tree: &Path, config: &ResolverConfig) -> Result<Resolver<String, RequestContext>> {
    let def = load_tree_def(tree)?;
    let registry = Registry::with_builtin_keys().fallback_value(str::to_string);
    let root = def
        .build(&registry)
        .with_context(|| format!("Failed to build tree from {}", tree.display()))?;
    Ok(Resolver::new(root).with_config(config))
}

/// Execute a parsed command, writing its report to `out`.
///
/// # Errors
///
/// Returns an error if the configuration or tree definition cannot be loaded,
/// the method is not a valid HTTP method, or writing to `out` fails.
pub fn run_cli(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Links { tree } => {
            let resolver = load_resolver(tree, &config)?;
            for link in resolver.root().links() {
                writeln!(out, "{link}")?;
            }
        }
        Commands::Resolve {
            tree,
            method,
            output,
            paths,
        } => {
            let method = Method::from_bytes(method.as_bytes())
                .with_context(|| format!("Invalid HTTP method '{method}'"))?;
            let resolver = load_resolver(tree, &config)?;

            for path in paths {
                let mut ctx = RequestContext::new(method.clone(), path);
                let resolution = resolver.resolve(path, &mut ctx);
                let report = ResolveReport::new(path, &resolution, &ctx);
                match output {
                    OutputFormat::Text => report.write_text(out)?,
                    OutputFormat::Json => {
                        serde_json::to_writer(&mut *out, &report)?;
                        writeln!(out)?;
                    }
                }
            }
        }
    }

    Ok(())
}
