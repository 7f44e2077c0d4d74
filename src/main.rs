//! folio - template inspector for the folio page renderer.

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use folio::{
    config::FolioConfig,
    loader::RemoteSource,
    log,
    template::{DependencyManifest, Template},
    tree,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let result = match cli.command {
        Commands::Inspect { json } => inspect(&config, json),
        Commands::Check => check(&config),
    };

    if let Err(err) = &result {
        log!("error"; "{err:#}");
    }
    result
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<FolioConfig> {
    let mut config = FolioConfig::load(&cli.config)?;
    if let Some(root) = &cli.root {
        config.set_template_root(root);
    }
    config.validate()?;
    Ok(config)
}

/// Read the template and resolve its dependency manifest.
fn resolve(config: &FolioConfig) -> Result<(Template, DependencyManifest)> {
    let root = config.template_root();
    let folder = tree::open(&root)
        .with_context(|| format!("Failed to open template at `{}`", root.display()))?;

    let mut template = Template::new(folder);
    let manifest = template.load()?;
    Ok((template, manifest))
}

fn inspect(config: &FolioConfig, json: bool) -> Result<()> {
    let (template, manifest) = resolve(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
        return Ok(());
    }

    if let Some(descriptor) = template.descriptor() {
        let name = descriptor.name.as_deref().unwrap_or("(unnamed)");
        log!("template"; "{name} at {}", manifest.root);
        for (output, page) in &descriptor.pages {
            log!("page"; "{output} <- {page}");
        }
    }

    log!("load"; "main {}", manifest.relative(&manifest.main));
    for script in manifest.local_paths() {
        log!("load"; "local {script}");
    }
    for url in &manifest.remote {
        log!("load"; "remote {url}");
    }
    for asset in manifest.asset_paths() {
        log!("asset"; "local {asset}");
    }
    for url in &manifest.remote_assets {
        log!("asset"; "remote {url}");
    }
    for (url, hash) in &manifest.hashes {
        log!("hash"; "{url} {hash}");
    }

    Ok(())
}

fn check(config: &FolioConfig) -> Result<()> {
    let (_, manifest) = resolve(config)?;

    let Some(remote) = config.remote_source() else {
        bail!("Remote loading is disabled in `[remote]`");
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        for url in &manifest.remote {
            let source = remote
                .fetch(url)
                .await
                .with_context(|| format!("Failed to fetch {url}"))?;
            log!("check"; "{url} ({} bytes)", source.len());
        }
        for url in &manifest.remote_assets {
            let size = remote
                .fetch_size(url)
                .await
                .with_context(|| format!("Failed to fetch {url}"))?;
            log!("check"; "{url} ({size} bytes)");
        }
        anyhow::Ok(())
    })?;

    log!(
        "check";
        "{} remote dependencies reachable",
        manifest.remote.len() + manifest.remote_assets.len()
    );
    Ok(())
}
