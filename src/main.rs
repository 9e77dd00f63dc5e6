mod cli;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser as _;
use cli::Cli;
use relname_parser::{Parser, ParserConfig, Registry, Release};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "relname=trace,relname_parser=trace".to_string()
        } else {
            "relname=warn,relname_parser=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(io::stderr)
        .init();

    let config = ParserConfig::builder()
        .type_only(cli.type_only)
        .expand_aka(!cli.no_aka)
        .build();
    let parser = match &cli.vocab {
        Some(path) => Parser::with_registry(config, load_registry(path)?)
            .with_context(|| format!("Failed to compile vocabulary {}", path.display()))?,
        None => Parser::new(config),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.names.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            print_release(&mut out, &parser, &cli, &line)?;
        }
    } else {
        for name in &cli.names {
            print_release(&mut out, &parser, &cli, name)?;
        }
    }
    Ok(())
}

fn load_registry(path: &Path) -> Result<Arc<Registry>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read vocabulary {}", path.display()))?;
    let registry = Registry::from_csv(&data)
        .with_context(|| format!("Failed to load vocabulary {}", path.display()))?;
    tracing::debug!(entries = registry.len(), "loaded vocabulary from {}", path.display());
    Ok(Arc::new(registry))
}

fn print_release(out: &mut impl Write, parser: &Parser, cli: &Cli, name: &str) -> Result<()> {
    tracing::debug!("parsing {:?}", name);

    if cli.tags {
        let (tags, pivot) = parser.tokenize(name);
        if cli.json {
            let tags: Vec<String> = tags.iter().map(ToString::to_string).collect();
            let value = serde_json::json!({ "input": name, "pivot": pivot, "tags": tags });
            writeln!(out, "{}", value)?;
        } else {
            writeln!(out, "{}", name)?;
            for (i, tag) in tags.iter().enumerate() {
                let marker = if i == pivot { ">" } else { " " };
                writeln!(out, "{} {:>3} {}", marker, i, tag)?;
            }
        }
        return Ok(());
    }

    let release = parser.parse(name);
    if cli.type_only {
        if cli.json {
            let value = serde_json::json!({ "input": name, "type": release.release_type });
            writeln!(out, "{}", value)?;
        } else {
            writeln!(out, "{}", release.release_type)?;
        }
        return Ok(());
    }

    if cli.json {
        let line = serde_json::to_string(&release.summary()).context("Failed to serialize release")?;
        writeln!(out, "{}", line)?;
    } else {
        write_fields(out, name, &release)?;
    }
    Ok(())
}

fn write_fields(out: &mut impl Write, name: &str, release: &Release) -> Result<()> {
    writeln!(out, "{}", name)?;
    for (key, value) in release.summary().fields() {
        writeln!(out, "  {:<16} {}", format!("{}:", key), value)?;
    }
    Ok(())
}
