use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cloudsweep::api;
use cloudsweep::cli::args::{Cli, Commands, ConfigAction, OutputFormat};
use cloudsweep::cli::output;
use cloudsweep::common::config::Config;
use cloudsweep::common::format;
use cloudsweep::duplicates::resolver::DeleteStrategy;
use cloudsweep::imaging::StandardProbe;
use cloudsweep::storage::LocalBackend;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("cloudsweep=debug")
            .init();
    }

    match cli.command {
        Commands::Ls { ref path, recursive } => cmd_ls(&cli, path, recursive),

        Commands::Dup {
            ref path,
            ref methods,
            tolerance,
            recursive,
            image_only,
            strategy,
            detailed,
        } => cmd_dup(&cli, path, methods.clone(), tolerance, recursive, image_only, strategy, detailed),

        Commands::Rm {
            ref paths,
            strategy,
            yes,
        } => cmd_rm(&cli, paths, strategy, yes),

        Commands::Cp { ref from, ref to } => cmd_cp(&cli, from, to),

        Commands::Put { ref file, ref path } => cmd_put(&cli, file, path),

        Commands::Config { action } => cmd_config(action),

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                cloudsweep::cli::args::CompletionShell::Bash => clap_complete::Shell::Bash,
                cloudsweep::cli::args::CompletionShell::Zsh => clap_complete::Shell::Zsh,
                cloudsweep::cli::args::CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "cloudsweep", &mut std::io::stdout());
            Ok(())
        }
    }
}

// ─── Ls ───────────────────────────────────────────────────────────────────────

fn cmd_ls(cli: &Cli, path: &str, recursive: bool) -> Result<()> {
    let backend = LocalBackend::new(&cli.root);
    let response = api::list_contents(
        &backend,
        &api::ListRequest {
            path: path.to_string(),
            recursive,
        },
    );

    match cli.format {
        OutputFormat::Json => output::print_json(&response),
        OutputFormat::Human | OutputFormat::Quiet => {
            let entries = match response.data {
                Some(ref entries) => entries,
                None => anyhow::bail!(response.error.unwrap_or_default()),
            };
            if matches!(cli.format, OutputFormat::Quiet) {
                output::print_list_quiet(entries);
            } else {
                output::print_list(entries);
            }
        }
    }
    Ok(())
}

// ─── Dup ──────────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn cmd_dup(
    cli: &Cli,
    path: &str,
    methods: Option<Vec<String>>,
    tolerance: Option<f64>,
    recursive: bool,
    image_only: bool,
    strategy: Option<DeleteStrategy>,
    detailed: bool,
) -> Result<()> {
    let config = Config::load()?;
    let methods = methods.unwrap_or(config.default_methods);
    let tolerance = tolerance.or_else(|| {
        (config.size_tolerance > 0.0).then_some(config.size_tolerance)
    });

    let show_progress = !cli.quiet && matches!(cli.format, OutputFormat::Human);
    if show_progress {
        println!();
        println!(
            "  {} Scanning for duplicates in: {}",
            "🔍",
            display_target(&cli.root, path).cyan()
        );
        println!();
    }

    let backend = LocalBackend::new(&cli.root);
    let request = api::DetectRequest {
        path: path.to_string(),
        methods,
        size_tolerance: tolerance,
        recursive: recursive || config.recursive,
        image_only: image_only || config.image_only,
    };
    let response = api::detect(&backend, &StandardProbe, &request, show_progress);

    match cli.format {
        OutputFormat::Json => output::print_json(&response),
        OutputFormat::Human | OutputFormat::Quiet => {
            let report = match response.data {
                Some(ref report) => report,
                None => anyhow::bail!(response.error.unwrap_or_default()),
            };
            if matches!(cli.format, OutputFormat::Quiet) {
                output::print_dup_quiet(report);
            } else {
                output::print_dup_report(report, detailed, strategy);
            }
        }
    }
    Ok(())
}

// ─── Rm ───────────────────────────────────────────────────────────────────────

fn cmd_rm(cli: &Cli, paths: &[String], strategy: Option<DeleteStrategy>, yes: bool) -> Result<()> {
    let config = Config::load()?;
    let strategy = match strategy {
        Some(s) => s,
        None => config.delete_strategy.parse()?,
    };

    if !yes && matches!(cli.format, OutputFormat::Human) {
        print!(
            "\n  {} Delete {} (strategy: {})? [y/N] ",
            "❓",
            format::format_count(paths.len()),
            strategy
        );
        use std::io::Write;
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("  {} Cancelled", "✗".red());
            return Ok(());
        }
    }

    let backend = LocalBackend::new(&cli.root);
    let response = api::delete_batch(
        &backend,
        &api::DeleteRequest {
            paths: paths.to_vec(),
            strategy,
        },
    );

    match cli.format {
        OutputFormat::Json => output::print_json(&response),
        OutputFormat::Human | OutputFormat::Quiet => {
            let report = match response.data {
                Some(ref report) => report,
                None => anyhow::bail!(response.error.unwrap_or_default()),
            };
            if matches!(cli.format, OutputFormat::Quiet) {
                output::print_delete_quiet(report);
            } else {
                output::print_delete_report(report);
            }
        }
    }
    Ok(())
}

// ─── Cp / Put ─────────────────────────────────────────────────────────────────

fn cmd_cp(cli: &Cli, from: &str, to: &str) -> Result<()> {
    let backend = LocalBackend::new(&cli.root);
    let response = api::copy_file(
        &backend,
        &api::CopyRequest {
            from: from.to_string(),
            to: to.to_string(),
        },
    );

    match cli.format {
        OutputFormat::Json => output::print_json(&response),
        _ => match response.data {
            Some(receipt) => {
                println!("  {} {} → {}", "✓".green(), receipt.from, receipt.to);
            }
            None => anyhow::bail!(response.error.unwrap_or_default()),
        },
    }
    Ok(())
}

fn cmd_put(cli: &Cli, file: &std::path::Path, path: &str) -> Result<()> {
    let content = std::fs::read(file)?;
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("Not a file: {}", file.display()))?;

    let backend = LocalBackend::new(&cli.root);
    let response = api::upload(
        &backend,
        &api::UploadRequest {
            path: path.to_string(),
            filename,
            content,
        },
    );

    match cli.format {
        OutputFormat::Json => output::print_json(&response),
        _ => match response.data {
            Some(receipt) => {
                println!(
                    "  {} uploaded {} ({})",
                    "✓".green(),
                    receipt.path,
                    format::format_size(receipt.size)
                );
            }
            None => anyhow::bail!(response.error.unwrap_or_default()),
        },
    }
    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            Config::init_dirs()?;
            let config = Config::default();
            config.save()?;
            println!("  {} CloudSweep initialized at ~/.cloudsweep", "✓".green());
            Ok(())
        }
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("  {} Configuration reset to defaults", "✓".green());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "size_tolerance" => config.size_tolerance = value.parse()?,
                "delete_strategy" => {
                    let _: DeleteStrategy = value.parse()?;
                    config.delete_strategy = value.clone();
                }
                "recursive" => config.recursive = value.parse()?,
                "image_only" => config.image_only = value.parse()?,
                "default_methods" => {
                    config.default_methods = value.split(',').map(|s| s.trim().to_string()).collect()
                }
                _ => anyhow::bail!("Unknown config key: {}", key),
            }
            config.save()?;
            println!("  {} Set {} = {}", "✓".green(), key, value);
            Ok(())
        }
    }
}

fn display_target(root: &str, path: &str) -> String {
    if path.is_empty() {
        root.to_string()
    } else {
        format!("{}/{}", root.trim_end_matches('/'), path)
    }
}
