use std::path::PathBuf;

use clap::{Parser, Subcommand};

use scriptapi_versions::config::{Config, config_path};
use scriptapi_versions::logging;
use scriptapi_versions::version::descriptor::ReleaseTrack;
use scriptapi_versions::version::fetch::fetch_range_tables;
use scriptapi_versions::version::platform::PlatformVersion;
use scriptapi_versions::version::registries::NpmRegistry;
use scriptapi_versions::version::update::{SelectionRecord, UpdatePlan, UpdateSession};

#[derive(Parser)]
#[command(name = "scriptapi-versions")]
#[command(version, about = "Resolve script module versions against Minecraft versions")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/scriptapi-versions/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the stable and beta ranges of a module
    Ranges { module: String },
    /// List the builds of a module usable on a Minecraft version
    Select {
        module: String,
        #[arg(long)]
        platform: PlatformVersion,
        #[arg(long)]
        beta: bool,
    },
    /// Show how recorded modules change when updating to a Minecraft version
    Update {
        #[arg(long)]
        platform: PlatformVersion,
        /// Recorded selections as `module=version`
        #[arg(value_parser = parse_record)]
        modules: Vec<SelectionRecord>,
    },
}

fn parse_record(value: &str) -> Result<SelectionRecord, String> {
    let (module, version) = value
        .split_once('=')
        .ok_or_else(|| format!("expected module=version, got {value}"))?;
    SelectionRecord::parse(module, version)
        .ok_or_else(|| format!("invalid script module version: {version}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config.unwrap_or_else(config_path))?;
    let _guard = logging::init(&config.log)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command, config))
}

async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    let registry = NpmRegistry::new(&config.registry.base_url)?;

    match command {
        Command::Ranges { module } => {
            let tables = fetch_range_tables(&registry, &[module]).await;
            for (module, table) in &tables {
                println!("{module}");
                for track in [ReleaseTrack::Stable, ReleaseTrack::Beta] {
                    for (version, range) in table.ranges(track) {
                        println!("  {version}");
                        for line in range.description().lines() {
                            println!("    {line}");
                        }
                    }
                }
            }
        }
        Command::Select {
            module,
            platform,
            beta,
        } => {
            let track = if beta {
                ReleaseTrack::Beta
            } else {
                ReleaseTrack::Stable
            };
            let tables = fetch_range_tables(&registry, &[module]).await;
            for (module, table) in &tables {
                let choices = table.module_choices(track, Some(&platform), None);
                let Some((version, range)) = choices.default_item() else {
                    println!("{module}: no {track:?} versions");
                    continue;
                };

                println!("{module} {version}");
                let selection = range.select(Some(&platform));
                for (index, candidate) in selection.candidates.iter().enumerate() {
                    let marker = if index == selection.default_index { '>' } else { ' ' };
                    println!("{marker} {:<24} {}", candidate.title(), candidate.description());
                }
            }
        }
        Command::Update { platform, modules } => {
            let tables = fetch_range_tables(&registry, &config.modules).await;
            let mut session = UpdateSession::new(UpdatePlan::new(&modules, &tables, &platform));

            for change in session.diff()? {
                println!(
                    "{:<30} {:<15} -> {:<15} {:?}",
                    change.module,
                    change.from.as_ref().map_or("-", |d| d.module_semver()),
                    change.to.as_ref().map_or("-", |d| d.raw()),
                    change.change
                );
            }
        }
    }

    Ok(())
}
