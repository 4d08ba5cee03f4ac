use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ontocache::{DataSource, DataSourceOptions, SourceName, config, logging};

#[derive(Parser)]
#[command(name = "ontocache")]
#[command(version, about = "Fetch and cache versioned biomedical reference data")]
struct Cli {
    /// Root data directory (defaults to $ONTOCACHE_DIR or the XDG data directory)
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the path and version of the latest data file, downloading it if needed
    GetLatest {
        source: SourceName,

        /// Download even if the latest version is already cached
        #[arg(long, conflicts_with = "from_local")]
        force_refresh: bool,

        /// Use the newest cached file without contacting the provider
        #[arg(long)]
        from_local: bool,

        /// Don't show download progress
        #[arg(short, long)]
        silent: bool,
    },
    /// Print the root data directory
    Dir,
    /// List built-in sources
    ListSources,
    /// Delete old cached versions
    Prune {
        #[arg(required = true)]
        sources: Vec<SourceName>,

        /// Number of most recent versions to keep
        #[arg(short, long, default_value_t = 1)]
        number: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let root = cli.data_dir.unwrap_or_else(config::data_dir);

    match cli.command {
        Command::Dir => {
            println!("{}", root.display());
        }
        Command::ListSources => {
            for name in SourceName::ALL {
                println!("{}", name);
            }
        }
        Command::GetLatest {
            source,
            force_refresh,
            from_local,
            silent,
        } => {
            let _guard = logging::init(&root)?;
            let data_source = DataSource::new(
                source.build(),
                DataSourceOptions {
                    data_dir: Some(root),
                    silent,
                },
            );

            let (path, version) = if from_local {
                data_source.get_latest_local()?
            } else {
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()?
                    .block_on(data_source.get_latest(force_refresh))?
            };
            println!("{}\t{}", path.display(), version);
        }
        Command::Prune { sources, number } => {
            let _guard = logging::init(&root)?;
            for source in sources {
                let data_source = DataSource::new(
                    source.build(),
                    DataSourceOptions {
                        data_dir: Some(root.clone()),
                        silent: true,
                    },
                );
                for path in data_source.prune(number)? {
                    println!("Removed {}", path.display());
                }
            }
        }
    }

    Ok(())
}
