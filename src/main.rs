use clap::{Parser, Subcommand};
use folio::personal::{self, HttpSource, PersonalInfo};
use folio::repository::ContentRepository;
use folio::{config, generate, navigation, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once; main calls this a single time
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static site generator for a portfolio with a markdown handbook")]
#[command(long_about = "\
Static site generator for a portfolio with a markdown handbook

Handbook pages are markdown files with YAML front matter. Categories and
order come from the front matter, not from file names.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  └── handbook/
      ├── index.md                 # Introduction (/handbook/)
      ├── ownership.md             # /handbook/ownership/
      └── scratchpad.md            # No category = unlisted, still rendered

Front matter:

  ---
  title: Ownership
  description: Who owns a value.
  category: Fundamentals
  categoryOrder: 1                 # First file naming a category sets this
  order: 1                         # Position within the category
  keywords: [ownership, moves]
  faq:
    - question: Does a move copy?
      answer: A shallow copy; the source is unusable.
  ---

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log build progress (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site into the output directory
    Build {
        /// Skip the remote personal-info fetch and use config defaults
        #[arg(long)]
        offline: bool,
    },
    /// Load every handbook page and print the navigation tree
    Check,
    /// Print the navigation as JSON
    Nav,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("folio=info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build { offline } => {
            let site_config = config::load_config(&cli.source)?;

            let personal_info = match HttpSource::from_config(&site_config.remote) {
                Some(source) if !offline => {
                    println!("==> Fetching personal info from {}", source.url());
                    personal::load_personal_info(&source, &site_config.personal)
                }
                _ => PersonalInfo::from_defaults(&site_config.personal),
            };

            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let summary =
                generate::build(&site_config, &cli.source, &cli.output, &personal_info)?;
            output::print_build_output(&summary, &site_config.handbook.path);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let site_config = config::load_config(&cli.source)?;
            let repo = ContentRepository::new(site_config.handbook_dir(&cli.source));
            println!("==> Checking {}", repo.dir().display());
            let nav = navigation::build_navigation(&repo)?;
            let pages = repo.load_all()?;
            output::print_check_output(&nav, &pages);
            println!("==> Content is valid");
        }
        Command::Nav => {
            let site_config = config::load_config(&cli.source)?;
            let repo = ContentRepository::new(site_config.handbook_dir(&cli.source));
            let nav = navigation::build_navigation(&repo)?;
            let order: Vec<String> = nav.flatten().into_iter().map(|item| item.slug).collect();
            let json = serde_json::json!({
                "navigation": nav,
                "order": order,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
