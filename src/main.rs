use clap::{ArgAction, Parser, Subcommand};
use s3_gal::{config, gallery, naming, output, render, s3::S3Store};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shared flag for commands that can emit machine-readable output.
#[derive(clap::Args, Clone)]
struct FormatArgs {
    /// Print JSON instead of the text listing
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
#[command(name = "s3-gal")]
#[command(about = "Browse and render a photo gallery stored in S3")]
#[command(long_about = "\
Browse and render a photo gallery stored in S3

The bucket is the data source. Every folder directly under the root prefix
is an album named YYYYMMDD_Title; every object inside it is a photo.

Bucket layout:

  photos/
  ├── 20230101_NewYear/            # Album: 'Sun 1 Jan 2023 — _NewYear'
  │   ├── IMG_0001.jpg             # Preview (first non-folder key listed)
  │   └── IMG_0002.jpg
  └── 20220704_Independence/
      └── DSC_1234.jpg

Albums are grouped by year (first four characters of the name) and sorted
newest first. Names whose first eight characters are not a valid date are
shown verbatim.

Run 's3-gal gen-config' to generate a documented s3-gal.toml.")]
#[command(version = env!("S3_GAL_VERSION"))]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all albums grouped by year
    Index(FormatArgs),
    /// List the photos of one album
    Album {
        /// Album name as it appears in URLs, e.g. 20230101_NewYear
        slug: String,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// List the most recent albums
    Recent {
        /// Number of albums (defaults to gallery.recent_limit)
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Write the overview, album pages, and recent-albums block as HTML
    Render {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Load and validate the config file without contacting the store
    CheckConfig,
    /// Print a stock s3-gal.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Everything except gen-config needs a valid config file.
    let load_config = || config::load_config(&cli.config);

    match cli.command {
        Command::Index(format) => {
            let config = load_config()?;
            let store = S3Store::connect(&config.s3)?;
            let index = gallery::build_gallery_index(&store, &config.gallery)?;
            print_index(&index, format.json)?;
        }
        Command::Album { slug, format } => {
            let config = load_config()?;
            let settings = &config.gallery;
            let store = S3Store::connect(&config.s3)?;
            let prefix = naming::album_prefix(&settings.root_prefix, &settings.delimiter, &slug);
            // The root itself is the overview, not an album.
            if prefix == settings.root_prefix {
                let index = gallery::build_gallery_index(&store, settings)?;
                return print_index(&index, format.json);
            }
            let photos = gallery::build_album_photo_list(&store, &prefix)?;
            if format.json {
                println!("{}", serde_json::to_string_pretty(&photos)?);
            } else {
                let album_slug =
                    naming::slug_from_prefix(&prefix, &settings.root_prefix, &settings.delimiter);
                let title = naming::page_title(album_slug, &settings.home_title);
                output::print_album_photos(&title, &photos);
            }
        }
        Command::Recent { limit, format } => {
            let config = load_config()?;
            let store = S3Store::connect(&config.s3)?;
            let limit = limit.unwrap_or(config.gallery.recent_limit);
            let albums = gallery::build_recent_albums(&store, &config.gallery, limit)?;
            if format.json {
                println!("{}", serde_json::to_string_pretty(&albums)?);
            } else {
                output::print_recent_albums(&albums);
            }
        }
        Command::Render { output: output_dir } => {
            let config = load_config()?;
            let store = S3Store::connect(&config.s3)?;
            println!("==> Rendering {} → {}", store.bucket(), output_dir.display());
            let stats = render::render_site(&store, &config.gallery, &output_dir)?;
            output::print_render_stats(&stats);
        }
        Command::CheckConfig => {
            println!("==> Checking {}", cli.config.display());
            let config = load_config()?;
            output::print_config_summary(&config);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn print_index(
    index: &gallery::GalleryIndex,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(index)?);
    } else {
        output::print_gallery_index(index);
    }
    Ok(())
}

/// Log to stderr so listings on stdout stay pipeable.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
