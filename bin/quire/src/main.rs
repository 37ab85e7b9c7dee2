//! Quire CLI
//!
//! Build-time content pipeline for Markdown blogs.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use quire::cmd::list::Listing;

/// Command-line interface for Quire.
#[derive(Parser)]
#[command(
    name = "quire",
    version,
    about = "Turns a directory of Markdown posts into a validated collection and its feed, sitemap and search index"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "quire.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Load all content and write robots.txt, sitemap.xml, rss.xml and search-index.json
    Build {
        /// Output directory (overrides build.output_dir)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Content directory (overrides build.content_dir)
        #[arg(long)]
        content: Option<std::path::PathBuf>,
        /// Override site host (e.g., https://example.com)
        #[arg(long)]
        host: Option<String>,
        /// Override site base path (e.g., /my-blog)
        #[arg(long)]
        base_path: Option<String>,
    },
    /// Validate configuration and content without writing anything
    Check,
    /// Render one document to HTML
    Show {
        /// Document slug
        slug: String,
        /// Also print the table of contents
        #[arg(long)]
        toc: bool,
    },
    /// Print a page of the blog, category or tag listing
    List {
        /// Page number (1-based, clamped to the last page)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Category route segment (e.g., dev-notes)
        #[arg(long, conflicts_with = "tag")]
        category: Option<String>,
        /// Tag route segment (e.g., rust)
        #[arg(long)]
        tag: Option<String>,
    },
    /// Case-insensitive search over titles, excerpts, categories and tags
    Search {
        /// Text to look for
        query: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    quire::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            output,
            content,
            host,
            base_path,
        } => {
            quire::cmd::build::run(
                &cli.config,
                output.as_deref(),
                content.as_deref(),
                host.as_deref(),
                base_path.as_deref(),
            )?;
        }
        Commands::Check => {
            quire::cmd::check::run(&cli.config)?;
        }
        Commands::Show { slug, toc } => {
            quire::cmd::show::run(&cli.config, &slug, toc)?;
        }
        Commands::List {
            page,
            category,
            tag,
        } => {
            let listing = match (category, tag) {
                (Some(category), _) => Listing::Category(category),
                (None, Some(tag)) => Listing::Tag(tag),
                (None, None) => Listing::All,
            };
            quire::cmd::list::run(&cli.config, &listing, page)?;
        }
        Commands::Search { query } => {
            quire::cmd::search::run(&cli.config, &query)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["quire", "build", "--output", "dist"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, std::path::PathBuf::from("quire.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build {
                output,
                content,
                host,
                base_path,
            } => {
                assert_eq!(output, Some(std::path::PathBuf::from("dist")));
                assert!(content.is_none());
                assert!(host.is_none());
                assert!(base_path.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_with_content_dir() {
        let args = ["quire", "build", "--content", "posts"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build {
                output, content, ..
            } => {
                assert!(output.is_none());
                assert_eq!(content, Some(std::path::PathBuf::from("posts")));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_with_host_and_base_path() {
        let args = [
            "quire",
            "build",
            "--host",
            "https://example.com",
            "--base-path",
            "/blog",
        ];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build {
                host, base_path, ..
            } => {
                assert_eq!(host.as_deref(), Some("https://example.com"));
                assert_eq!(base_path.as_deref(), Some("/blog"));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let cli = Cli::parse_from(["quire", "check"]);
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_cli_show_command_parsing() {
        let cli = Cli::parse_from(["quire", "show", "hello-world", "--toc"]);

        match cli.command {
            Commands::Show { slug, toc } => {
                assert_eq!(slug, "hello-world");
                assert!(toc);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_cli_list_command_parsing() {
        let cli = Cli::parse_from(["quire", "list", "--page", "2", "--category", "dev-notes"]);

        match cli.command {
            Commands::List {
                page,
                category,
                tag,
            } => {
                assert_eq!(page, 2);
                assert_eq!(category.as_deref(), Some("dev-notes"));
                assert!(tag.is_none());
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_list_defaults_to_first_page() {
        let cli = Cli::parse_from(["quire", "list"]);

        match cli.command {
            Commands::List { page, .. } => assert_eq!(page, 1),
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_list_category_conflicts_with_tag() {
        let result = Cli::try_parse_from(["quire", "list", "--category", "a", "--tag", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_search_command_parsing() {
        let cli = Cli::parse_from(["quire", "search", "error handling"]);

        match cli.command {
            Commands::Search { query } => assert_eq!(query, "error handling"),
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["quire", "-vvv", "build"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let args = ["quire", "--config", "site.toml", "check"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.config, std::path::PathBuf::from("site.toml"));
    }
}
