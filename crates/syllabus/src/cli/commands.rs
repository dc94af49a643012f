//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Owner recorded when no user email is given.
pub const DEFAULT_USER_EMAIL: &str = "local@syllabus";

/// Syllabus - generate courses with layouts, banners, videos and chapter content
#[derive(Parser, Debug)]
#[command(name = "syllabus")]
#[command(about = "Generate courses with layouts, banners, videos and chapter content", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Keep courses in memory instead of the database
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Configuration file overlaid on the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a course and generate its layout, banner and video links
    Generate {
        /// Course title
        #[arg(long)]
        name: String,

        /// What the course covers
        #[arg(long, default_value = "")]
        description: String,

        /// Subject category
        #[arg(long, default_value = "")]
        category: String,

        /// Difficulty level
        #[arg(long, default_value = "")]
        level: String,

        /// Number of chapters to request
        #[arg(long)]
        chapters: u32,

        /// Attach videos to chapters
        #[arg(long)]
        video: bool,

        /// Owner of the course
        #[arg(long, env = "SYLLABUS_USER_EMAIL", default_value = DEFAULT_USER_EMAIL)]
        user_email: String,

        /// Also generate chapter content
        #[arg(long)]
        content: bool,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Generate chapter content for a laid-out course
    Content {
        /// Course identifier
        cid: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Regenerate one chapter's content
    Regenerate {
        /// Course identifier
        cid: String,

        /// Zero-based chapter index
        #[arg(long)]
        chapter: usize,
    },

    /// Find videos for chapters that have none
    BackfillVideos {
        /// Course identifier
        cid: String,
    },

    /// Release a course left generating by an interrupted run
    Unlock {
        /// Course identifier
        cid: String,
    },

    /// Show a stored course
    Show {
        /// Course identifier
        cid: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// List a user's courses, newest first
    List {
        /// Owner of the courses
        #[arg(long, env = "SYLLABUS_USER_EMAIL", default_value = DEFAULT_USER_EMAIL)]
        user_email: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_with_flags() {
        let cli = Cli::try_parse_from([
            "syllabus",
            "generate",
            "--name",
            "Intro to X",
            "--chapters",
            "3",
            "--video",
            "--content",
            "--dry-run",
        ])
        .unwrap();

        assert!(cli.dry_run);
        match cli.command {
            Commands::Generate {
                name,
                chapters,
                video,
                content,
                format,
                ..
            } => {
                assert_eq!(name, "Intro to X");
                assert_eq!(chapters, 3);
                assert!(video);
                assert!(content);
                assert_eq!(format, OutputFormat::Human);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_regenerate_chapter() {
        let cli = Cli::try_parse_from(["syllabus", "regenerate", "c-1", "--chapter", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Regenerate { ref cid, chapter: 2 } if cid == "c-1"
        ));
    }

    #[test]
    fn parses_show_json() {
        let cli = Cli::try_parse_from(["syllabus", "show", "c-1", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Show { format: OutputFormat::Json, .. }
        ));
    }

    #[test]
    fn parses_unlock() {
        let cli = Cli::try_parse_from(["syllabus", "unlock", "c-1", "--dry-run"]).unwrap();
        assert!(matches!(cli.command, Commands::Unlock { ref cid } if cid == "c-1"));
    }

    #[test]
    fn generate_requires_chapters() {
        assert!(Cli::try_parse_from(["syllabus", "generate", "--name", "X"]).is_err());
    }
}
