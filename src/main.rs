mod logging;

use anyhow::{Context, Result};
use archedit::areas::local_archive::{LocalArchive, LocalArchiveService};
use archedit::areas::session::EditorSession;
use archedit::artifacts::archive::backend::{Archive, UserSettings};
use archedit::artifacts::core::config::SessionConfig;
use archedit::artifacts::core::notification::{Notification, NotificationLevel, Notifier};
use archedit::artifacts::diff::filter::DiffFilter;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "archedit",
    version = "0.1.0",
    about = "Edit a versioned archive through its preview checkout",
    long_about = "archedit works on the archive in the current directory. \
    The folder itself is the preview checkout: edit it with any tool, \
    then inspect, commit or revert the changes against the latest published version.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Compare file sizes only, not contents, when diffing"
    )]
    size_only: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new archive",
        long_about = "This command turns the current directory, or the specified path, into an archive. \
        Its existing content becomes the preview; the latest version starts out empty."
    )]
    Init {
        #[arg(index = 1, help = "The path to the archive")]
        path: Option<String>,
        #[arg(short, long, help = "The archive title")]
        title: Option<String>,
    },
    #[command(
        name = "status",
        about = "Show the changes not yet committed",
        long_about = "This command lists every path of the checkout that differs from the latest version."
    )]
    Status {
        #[arg(long, help = "Version qualifier: latest, preview or a version number")]
        at: Option<String>,
        #[arg(long, help = "Only show these kinds of change, e.g. AM")]
        filter: Option<String>,
    },
    #[command(
        name = "tree",
        about = "Print the file tree of a checkout",
        long_about = "This command prints the file tree of a checkout, marking changed paths."
    )]
    Tree {
        #[arg(long, help = "Version qualifier: latest, preview or a version number")]
        at: Option<String>,
    },
    #[command(
        name = "cat",
        about = "Print the content of a file",
        long_about = "This command prints one file of a checkout, as is."
    )]
    Cat {
        #[arg(index = 1, help = "The archive path of the file")]
        path: String,
        #[arg(long, help = "Version qualifier: latest, preview or a version number")]
        at: Option<String>,
    },
    #[command(
        name = "commit",
        about = "Publish changes to a new version",
        long_about = "This command publishes the given paths, or every change when none are given, \
        as a new latest version."
    )]
    Commit {
        #[arg(index = 1, help = "The paths to commit")]
        paths: Vec<String>,
    },
    #[command(
        name = "revert",
        about = "Discard changes",
        long_about = "This command restores the given paths, or the whole preview when none are given, \
        to the latest version."
    )]
    Revert {
        #[arg(index = 1, help = "The paths to revert")]
        paths: Vec<String>,
    },
    #[command(
        name = "settings",
        about = "Show or change the archive's user settings",
        long_about = "This command prints the archive's user settings, after applying any given changes."
    )]
    Settings {
        #[arg(long, help = "Open sessions on the preview checkout")]
        preview_mode: Option<bool>,
        #[arg(long, help = "Mark the archive as saved")]
        saved: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let config = SessionConfig {
        compare_content: !cli.size_only,
        ..SessionConfig::default()
    };

    match &cli.command {
        Commands::Init { path, title } => {
            let root = match path {
                Some(path) => {
                    std::fs::create_dir_all(path)
                        .with_context(|| format!("Unable to create {}", path))?;
                    PathBuf::from(path)
                }
                None => std::env::current_dir()?,
            };

            let archive = LocalArchive::init(&root, title.clone())?;
            println!("Initialized archive at {}", archive.root().display());
        }
        Commands::Status { at, filter } => {
            let filter = match filter {
                Some(filter) => DiffFilter::try_parse(filter)
                    .with_context(|| format!("Invalid filter {}, expected letters of AMD", filter))?,
                None => DiffFilter::default(),
            };
            let (session, notifications) = open_session(at.as_deref(), config).await?;

            session.status(&mut std::io::stdout(), filter)?;
            print_notifications(notifications);
        }
        Commands::Tree { at } => {
            let (session, notifications) = open_session(at.as_deref(), config).await?;

            session.print_tree(&mut std::io::stdout())?;
            print_notifications(notifications);
        }
        Commands::Cat { path, at } => {
            let (session, _) = open_session(at.as_deref(), config).await?;

            session.cat(&mut std::io::stdout(), path).await?;
        }
        Commands::Commit { paths } => {
            let (mut session, notifications) = open_session(None, config).await?;

            if paths.is_empty() {
                session.commit_all().await?;
            } else {
                for path in paths {
                    session.commit_path(path).await?;
                }
            }
            print_notifications(notifications);
        }
        Commands::Revert { paths } => {
            let (mut session, notifications) = open_session(None, config).await?;

            if paths.is_empty() {
                session.revert_all().await?;
            } else {
                for path in paths {
                    session.revert_path(path).await?;
                }
            }
            print_notifications(notifications);
        }
        Commands::Settings {
            preview_mode,
            saved,
        } => {
            let archive = LocalArchive::load(&std::env::current_dir()?)?;
            let current = archive.info().await?.user_settings;

            let settings = UserSettings {
                preview_mode: preview_mode.unwrap_or(current.preview_mode),
                is_saved: saved.unwrap_or(current.is_saved),
            };
            if settings != current {
                archive.set_user_settings(settings).await?;
            }

            println!("preview_mode = {}", settings.preview_mode);
            println!("saved = {}", settings.is_saved);
        }
    }

    Ok(())
}

async fn open_session(
    qualifier: Option<&str>,
    config: SessionConfig,
) -> Result<(
    EditorSession<LocalArchive>,
    mpsc::UnboundedReceiver<Notification>,
)> {
    let root = std::fs::canonicalize(std::env::current_dir()?)?;
    let base_url = root.display().to_string();
    let url = match qualifier {
        Some(qualifier) => format!("{}+{}", base_url, qualifier),
        None => base_url.clone(),
    };

    let (notifier, notifications) = Notifier::channel();
    let session = EditorSession::open(&LocalArchiveService, &url, config, notifier)
        .await
        .with_context(|| format!("Unable to open the archive at {}", base_url))?;

    Ok((session, notifications))
}

fn print_notifications(mut notifications: mpsc::UnboundedReceiver<Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        match notification.level {
            NotificationLevel::Progress => {}
            NotificationLevel::Success => println!("{}", notification.message),
            NotificationLevel::Error => eprintln!("{}", notification.message),
        }
    }
}
