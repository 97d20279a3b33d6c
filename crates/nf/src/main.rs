mod config;
mod logging;

use clap::{Parser, Subcommand};
use config::{Config, ENV_CONFIG};
use nf_core::types::SourceEvent;
use nf_core::{Feed, RequestContext};
use nf_db::store::DbStore;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nf", about = "Per-user notification feed")]
struct Cli {
    /// TOML configuration file (falls back to $NOTIFEED_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the feed over HTTP.
    Serve,
    /// Record a JSON-encoded source event for one or more recipients.
    Notify {
        #[arg(long = "recipient", required = true)]
        recipients: Vec<String>,
        event: PathBuf,
    },
    /// Print the OpenAPI document.
    Openapi,
}

#[tokio::main]
async fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let config_path = cli
        .config
        .or_else(|| std::env::var_os(ENV_CONFIG).map(PathBuf::from));
    match cli.command {
        Command::Serve => {
            let config = Config::load(config_path.as_deref()).map_err(|err| err.to_string())?;
            ensure_parent_dir(&config.server.db_path)?;
            let state = nf_serve::AppState {
                db_path: config.server.db_path.clone(),
                limits: config.feed,
            };
            nf_serve::serve(state, config.addr())
                .await
                .map_err(|err| format!("serve error: {err}"))
        }
        Command::Notify { recipients, event } => {
            let config = Config::load(config_path.as_deref()).map_err(|err| err.to_string())?;
            let event = read_event(&event)?;
            ensure_parent_dir(&config.server.db_path)?;
            let conn = nf_db::schema::open_and_migrate(&config.server.db_path)
                .map_err(|err| err.to_string())?;
            let feed = Feed::new(DbStore::new(conn)).with_limits(config.feed);
            let stored = feed
                .notify_many(&RequestContext::default(), &event, recipients.as_slice())
                .map_err(|err| err.to_string())?;
            let json = serde_json::to_string_pretty(&stored).map_err(|err| err.to_string())?;
            println!("{json}");
            Ok(())
        }
        Command::Openapi => {
            println!("{}", nf_serve::openapi::generate_spec());
            Ok(())
        }
    }
}

fn read_event(path: &Path) -> Result<SourceEvent, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    serde_json::from_str(&content).map_err(|err| format!("invalid event {}: {err}", path.display()))
}

fn ensure_parent_dir(db_path: &str) -> Result<(), String> {
    match Path::new(db_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|err| format!("cannot create {}: {err}", parent.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_core::types::CommentThread;
    use std::io::Write;

    #[test]
    fn read_event_loads_a_thread_backfill_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"type": "commentThread", "id": "t-9", "applicationId": "app-1", "title": "Launch", "authorUsername": "bob"}}"#
        )
        .unwrap();

        let event = read_event(file.path()).unwrap();
        assert_eq!(
            event,
            SourceEvent::CommentThread(CommentThread {
                id: "t-9".to_string(),
                application_id: "app-1".to_string(),
                page_id: None,
                title: Some("Launch".to_string()),
                author_username: "bob".to_string(),
            })
        );
    }

    #[test]
    fn read_event_names_the_file_it_could_not_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"type": "pageDeleted", "id": "p-1"}}"#).unwrap();
        let err = read_event(file.path()).unwrap_err();
        assert!(err.starts_with("invalid event"), "{err}");
        assert!(err.contains(&file.path().display().to_string()));

        let missing = file.path().with_extension("missing");
        assert!(read_event(&missing).unwrap_err().starts_with("cannot read"));
    }

    #[test]
    fn notify_requires_a_recipient() {
        assert!(Cli::try_parse_from(["nf", "notify", "event.json"]).is_err());
        let cli = Cli::try_parse_from([
            "nf", "notify", "--recipient", "alice", "--recipient", "carol", "event.json",
        ])
        .unwrap();
        let Command::Notify { recipients, event } = cli.command else {
            panic!("expected notify");
        };
        assert_eq!(recipients, ["alice", "carol"]);
        assert_eq!(event, PathBuf::from("event.json"));
    }
}
