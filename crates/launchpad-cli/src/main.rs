//! LaunchPad registration tool.
//!
//! Thin command-line wrapper over `launchpad-core` for scripts and
//! installers that need to register or remove a launch target.

use anyhow::Result;
use clap::{Parser, Subcommand};
use launchpad_core::{LaunchPadError, RegistrationStore};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "launchpad-reg")]
#[command(about = "Manage LaunchPad application registrations")]
struct Args {
    /// Registration database (defaults to the per-user location)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Register an application, replacing the path of an existing title
    Register { title: String, path: String },

    /// Remove a registration (unknown titles are ignored)
    Unregister { title: String },

    /// List all registrations sorted by title
    List {
        /// Print a JSON array instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },

    /// Print the path registered for a title
    Get { title: String },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{:#}", err);
            let code = err
                .downcast_ref::<LaunchPadError>()
                .map(LaunchPadError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

/// Runs one command. `Ok(false)` means a lookup found nothing.
fn run(args: Args) -> Result<bool> {
    let store = match args.db {
        Some(path) => RegistrationStore::open_at(path),
        None => RegistrationStore::open()?,
    };
    debug!("Using registry at {}", store.backend().db_path().display());

    match args.command {
        Command::Register { title, path } => {
            store.register(title.as_str(), path.as_str())?;
        }
        Command::Unregister { title } => {
            store.unregister(title.as_str())?;
        }
        Command::List { json } => {
            let registrations = store.registrations()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&registrations)?);
            } else {
                for registration in registrations {
                    println!("{}\t{}", registration.title, registration.path);
                }
            }
        }
        Command::Get { title } => match store.get_registration(&title)? {
            Some(registration) => println!("{}", registration.path),
            None => {
                debug!("No registration for {:?}", title);
                return Ok(false);
            }
        },
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_register() {
        let args =
            Args::try_parse_from(["launchpad-reg", "register", "Notepad", "/bin/notepad"]).unwrap();
        assert_eq!(
            args.command,
            Command::Register {
                title: "Notepad".into(),
                path: "/bin/notepad".into()
            }
        );
        assert!(args.db.is_none());
        assert!(!args.debug);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "launchpad-reg",
            "list",
            "--json",
            "--db",
            "/tmp/registry.db",
            "--debug",
        ])
        .unwrap();
        assert_eq!(args.command, Command::List { json: true });
        assert_eq!(args.db, Some(PathBuf::from("/tmp/registry.db")));
        assert!(args.debug);
    }

    #[test]
    fn test_register_requires_path() {
        assert!(Args::try_parse_from(["launchpad-reg", "register", "Notepad"]).is_err());
    }

    #[test]
    fn test_run_against_temp_database() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db = temp_dir.path().join("registry.db");
        let db_arg = db.to_string_lossy().to_string();

        let register = Args::try_parse_from([
            "launchpad-reg",
            "--db",
            db_arg.as_str(),
            "register",
            "Notepad",
            "/bin/notepad",
        ])
        .unwrap();
        assert!(run(register).unwrap());

        let store = RegistrationStore::open_at(&db);
        assert_eq!(store.registrations().unwrap().len(), 1);

        let missing =
            Args::try_parse_from(["launchpad-reg", "--db", db_arg.as_str(), "get", "Missing"])
                .unwrap();
        assert!(!run(missing).unwrap());
    }

    #[test]
    fn test_blank_title_maps_to_argument_exit_code() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_arg = temp_dir.path().join("registry.db").to_string_lossy().to_string();

        let args = Args::try_parse_from([
            "launchpad-reg",
            "--db",
            db_arg.as_str(),
            "register",
            " ",
            "/bin/notepad",
        ])
        .unwrap();
        let err = run(args).unwrap_err();
        let code = err
            .downcast_ref::<LaunchPadError>()
            .map(LaunchPadError::exit_code);
        assert_eq!(code, Some(2));
    }
}
