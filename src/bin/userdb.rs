//! userdb - VisionMate user database admin tool
//!
//! Inspect and maintain the credential store without going through the
//! voice flow. Useful when testing registrations or cleaning up a
//! development database.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use visionmate::auth::{UserInfo, UserStore};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the user database.
    #[arg(long, env = "VISIONMATE_DB_PATH", default_value = "visionmate.db")]
    db_path: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database schema if it does not exist.
    Init,
    /// Register a user directly.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Verify a username/password pair.
    Check {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Show one user record.
    Info {
        #[arg(long)]
        username: String,
    },
    /// List all users, newest first.
    List,
    /// Delete one user.
    Delete {
        #[arg(long)]
        username: String,
    },
    /// Drop and recreate the users table. Destroys all accounts.
    Reset {
        /// Required confirmation flag.
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let mut store = UserStore::open(&args.db_path)?;

    match args.command {
        Command::Init => {
            println!("database ready at {}", args.db_path);
        }
        Command::Add {
            name,
            email,
            username,
            password,
        } => {
            let outcome = store.add_user(&name, &email, &username, &password)?;
            println!("{}", outcome.message());
        }
        Command::Check { username, password } => {
            let outcome = store.check_user(&username, &password)?;
            match outcome.failure_message() {
                None => println!("credentials OK"),
                Some(reason) => {
                    println!("{}", reason);
                    std::process::exit(1);
                }
            }
        }
        Command::Info { username } => {
            let info = store
                .user_info(&username)?
                .ok_or_else(|| anyhow!("no such user: {}", username))?;
            print_user(&info);
        }
        Command::List => {
            let users = store.list_users()?;
            if users.is_empty() {
                println!("no users");
            }
            for info in users {
                print_user(&info);
            }
        }
        Command::Delete { username } => {
            if store.delete_user(&username)? {
                println!("deleted {}", username);
            } else {
                println!("no such user: {}", username);
                std::process::exit(1);
            }
        }
        Command::Reset { yes } => {
            if !yes {
                return Err(anyhow!("refusing to reset without --yes"));
            }
            store.reset()?;
            println!("users table reset");
        }
    }
    Ok(())
}

fn print_user(info: &UserInfo) {
    println!(
        "#{} {} <{}> username={} created_at={} last_login={}",
        info.id,
        info.name,
        info.email,
        info.username,
        info.created_at,
        info.last_login
            .map(|t| t.to_string())
            .unwrap_or_else(|| "never".to_string()),
    );
}
