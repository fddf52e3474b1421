//! Session commands.

use clap::Subcommand;

use shopfront_client::error::Result;
use shopfront_core::Email;
use shopfront_core::auth::{LoginRequest, SignupRequest};

use super::App;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in and persist the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create a new account (log in afterwards)
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Clear the persisted session
    Logout,
    /// Show the logged-in user
    Whoami,
}

pub async fn run(app: &mut App, action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Login { username, password } => {
            let user = app
                .session
                .login(&LoginRequest { username, password })
                .await?;
            println!("Logged in as {} ({}).", user.display_name(), user.username);
        }
        AuthAction::Register {
            username,
            email,
            password,
            first_name,
            last_name,
        } => {
            let email = Email::parse(&email)?;
            let message = app
                .session
                .register(&SignupRequest {
                    username,
                    email,
                    password,
                    first_name,
                    last_name,
                })
                .await?;
            println!("{message}");
            println!("You can now log in with `shopfront auth login`.");
        }
        AuthAction::Logout => {
            app.session.logout();
            println!("Logged out.");
        }
        AuthAction::Whoami => match app.session.current_user() {
            Some(user) => {
                println!("{} <{}>", user.display_name(), user.email);
                println!("Username: {}", user.username);
                println!("Role:     {}", user.role);
            }
            None => println!("Not logged in."),
        },
    }
    Ok(())
}
