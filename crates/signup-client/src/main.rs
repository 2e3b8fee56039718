//! Sign-up CLI - fills in the registration form and submits it.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain::{validate_username, RegistrationError, RegistrationForm, GENDER_CHOICES};
use signup_client_lib::{HttpSignupClient, Registrar, SignupClientConfig};

#[derive(Parser)]
#[command(name = "signup")]
#[command(about = "Create an account")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the sign-up form and submit it. Missing fields are prompted for.
    Register(FormArgs),
    /// Check a username without submitting anything
    CheckUsername { username: String },
}

#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long, env = "SIGNUP_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

fn prompt(label: &str, value: Option<String>) -> Result<String, dialoguer::Error> {
    match value {
        Some(v) => Ok(v),
        None => Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text(),
    }
}

impl FormArgs {
    /// Build the form, asking for anything not given on the command line.
    fn into_form(self) -> Result<RegistrationForm, dialoguer::Error> {
        let first_name = prompt("First Name", self.first_name)?;
        let last_name = prompt("Last Name", self.last_name)?;
        let email = prompt("Email", self.email)?;

        let username = prompt("Username", self.username)?;
        // Field-level hint as soon as the username is entered
        if !username.is_empty() {
            if let Err(violation) = validate_username(&username) {
                eprintln!("Invalid Username: {}", violation.message());
            }
        }

        let age = prompt("Age", self.age)?;
        let gender = match self.gender {
            Some(g) => g,
            None => {
                let choice = Select::new()
                    .with_prompt("Gender")
                    .items(GENDER_CHOICES)
                    .default(0)
                    .interact()?;
                GENDER_CHOICES[choice].to_string()
            }
        };
        let password = match self.password {
            Some(p) => p,
            None => Password::new()
                .with_prompt("Password")
                .allow_empty_password(true)
                .interact()?,
        };

        Ok(RegistrationForm {
            first_name,
            last_name,
            email,
            username,
            age,
            gender,
            password,
        })
    }
}

fn report(err: &RegistrationError) -> ExitCode {
    eprintln!("{}: {}", err.title(), err.message());
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::CheckUsername { username } => match validate_username(&username) {
            Ok(()) => {
                println!("Username is valid");
                Ok(ExitCode::SUCCESS)
            }
            Err(violation) => {
                eprintln!("Invalid Username: {}", violation.message());
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Register(args) => {
            let config = SignupClientConfig::from_env();
            let client = HttpSignupClient::new(&config.http)?;
            let registrar = Registrar::new(Arc::new(client));

            let form = args.into_form()?;
            match registrar.register(&form).await {
                Ok(session) => {
                    println!("Signed up as user {}", session.user_id);
                    println!("{}", session.token);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => Ok(report(&err)),
            }
        }
    }
}
