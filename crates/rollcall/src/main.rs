//! `rollctl` - CLI for rollcall
//!
//! This binary provides the command-line interface for administrator login
//! and student registration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::bail;
use clap::Parser;

use rollcall::cli::{Cli, Command, ConfigCommand, StudentCommand};
use rollcall::validate::validate_login_form;
use rollcall::{
    init_logging, Config, CredentialStore, LoginForm, NavigationDecision, Route, SessionGuard,
    SqliteStore, StudentRegistry, StudentRules,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Login(cmd) => handle_login(&config, cmd),
        Command::Logout => handle_logout(&config),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Student(cmd) => handle_student(&config, cmd),
        Command::Config(cmd) => handle_config(&config, &cmd),
    }
}

fn handle_login(config: &Config, cmd: rollcall::cli::LoginCommand) -> anyhow::Result<()> {
    let store = SqliteStore::open(config.database_path())?;
    let guard = SessionGuard::new(&store, &config.auth);

    if guard.evaluate(Route::Login) == NavigationDecision::Redirected(Route::StudentList) {
        println!("Already logged in.");
        return Ok(());
    }

    let mut form = LoginForm {
        username: cmd.username,
        password: cmd.password,
    };
    validate_login_form(&form)?;
    guard.login(&mut form)?;

    println!("Login successful");
    Ok(())
}

fn handle_logout(config: &Config) -> anyhow::Result<()> {
    let store = SqliteStore::open(config.database_path())?;
    let guard = SessionGuard::new(&store, &config.auth);

    let reset = guard.logout()?;
    println!("{}", reset.message);
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = SqliteStore::open(config.database_path())?;
    let guard = SessionGuard::new(&store, &config.auth);

    // Entering the status view counts as a navigation; this also seeds the
    // default credential on a fresh database.
    let _ = guard.evaluate(Route::Home);

    let authenticated = guard.is_authenticated();
    let credentials = CredentialStore::new(&store, &config.auth);
    let admin = credentials.read()?;

    let mut registry = StudentRegistry::new(&store);
    registry.load_students()?;

    if json {
        let status = serde_json::json!({
            "authenticated": authenticated,
            "admin_username": admin.map(|a| a.username),
            "students_registered": registry.len(),
            "database_path": config.database_path(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("rollctl status");
        println!("--------------");
        println!(
            "Session:   {}",
            if authenticated {
                "authenticated"
            } else {
                "not authenticated"
            }
        );
        if let Some(admin) = admin {
            println!("Admin:     {}", admin.username);
        }
        println!("Students:  {}", registry.len());
        println!("Database:  {}", config.database_path().display());
    }
    Ok(())
}

fn handle_student(config: &Config, cmd: StudentCommand) -> anyhow::Result<()> {
    let store = SqliteStore::open(config.database_path())?;
    let guard = SessionGuard::new(&store, &config.auth);

    // Student views are protected; an unauthenticated session is sent to
    // the login view instead.
    if guard.evaluate(Route::StudentList) == NavigationDecision::Redirected(Route::Login) {
        bail!("not authenticated; run `rollctl login` first");
    }

    let mut registry = StudentRegistry::new(&store);
    registry.load_students()?;

    match cmd {
        StudentCommand::Add(cmd) => {
            *registry.draft_mut() = cmd.record.into();

            let rules = StudentRules::new();
            let violations = rules.violations(registry.draft());
            if !violations.is_empty() {
                for violation in &violations {
                    eprintln!("  - {violation}");
                }
                bail!("student record failed validation");
            }

            let name = registry.draft().display_name();
            registry.add_student()?;
            println!("Registered {} ({} on file)", name, registry.len());
        }
        StudentCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(registry.students())?);
            } else if registry.is_empty() {
                println!("No students registered.");
            } else {
                for (index, student) in registry.students().iter().enumerate() {
                    println!(
                        "{:>3}  {}  age {}  born {}  [{}]",
                        index,
                        student.display_name(),
                        student.age,
                        student.birth_day,
                        student.courses.join(", ")
                    );
                }
            }
        }
        StudentCommand::Draft(cmd) => {
            *registry.draft_mut() = cmd.record.into();

            if cmd.json {
                println!("{}", serde_json::to_string_pretty(registry.draft())?);
            } else {
                let draft = registry.draft();
                println!("Draft preview:");
                println!("  Name:     {}", draft.display_name());
                println!("  Born:     {} (age {})", draft.birth_day, draft.age);
                println!("  Address:  {}", draft.address);
                println!("  Courses:  {}", draft.courses.join(", "));
            }

            let rules = StudentRules::new();
            let violations = rules.violations(registry.draft());
            if !violations.is_empty() {
                for violation in &violations {
                    eprintln!("  - {violation}");
                }
                bail!("draft failed validation");
            }

            println!("Draft is valid; `rollctl student add` with the same fields registers it.");
        }
        StudentCommand::Update(cmd) => {
            let record = cmd.record.into();

            let rules = StudentRules::new();
            let violations = rules.violations(&record);
            if !violations.is_empty() {
                for violation in &violations {
                    eprintln!("  - {violation}");
                }
                bail!("student record failed validation");
            }

            if cmd.index >= registry.len() {
                println!(
                    "No student at index {} ({} on file); nothing updated.",
                    cmd.index,
                    registry.len()
                );
                return Ok(());
            }

            registry.update_student(cmd.index, record)?;
            println!("Updated student at index {}", cmd.index);
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!();
                println!("[Auth]");
                println!("  Seed username:  {}", config.auth.seed_username);
                println!("  Token value:    {}", config.auth.token_value);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.clone().unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
