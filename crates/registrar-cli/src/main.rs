use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use registrar_cli::seeder::{self, DemoConfig};
use registrar_config::{DatabaseConfig, SeedAccounts};
use registrar_core::hash_password;
use registrar_db::{PgStore, Store, init_db_pool, run_migrations};
use registrar_models::{AccountStatus, Faculty, FacultyRole};

#[derive(Parser)]
#[command(name = "registrar-cli")]
#[command(about = "Registrar CLI - Administrative tools for the Registrar API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create the Admin and Head of Department accounts and the Admin department
    Seed,
    /// Seed fake departments, faculty, students, courses and exams
    SeedDemo {
        /// Number of departments to create
        #[arg(short = 'd', long, default_value = "3")]
        departments: usize,

        /// Faculty per department, including its head
        #[arg(long, default_value = "3")]
        faculty: usize,

        /// Students per department
        #[arg(long, default_value = "20")]
        students: usize,
    },
    /// Create an additional administrator account
    CreateAdmin {
        /// Full name of the administrator
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "registrar_cli=info,registrar_db=info".into()),
        )
        .compact()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = DatabaseConfig::from_env();
    let url = config.url.clone().context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&url, &config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;

    let store = PgStore::new(pool);

    match cli.command {
        Commands::Migrate => {
            println!("✅ Migrations applied");
        }
        Commands::Seed => {
            let summary = seeder::seed_bootstrap(&store, &SeedAccounts::from_env())
                .await
                .map_err(|e| e.error)?;
            println!("✅ Bootstrap data ready ({} rows written)", summary.created);
            println!("   Admin faculty id: {}", summary.admin_id);
            println!("   Head of department id: {}", summary.hod_id);
            println!("   Admin department id: {}", summary.department_id);
        }
        Commands::SeedDemo {
            departments,
            faculty,
            students,
        } => {
            let config = DemoConfig {
                departments,
                faculty_per_department: faculty.max(1),
                students_per_department: students,
                ..DemoConfig::default()
            };
            let summary = seeder::seed_demo(&store, &config)
                .await
                .map_err(|e| e.error)?;
            println!(
                "✅ Created {} departments, {} faculty, {} students, {} courses",
                summary.departments, summary.faculty, summary.students, summary.courses
            );
        }
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => create_admin(&store, name, email, password).await?,
    }

    Ok(())
}

async fn create_admin(
    store: &dyn Store,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let admin = Faculty {
        id: 0,
        name: name.clone(),
        email: email.clone(),
        dob: NaiveDate::default(),
        gender: "unspecified".to_string(),
        mobile: "0000000000".to_string(),
        address: "Registrar office".to_string(),
        role: FacultyRole::Admin,
        status: AccountStatus::Active,
        department_id: None,
        password_hash: hash_password(&password).map_err(|e| e.error)?,
    };
    let admin = store.faculty().add(admin).await.map_err(|e| e.error)?;

    println!("\n✅ Administrator created successfully!");
    println!("   Id: {}", admin.id);
    println!("   Email: {}", email);
    println!("   Name: {}", name);
    Ok(())
}
