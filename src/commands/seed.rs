//! Seed command - creates the sign-in user and demo customers.

use crate::cli::args::SeedArgs;
use crate::config::Config;
use crate::domain::{NewCustomer, Password};
use crate::errors::AppResult;
use crate::infra::{Database, Persistence, UnitOfWork};

/// (name, email, image) of the demo customers
const DEMO_CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Amy Burns", "amy@burns.com", "/customers/amy-burns.png"),
    ("Balazs Orban", "balazs@orban.com", "/customers/balazs-orban.png"),
    ("Delba de Oliveira", "delba@oliveira.com", "/customers/delba-de-oliveira.png"),
    ("Lee Robinson", "lee@robinson.com", "/customers/lee-robinson.png"),
    ("Michael Novotny", "michael@novotny.com", "/customers/michael-novotny.png"),
];

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let uow = Persistence::new(db.get_connection());

    seed_user(&uow, &args).await?;

    if args.with_customers {
        seed_customers(&uow).await?;
    }

    Ok(())
}

/// Create the user unless the email is already taken.
pub async fn seed_user(uow: &dyn UnitOfWork, args: &SeedArgs) -> AppResult<()> {
    if uow.users().find_by_email(&args.email).await?.is_some() {
        tracing::info!(email = %args.email, "User already exists, skipping");
        return Ok(());
    }

    let password_hash = Password::new(&args.password)?.into_string();
    let user = uow
        .users()
        .create(args.name.clone(), args.email.clone(), password_hash)
        .await?;
    tracing::info!(user_id = %user.id, email = %user.email, "User created");

    Ok(())
}

/// Insert the demo customers into an empty customers table.
pub async fn seed_customers(uow: &dyn UnitOfWork) -> AppResult<()> {
    let customers = uow.customers();
    if customers.count().await? > 0 {
        tracing::info!("Customers already present, skipping");
        return Ok(());
    }

    for (name, email, image_url) in DEMO_CUSTOMERS {
        customers
            .create(NewCustomer {
                name: name.to_string(),
                email: email.to_string(),
                image_url: image_url.to_string(),
            })
            .await?;
    }
    tracing::info!(count = DEMO_CUSTOMERS.len(), "Demo customers created");

    Ok(())
}
