use std::sync::Arc;

use library_desk::api::Library;
use library_desk::config::ClientConfig;
use library_desk::http::{ApiClient, HttpTransport};
use library_desk::session::{GuardDecision, RouteGuard, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env()?;
    tracing::info!(base_url = %config.base_url, "library desk starting");

    let startup_login = config.login.clone();
    let transport = HttpTransport::new(config)?;
    let session = SessionStore::new(Arc::new(transport));
    let library = Library::new(ApiClient::new(session.clone()));

    // Boot-time silent refresh; an anonymous outcome is not an error here.
    if let Err(e) = session.check_auth().await {
        tracing::debug!(error = %e, "no existing session");
    }

    if let Some(login) = startup_login.filter(|_| !session.snapshot().is_authenticated()) {
        if session.login(&login.username, &login.password).await {
            tracing::info!(username = %login.username, "signed in from configured credentials");
        } else {
            tracing::warn!(username = %login.username, "configured credentials were rejected");
        }
    }

    match RouteGuard::new(session.clone()).mount().await {
        GuardDecision::Render => {
            let report = library.dashboard().load().await?;
            let stats = &report.stats;
            println!(
                "books {} | copies {} | users {} | active loans {} | overdue {}",
                stats.total_books, stats.total_copies, stats.total_users, stats.active_loans, stats.overdue_loans
            );
            for book in &report.most_borrowed {
                println!("  {:>4}  {}", book.loan_count, book.title);
            }
        }
        GuardDecision::Redirect(path) => println!("not signed in; go to {path}"),
        GuardDecision::Loading => tracing::warn!("session still loading after mount"),
    }

    Ok(())
}
