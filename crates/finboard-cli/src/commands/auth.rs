use anyhow::{Result, bail};
use colored::Colorize;
use finboard_application::FinboardServices;
use finboard_core::FinboardError;

pub async fn login(app: &FinboardServices, identifier: &str, password: &str) -> Result<()> {
    match app.session.login(identifier, password).await {
        Ok(user) => {
            println!("{} {}", "Logged in as".green(), user.username.bold());
            Ok(())
        }
        Err(FinboardError::Auth(message)) => bail!("Login failed: {}", message),
        Err(e) => bail!("Login failed: {}", e.user_message()),
    }
}

pub async fn logout(app: &FinboardServices) -> Result<()> {
    app.session.logout().await?;
    println!("{}", "Logged out".green());
    Ok(())
}

pub async fn whoami(app: &FinboardServices) {
    match app.session.current_user().await {
        Some(user) => {
            println!("{} ({})", user.username.bold(), user.identifier);
        }
        None => println!("{}", "Not logged in".bright_black()),
    }
}
