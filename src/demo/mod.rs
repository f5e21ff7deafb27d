mod contacts;
mod session;

pub use contacts::{visible_contacts, ContactSummary};
pub use session::Session;

use anyhow::Context;
use fullcontact_cab::{oauth, ApiClient, Authorizer, Transport};
use serde_json::Map;
use std::io::{self, Write};
use tracing::info;

/// Quick and dirty function to read a line of input from the user.
pub fn interactive_prompt(prompt: &str) -> io::Result<String> {
    let mut response = String::new();
    print!("{prompt}: ");
    io::stdout().flush()?;
    io::stdin().read_line(&mut response)?;

    // Remove the trailing newline, whichever kind it is.
    Ok(response.trim_end_matches(['\r', '\n']).to_string())
}

/// Walks the user through the browser half of the flow, then exchanges the
/// code they bring back and remembers the resulting token.
pub async fn login<T: Transport>(
    authorizer: &Authorizer<T>,
    session: &Session,
    redirect_uri: &str,
    scopes: &[&str],
) -> anyhow::Result<()> {
    let url = authorizer.authorize_url(redirect_uri, scopes);
    println!("Open the following URL in your browser and approve access:\n\n  {url}\n");
    println!("You'll be redirected to {redirect_uri}.");
    println!("Paste that full URL, or just its code, below.");

    let pasted = interactive_prompt("Redirected URL or code")?;
    let code = oauth::code_from_redirect(&pasted)
        .context("no authorization code found in what was pasted")?;

    let token = authorizer
        .exchange_code(redirect_uri, &code)
        .await
        .context("unable to exchange authorization code")?;
    session.store(&token)?;

    info!("logged in");
    println!("Logged in.");
    Ok(())
}

/// Lists the user's visible contacts, fetching up to `max_pages` pages.
///
/// If the provider no longer accepts our token, it's forgotten so the next
/// `login` starts fresh.
pub async fn list_contacts<T: Transport>(
    client: &ApiClient<T>,
    session: &Session,
    max_pages: usize,
) -> anyhow::Result<()> {
    let Some(token) = session.load()? else {
        println!("Not logged in. Run `cab-demo login` first.");
        return Ok(());
    };

    // Scroll defaults to the unified address book when no `abId` is given.
    let pages = match client.scroll_contacts(&token, Map::new(), max_pages).await {
        Ok(pages) => pages,
        Err(err) if err.requires_login() => {
            session.clear()?;
            println!("Your session has expired. Run `cab-demo login` again.");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    let contacts = visible_contacts(&pages);
    info!(pages = pages.len(), contacts = contacts.len(), "fetched contacts");
    if contacts.is_empty() {
        println!("No contacts to show.");
    }
    for contact in contacts {
        println!("{}", ContactSummary::from_contact(contact));
    }
    Ok(())
}

pub fn logout(session: &Session) -> anyhow::Result<()> {
    session.clear()?;
    println!("Logged out.");
    Ok(())
}
