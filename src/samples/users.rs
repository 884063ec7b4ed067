//! IAM users
//!
//! Shows the logged-in user and lists every user of the account, or prints
//! a single user when an id is given.

use super::{connect, report_failure};
use crate::report::{cell, Table};
use crate::vchs::auth::Credentials;
use crate::vchs::http::Transport;
use crate::vchs::iam::{self, User};
use crate::vchs::ApiClient;
use anyhow::Result;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct UsersOptions {
    pub user_id: Option<String>,
}

pub async fn run<T: Transport, W: Write>(
    client: &ApiClient<T>,
    credentials: &Credentials,
    options: &UsersOptions,
    out: &mut W,
) -> Result<()> {
    let token = connect(client, credentials, out).await?;
    let host = credentials.host.as_str();

    if let Some(user_id) = options.user_id.as_deref() {
        return match iam::get_user(client, host, &token, user_id).await {
            Ok(user) => write_user(out, &user),
            Err(e) => report_failure(out, &format!("User {}", user_id), &e),
        };
    }

    match iam::get_self(client, host, &token).await {
        Ok(Some(me)) => writeln!(
            out,
            "Logged in as {} ({})\n",
            me.user_name,
            me.email.as_deref().unwrap_or("-")
        )?,
        Ok(None) => writeln!(out, "Server did not return the current user\n")?,
        Err(e) => report_failure(out, "Current user", &e)?,
    }

    match iam::list_users(client, host, &token).await {
        Ok(users) => write_users(out, &users)?,
        Err(e) => match e.error_body() {
            Some(body) => {
                writeln!(out, "ERROR CODE : {}", body.code.as_deref().unwrap_or("-"))?;
                writeln!(out, "MESSAGE    : {}", body.message.as_deref().unwrap_or("-"))?;
            }
            None => report_failure(out, "User listing", &e)?,
        },
    }

    Ok(())
}

fn write_user<W: Write>(out: &mut W, user: &User) -> Result<()> {
    let name = [user.given_name.as_deref(), user.family_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "ID:        {}", cell(&user.id))?;
    writeln!(out, "User name: {}", user.user_name)?;
    writeln!(out, "Name:      {}", name)?;
    writeln!(out, "Email:     {}", cell(&user.email))?;
    writeln!(out, "State:     {}", cell(&user.state))?;
    if let Some(roles) = &user.roles {
        let names: Vec<&str> = roles.roles.iter().map(|r| r.name.as_str()).collect();
        writeln!(out, "Roles:     {}", names.join(", "))?;
    }
    if let Some(created) = user.meta.as_ref().and_then(|m| m.created) {
        writeln!(out, "Created:   {}", created)?;
    }
    Ok(())
}

fn write_users<W: Write>(out: &mut W, users: &[User]) -> Result<()> {
    let table = Table::new(&[
        ("ID", 38),
        ("User name", 30),
        ("Email", 30),
        ("State", 12),
        ("Created", 26),
    ]);
    table.write_header(out)?;
    for user in users {
        let created = user.meta.as_ref().and_then(|m| m.created);
        table.write_row(
            out,
            &[
                &cell(&user.id),
                &user.user_name,
                &cell(&user.email),
                &cell(&user.state),
                &cell(&created),
            ],
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vchs::testing::{response, with_header, MockTransport};

    #[tokio::test]
    async fn test_single_user_details() {
        let body = "<User>\
            <id>u-1</id><userName>jdoe</userName>\
            <givenName>Jane</givenName><familyName>Doe</familyName>\
            <roles><roles><name>Account Administrator</name></roles></roles>\
            <meta><created>2014-03-01T10:00:00Z</created></meta>\
            </User>";
        let transport = MockTransport::new(vec![
            with_header(response(201, "", ""), "vchs-authorization", "t"),
            response(200, "application/xml;version=5.7", body),
        ]);
        let client = ApiClient::with_transport(transport, "5.7");
        let creds = Credentials::new("https://h", "me", "pw");
        let options = UsersOptions {
            user_id: Some("u-1".into()),
        };

        let mut out = Vec::new();
        run(&client, &creds, &options, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("User name: jdoe\n"));
        assert!(text.contains("Name:      Jane Doe\n"));
        assert!(text.contains("Email:     -\n"));
        assert!(text.contains("Roles:     Account Administrator\n"));
        assert!(text.contains("Created:   2014-03-01T10:00:00Z\n"));
        assert_eq!(
            client.transport().requests()[1].url,
            "https://h/api/iam/Users/u-1"
        );
    }
}
