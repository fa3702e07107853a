use anyhow::{Context, Result};
use clap::Subcommand;
use owncloud_adapter::api::models::expire_date_value;
use owncloud_adapter::ShareResponse;

use super::load_adapter;

#[derive(Subcommand)]
pub enum ShareCommand {
    /// Create a read-only public link
    Create { path: String },
    /// Show one share
    Get { id: String },
    /// List the shares on a path
    List {
        path: String,
        #[arg(long)]
        subfiles: bool,
    },
    /// Change share fields
    Update {
        id: String,
        #[arg(long)]
        permissions: Option<u32>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long = "public-upload")]
        public_upload: Option<bool>,
        /// Expiry day, YYYY-MM-DD
        #[arg(long)]
        expire: Option<chrono::NaiveDate>,
    },
    Delete { id: String },
}

pub async fn run(command: ShareCommand) -> Result<()> {
    let adapter = load_adapter()?;

    match command {
        ShareCommand::Create { path } => {
            let response = adapter.create_share(&path).await?;
            print_response(&response)?;
        }
        ShareCommand::Get { id } => {
            let response = adapter.get_share_by_id(&id).await?;
            print_response(&response)?;
        }
        ShareCommand::List { path, subfiles } => {
            let response = adapter.get_shares(&path, subfiles).await?;
            print_response(&response)?;
        }
        ShareCommand::Update {
            id,
            permissions,
            password,
            public_upload,
            expire,
        } => {
            let mut params: Vec<(&str, String)> = Vec::new();
            if let Some(permissions) = permissions {
                params.push(("permissions", permissions.to_string()));
            }
            if let Some(password) = password {
                params.push(("password", password));
            }
            if let Some(public_upload) = public_upload {
                params.push(("publicUpload", public_upload.to_string()));
            }
            if let Some(expire) = expire {
                params.push(("expireDate", expire_date_value(expire)));
            }

            adapter.update_share_by_id(&id, params).await?;
            println!("Share {} updated", id);
        }
        ShareCommand::Delete { id } => {
            adapter.delete_share_by_id(&id).await?;
            println!("Share {} deleted", id);
        }
    }

    Ok(())
}

fn print_response(response: &ShareResponse) -> Result<()> {
    if !response.is_ok() && !response.meta.message.is_empty() {
        eprintln!("Server: {}", response.meta.message);
    }

    let shares = response.shares();
    let output = serde_json::to_string_pretty(&shares).context("cannot format shares")?;
    println!("{}", output);
    Ok(())
}
