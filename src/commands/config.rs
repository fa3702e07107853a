use anyhow::{Context, Result};
use owncloud_adapter::{Config, OcsConfig};
use std::io::{self, Write};

pub async fn run() -> Result<()> {
    let config_path = Config::default_path()?;

    if config_path.exists() {
        eprintln!(
            "\nConfiguration file already exists at `{}`",
            config_path.display()
        );
        eprintln!("Delete or rename it before creating a new one.");
        return Ok(());
    }

    println!("\nOwnCloud share configuration setup:");
    println!("Press ENTER to use the default value (shown in brackets)\n");

    let server = prompt("Server URL", "https://cloud.example")?;
    let server = server.trim_end_matches('/').to_string();
    let user_name = prompt("User name", "")?;
    let password = prompt("Password", "")?;
    let prefix = prompt("Path prefix", "")?;
    let timeout_secs = prompt_parse::<u64>("Timeout in seconds", 60)?;

    let config = Config {
        dav_url: format!("{}/remote.php/webdav/", server),
        user_name: user_name.clone(),
        password: password.clone(),
        prefix: if prefix.is_empty() { None } else { Some(prefix) },
        use_streamed_copy: true,
        timeout_secs,
        ocs: Some(OcsConfig {
            share_api: format!("{}/ocs/v1.php/apps/files_sharing/api/v1/shares", server),
            user_name,
            password,
        }),
    };

    config.validate()?;
    config
        .save(&config_path)
        .context("failed to create configuration file")?;

    println!(
        "\nConfiguration file created at `{}`",
        config_path.display()
    );
    Ok(())
}

fn prompt(field: &str, default: &str) -> Result<String> {
    print!("{} [{}]: ", field, default);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

fn prompt_parse<T>(field: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + Clone + std::fmt::Debug,
{
    loop {
        print!("{} [{:?}]: ", field, default);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Ok(default);
        } else if let Ok(parsed) = trimmed.parse::<T>() {
            return Ok(parsed);
        } else {
            println!("Invalid input, please try again.");
        }
    }
}
