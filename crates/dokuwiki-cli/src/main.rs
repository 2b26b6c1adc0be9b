mod cli;
mod logging;
mod settings;

use std::path::Path;

use clap::Parser;
use dokuwiki_client::{PutAttachmentOptions, PutPageOptions, WikiClient, page_id};
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::info;

use crate::cli::{Cli, Command};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let settings = Settings::load(args.config.as_deref(), &args.overrides())?;
    logging::init_logging(&settings.log_level)?;

    info!("Using wiki endpoint {}", settings.url);
    let client = WikiClient::new(settings.client_config())?;
    run(&client, args.command).await
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Page text comes from `file` when given, otherwise from `input`
async fn read_page_text<R: AsyncRead + Unpin>(
    file: Option<&Path>,
    mut input: R,
) -> anyhow::Result<String> {
    match file {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut text = String::new();
            input.read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}

async fn run(client: &WikiClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Version => println!("{}", client.get_version().await?),
        Command::Namespaces { namespace } => {
            print_lines(&client.get_namespace_names(&namespace).await?)
        }
        Command::Pages { namespace, depth } => {
            print_json(&client.get_pages(&namespace, depth).await?)?
        }
        Command::PageNames { namespace } => print_lines(&client.get_page_names(&namespace).await?),
        Command::AllPages => print_json(&client.get_all_pages().await?)?,
        Command::Search { query, ids } => {
            if ids {
                print_lines(&client.search_page_ids(&query).await?)
            } else {
                print_json(&client.search_pages(&query).await?)?
            }
        }
        Command::Get { id } => print!("{}", client.get_page(&id).await?),
        Command::Put {
            id,
            file,
            summary,
            minor,
        } => {
            let text = read_page_text(file.as_deref(), tokio::io::stdin()).await?;
            let options = PutPageOptions {
                summary,
                minor: minor.then_some(true),
            };
            client.put_page_with(&id, &text, &options).await?;
            info!("Saved page {}", id);
        }
        Command::DeletePage { id } => {
            client.delete_page(&id).await?;
            info!("Deleted page {}", id);
        }
        Command::DeletePages { namespace } => client.delete_pages(&namespace).await?,
        Command::Attachments {
            namespace,
            depth,
            names,
        } => {
            let depth = depth.unwrap_or_else(|| page_id::depth_of(&namespace));
            let attachments = client.get_attachments_at(&namespace, depth).await?;
            if names {
                let files: Vec<String> = attachments.into_iter().map(|a| a.file).collect();
                print_lines(&files)
            } else {
                print_json(&attachments)?
            }
        }
        Command::GetAttachment { id, out } => {
            let content = client.get_attachment(&id).await?;
            let path = out.unwrap_or_else(|| page_id::name_of(&id).into());
            tokio::fs::write(&path, content).await?;
            info!("Wrote {} to {}", id, path.display());
        }
        Command::PutAttachment {
            id,
            file,
            overwrite,
            mtime,
        } => {
            let content = tokio::fs::read(&file).await?;
            let options = PutAttachmentOptions { overwrite, mtime };
            client.put_attachment_with(&id, &content, &options).await?;
            info!("Uploaded {} as {}", file.display(), id);
        }
        Command::DeleteAttachment { id } => {
            client.delete_attachment(&id).await?;
            info!("Deleted attachment {}", id);
        }
        Command::DeleteAttachments { namespace } => client.delete_attachments(&namespace).await?,
        Command::DeleteNamespace { namespace } => client.delete_namespace(&namespace).await?,
    }
    Ok(())
}
