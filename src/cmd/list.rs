//! Read-only listings: `storyforge projects` and `storyforge repos`.

use anyhow::{Context, Result};
use console::style;

use storyforge::config::Credentials;
use storyforge::issues::{IssueTracker, JiraClient};
use storyforge::settings::Settings;
use storyforge::ui::icons::{BRANCH, CHECK, TICKET};
use storyforge::vcs::{GitHubClient, RepositoryHost};

pub async fn cmd_projects(settings: &Settings, credentials: &Credentials) -> Result<()> {
    let tracker = JiraClient::new(&credentials.tracker, &settings.tracker.cloud_suffix);

    match tracker.authenticate().await {
        Ok(name) => println!("{}Connected to {} as {}", CHECK, tracker.site(), name),
        Err(e) => {
            for line in e.guidance() {
                eprintln!("{}", line);
            }
            anyhow::bail!("Failed to connect to JIRA. Please check your credentials and instance URL.");
        }
    }

    let projects = tracker
        .list_projects()
        .await
        .context("Error getting projects")?;
    if projects.is_empty() {
        println!("No projects found in JIRA");
        return Ok(());
    }

    println!();
    for project in &projects {
        println!("{}{}  {}", TICKET, style(&project.key).bold(), project.name);
    }
    println!();
    println!("{} project(s)", projects.len());
    Ok(())
}

pub async fn cmd_repos(settings: &Settings, credentials: &Credentials) -> Result<()> {
    let host = GitHubClient::new(&credentials.repository, &settings.repository);
    let repos = host.list_repositories().await?;
    if repos.is_empty() {
        println!(
            "No repositories found for {}",
            style(&credentials.repository.username).bold()
        );
        return Ok(());
    }

    for repo in &repos {
        println!("{}{}", BRANCH, repo);
    }
    println!();
    println!("{} repositor{}", repos.len(), if repos.len() == 1 { "y" } else { "ies" });
    Ok(())
}
