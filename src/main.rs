use std::time::Duration;

use chrono::DateTime;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use gitanalytics::models::ActivityEntry;
use gitanalytics::{AnalysisPipeline, ClientConfig, Config, ProfileAnalysis};

#[derive(Parser, Debug)]
#[command(name = "gitanalytics")]
#[command(version)]
#[command(about = "Summarize a GitHub profile: stars, forks, languages, commits and activity")]
struct Args {
    /// GitHub username to analyze
    #[arg(short, long)]
    username: String,

    /// Personal access token (defaults to GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitanalytics=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    let mut client_config = ClientConfig::from(&config);
    if let Some(token) = args.token.as_deref() {
        client_config = client_config.with_token(Some(token));
    }
    if client_config.token.is_none() {
        tracing::info!("No token supplied, using unauthenticated requests");
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Analyzing {}...", args.username));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = AnalysisPipeline::new(client_config)
        .analyze_user(&args.username)
        .await;
    spinner.finish_and_clear();

    let analysis = match result {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::error!("Analysis failed for {}: {}", args.username, e);
            anyhow::bail!(e);
        }
    };

    output_analysis(&analysis, &args)
}

fn output_analysis(analysis: &ProfileAnalysis, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(analysis)?,
        "markdown" => format_markdown(analysis),
        _ => format_text(analysis),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_timestamp(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "unknown time".to_string(),
    }
}

fn describe_activity(entry: &ActivityEntry) -> (String, String, String) {
    (
        entry.event_type.clone().unwrap_or_else(|| "Event".to_string()),
        entry.repo_name.clone().unwrap_or_else(|| "-".to_string()),
        format_timestamp(entry.created_at.as_deref()),
    )
}

fn format_text(analysis: &ProfileAnalysis) -> String {
    let user = &analysis.user;
    let report = &analysis.analytics;
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== GitHub Analytics: {} ===\n\n",
        user.login().unwrap_or("unknown user")
    ));

    if let Some(name) = user.name() {
        output.push_str(&format!("Name: {}\n", name));
    }
    if let Some(bio) = user.bio() {
        output.push_str(&format!("Bio: {}\n", bio));
    }
    if let Some(url) = user.html_url() {
        output.push_str(&format!("Profile: {}\n", url));
    }
    if let Some(created_at) = user.created_at() {
        output.push_str(&format!("Member since: {}\n", created_at.format("%Y-%m-%d")));
    }
    output.push_str(&format!(
        "Followers: {}  Following: {}  Public repos: {}\n\n",
        user.followers(),
        user.following(),
        user.public_repos()
    ));

    output.push_str(&format!("Total stars:   {}\n", report.total_stars));
    output.push_str(&format!("Total forks:   {}\n", report.total_forks));
    output.push_str(&format!("Total commits: {}\n", report.total_commits));

    if !report.language_data.is_empty() {
        output.push_str("\nLanguages:\n");
        for language in &report.language_data {
            output.push_str(&format!(
                "  - {}: {} repos ({:.2}%)\n",
                language.name, language.count, language.percentage
            ));
        }
    }

    if !report.commit_data.is_empty() {
        output.push_str("\nCommits per month:\n");
        for month in &report.commit_data {
            output.push_str(&format!("  {}  {}\n", month.month, month.commit_count));
        }
    }

    if !report.top_repos.is_empty() {
        output.push_str("\nTop repositories:\n");
        for repo in &report.top_repos {
            output.push_str(&format!("  * {} ({} stars) {}\n", repo.name, repo.stars, repo.url));
        }
    }

    if !report.recent_activity.is_empty() {
        output.push_str("\nRecent activity:\n");
        for entry in &report.recent_activity {
            let (kind, repo, when) = describe_activity(entry);
            output.push_str(&format!("  [{}] {} on {}\n", when, kind, repo));
        }
    }

    output
}

fn format_markdown(analysis: &ProfileAnalysis) -> String {
    let user = &analysis.user;
    let report = &analysis.analytics;
    let mut output = String::new();

    output.push_str(&format!(
        "# GitHub Analytics: {}\n\n",
        user.login().unwrap_or("unknown user")
    ));

    if let Some(name) = user.name() {
        output.push_str(&format!("**Name:** {}\n\n", name));
    }
    if let Some(bio) = user.bio() {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Stars | {} |\n", report.total_stars));
    output.push_str(&format!("| Forks | {} |\n", report.total_forks));
    output.push_str(&format!("| Commits | {} |\n", report.total_commits));
    output.push_str(&format!("| Repositories | {} |\n", report.repo_size_data.len()));

    if !report.language_data.is_empty() {
        output.push_str("\n## Languages\n\n");
        output.push_str("| Language | Repos | Share |\n|----------|-------|-------|\n");
        for language in &report.language_data {
            output.push_str(&format!(
                "| {} | {} | {:.2}% |\n",
                language.name, language.count, language.percentage
            ));
        }
    }

    if !report.commit_data.is_empty() {
        output.push_str("\n## Commit Trend\n\n");
        output.push_str("| Month | Commits |\n|-------|---------|\n");
        for month in &report.commit_data {
            output.push_str(&format!("| {} | {} |\n", month.month, month.commit_count));
        }
    }

    if !report.top_repos.is_empty() {
        output.push_str("\n## Top Repositories\n\n");
        for repo in &report.top_repos {
            output.push_str(&format!("- [{}]({}) ★ {}\n", repo.name, repo.url, repo.stars));
        }
    }

    if !report.recent_activity.is_empty() {
        output.push_str("\n## Recent Activity\n\n");
        output.push_str("| When | Event | Repository |\n|------|-------|------------|\n");
        for entry in &report.recent_activity {
            let (kind, repo, when) = describe_activity(entry);
            output.push_str(&format!("| {} | {} | {} |\n", when, kind, repo));
        }
    }

    output
}
