use clap::{Parser, Subcommand};

use crate::board::{BoardError, JobBoard};
use crate::config::Config;
use crate::domain::{FilterSelection, Job, JobStatus, Selection};

#[derive(Debug, Parser)]
#[command(name = "job-board", version, about = "Job tracking board over a remote job store")]
pub struct Cli {
    /// Override JOB_STORE_URL
    #[arg(long, global = true)]
    pub store_url: Option<String>,

    /// Override BIND_ADDR
    #[arg(long)]
    pub bind: Option<String>,

    /// Override PORT
    #[arg(long)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP service (default)
    Serve,

    /// Print the job list once, optionally filtered
    List {
        /// Assignee label to show; repeat for several, `All` for everyone
        #[arg(long = "assignee")]
        assignees: Vec<String>,

        /// Status value or label to show; repeat for several
        #[arg(long = "status")]
        statuses: Vec<String>,
    },
}

impl Cli {
    /// Let command-line flags win over the environment
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.store_url {
            let url = url.trim_end_matches('/').to_string();
            if config.email_url == format!("{}/api/email", config.store_url) {
                config.email_url = format!("{}/api/email", url);
            }
            config.store_url = url;
        }
        if let Some(bind) = &self.bind {
            config.bind_addr = bind.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
    }
}

/// Turn `list` flags into a filter; no flags for a facet means everything
pub fn list_filter(assignees: &[String], statuses: &[String]) -> Result<FilterSelection, String> {
    let assignees = if assignees.is_empty() {
        Selection::All
    } else {
        Selection::from_labels(assignees.iter().cloned())
    };

    let statuses = if statuses.is_empty() || statuses.iter().any(|s| s == "All") {
        Selection::All
    } else {
        let labels = statuses
            .iter()
            .map(|raw| {
                JobStatus::parse(raw)
                    .map(|status| status.label())
                    .ok_or_else(|| format!("Unknown status '{}'", raw))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Selection::only(labels)
    };

    Ok(FilterSelection { assignees, statuses })
}

/// Render jobs as a plain text table
pub fn render_table(jobs: &[Job]) -> String {
    let header = ["ID", "JOB NUMBER", "DUE DATE", "MAX HOURS", "ASSIGNEE", "STATUS", "DESCRIPTION"];

    let rows: Vec<[String; 7]> = jobs
        .iter()
        .map(|job| {
            [
                job.id.to_string(),
                job.fields.job_number.clone(),
                job.fields.due_date.to_string(),
                job.fields.max_hours.to_string(),
                job.assignee_labels().collect::<Vec<_>>().join(", "),
                job.status().label().to_string(),
                job.fields.description.clone(),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(header.to_vec());
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

/// Load the board once and print the rows passing `filter`
pub async fn run_list(board: &JobBoard, filter: FilterSelection) -> Result<(), BoardError> {
    board.reload().await?;
    let view = board.set_filter(filter).await;

    print!("{}", render_table(&view.rows));
    println!("{} of {} jobs shown", view.rows.len(), view.total);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobId, NewJob, TeamMember};
    use chrono::NaiveDate;

    #[test]
    fn list_flags_become_a_filter() {
        let filter = list_filter(&["Luke".to_string()], &["blocked".to_string()]).unwrap();

        assert_eq!(filter.assignees, Selection::only(["Luke"]));
        assert_eq!(filter.statuses, Selection::only(["Blocked"]));
        assert_eq!(list_filter(&[], &[]).unwrap(), FilterSelection::default());
        assert!(list_filter(&[], &["someday".to_string()]).is_err());
    }

    #[test]
    fn parses_list_subcommand() {
        let cli = Cli::parse_from([
            "job-board",
            "--store-url",
            "http://store:3001",
            "list",
            "--assignee",
            "Dora",
            "--status",
            "Completed",
        ]);

        match cli.command {
            Some(Command::List { assignees, statuses }) => {
                assert_eq!(assignees, vec!["Dora"]);
                assert_eq!(statuses, vec!["Completed"]);
            }
            other => panic!("expected list, got {:?}", other),
        }
        assert_eq!(cli.store_url.as_deref(), Some("http://store:3001"));
    }

    #[test]
    fn store_url_flag_moves_default_email_endpoint() {
        let mut config = Config::from_lookup(|key| match key {
            "JOB_STORE_URL" => Some("http://old:1".to_string()),
            _ => None,
        })
        .unwrap();

        let cli = Cli::parse_from(["job-board", "--store-url", "http://new:2/", "--port", "9000"]);
        cli.apply(&mut config);

        assert_eq!(config.store_url, "http://new:2");
        assert_eq!(config.email_url, "http://new:2/api/email");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn table_has_header_and_aligned_rows() {
        let job = Job::new(
            JobId::new("3"),
            NewJob {
                job_number: "J-100".to_string(),
                job_link: None,
                due_date: NaiveDate::from_ymd_opt(2024, 7, 9).unwrap(),
                max_hours: 2.5,
                assignee: vec![TeamMember::new("luke", "Luke"), TeamMember::new("vera", "Vera")],
                description: "Check wiring".to_string(),
                status: JobStatus::Blocked,
            },
        );

        let table = render_table(&[job]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID  JOB NUMBER  DUE DATE"));
        assert!(lines[1].contains("J-100"));
        assert!(lines[1].contains("2024-07-09"));
        assert!(lines[1].contains("Luke, Vera"));
        assert!(lines[1].contains("Blocked"));
        assert_eq!(lines[0].find("JOB NUMBER"), lines[1].find("J-100"));
    }
}
