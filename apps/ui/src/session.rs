//! The interactive session: a strictly user-driven command loop over the
//! controller. One command, one action, one render — no polling, no
//! background work beyond the spinner animation while a ranking call is in
//! flight.

use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::controller::{Matcher, Notice};
use crate::view::{self, loading::LoadingIndicator};

const PROMPT: &str = "matcher> ";

pub async fn run(mut matcher: Matcher) -> Result<()> {
    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{PROMPT}");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "jd" => match words.next() {
                Some(path) => report(matcher.select_job_file(path)),
                None => println!("usage: jd <path>"),
            },
            "resumes" => {
                let paths: Vec<PathBuf> = words.map(PathBuf::from).collect();
                if paths.is_empty() {
                    println!("usage: resumes <path>...");
                } else {
                    report(matcher.select_resume_files(paths));
                }
            }
            "upload-jd" => report(matcher.upload_job_description().await),
            "upload-resumes" => report(matcher.upload_resumes().await),
            "rank" => {
                let spinner = spawn_spinner();
                let notice = matcher.calculate_ranks().await;
                spinner.abort();
                print!("\r{:<70}\r", ""); // clear the spinner line
                report(notice);
                print!("{}", view::render_results(&matcher.ranked_results()));
            }
            "show" => print!("{}", view::render_results(&matcher.ranked_results())),
            "status" => print_status(&matcher),
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("unknown command: {other} (try `help`)"),
        }
    }

    Ok(())
}

/// Redraws the loading indicator until aborted. The command loop does not
/// read the next command while an action is awaited, so the triggering
/// control is naturally disabled while its call is outstanding.
fn spawn_spinner() -> tokio::task::JoinHandle<()> {
    tokio::spawn(async {
        let mut interval = tokio::time::interval(Duration::from_millis(120));
        let mut tick = 0usize;
        loop {
            interval.tick().await;
            print!(
                "\r{}  ({})",
                LoadingIndicator::frame(tick),
                LoadingIndicator::HINT
            );
            let _ = std::io::stdout().flush();
            tick += 1;
        }
    })
}

fn report(notice: Notice) {
    match notice {
        Notice::JobFileSelected { name } => println!("Job description selected: {name}"),
        Notice::ResumesSelected { count } => println!("{count} resume(s) selected"),
        Notice::JobDescriptionUploaded => println!("Job Description Uploaded!"),
        Notice::JobDescriptionUploadFailed { reason } => {
            println!("Failed to upload job description! ({reason})")
        }
        Notice::ResumesUploaded { count } => println!("Resumes Uploaded! ({count} file(s))"),
        Notice::ResumesUploadFailed { reason } => println!("Failed to upload resumes! ({reason})"),
        Notice::RanksUpdated { count } => println!("Ranking complete: {count} result(s)"),
        Notice::RankingFailed { reason } => println!("Ranking failed: {reason}"),
        Notice::Ignored { reason } => println!("Nothing to do: {reason}"),
    }
}

fn print_status(matcher: &Matcher) {
    match matcher.job_file() {
        Some(file) => println!("job description: {}", file.file_name()),
        None => println!("job description: (none selected)"),
    }
    println!("resumes selected: {}", matcher.resume_files().len());
    println!("results held: {}", matcher.results().len());
    if matcher.is_loading() {
        println!("{}", LoadingIndicator::CAPTION);
    }
}

fn print_help() {
    println!("Resume Matcher Tool");
    println!("  jd <path>            select the job description");
    println!("  resumes <path>...    select candidate resumes (replaces selection)");
    println!("  upload-jd            upload the selected job description");
    println!("  upload-resumes       upload the selected resumes");
    println!("  rank                 calculate rankings over what was uploaded");
    println!("  show                 re-render the current rankings");
    println!("  status               current selections and result count");
    println!("  help                 this message");
    println!("  quit                 exit");
}
