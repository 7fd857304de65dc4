use std::sync::Arc;

use chrono::{Days, NaiveDate};
use clap::Parser;
use color_eyre::eyre::{bail, Result, WrapErr};
use tokio::sync::mpsc;

use jobboard::action::Action;
use jobboard::board::{Board, Effect};
use jobboard::client::{JobClient, MemoryJobClient};
use jobboard::config::{Cli, Command, ConfigFile, Settings};
use jobboard::domain::{DropTarget, Job, SchedulePatch};
use jobboard::worker::{SyncHandle, SyncRequest, SyncWorker};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::resolve(&cli, ConfigFile::load());

    // Set up logging
    let _log_guard = match settings.log_file {
        Some(ref log_file) => {
            let file = std::fs::File::create(log_file)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_writer(writer)
                .with_ansi(false)
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .init();
            Some(guard)
        }
        None => None,
    };

    let client = MemoryJobClient::from_json_file(&settings.jobs_file)
        .wrap_err("failed to open jobs file")?;

    match cli.command {
        Command::Show { from, days } => {
            let session = Session::start(Arc::new(client)).await;
            render_board(&session.board, from, days);
        }
        Command::Move {
            job_id,
            target,
            simulate_failure,
        } => {
            if simulate_failure {
                client.fail_next_writes(1).await;
            }
            let mut session = Session::start(Arc::new(client)).await;
            run_move(&mut session, job_id, target).await?;
        }
    }

    Ok(())
}

/// Board plus the worker feeding it.
struct Session {
    board: Board,
    sync: SyncHandle,
    action_rx: mpsc::UnboundedReceiver<Action>,
    in_flight: usize,
}

impl Session {
    async fn start(client: Arc<dyn JobClient>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
        let (worker, sync) = SyncWorker::new(client, action_tx);
        tokio::spawn(worker.run());

        let mut session = Self {
            board: Board::new(),
            sync,
            action_rx,
            in_flight: 0,
        };
        session.dispatch(Action::Refresh);
        session.settle().await;
        session
    }

    fn dispatch(&mut self, action: Action) {
        let effects = self.board.update(action);
        self.handle_effects(effects);
    }

    /// Feed worker responses back into the board until nothing is outstanding.
    async fn settle(&mut self) {
        while self.in_flight > 0 {
            let Some(action) = self.action_rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            self.dispatch(action);
        }
    }

    fn handle_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadJobs => {
                    self.sync.send(SyncRequest::LoadJobs);
                }
                Effect::PersistSchedule {
                    job_id,
                    mutation_id,
                    update,
                } => {
                    self.sync.send(SyncRequest::PersistSchedule {
                        job_id,
                        mutation_id,
                        patch: update.into(),
                    });
                }
            }
            self.in_flight += 1;
        }
    }
}

async fn run_move(session: &mut Session, job_id: String, target: DropTarget) -> Result<()> {
    if let Some(err) = session.board.last_error.take() {
        bail!(err);
    }

    let effects = session.board.update(Action::DropJob {
        job_id: job_id.clone(),
        target,
    });
    if let Some(err) = session.board.last_error.take() {
        bail!(err);
    }

    for effect in &effects {
        if let Effect::PersistSchedule { update, .. } = effect {
            let patch = SchedulePatch::from(*update);
            println!("PATCH /jobs/{}", job_id);
            println!("{}", serde_json::to_string_pretty(&patch)?);
        }
    }
    if let Some(job) = session.board.job(&job_id) {
        println!();
        println!("optimistic:");
        print_job(job)?;
    }

    session.handle_effects(effects);
    session.settle().await;

    println!();
    match session.board.last_error.take() {
        Some(err) => println!("rolled back ({}):", err),
        None => println!("saved:"),
    }
    if let Some(job) = session.board.job(&job_id) {
        print_job(job)?;
    }
    Ok(())
}

fn print_job(job: &Job) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(job)?);
    Ok(())
}

fn render_board(board: &Board, from: Option<NaiveDate>, days: u32) {
    if let Some(err) = &board.last_error {
        eprintln!("{}", err);
        return;
    }

    let unscheduled = board.unscheduled_jobs();
    println!("Unscheduled ({})", unscheduled.len());
    for job in unscheduled {
        println!("  {} {:<10} {}", job.status.symbol(), job.id, job.title);
    }
    println!();

    let from = from
        .or_else(|| earliest_start(board))
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    for offset in 0..u64::from(days) {
        let Some(day) = from.checked_add_days(Days::new(offset)) else {
            break;
        };
        let jobs = board.jobs_on(day);
        let cards: Vec<String> = jobs
            .iter()
            .map(|job| format!("{} {} {}", job.status.symbol(), job.id, job.title))
            .collect();
        println!("{}  {}", day.format("%Y-%m-%d %a"), cards.join("  |  "));
    }
}

fn earliest_start(board: &Board) -> Option<NaiveDate> {
    board
        .jobs
        .data()?
        .iter()
        .filter_map(|job| job.scheduled_start_date)
        .min()
}
