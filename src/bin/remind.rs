use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use std::env;
use std::path::PathBuf;

use remind::format::{format_moment, tabular_output};
use remind::reminder::Reminder;
use remind::setup_logger;
use remind::store::ReminderStore;
use remind::time_expr::{self, from_timestamp, local_now, local_offset};
use remind::trace::Stopwatch;

const DEFAULT_DB: &str = "./reminders.json";

#[derive(Parser)]
#[command(author, version, about, long_about=None)]
struct Cli {
    /// Verbose, sets log level to debug
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Reminder file, defaults to $REMIND_DB or ./reminders.json
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Add {
        /// The what
        #[arg(short, long, default_value = "")]
        msg: String,

        /// The when. Format: '+N[m|h|d][@hh[:mm]]'
        #[arg(short, long)]
        start: String,

        /// The end. Same format as start
        #[arg(short, long)]
        end: Option<String>,

        /// Pretend the current time is this many seconds since the epoch
        #[arg(long, hide = true)]
        now: Option<f64>,
    },
    Show,
}

fn main() -> Result<()> {
    let watch = Stopwatch::start("remind");
    let cli = Cli::parse();
    setup_logger(cli.verbose);

    let db = cli
        .db
        .or_else(|| env::var_os("REMIND_DB").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB));
    debug!("using reminder store {}", db.display());
    let store = ReminderStore::new(&db);

    match cli.command {
        Command::Add {
            msg,
            start,
            end,
            now,
        } => {
            let now = match now {
                Some(secs) => from_timestamp(secs)
                    .ok_or_else(|| anyhow!("invalid --now {secs}: out of range"))?
                    .to_offset(local_offset()),
                None => local_now(),
            };
            let start = time_expr::parse(&start, now).context("invalid --start")?;
            let mut reminder = Reminder::new(msg, start);
            if let Some(end) = end {
                let end = time_expr::parse(&end, now).context("invalid --end")?;
                reminder = reminder.with_end(end);
            }
            debug!("adding reminder {}", reminder);
            store
                .append(reminder)
                .with_context(|| format!("fail to add reminder to {}", db.display()))?;
            println!("{}", format_moment(start));
            println!("Successfully added the reminder!");
        }
        Command::Show => {
            let reminders = store
                .load()
                .with_context(|| format!("fail to read reminders from {}", db.display()))?;
            print!("{}", tabular_output(&reminders));
        }
    }

    watch.finish();
    Ok(())
}
