use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use raffle_core::{DrawSession, DrawTiming, Phase, RosterFile};
use std::io::Write;
use std::time::Duration;

#[derive(Args)]
pub struct DrawArgs {
    /// Seed for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the progress animation
    #[arg(long)]
    pub fast: bool,
}

pub async fn handle_draw_command(args: DrawArgs, store: &RosterFile) -> Result<()> {
    let roster = store.load().await.context("failed to load roster")?;
    let participants = roster.participants().to_vec();
    let prizes = roster.prizes().to_vec();

    let session = match args.seed {
        Some(seed) => {
            tracing::debug!("drawing with fixed seed {}", seed);
            DrawSession::seeded(seed)
        }
        None => DrawSession::new(),
    };
    let session = if args.fast {
        session.with_timing(DrawTiming::immediate())
    } else {
        session
    };

    session.start(participants, prizes.clone())?;
    println!(
        "Drawing {} prize tier(s) for {} participant(s)...",
        prizes.len(),
        roster.participants().len()
    );
    println!();

    // Poll the session view and render it: a progress line per prize,
    // winners appended as each prize resolves.
    let mut shown = 0usize;
    let mut line_open = false;
    loop {
        let view = session.view();

        if let Some(prize) = &view.current_prize {
            print!("\r  {:<24} {:>3}%", prize.name, view.progress);
            std::io::stdout().flush()?;
            line_open = true;
        }

        if view.winners.len() > shown {
            if line_open {
                println!();
                line_open = false;
            }
            for winner in &view.winners[shown..] {
                println!("      -> {}", winner.participant.name);
            }
            shown = view.winners.len();
        }

        if view.phase == Phase::Complete {
            break;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    if line_open {
        println!();
    }

    let view = session.view();
    println!();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Prize", "Slots", "Winners"]);
    for prize in &prizes {
        let names: Vec<String> = view
            .winners
            .iter()
            .filter(|w| w.prize.id == prize.id)
            .map(|w| w.participant.name.clone())
            .collect();
        table.add_row(vec![
            prize.name.clone(),
            prize.count.to_string(),
            names.join(", "),
        ]);
    }
    println!("{}", table);

    if let (Some(started), Some(finished)) = (view.started_at, view.finished_at) {
        let elapsed = (finished - started).num_milliseconds() as f64 / 1000.0;
        println!("Completed in {:.1}s ({} winners)", elapsed, view.winners.len());
    }

    Ok(())
}
