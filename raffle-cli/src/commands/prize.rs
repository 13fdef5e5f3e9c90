use anyhow::{bail, Context, Result};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use raffle_core::{Prize, Roster, RosterFile};

#[derive(Subcommand)]
pub enum PrizeCommands {
    /// Add a prize tier
    Add {
        /// Prize name
        name: String,
        /// Number of winner slots
        #[arg(short, long, default_value_t = 1)]
        count: u32,
    },
    /// Update a prize tier's name and/or slot count
    Update {
        /// Index as shown by `raffle prize list`
        index: usize,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New slot count
        #[arg(short, long)]
        count: Option<u32>,
    },
    /// Remove a prize tier
    Remove {
        /// Index as shown by `raffle prize list`
        index: usize,
    },
    /// List all prize tiers in draw order
    List,
}

pub async fn handle_prize_command(cmd: PrizeCommands, store: &RosterFile) -> Result<()> {
    let mut roster = store.load().await.context("failed to load roster")?;

    match cmd {
        PrizeCommands::Add { name, count } => {
            let prize = roster.add_prize(&name, count).clone();
            store.save(&roster).await?;
            println!("Added prize '{}' with {} slot(s)", prize.name, prize.count);
        }

        PrizeCommands::Update { index, name, count } => {
            if name.is_none() && count.is_none() {
                println!("Nothing to update; pass --name and/or --count.");
                return Ok(());
            }

            let prize = prize_at(&roster, index)?;
            if let Some(name) = name {
                roster.rename_prize(prize.id, name)?;
            }
            if let Some(count) = count {
                roster.set_prize_count(prize.id, count)?;
            }
            store.save(&roster).await?;
            println!("Updated prize #{}", index);
        }

        PrizeCommands::Remove { index } => {
            let prize = prize_at(&roster, index)?;
            roster.remove_prize(prize.id)?;
            store.save(&roster).await?;
            println!("Removed prize '{}'", prize.name);
        }

        PrizeCommands::List => {
            if roster.prizes().is_empty() {
                println!("No prizes configured.");
                println!("Add one with: raffle prize add <name> --count <slots>");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["#", "Prize", "Slots"]);
            for (i, prize) in roster.prizes().iter().enumerate() {
                table.add_row(vec![
                    (i + 1).to_string(),
                    prize.name.clone(),
                    prize.count.to_string(),
                ]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn prize_at(roster: &Roster, index: usize) -> Result<Prize> {
    if index == 0 || index > roster.prizes().len() {
        bail!("no prize at index {} (see `raffle prize list`)", index);
    }
    Ok(roster.prizes()[index - 1].clone())
}
