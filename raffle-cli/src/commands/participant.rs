use anyhow::{bail, Context, Result};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::Confirm;
use raffle_core::{Participant, Roster, RosterFile};

#[derive(Subcommand)]
pub enum ParticipantCommands {
    /// Add a participant by name
    Add {
        /// Participant name (duplicates are permitted)
        name: String,
    },
    /// Rename a participant
    Rename {
        /// Index as shown by `raffle participant list`
        index: usize,
        /// New name
        name: String,
    },
    /// Remove a participant
    Remove {
        /// Index as shown by `raffle participant list`
        index: usize,
    },
    /// Replace the whole roster with N generated participants
    Generate {
        /// Number of participants to generate
        count: usize,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List all participants
    List,
}

pub async fn handle_participant_command(
    cmd: ParticipantCommands,
    store: &RosterFile,
) -> Result<()> {
    let mut roster = store.load().await.context("failed to load roster")?;

    match cmd {
        ParticipantCommands::Add { name } => {
            let participant = roster.add_participant(&name).clone();
            store.save(&roster).await?;
            println!("Added '{}' ({})", participant.name, participant.id);
        }

        ParticipantCommands::Rename { index, name } => {
            let participant = participant_at(&roster, index)?;
            roster.rename_participant(participant.id, &name)?;
            store.save(&roster).await?;
            println!("Renamed '{}' to '{}'", participant.name, name);
        }

        ParticipantCommands::Remove { index } => {
            let participant = participant_at(&roster, index)?;
            roster.remove_participant(participant.id)?;
            store.save(&roster).await?;
            println!("Removed '{}'", participant.name);
        }

        ParticipantCommands::Generate { count, yes } => {
            if !roster.participants().is_empty() && !yes {
                let confirm = Confirm::new()
                    .with_prompt(format!(
                        "Replace the current {} participant(s) with {} generated ones?",
                        roster.participants().len(),
                        count
                    ))
                    .default(false)
                    .interact()?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            roster.bulk_generate(count);
            store.save(&roster).await?;
            println!("Roster now holds {} generated participant(s)", count);
        }

        ParticipantCommands::List => {
            if roster.participants().is_empty() {
                println!("No participants yet.");
                println!("Add one with: raffle participant add <name>");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["#", "Name", "Id"]);
            for (i, participant) in roster.participants().iter().enumerate() {
                table.add_row(vec![
                    (i + 1).to_string(),
                    participant.name.clone(),
                    participant.id.to_string(),
                ]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn participant_at(roster: &Roster, index: usize) -> Result<Participant> {
    if index == 0 || index > roster.participants().len() {
        bail!(
            "no participant at index {} (see `raffle participant list`)",
            index
        );
    }
    Ok(roster.participants()[index - 1].clone())
}
