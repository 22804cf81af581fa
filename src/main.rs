use clap::Parser;
use dialoguer::Select;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use food_lookup_rs::classify::Budget;
use food_lookup_rs::cli::{Cli, Command};
use food_lookup_rs::error::Result;
use food_lookup_rs::interface::{
    display_food_list, display_labels, display_shopping_list, prompt_budget, prompt_criteria,
    prompt_food_name, prompt_grams, prompt_yes_no, suggest_names,
};
use food_lookup_rs::pipeline::FilterCriteria;
use food_lookup_rs::session::Session;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.ingest_mode();

    let mut session = Session::new();
    session.load_dataset(&cli.file, mode).await?;
    session.set_budget(Budget::from(cli.budget));

    match cli.command.unwrap_or_default() {
        Command::Search(args) => cmd_search(&mut session, args.into()),
        Command::Totals { items } => cmd_totals(&mut session, &items),
        Command::Categories => {
            display_labels(&session.categories(), "Categories");
            Ok(())
        }
        Command::Interactive => cmd_interactive(&mut session),
    }
}

/// Print the foods matching the given criteria.
fn cmd_search(session: &mut Session, criteria: FilterCriteria) -> Result<()> {
    let budget = session.budget();
    let view = session.apply_filters(criteria);
    display_food_list(&view, budget);
    Ok(())
}

/// Add every item to a fresh list and print it.
fn cmd_totals(session: &mut Session, items: &[(String, f64)]) -> Result<()> {
    for (name, grams) in items {
        if let Err(e) = session.add_item(name, *grams) {
            eprintln!("Skipping '{}': {}", name, e);
            let names = session.food_names();
            let suggestions = suggest_names(&names, name, 3);
            if !suggestions.is_empty() {
                eprintln!("  Did you mean: {}?", suggestions.join(", "));
            }
        }
    }

    display_shopping_list(&session.list_contents(), &session.get_totals());
    Ok(())
}

/// Menu loop. Rejected input is reported and the loop continues.
fn cmd_interactive(session: &mut Session) -> Result<()> {
    println!("Loaded {} foods", session.foods().len());

    let actions = [
        "Filter foods",
        "Show foods",
        "Set carbs budget",
        "Add item",
        "Remove item",
        "Change item quantity",
        "Show shopping list",
        "Reset shopping list",
        "Quit",
    ];

    loop {
        let choice = Select::new()
            .with_prompt("What next?")
            .items(&actions)
            .default(1)
            .interact()?;

        let outcome = match choice {
            0 => prompt_criteria(session).map(|criteria| {
                let budget = session.budget();
                display_food_list(&session.apply_filters(criteria), budget);
            }),
            1 => {
                display_food_list(&session.view(), session.budget());
                Ok(())
            }
            2 => prompt_budget(session.budget()).and_then(|input| {
                session.set_budget_input(&input)?;
                display_food_list(&session.view(), session.budget());
                Ok(())
            }),
            3 => with_food_and_grams(session, |s, name, grams| s.add_item(name, grams)),
            4 => prompt_food_name(session).map(|name| {
                if let Some(name) = name {
                    session.remove_item(&name);
                }
            }),
            5 => with_food_and_grams(session, |s, name, grams| s.set_item_quantity(name, grams)),
            6 => {
                display_shopping_list(&session.list_contents(), &session.get_totals());
                Ok(())
            }
            7 => prompt_yes_no("Clear the whole shopping list?", false).map(|confirmed| {
                if confirmed {
                    session.reset_list();
                }
            }),
            _ => return Ok(()),
        };

        if let Err(e) = outcome {
            println!("{}", e);
        }
    }
}

/// Prompt for a food and a gram quantity, then apply `action`.
fn with_food_and_grams<F>(session: &mut Session, action: F) -> Result<()>
where
    F: FnOnce(&mut Session, &str, f64) -> Result<()>,
{
    let Some(name) = prompt_food_name(session)? else {
        return Ok(());
    };
    let grams = prompt_grams()?;
    action(session, &name, grams)?;
    display_shopping_list(&session.list_contents(), &session.get_totals());
    Ok(())
}
