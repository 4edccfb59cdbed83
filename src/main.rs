#![warn(clippy::pedantic)]

use std::process;

use args::{Args, Command};
use clap::Parser;
use dialoguer::{theme::ColorfulTheme, FuzzySelect, Input, Password};
use log::LevelFilter;
use slackfari::add_team::AddTeamOutcome;
use slackfari::auth::validate_token;
use slackfari::conversations::format_created;
use slackfari::{Channelable, Config, Error, Result, Session, Sidebar, SlackClient, TeamStore};
use terminal::{create_spinner, get_formatted_left_output, OutputColor};

mod args;
mod terminal;

async fn start(args: Args) -> Result<()> {
    let config = Config::new(args.api_base, args.prefs, args.token, args.team)?;
    let store = config.store();
    let client = SlackClient::new(config.api_base.clone());

    match args.command {
        Command::Teams => list_teams(&store),
        Command::AddTeam { name } => {
            let session = match config.resolve_session(&store) {
                Ok(session) => session,
                Err(Error::NoActiveTeam) => Session::default(),
                Err(e) => return Err(e),
            };
            add_team(Sidebar::new(client, session, store), name).await
        }
        Command::List => {
            let mut sidebar = open_sidebar(client, &config).await?;
            load_rows(&mut sidebar).await?;

            for row in sidebar.rows() {
                println!("{}", describe(row));
            }
            Ok(())
        }
        Command::Send { to, text } => {
            let mut sidebar = open_sidebar(client, &config).await?;
            load_rows(&mut sidebar).await?;

            let target = match to {
                Some(target) => sidebar.select_by_name(&target)?.label(),
                None => {
                    let labels: Vec<String> =
                        sidebar.rows().iter().map(Channelable::label).collect();
                    let selection = FuzzySelect::with_theme(&ColorfulTheme::default())
                        .with_prompt("Send to")
                        .default(0)
                        .items(&labels)
                        .interact()
                        .map_err(prompt_error)?;
                    sidebar.select(selection)?.label()
                }
            };

            let pb = create_spinner(&format!(": {target}"));
            let sent = sidebar.send(&text).await;
            pb.finish_and_clear();
            sent?;

            println!(
                "{} message to {target}",
                get_formatted_left_output("Sent", &OutputColor::Green)
            );
            Ok(())
        }
    }
}

async fn open_sidebar(client: SlackClient, config: &Config) -> Result<Sidebar<SlackClient>> {
    let sidebar = Sidebar::open(client, config)?;

    let pb = create_spinner(": token");
    let validated = validate_token(sidebar.client(), sidebar.session()).await;
    pb.finish_and_clear();

    println!(
        "{} token for {}",
        get_formatted_left_output("Validated", &OutputColor::Green),
        validated?
    );

    Ok(sidebar)
}

async fn load_rows(sidebar: &mut Sidebar<SlackClient>) -> Result<()> {
    let pb = create_spinner(": conversations");
    let loaded = sidebar.appear().await.map(<[Channelable]>::len);
    pb.finish_and_clear();

    println!(
        "{} {} conversations",
        get_formatted_left_output("Found", &OutputColor::Green),
        loaded?
    );
    Ok(())
}

async fn add_team(mut sidebar: Sidebar<SlackClient>, name: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Team name")
            .interact_text()
            .map_err(prompt_error)?,
    };
    let token = prompt_password_input("Enter team token: ")?;

    let pb = create_spinner(": team info");
    let added = sidebar.add_team(&name, &token).await;
    pb.finish_and_clear();

    match added? {
        AddTeamOutcome::Saved(record) => println!(
            "{} team {} ({})",
            get_formatted_left_output("Saved", &OutputColor::Green),
            record,
            record.image
        ),
        AddTeamOutcome::AlreadySaved(record) => println!(
            "{} team {} is already saved",
            get_formatted_left_output("Skipped", &OutputColor::Yellow),
            record
        ),
    }
    Ok(())
}

fn list_teams(store: &TeamStore) -> Result<()> {
    let teams = store.list()?;

    if teams.is_empty() {
        println!(
            "{} no saved teams in {}",
            get_formatted_left_output("Empty", &OutputColor::Yellow),
            store.path().display()
        );
    }

    for team in teams {
        println!("{team}\t{}", team.image);
    }
    Ok(())
}

fn describe(row: &Channelable) -> String {
    let detail = match row {
        Channelable::User(view_model) => view_model.user.display_name().to_string(),
        Channelable::Channel(view_model) => format!(
            "{} members, created {}",
            view_model.channel.num_members,
            format_created(view_model.channel.created)
        ),
        Channelable::Group(view_model) => {
            format!("private, created {}", format_created(view_model.group.created))
        }
    };

    let archived = if row.is_archived() { " (archived)" } else { "" };

    format!("{:<7} {}\t{detail}{archived}", row.kind().friendly(), row.label())
}

fn prompt_password_input(prompt: &str) -> Result<String> {
    Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()
        .map_err(prompt_error)
}

fn prompt_error(e: dialoguer::Error) -> Error {
    match e {
        dialoguer::Error::IO(e) => Error::Prompt(e),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!(
            "{} could not start runtime: {e}",
            get_formatted_left_output("Error", &OutputColor::Red)
        );
        process::exit(1);
    });

    rt.block_on(async {
        let _ = start(args).await.map_err(|e| {
            eprintln!(
                "{} {}",
                get_formatted_left_output("Error", &OutputColor::Red),
                e
            );

            process::exit(1);
        });
    });
}
