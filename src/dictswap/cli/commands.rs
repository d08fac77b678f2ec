use super::render::{
    eprint_messages, print_messages, render_dictionaries, render_highlighted, render_replaced,
    render_rules,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use colored::Colorize;
use dictswap::api::DictApi;
use dictswap::commands::rules::RuleUpdate;
use dictswap::commands::CmdResult;
use dictswap::error::Result;
use dictswap::init::initialize;
use dictswap::model::Rule;
use dictswap::store::fs_backend::FsBackend;
use dictswap::textio;
use std::io::Read;
use std::path::{Path, PathBuf};

struct AppContext {
    api: DictApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Dicts => handle_listing(ctx.api.list_dictionaries()?),
        Commands::Create { name } => handle_listing(ctx.api.create_dictionary(&name)?),
        Commands::Delete { name } => handle_listing(ctx.api.delete_dictionary(&name)?),
        Commands::Use { names } => handle_listing(ctx.api.use_dictionaries(&names)?),
        Commands::Rules { name } => handle_listing(ctx.api.list_rules(&name)?),
        Commands::Add {
            name,
            src,
            dst,
            disabled,
        } => {
            let rule = if disabled {
                Rule::disabled(src, dst)
            } else {
                Rule::new(src, dst)
            };
            handle_listing(ctx.api.add_rule(&name, rule)?)
        }
        Commands::Edit {
            name,
            position,
            src,
            dst,
        } => handle_listing(ctx.api.update_rule(&name, position, RuleUpdate { src, dst })?),
        Commands::Remove { name, position } => {
            handle_listing(ctx.api.remove_rule(&name, position)?)
        }
        Commands::Move {
            name,
            position,
            direction,
        } => handle_listing(ctx.api.move_rule(&name, position, direction.into())?),
        Commands::Enable { name, position } => {
            handle_listing(ctx.api.enable_rule(&name, position)?)
        }
        Commands::Disable { name, position } => {
            handle_listing(ctx.api.disable_rule(&name, position)?)
        }
        Commands::Apply {
            file,
            dicts,
            out,
            json,
        } => handle_apply(&mut ctx, file, &dicts, out, json),
        Commands::Highlight { file, dicts, json } => handle_highlight(&ctx, file, &dicts, json),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.data_dir.clone())?;
    for notice in ctx.notices() {
        eprintln!("{}", notice.yellow());
    }
    Ok(AppContext { api: ctx.api })
}

/// Commands whose result is a dictionary or rule listing plus messages.
fn handle_listing(result: CmdResult) -> Result<()> {
    if !result.dictionaries.is_empty() {
        print!("{}", render_dictionaries(&result.dictionaries));
    }
    if !result.rules.is_empty() {
        print!("{}", render_rules(&result.rules));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_apply(
    ctx: &mut AppContext,
    file: Option<PathBuf>,
    dicts: &[String],
    out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let input = read_input(file.as_deref())?;
    let result = ctx.api.apply(dicts, &input)?;
    let Some(view) = &result.replaced else {
        eprint_messages(&result.messages);
        return Ok(());
    };

    if let Some(path) = &out {
        textio::write_text(path, &view.output)?;
        log::info!("wrote output to {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else if out.is_none() {
        print!("{}", render_replaced(view));
    }
    eprint_messages(&result.messages);
    Ok(())
}

fn handle_highlight(
    ctx: &AppContext,
    file: Option<PathBuf>,
    dicts: &[String],
    json: bool,
) -> Result<()> {
    let input = read_input(file.as_deref())?;
    let result = ctx.api.highlight(dicts, &input)?;

    if let Some(view) = &result.highlighted {
        if json {
            println!("{}", serde_json::to_string_pretty(view)?);
        } else {
            print!("{}", render_highlighted(view));
        }
    }
    eprint_messages(&result.messages);
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => textio::read_text(path),
        None => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            textio::decode_bytes(&bytes)
        }
    }
}
