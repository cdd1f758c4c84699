use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use toolbelt::calculator::{self, CalculatorState, parse_keys};
use toolbelt::clipboard::copy_to_clipboard;
use toolbelt::color::{self, ColorAction, ColorState, ColorValue, HexError};
use toolbelt::config::{Config, StoreKind};
use toolbelt::converter::{self, Category, ConverterAction, ConverterState, resolve_unit};
use toolbelt::items::{CalculationItem, ColorItem, ConversionItem, ItemKind};
use toolbelt::session::{IdentityProvider, LocalIdentity, User};
use toolbelt::store::{FileStore, MemoryStore, RecordStore, save_item, set_display_name};
use toolbelt::ui;

#[derive(Debug, Parser)]
#[command(name = "toolbelt", version, about = "Calculator, unit converter and color tool")]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Press calculator keys, e.g. `toolbelt calc 12 + 7 =`.
    Calc {
        #[arg(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Convert a value between two units, e.g. `toolbelt convert -c length mile km 3`.
    Convert {
        /// Unit category; defaults to `default_category` from the config.
        #[arg(short, long)]
        category: Option<Category>,
        from: String,
        to: String,
        #[arg(default_value = "1", allow_hyphen_values = true)]
        value: String,
        /// Swap the units after converting, carrying the result over, and
        /// list both conversions.
        #[arg(long)]
        swap: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List categories, or the units of one category.
    Units { category: Option<Category> },
    /// Inspect a color given as hex, RGB or HSL.
    Color {
        #[command(subcommand)]
        input: ColorInput,
        /// Print the values without the colored swatch.
        #[arg(long, global = true)]
        plain: bool,
        /// Copy one representation to the clipboard.
        #[arg(long, value_enum, global = true)]
        copy: Option<ColorFormat>,
        /// Save the color for the signed-in user.
        #[arg(long, global = true)]
        save: bool,
    },
    /// Items saved by the signed-in user.
    Saved {
        #[command(subcommand)]
        command: SavedCommand,
    },
    /// The signed-in user's profile.
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Sign in or out.
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Copy the result to the clipboard.
    #[arg(long)]
    copy: bool,
    /// Save the result for the signed-in user.
    #[arg(long)]
    save: bool,
}

#[derive(Debug, Subcommand)]
enum ColorInput {
    Hex { hex: String },
    Rgb {
        #[arg(allow_negative_numbers = true)]
        r: i64,
        #[arg(allow_negative_numbers = true)]
        g: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },
    Hsl {
        #[arg(allow_negative_numbers = true)]
        h: f64,
        #[arg(allow_negative_numbers = true)]
        s: f64,
        #[arg(allow_negative_numbers = true)]
        l: f64,
    },
    Random,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorFormat {
    Hex,
    Rgb,
    Hsl,
}

#[derive(Debug, Subcommand)]
enum SavedCommand {
    List {
        #[arg(long)]
        kind: Option<ItemKind>,
    },
    Delete { id: Uuid },
    /// Copy a saved item's value to the clipboard.
    Copy { id: Uuid },
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    Show,
    SetName { name: String },
}

#[derive(Debug, Subcommand)]
enum AuthCommand {
    SignIn { email: String },
    SignOut,
    Whoami,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "toolbelt=debug" } else { "toolbelt=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(config: &Config) -> Box<dyn RecordStore> {
    match config.store {
        StoreKind::File => Box::new(FileStore::new(&config.data_dir)),
        StoreKind::Memory => Box::new(MemoryStore::new()),
    }
}

/// Everything a command may need, built once from the config.
struct App {
    config: Config,
    identity: LocalIdentity,
    store: Box<dyn RecordStore>,
}

impl App {
    fn user(&self) -> Result<&User> {
        self.identity
            .require_user()
            .context("run `toolbelt auth sign-in <email>` first")
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    debug!(?config, "config loaded");
    let identity =
        LocalIdentity::load(config.session_path()).context("failed to load session")?;
    let store = open_store(&config);
    let mut app = App {
        config,
        identity,
        store,
    };

    match cli.command {
        Command::Calc { keys, output } => run_calc(&app, &keys.join(" "), output).await,
        Command::Convert {
            category,
            from,
            to,
            value,
            swap,
            output,
        } => {
            let category = app.config.converter_category(category);
            run_convert(&app, category, &from, &to, value, swap, output).await
        }
        Command::Units { category } => {
            run_units(category, app.config.default_category);
            Ok(())
        }
        Command::Color {
            input,
            plain,
            copy,
            save,
        } => run_color(&app, input, !plain, copy, save).await,
        Command::Saved { command } => run_saved(&app, command).await,
        Command::Profile { command } => run_profile(&app, command).await,
        Command::Auth { command } => run_auth(&mut app, command),
    }
}

async fn run_calc(app: &App, keys: &str, output: OutputArgs) -> Result<()> {
    let actions = parse_keys(keys)?;
    let state = actions
        .into_iter()
        .fold(CalculatorState::new(), calculator::reduce);
    println!("{}", ui::render_calculator(&state));

    if output.copy {
        copy_to_clipboard(&state.display)?;
    }
    if output.save {
        let item = CalculationItem::from_state(&state)
            .ok_or_else(|| anyhow!("nothing to save: no calculation was completed"))?;
        let user = app.user()?;
        let saved = save_item(app.store.as_ref(), user.id, item).await?;
        println!("saved {}", saved.id);
    }
    Ok(())
}

async fn run_convert(
    app: &App,
    category: Category,
    from: &str,
    to: &str,
    value: String,
    swap: bool,
    output: OutputArgs,
) -> Result<()> {
    let from_unit = resolve_unit(category, from)
        .ok_or_else(|| anyhow!("unknown {} unit {:?}", category.id(), from))?;
    let to_unit = resolve_unit(category, to)
        .ok_or_else(|| anyhow!("unknown {} unit {:?}", category.id(), to))?;

    let mut state = ConverterState::with_units(
        category,
        from_unit,
        to_unit,
        value,
        app.config.fraction_digits,
    );
    if swap {
        state = converter::reduce(state, ConverterAction::Swap);
        println!("{}", ui::render_converter(&state));
    } else {
        println!("{}", ui::render_conversion(&state));
    }

    if output.copy {
        copy_to_clipboard(&state.output_text())?;
    }
    if output.save {
        let item = ConversionItem::from_state(&state)
            .ok_or_else(|| anyhow!("nothing to save: {:?}", state.output_text()))?;
        let user = app.user()?;
        let saved = save_item(app.store.as_ref(), user.id, item).await?;
        println!("saved {}", saved.id);
    }
    Ok(())
}

/// Units of one category, or every category with the configured default
/// marked.
fn run_units(category: Option<Category>, default_category: Category) {
    match category {
        Some(category) => println!("{}", ui::render_units(category)),
        None => {
            for category in Category::ALL {
                let marker = if category == default_category { "*" } else { " " };
                println!("{} {:<12} {}", marker, category.id(), category.label());
            }
        }
    }
}

async fn run_color(
    app: &App,
    input: ColorInput,
    with_swatch: bool,
    copy: Option<ColorFormat>,
    save: bool,
) -> Result<()> {
    let initial = ColorValue::from_hex(&app.config.initial_color)
        .with_context(|| format!("invalid initial_color in config: {:?}", app.config.initial_color))?;
    let action = match input {
        ColorInput::Hex { hex } => {
            let hex = if hex.starts_with('#') { hex } else { format!("#{hex}") };
            if !color::is_hex_color(&hex) {
                return Err(HexError(hex).into());
            }
            ColorAction::EditHex(hex)
        }
        ColorInput::Rgb { r, g, b } => ColorAction::SetRgb(r, g, b),
        ColorInput::Hsl { h, s, l } => ColorAction::SetHsl(h, s, l),
        ColorInput::Random => ColorAction::Random,
    };
    let state = color::reduce(ColorState::new(initial), action);
    println!("{}", ui::render_color(&state, with_swatch));

    if let Some(format) = copy {
        let text = match format {
            ColorFormat::Hex => state.color.hex.clone(),
            ColorFormat::Rgb => state.color.css_rgb(),
            ColorFormat::Hsl => state.color.css_hsl(),
        };
        copy_to_clipboard(&text)?;
    }
    if save {
        let user = app.user()?;
        let saved = save_item(app.store.as_ref(), user.id, ColorItem::from(&state.color)).await?;
        println!("saved {}", saved.id);
    }
    Ok(())
}

async fn run_saved(app: &App, command: SavedCommand) -> Result<()> {
    let user = app.user()?;
    match command {
        SavedCommand::List { kind } => {
            let items = app.store.list_items(user.id, kind).await?;
            if items.is_empty() {
                println!("no saved items");
            }
            for item in &items {
                println!("{}", ui::render_item(item));
            }
        }
        SavedCommand::Delete { id } => {
            if !app.store.delete_item(user.id, id).await? {
                bail!("no saved item {id}");
            }
            println!("deleted {id}");
        }
        SavedCommand::Copy { id } => {
            let item = app
                .store
                .get_item(user.id, id)
                .await?
                .ok_or_else(|| anyhow!("no saved item {id}"))?;
            copy_to_clipboard(&item.payload.text_for_clipboard())?;
        }
    }
    Ok(())
}

async fn run_profile(app: &App, command: ProfileCommand) -> Result<()> {
    let user = app.user()?;
    match command {
        ProfileCommand::Show => {
            let profile = app.store.load_profile(user.id).await?;
            let name = profile
                .as_ref()
                .map(|p| p.display_name(&user.email))
                .unwrap_or(user.email.as_str());
            println!("{name} <{}>", user.email);
            if let Some(profile) = &profile {
                println!("updated {}", profile.updated_at.format("%Y-%m-%d %H:%M"));
            }
        }
        ProfileCommand::SetName { name } => {
            let profile = set_display_name(app.store.as_ref(), user.id, Some(name)).await?;
            println!("name set to {}", profile.display_name(&user.email));
        }
    }
    Ok(())
}

fn run_auth(app: &mut App, command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::SignIn { email } => {
            let user = app.identity.sign_in(&email)?;
            println!("signed in as {} ({})", user.email, user.id);
        }
        AuthCommand::SignOut => {
            app.identity.sign_out()?;
            println!("signed out");
        }
        AuthCommand::Whoami => match app.identity.current_user() {
            Some(user) => println!("{} ({})", user.email, user.id),
            None => println!("not signed in"),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_category_is_optional() {
        let cli = Cli::try_parse_from(["toolbelt", "convert", "mile", "km", "3"]).unwrap();
        let Command::Convert { category, from, value, .. } = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(category, None);
        assert_eq!(from, "mile");
        assert_eq!(value, "3");

        let cli =
            Cli::try_parse_from(["toolbelt", "convert", "-c", "temperature", "c", "f"]).unwrap();
        let Command::Convert { category, value, .. } = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(category, Some(Category::Temperature));
        assert_eq!(value, "1");
    }

    #[test]
    fn test_calc_flags_before_keys() {
        let cli = Cli::try_parse_from(["toolbelt", "calc", "--save", "2", "+", "3", "="]).unwrap();
        let Command::Calc { keys, output } = cli.command else {
            panic!("expected calc");
        };
        assert!(output.save);
        assert_eq!(keys.join(" "), "2 + 3 =");
    }
}
