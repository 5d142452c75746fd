use anyhow::Result;
use clap::{Parser, ValueEnum};
use is_terminal::IsTerminal;
use linediff::UnifiedOptions;
use linediff::artifacts::core::Output;
use linediff::artifacts::diff::unified::DEFAULT_CONTEXT;
use linediff::commands::diff::DiffCommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "linediff",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Compare two text files line by line",
    long_about = "Computes the shortest line edit script between two text files \
    and prints it as a unified diff.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(index = 1, help = "The original file")]
    old: PathBuf,
    #[arg(index = 2, help = "The modified file")]
    new: PathBuf,
    #[arg(
        short = 'U',
        long = "unified",
        default_value_t = DEFAULT_CONTEXT,
        help = "Number of context lines around each change"
    )]
    context: usize,
    #[arg(long, help = "Label of the original file in the header")]
    from_label: Option<String>,
    #[arg(long, help = "Label of the modified file in the header")]
    to_label: Option<String>,
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, help = "When to color the output")]
    color: ColorMode,
    #[arg(long, help = "Write to stdout even when it is a terminal")]
    no_pager: bool,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Log more details to stderr")]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    linediff::logging::init(cli.verbose);

    let terminal = std::io::stdout().is_terminal();
    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => colored::control::set_override(terminal),
    }

    let command = DiffCommand::new(
        cli.old,
        cli.new,
        cli.from_label,
        cli.to_label,
        UnifiedOptions::new(cli.context),
    );

    let mut output = Output::stdout(terminal && !cli.no_pager);
    command.run(&mut output)?;
    output.finish()
}
