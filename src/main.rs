use clap::Parser;
use miette::Result;
use invm::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    invm::core::logging::init(global.verbose, global.quiet);
    tracing::debug!(format = ?global.format, empty = global.empty, "starting");

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => invm::cli::commands::shell::run(&global),
        Commands::Part(cmd) => invm::cli::commands::part::run(cmd, &global),
        Commands::Product(cmd) => invm::cli::commands::product::run(cmd, &global),
        Commands::Config(cmd) => invm::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => invm::cli::commands::completions::run(args),
    }
}
