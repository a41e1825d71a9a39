//! Command-line entry point for the library catalog shell.

use std::io;

use clap::Parser;
use library_catalog::{
    Library, Shell, ShellOptions,
    library::DEFAULT_HISTORY_SIZE,
    observers::{NotificationService, TransitionLogger},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for the library catalog shell
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log catalog and lending activity to stderr
    #[arg(short, long, env = "LIBRARY_VERBOSE")]
    verbose: bool,

    /// Disable coloured output
    #[arg(long, env = "LIBRARY_NO_COLOR")]
    no_color: bool,

    /// Print listings and search results as JSON
    #[arg(long, env = "LIBRARY_JSON")]
    json: bool,

    /// Start with a small sample catalog and two members
    #[arg(long, env = "LIBRARY_DEMO")]
    demo: bool,

    /// Number of lending transitions kept in the history
    #[arg(long, env = "LIBRARY_HISTORY_SIZE", default_value_t = DEFAULT_HISTORY_SIZE)]
    history_size: usize,
}

/// Install the tracing subscriber; `RUST_LOG` overrides the verbosity flag
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "library_catalog=info" } else { "library_catalog=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Stock the library with a few books and members
fn seed_demo_catalog(library: &mut Library) {
    library.add_book("Dune", "Frank Herbert", "Science Fiction", "1965");
    library.add_book("The Hobbit", "J.R.R. Tolkien", "Fantasy", "1937");
    library.add_book("Pride and Prejudice", "Jane Austen", "Romance", "1813");
    library.add_book("The Left Hand of Darkness", "Ursula K. Le Guin", "Science Fiction", "1969");
    library.add_book("Beloved", "Toni Morrison", "Literary Fiction", "1987");

    library.add_member("Alice", "M1");
    library.add_member("Bob", "M2");
}

/// Parse flags, set up logging and run the shell on stdin/stdout
fn main() -> io::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let mut library = Library::with_history_size(args.history_size);
    library.register_observer(Box::new(TransitionLogger));
    library.register_observer(Box::new(NotificationService));

    if args.demo {
        seed_demo_catalog(&mut library);
        tracing::info!(
            books = library.book_count(),
            members = library.member_count(),
            "demo catalog loaded"
        );
    }

    let options = ShellOptions { json: args.json };
    let mut shell = Shell::new(library, io::stdin().lock(), io::stdout().lock(), options);
    shell.run()
}
