//! Bookshelf - command-line front end for a personal book catalog

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf::{
    config::AppConfig,
    form::BookForm,
    models::{BookField, BookQuery, FilterOptions, YearRange},
    query::{type_options, BookFilter},
    AppError, AppState,
};

/// Manage a personal book catalog from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List books, optionally searched and filtered locally
    List {
        /// Case-insensitive text matched against title and author
        #[arg(short, long)]
        search: Option<String>,
        /// Exact type (genre)
        #[arg(long = "type")]
        genre: Option<String>,
        /// Earliest publication year (inclusive)
        #[arg(long)]
        min_year: Option<i32>,
        /// Latest publication year (inclusive)
        #[arg(long)]
        max_year: Option<i32>,
    },
    /// Ask the backend for matching books
    Find {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long = "type")]
        genre: Option<String>,
    },
    /// Show one book
    Show { id: String },
    /// Add a book
    Add(BookArgs),
    /// Change fields of an existing book
    Update {
        id: String,
        #[command(flatten)]
        fields: BookArgs,
    },
    /// Delete a book
    Delete { id: String },
    /// List the types in use (or the default suggestions)
    Types,
    /// Check that the backend is up
    Health,
}

/// Book fields; values are taken as typed and validated before sending
#[derive(Args, Debug)]
struct BookArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    isbn: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long = "type")]
    genre: Option<String>,
    #[arg(long)]
    pages: Option<String>,
    #[arg(long)]
    publisher: Option<String>,
    #[arg(long)]
    cover_image_url: Option<String>,
}

impl BookArgs {
    fn apply(self, form: &mut BookForm) {
        let fields = [
            (BookField::Title, self.title),
            (BookField::Author, self.author),
            (BookField::Year, self.year),
            (BookField::Isbn, self.isbn),
            (BookField::Description, self.description),
            (BookField::Type, self.genre),
            (BookField::Pages, self.pages),
            (BookField::Publisher, self.publisher),
            (BookField::CoverImageUrl, self.cover_image_url),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                form.set_field(field, value);
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    // Logs go to stderr; stdout carries the JSON output
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bookshelf={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }

    tracing::debug!("Using book service at {}", config.api.base_url);

    let state = AppState::new(config)?;
    let catalog = &state.services.catalog;

    match cli.command {
        Command::List {
            search,
            genre,
            min_year,
            max_year,
        } => {
            catalog.fetch_books().await?;
            let year_range = (min_year.is_some() || max_year.is_some()).then_some(YearRange {
                min: min_year,
                max: max_year,
            });
            let view = state.filtered_view(BookFilter::new(
                search.unwrap_or_default(),
                FilterOptions { genre, year_range },
            ));
            tracing::info!(
                "Showing {} of {} books",
                view.filtered_count(),
                view.total_count()
            );
            print_json(&view.books())?;
        }
        Command::Find {
            title,
            author,
            year,
            genre,
        } => {
            let books = catalog
                .search_books(&BookQuery {
                    title,
                    author,
                    year,
                    genre,
                })
                .await?;
            print_json(&books)?;
        }
        Command::Show { id } => {
            let book = catalog.fetch_book_by_id(&id).await?;
            print_json(&book)?;
        }
        Command::Add(fields) => {
            let mut form = state.new_form();
            fields.apply(&mut form);
            let book = submit(&mut form, &state).await?;
            print_json(&book)?;
        }
        Command::Update { id, fields } => {
            let existing = catalog.fetch_book_by_id(&id).await?;
            let mut form = state.edit_form(&existing);
            fields.apply(&mut form);
            let book = submit(&mut form, &state).await?;
            print_json(&book)?;
        }
        Command::Delete { id } => {
            catalog.delete_book(&id).await?;
            println!("Deleted {}", id);
        }
        Command::Types => {
            let books = catalog.fetch_books().await?;
            print_json(&type_options(&books))?;
        }
        Command::Health => {
            let health = state.services.health().await?;
            if !health.is_ok() {
                anyhow::bail!("Book service reported status '{}'", health.status);
            }
            print_json(&health)?;
        }
    }

    Ok(())
}

/// Submit a form; field errors are printed one per line
async fn submit(form: &mut BookForm, state: &AppState) -> anyhow::Result<bookshelf::models::Book> {
    match form.submit(&state.services.catalog).await {
        Ok(book) => Ok(book),
        Err(AppError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("{}: {}", field, message);
            }
            anyhow::bail!("{} invalid field(s)", errors.len())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
