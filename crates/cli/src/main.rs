//! bookclub CLI: run the catalog service or browse it over HTTP.

use anyhow::Context;
use bookclub_client::{
    CatalogSession, CatalogState, FilterUpdate, Filters, HttpCatalogClient,
};
use bookclub_db::{Book, BookPatch, NewBook, SortField, SortOrder};
use bookclub_kernel::settings::Settings;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bookclub", version, about = "Bookstore catalog service and client")]
struct Cli {
    /// Base URL of a running catalog service; defaults to `client.base_url`.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service until interrupted.
    Serve,

    /// List one page of the catalog.
    List(ListArgs),

    /// Show a single book.
    Show {
        id: String,
    },

    /// Add a book.
    Add(AddArgs),

    /// Change fields of an existing book.
    Update {
        id: String,
        #[command(flatten)]
        fields: UpdateArgs,
    },

    /// Delete a book.
    Delete {
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Title,
    Author,
    Genre,
    PublishedYear,
    Price,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Title => SortField::Title,
            SortArg::Author => SortField::Author,
            SortArg::Genre => SortField::Genre,
            SortArg::PublishedYear => SortField::PublishedYear,
            SortArg::Price => SortField::Price,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, default_value = "1")]
    page: u64,

    /// Books per page; 0 lists everything.
    #[arg(long, default_value = "8")]
    limit: u64,

    #[arg(long, value_enum, default_value = "title")]
    sort_by: SortArg,

    #[arg(long, value_enum, default_value = "asc")]
    order: OrderArg,

    #[arg(long)]
    genre: Option<String>,

    #[arg(long)]
    author: Option<String>,

    /// Case-insensitive match on title, author, genre, or description.
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    min_year: Option<i32>,

    #[arg(long)]
    max_year: Option<i32>,

    #[arg(long)]
    min_price: Option<f64>,

    #[arg(long)]
    max_price: Option<f64>,
}

impl ListArgs {
    fn filter_update(&self) -> FilterUpdate {
        let mut update = FilterUpdate::default()
            .limit(self.limit)
            .sort(self.sort_by.into(), self.order.into())
            .years(self.min_year, self.max_year)
            .prices(self.min_price, self.max_price)
            .page(self.page);
        update.genre = self.genre.clone();
        update.author = self.author.clone();
        update.search = self.search.clone();
        update
    }
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    author: String,
    #[arg(long, default_value = "")]
    genre: String,
    #[arg(long)]
    published_year: Option<i32>,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, default_value = "")]
    image_url: String,
    #[arg(long, default_value = "")]
    book_url: String,
}

impl From<AddArgs> for NewBook {
    fn from(args: AddArgs) -> Self {
        Self {
            title: args.title,
            author: args.author,
            genre: args.genre,
            published_year: args.published_year,
            price: args.price,
            description: args.description,
            image_url: args.image_url,
            book_url: args.book_url,
        }
    }
}

#[derive(Args)]
struct UpdateArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    published_year: Option<i32>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
    #[arg(long)]
    book_url: Option<String>,
}

impl From<UpdateArgs> for BookPatch {
    fn from(args: UpdateArgs) -> Self {
        Self {
            title: args.title,
            author: args.author,
            genre: args.genre,
            published_year: args.published_year,
            price: args.price,
            description: args.description,
            image_url: args.image_url,
            book_url: args.book_url,
        }
    }
}

fn render_book(book: &Book) -> String {
    let mut line = format!("{}  {} by {}", book.id, book.title, book.author);
    match (book.genre.is_empty(), book.published_year) {
        (false, Some(year)) => line.push_str(&format!(" ({}, {year})", book.genre)),
        (false, None) => line.push_str(&format!(" ({})", book.genre)),
        (true, Some(year)) => line.push_str(&format!(" ({year})")),
        (true, None) => {}
    }
    line.push_str(&format!("  ${:.2}", book.price));
    line
}

fn render_page(state: &CatalogState) -> String {
    let window = state.window();
    let mut out = format!("{window} Books\n");
    for book in &state.books {
        out.push_str(&render_book(book));
        out.push('\n');
    }
    out.push_str(&format!(
        "Page {} of {}",
        state.pagination.current_page, state.pagination.total_pages
    ));
    out
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load bookclub settings")?;
    bookclub_telemetry::init(&settings.telemetry)?;

    let base_url = cli
        .base_url
        .unwrap_or_else(|| settings.client.base_url.clone());
    let session = CatalogSession::new(HttpCatalogClient::new(base_url), Filters::default());

    match cli.command {
        Command::Serve => {
            bookclub_app::run(settings, bookclub_http::shutdown_signal()).await?;
        }
        Command::List(args) => {
            let state = session.update_filters(args.filter_update()).await;
            if let Some(error) = &state.error {
                anyhow::bail!("could not list books: {error}");
            }
            println!("{}", render_page(&state));
        }
        Command::Show { id } => {
            let state = session.fetch_book_details(&id).await;
            let book = state
                .current_book
                .with_context(|| format!("book {id} could not be fetched"))?;
            println!("{}", render_book(&book));
            if let Some(description) = &book.description {
                println!("{description}");
            }
        }
        Command::Add(args) => {
            let book = session.add_book(&args.into()).await?;
            println!("added {}", render_book(&book));
        }
        Command::Update { id, fields } => {
            let book = session.update_book(&id, &fields.into()).await?;
            println!("updated {}", render_book(&book));
        }
        Command::Delete { id } => {
            session.delete_book(&id).await?;
            println!("deleted {id}");
        }
    }

    Ok(())
}
